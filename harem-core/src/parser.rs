//! # Parser HAREM
//!
//! Compõe os três estágios do núcleo em uma única função
//! `parse(corpus) → Vec<Token>`:
//!
//! 1. **Varredura** ([`scanner`](crate::scanner)): marcação → segmentos em ordem de documento.
//! 2. **Tokenização** ([`tokenizer`](crate::tokenizer)): segmento → palavras.
//! 3. **Categorias** ([`category`](crate::category)): categoria bruta do segmento → rótulo canônico.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use harem_core::{CategoryTable, CorpusParser, HaremParser, Token};
//!
//! let corpus = r#"<colHAREM><DOC><P>Vivo em <EM CATEG="LOCAL">Portugal</EM></P></DOC></colHAREM>"#;
//!
//! let tokens = HaremParser::new().parse(corpus).unwrap();
//! assert_eq!(tokens.last(), Some(&Token::with_category("Portugal", "location")));
//!
//! // Tabela do usuário substitui a padrão: LOCAL deixa de ser reconhecido
//! let parser = HaremParser::with_categories(CategoryTable::from_pairs([("FRUTA", "fruit")]));
//! assert!(parser.parse(corpus).unwrap().iter().all(|t| t.category.is_none()));
//! ```

use rayon::prelude::*;
use tracing::debug;

use crate::category::{Category, CategoryTable};
use crate::error::Result;
use crate::scanner::{scan_with_schema, MarkupSchema};
use crate::tokenizer::{tokenize_with_mode, PunctuationMode, Token};

/// Capacidade mínima de um parser de corpus: texto → sequência de tokens.
pub trait CorpusParser {
    fn parse(&self, corpus: &str) -> Result<Vec<Token>>;
}

/// Parser para a marcação do HAREM (coleções douradas do Segundo HAREM).
///
/// A tabela de categorias é fixada na construção e nunca muda; chamadas
/// sucessivas a [`parse`](CorpusParser::parse) são independentes.
#[derive(Debug, Clone, Default)]
pub struct HaremParser {
    categories: CategoryTable,
    punctuation: PunctuationMode,
    schema: MarkupSchema,
}

impl HaremParser {
    /// Parser com a tabela de categorias padrão.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parser com uma tabela do usuário (substitui a padrão, sem mesclar).
    pub fn with_categories(categories: CategoryTable) -> Self {
        Self {
            categories,
            ..Self::default()
        }
    }

    pub fn with_punctuation(mut self, punctuation: PunctuationMode) -> Self {
        self.punctuation = punctuation;
        self
    }

    pub fn with_schema(mut self, schema: MarkupSchema) -> Self {
        self.schema = schema;
        self
    }

    pub fn categories(&self) -> &CategoryTable {
        &self.categories
    }

    /// Resolve uma especificação bruta (ex: `"OUTRA|ORGANIZACAO"`) com a tabela desta instância.
    pub fn extract_category(&self, raw: &str) -> Option<Category> {
        self.categories.resolve(raw)
    }

    /// Processa vários corpora independentes em paralelo.
    ///
    /// O resultado `i` corresponde ao corpus `i`; uma falha estrutural em um
    /// corpus não afeta os demais.
    pub fn parse_many<S>(&self, corpora: &[S]) -> Vec<Result<Vec<Token>>>
    where
        S: AsRef<str> + Sync,
    {
        corpora
            .par_iter()
            .map(|corpus| self.parse(corpus.as_ref()))
            .collect()
    }
}

impl CorpusParser for HaremParser {
    fn parse(&self, corpus: &str) -> Result<Vec<Token>> {
        let segments = scan_with_schema(corpus, &self.schema)?;

        let mut tokens = Vec::new();
        for segment in &segments {
            let category = segment
                .category
                .as_deref()
                .and_then(|raw| self.extract_category(raw));

            tokens.extend(
                tokenize_with_mode(&segment.text, self.punctuation)
                    .into_iter()
                    .map(|text| Token {
                        text,
                        category: category.clone(),
                    }),
            );
        }

        debug!(
            segments = segments.len(),
            tokens = tokens.len(),
            entities = tokens.iter().filter(|t| t.is_entity()).count(),
            "corpus processado"
        );
        Ok(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseError;

    fn corpus(body: &str) -> String {
        format!(
            "<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?>\n<!DOCTYPE colHAREM>\n<colHAREM versao=\"Segundo_dourada_com_relacoes_14Abril2010\">\n<DOC DOCID=\"H2-dftre765\">\n{body}\n</DOC>\n</colHAREM>\n"
        )
    }

    #[test]
    fn test_extract_category() {
        let parser = HaremParser::new();
        assert_eq!(parser.extract_category(""), None);
        assert_eq!(parser.extract_category("PESSOA"), Some(Category::new("person")));
        assert_eq!(
            parser.extract_category("OUTRA|ORGANIZACAO"),
            Some(Category::new("organization"))
        );
        assert_eq!(
            parser.extract_category("PESSOA|ORGANIZACAO"),
            Some(Category::new("person"))
        );
    }

    #[test]
    fn test_tagged_span_shares_category() {
        let text = corpus(
            "<P>por <EM ID=\"H2-dftre765-10\" CATEG=\"PESSOA\" TIPO=\"INDIVIDUAL\">John Gutenberg</EM></P>",
        );
        let tokens = HaremParser::new().parse(&text).unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::new("por"),
                Token::with_category("John", "person"),
                Token::with_category("Gutenberg", "person"),
            ]
        );
    }

    #[test]
    fn test_user_categories_override_default() {
        let parser = HaremParser::with_categories(CategoryTable::from_pairs([
            ("FRUTA", "fruit"),
            ("LIVRO", "book"),
        ]));
        let text = corpus(
            "<P><EM CATEG=\"FRUTA\">Banana</EM> <EM CATEG=\"ORGANIZACAO\">Inquisição</EM></P>",
        );
        let tokens = parser.parse(&text).unwrap();
        assert_eq!(
            tokens,
            vec![Token::with_category("Banana", "fruit"), Token::new("Inquisição")]
        );
    }

    #[test]
    fn test_parse_is_idempotent() {
        let parser = HaremParser::new();
        let text = corpus("<P>A <EM CATEG=\"LOCAL\">Alemanha</EM>, por fim.</P>");
        let first = parser.parse(&text).unwrap();
        let second = parser.parse(&text).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 4);
    }

    #[test]
    fn test_decomposed_accents_are_kept() {
        let tokens = HaremParser::new()
            .parse("<colHAREM><DOC><P>Jose\u{301} e <EM CATEG=\"LOCAL\">Cafe\u{301}</EM></P></DOC></colHAREM>")
            .unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::new("Jose\u{301}"),
                Token::new("e"),
                Token::with_category("Cafe\u{301}", "location"),
            ]
        );
    }

    #[test]
    fn test_basic_punctuation_mode() {
        let parser = HaremParser::new().with_punctuation(PunctuationMode::Basic);
        let tokens = parser.parse(&corpus("<P>Bovespa (IBOV).</P>")).unwrap();
        assert_eq!(tokens, vec![Token::new("Bovespa"), Token::new("(IBOV)")]);
    }

    #[test]
    fn test_malformed_markup_fails() {
        let err = HaremParser::new()
            .parse("<colHAREM><DOC><P>Foram <EM CATEG=\"LOCAL\">Portugal</P></DOC></colHAREM>")
            .unwrap_err();
        assert!(matches!(err, ParseError::MismatchedTag { .. }));
    }

    #[test]
    fn test_parse_many_preserves_order() {
        let parser = HaremParser::new();
        let corpora = vec![
            corpus("<P>um</P>"),
            "<DOC><P>quebrado</DOC>".to_string(),
            corpus("<P><EM CATEG=\"PESSOA\">Camões</EM></P>"),
        ];
        let results = parser.parse_many(&corpora);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap(), &vec![Token::new("um")]);
        assert!(results[1].is_err());
        assert_eq!(
            results[2].as_ref().unwrap(),
            &vec![Token::with_category("Camões", "person")]
        );
    }
}
