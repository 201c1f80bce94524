//! # Configuração do Processador
//!
//! Permite montar um [`Processor`] a partir de um JSON:
//!
//! ```json
//! {
//!   "categories": { "FRUTA": "fruit", "LIVRO": "book" },
//!   "output_labels": { "fruit": "FRUIT", "book": "BOOK" },
//!   "punctuation": "basic"
//! }
//! ```
//!
//! Todos os campos são opcionais. Sem `categories`, vale a tabela padrão; com
//! `categories`, a tabela do usuário substitui a padrão por completo.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::category::CategoryTable;
use crate::error::ConfigError;
use crate::generator::StanfordNerGenerator;
use crate::parser::HaremParser;
use crate::processor::Processor;
use crate::scanner::MarkupSchema;
use crate::tokenizer::PunctuationMode;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessorConfig {
    /// Tabela código bruto → rótulo canônico
    pub categories: Option<CategoryTable>,
    /// Tabela rótulo canônico → classe do Stanford NER
    pub output_labels: Option<HashMap<String, String>>,
    pub punctuation: PunctuationMode,
    pub schema: Option<MarkupSchema>,
}

impl ProcessorConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&content)?;
        info!(path = %path.display(), "configuração carregada");
        Ok(config)
    }

    pub fn build_parser(&self) -> HaremParser {
        let parser = match &self.categories {
            Some(table) => HaremParser::with_categories(table.clone()),
            None => HaremParser::new(),
        };
        let parser = parser.with_punctuation(self.punctuation);
        match &self.schema {
            Some(schema) => parser.with_schema(schema.clone()),
            None => parser,
        }
    }

    pub fn build_generator(&self) -> StanfordNerGenerator {
        match &self.output_labels {
            Some(labels) => StanfordNerGenerator::with_labels(
                labels
                    .iter()
                    .map(|(category, label)| (category.as_str(), label.clone())),
            ),
            None => StanfordNerGenerator::new(),
        }
    }

    pub fn build(&self) -> Processor {
        Processor::new(self.build_parser(), self.build_generator())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CORPUS: &str = "<colHAREM><DOC><P>\n<EM CATEG=\"FRUTA\">Banana</EM> e <EM CATEG=\"ORGANIZACAO\">Inquisição</EM>\n</P></DOC></colHAREM>";

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = ProcessorConfig::from_json_str("{}").unwrap();
        assert_eq!(config, ProcessorConfig::default());
        let output = config.build().process(CORPUS).unwrap();
        assert_eq!(output, "Banana\tO\ne\tO\nInquisição\tORGANIZATION\n");
    }

    #[test]
    fn test_user_tables() {
        let config = ProcessorConfig::from_json_str(
            r#"{
                "categories": { "FRUTA": "fruit", "LIVRO": "book" },
                "output_labels": { "fruit": "FRUIT" },
                "punctuation": "basic"
            }"#,
        )
        .unwrap();
        assert_eq!(config.punctuation, PunctuationMode::Basic);
        let output = config.build().process(CORPUS).unwrap();
        assert_eq!(output, "Banana\tFRUIT\ne\tO\nInquisição\tO\n");
    }

    #[test]
    fn test_partial_schema() {
        let config =
            ProcessorConfig::from_json_str(r#"{ "schema": { "entity": "NE" } }"#).unwrap();
        let schema = config.schema.clone().unwrap();
        assert_eq!(schema.entity, "NE");
        assert_eq!(schema.document, "DOC");

        let output = config
            .build()
            .process("<DOC><P><NE CATEG=\"LOCAL\">Braga</NE></P></DOC>")
            .unwrap();
        assert_eq!(output, "Braga\tLOCATION\n");
    }

    #[test]
    fn test_invalid_json() {
        let err = ProcessorConfig::from_json_str(r#"{ "punctuation": "todas" }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = ProcessorConfig::from_json_file("/nao/existe/harem.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
