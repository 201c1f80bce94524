//! # Geradores de Dados de Treinamento
//!
//! Um gerador recebe a sequência ordenada de [`Token`]s produzida pelo parser
//! e a renderiza em algum formato de saída. O formato é definido por cada
//! implementação; o núcleo só exige a trait [`Generator`].
//!
//! ## Stanford NER
//!
//! O gerador padrão escreve o formato TSV do Stanford NER (CRFClassifier):
//! uma palavra por linha, seguida de TAB e do rótulo de saída.
//!
//! ```text
//! Foram	O
//! divulgação	O
//! em	O
//! Portugal	LOCATION
//! ```

use std::collections::HashMap;

use crate::category::Category;
use crate::tokenizer::Token;

/// Capacidade mínima de um gerador: sequência de tokens → representação de saída.
pub trait Generator {
    type Output;

    fn generate(&self, tokens: &[Token]) -> Self::Output;
}

/// Rótulos de saída padrão (rótulo canônico → classe do Stanford NER)
const DEFAULT_OUTPUT_LABELS: &[(&str, &str)] = &[
    ("person", "PERSON"),
    ("location", "LOCATION"),
    ("organization", "ORGANIZATION"),
];

/// Classe usada para tokens sem categoria ou sem rótulo de saída.
pub const OUTSIDE_LABEL: &str = "O";

/// Gerador no formato TSV do Stanford NER.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StanfordNerGenerator {
    labels: HashMap<Category, String>,
}

impl StanfordNerGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Usa uma tabela de rótulos de saída própria (substitui a padrão).
    pub fn with_labels<I, K, V>(labels: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Category>,
        V: Into<String>,
    {
        Self {
            labels: labels
                .into_iter()
                .map(|(category, label)| (category.into(), label.into()))
                .collect(),
        }
    }

    /// Classe de saída de um token (ex: `LOCATION`, ou `O`).
    pub fn label_for(&self, token: &Token) -> &str {
        token
            .category
            .as_ref()
            .and_then(|category| self.labels.get(category))
            .map_or(OUTSIDE_LABEL, String::as_str)
    }
}

impl Default for StanfordNerGenerator {
    fn default() -> Self {
        Self::with_labels(DEFAULT_OUTPUT_LABELS.iter().copied())
    }
}

impl Generator for StanfordNerGenerator {
    type Output = String;

    fn generate(&self, tokens: &[Token]) -> String {
        let mut out = String::new();
        for token in tokens {
            out.push_str(&token.text);
            out.push('\t');
            out.push_str(self.label_for(token));
            out.push('\n');
        }
        out
    }
}
