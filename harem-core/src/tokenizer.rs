//! # Tokenizador de Trechos do Corpus
//!
//! Divide um trecho de texto (já sem marcação) em palavras. Cada palavra vira
//! um [`Token`] depois que o parser resolve a categoria do trecho.
//!
//! ## Algoritmo
//!
//! 1. Separa o texto em sequências de espaços em branco (inclui quebras de linha).
//! 2. Remove pontuação no **início** e no **fim** de cada candidato.
//! 3. Descarta candidatos que ficaram vazios (ex: um `"."` solto).
//!
//! Não há normalização: maiúsculas e acentos são preservados como estão.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use harem_core::tokenizer::{tokenize, tokenize_with_mode, PunctuationMode};
//!
//! // "Reforma", "Protestante", "No"
//! let words = tokenize("Reforma Protestante . No");
//!
//! // Modo Basic: apenas ponto e vírgula são removidos → "(IBOV)"
//! let basic = tokenize_with_mode("(IBOV).", PunctuationMode::Basic);
//! ```

use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;

use crate::category::Category;

/// Uma palavra do corpus com sua categoria canônica.
///
/// É o artefato de fronteira entre o parser e o gerador: imutável, produzido em
/// ordem de documento e entregue ao [`Generator`](crate::generator::Generator).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    /// A palavra, sem pontuação nas bordas (ex: "Portugal").
    pub text: String,
    /// Rótulo canônico (ex: `location`) ou `None` fora de entidades.
    pub category: Option<Category>,
}

impl Token {
    /// Token sem categoria.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            category: None,
        }
    }

    /// Token com categoria.
    pub fn with_category(text: impl Into<String>, category: impl Into<Category>) -> Self {
        Self {
            text: text.into(),
            category: Some(category.into()),
        }
    }

    pub fn is_entity(&self) -> bool {
        self.category.is_some()
    }
}

/// Quais caracteres de borda são tratados como pontuação.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PunctuationMode {
    /// **Padrão**: qualquer caractere não alfanumérico na borda é removido
    /// (`"(IBOV),"` → `"IBOV"`). Hífens e apóstrofos internos são mantidos, assim
    /// como acentos combinantes (texto em NFD).
    #[default]
    NonAlphanumeric,
    /// **Básico**: remove apenas ponto e vírgula.
    Basic,
}

impl PunctuationMode {
    fn is_strippable(self, ch: char) -> bool {
        match self {
            PunctuationMode::NonAlphanumeric => !ch.is_alphanumeric() && !is_combining_mark(ch),
            PunctuationMode::Basic => ch == '.' || ch == ',',
        }
    }
}

/// Tokeniza usando o modo padrão.
pub fn tokenize(text: &str) -> Vec<String> {
    tokenize_with_mode(text, PunctuationMode::default())
}

/// Tokeniza com o modo de pontuação especificado.
pub fn tokenize_with_mode(text: &str, mode: PunctuationMode) -> Vec<String> {
    text.split_whitespace()
        .map(|candidate| candidate.trim_matches(|ch: char| mode.is_strippable(ch)))
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect()
}
