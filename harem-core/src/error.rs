//! # Erros do Processador de Corpus
//!
//! Apenas falhas **estruturais** da marcação são erros. Códigos de categoria
//! desconhecidos e corpora vazios são entradas válidas e nunca chegam aqui.

use std::io;

use thiserror::Error;

/// Resultado padrão das operações de parsing.
pub type Result<T, E = ParseError> = std::result::Result<T, E>;

/// Falha ao decompor a marcação em documentos, parágrafos e entidades.
///
/// Todos os offsets são índices de byte no texto do corpus.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// O texto terminou no meio de uma tag, comentário, declaração ou valor de atributo.
    #[error("fim inesperado do corpus (esperado {expected}) no byte {offset}")]
    UnexpectedEof { expected: &'static str, offset: usize },

    /// Tag de fechamento não corresponde ao elemento aberto mais interno.
    #[error("tag de fechamento </{found}> no byte {offset}, esperado </{expected}>")]
    MismatchedTag {
        expected: String,
        found: String,
        offset: usize,
    },

    /// Tag de fechamento sem nenhum elemento aberto.
    #[error("tag de fechamento </{found}> sem abertura no byte {offset}")]
    UnexpectedClosingTag { found: String, offset: usize },

    /// O corpus terminou com elementos ainda abertos.
    #[error("elemento <{name}> aberto no byte {offset} nunca foi fechado")]
    UnclosedElement { name: String, offset: usize },

    /// Sintaxe de tag inválida (nome ausente, atributo sem valor entre aspas...).
    #[error("tag malformada no byte {offset}: {reason}")]
    MalformedTag { reason: &'static str, offset: usize },
}

/// Falha ao carregar a configuração do processador.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("erro de I/O ao ler configuração: {0}")]
    Io(#[from] io::Error),

    #[error("configuração JSON inválida: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_offsets() {
        let err = ParseError::MismatchedTag {
            expected: "P".to_string(),
            found: "DOC".to_string(),
            offset: 42,
        };
        let msg = err.to_string();
        assert!(msg.contains("</DOC>"));
        assert!(msg.contains("</P>"));
        assert!(msg.contains("42"));
    }

    #[test]
    fn test_config_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: ConfigError = json_err.into();
        assert!(matches!(err, ConfigError::Json(_)));
    }
}
