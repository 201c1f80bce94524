//! # harem-core — Processador de Corpora HAREM
//!
//! Este crate converte a coleção dourada do HAREM (marcação XML com entidades
//! nomeadas em Português) em uma sequência ordenada de palavras, cada uma com sua
//! categoria canônica, e a entrega a um gerador de dados de treinamento.
//!
//! ## Arquitetura do Sistema
//!
//! O fluxo é estritamente linear:
//!
//! 1.  **Entrada**: Texto do corpus (String).
//! 2.  **Varredura** ([`scanner`]): A marcação vira segmentos de texto, com ou sem categoria bruta.
//! 3.  **Tokenização** ([`tokenizer`]): Cada segmento é dividido em palavras, sem pontuação de borda.
//! 4.  **Categorias** ([`category`]): `"OUTRA|ORGANIZACAO"` → `organization` via tabela configurável.
//! 5.  **Geração** ([`generator`]): A sequência de [`Token`]s é renderizada (ex: TSV do Stanford NER).
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use harem_core::Processor;
//!
//! let corpus = r#"<?xml version="1.0" encoding="ISO-8859-1"?>
//! <!DOCTYPE colHAREM>
//! <colHAREM versao="Segundo_dourada_com_relacoes_14Abril2010">
//!   <DOC DOCID="H2-dftre765">
//!     <P>divulgação em <EM ID="H2-dftre765-23" CATEG="LOCAL" TIPO="HUMANO">Portugal</EM></P>
//!   </DOC>
//! </colHAREM>"#;
//!
//! let processor: Processor = Processor::default();
//! let output = processor.process(corpus).unwrap();
//! assert_eq!(output, "divulgação\tO\nem\tO\nPortugal\tLOCATION\n");
//! ```
//!
//! ## Módulos Principais
//!
//! - [`processor`]: Orquestrador que conecta parser e gerador.
//! - [`parser`]: Composição de varredura, tokenização e categorias.
//! - [`config`]: Montagem do processador a partir de JSON.

pub mod category;
pub mod config;
pub mod error;
pub mod generator;
pub mod parser;
pub mod processor;
pub mod scanner;
pub mod tokenizer;

pub use category::{Category, CategoryTable};
pub use config::ProcessorConfig;
pub use error::{ConfigError, ParseError};
pub use generator::{Generator, StanfordNerGenerator};
pub use parser::{CorpusParser, HaremParser};
pub use processor::Processor;
pub use tokenizer::{PunctuationMode, Token};
