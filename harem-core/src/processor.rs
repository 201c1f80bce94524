//! # Processador de Corpus
//!
//! Orquestrador: `process(corpus) = generator.generate(parser.parse(corpus))`.
//!
//! Parser e gerador são injetados na construção; o padrão é
//! [`HaremParser`] + [`StanfordNerGenerator`].

use tracing::{info, instrument};

use crate::error::Result;
use crate::generator::{Generator, StanfordNerGenerator};
use crate::parser::{CorpusParser, HaremParser};

/// Conecta um [`CorpusParser`] a um [`Generator`].
#[derive(Debug, Clone)]
pub struct Processor<P = HaremParser, G = StanfordNerGenerator> {
    parser: P,
    generator: G,
}

impl<P, G> Processor<P, G>
where
    P: CorpusParser,
    G: Generator,
{
    pub fn new(parser: P, generator: G) -> Self {
        Self { parser, generator }
    }

    pub fn parser(&self) -> &P {
        &self.parser
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Converte o corpus em dados de treinamento. Falhas estruturais da marcação
    /// são propagadas sem saída parcial.
    #[instrument(level = "debug", skip_all, fields(corpus_len = corpus.len()))]
    pub fn process(&self, corpus: &str) -> Result<G::Output> {
        let tokens = self.parser.parse(corpus)?;
        info!(tokens = tokens.len(), "gerando saída");
        Ok(self.generator.generate(&tokens))
    }
}

impl Default for Processor {
    fn default() -> Self {
        Self::new(HaremParser::new(), StanfordNerGenerator::new())
    }
}
