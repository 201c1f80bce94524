//! # Resolução de Categorias
//!
//! O HAREM anota cada entidade com um ou mais códigos em maiúsculas no atributo
//! `CATEG` (ex: `"PESSOA"`, `"OUTRA|ORGANIZACAO"`). Este módulo converte esses
//! códigos brutos em **rótulos canônicos** (`person`, `location`, ...) usando
//! uma tabela de consulta.
//!
//! ## Regras
//!
//! | Entrada bruta          | Tabela padrão    |
//! |------------------------|------------------|
//! | `""`                   | sem categoria    |
//! | `"PESSOA"`             | `person`         |
//! | `"OUTRA\|ORGANIZACAO"` | `organization`   |
//! | `"PESSOA\|ORGANIZACAO"`| `person`         |
//! | `"ABSTRACCAO"`         | sem categoria    |
//!
//! A ambiguidade é resolvida pela **ordem de aparição** no corpus: o primeiro
//! código presente na tabela vence, independente da ordem da tabela.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Rótulo canônico de uma entidade (ex: `person`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    pub fn new(label: impl Into<String>) -> Self {
        Category(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Category {
    fn from(label: &str) -> Self {
        Category::new(label)
    }
}

/// Códigos reconhecidos pela tabela padrão
const DEFAULT_CATEGORIES: &[(&str, &str)] = &[
    ("PESSOA", "person"),
    ("LOCAL", "location"),
    ("ORGANIZACAO", "organization"),
];

/// Tabela código bruto → rótulo canônico.
///
/// Uma tabela fornecida pelo usuário **substitui** a padrão por completo: códigos
/// ausentes dela resolvem para "sem categoria", mesmo que a tabela padrão os conheça.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryTable {
    entries: HashMap<String, Category>,
}

impl CategoryTable {
    /// Tabela vazia: nenhum código é reconhecido.
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Constrói uma tabela a partir de pares `(código, rótulo)`.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Category>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(code, label)| (code.into(), label.into()))
                .collect(),
        }
    }

    pub fn get(&self, code: &str) -> Option<&Category> {
        self.entries.get(code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.entries.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pares da tabela ordenados por código (saída estável para UI e logs).
    pub fn sorted_entries(&self) -> Vec<(&str, &Category)> {
        let mut pairs: Vec<(&str, &Category)> = self
            .entries
            .iter()
            .map(|(code, label)| (code.as_str(), label))
            .collect();
        pairs.sort_by(|a, b| a.0.cmp(b.0));
        pairs
    }

    /// Resolve uma especificação bruta de categorias.
    ///
    /// Divide por `|` da esquerda para a direita e retorna o rótulo do primeiro
    /// código encontrado na tabela. String vazia ou nenhum código conhecido → `None`.
    pub fn resolve(&self, raw: &str) -> Option<Category> {
        raw.split('|')
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .find_map(|code| self.entries.get(code))
            .cloned()
    }
}

impl Default for CategoryTable {
    fn default() -> Self {
        Self::from_pairs(DEFAULT_CATEGORIES.iter().copied())
    }
}
