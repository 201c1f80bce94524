//! # Varredor de Marcação HAREM
//!
//! Percorre o texto do corpus e produz, em ordem de documento, uma lista de
//! [`Segment`]s: trechos de texto puro acompanhados (ou não) do valor bruto do
//! atributo de categoria da entidade que os envolve.
//!
//! ## Estrutura Reconhecida
//!
//! ```text
//! <?xml version="1.0" encoding="ISO-8859-1"?>     ← ignorado
//! <!DOCTYPE colHAREM>                              ← ignorado
//! <colHAREM versao="...">                          ← raiz (texto fora de DOC é ignorado)
//!   <DOC DOCID="H2-dftre765">                      ← documento
//!     <P>Nos finais da                             ← parágrafo (transparente)
//!       <EM ID="..." CATEG="OUTRO" COMENT="...">Idade Média</EM>
//!     </P>
//!   </DOC>
//! </colHAREM>
//! ```
//!
//! Não há árvore DOM: o varredor mantém apenas uma pilha de elementos abertos
//! e lê um único atributo (a categoria). Os demais atributos são verificados
//! sintaticamente e descartados.
//!
//! ## Regras
//!
//! - Texto só é coletado dentro de um elemento de documento.
//! - Parágrafos e elementos desconhecidos são transparentes.
//! - O texto de uma entidade recebe a categoria da entidade aberta mais interna.
//! - Cada trecho de texto vira um segmento próprio: fronteiras de elemento são
//!   sempre fronteiras de palavra.
//! - Marcação estruturalmente inválida falha imediatamente com [`ParseError`].

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{ParseError, Result};

/// Trecho contínuo de texto com a categoria bruta (ex: `"OUTRA|ORGANIZACAO"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    /// Valor bruto do atributo de categoria; `None` fora de entidades.
    pub category: Option<String>,
}

/// Nomes dos elementos e do atributo que o varredor reconhece.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkupSchema {
    /// Elemento de documento (`DOC`).
    pub document: String,
    /// Elemento de parágrafo (`P`).
    pub paragraph: String,
    /// Elemento de entidade nomeada (`EM`).
    pub entity: String,
    /// Atributo de categoria da entidade (`CATEG`).
    pub category_attribute: String,
}

impl Default for MarkupSchema {
    fn default() -> Self {
        Self {
            document: "DOC".to_string(),
            paragraph: "P".to_string(),
            entity: "EM".to_string(),
            category_attribute: "CATEG".to_string(),
        }
    }
}

/// Varre o corpus com o esquema HAREM padrão.
pub fn scan(corpus: &str) -> Result<Vec<Segment>> {
    scan_with_schema(corpus, &MarkupSchema::default())
}

/// Varre o corpus com um esquema de nomes customizado.
pub fn scan_with_schema(corpus: &str, schema: &MarkupSchema) -> Result<Vec<Segment>> {
    let mut scanner = Scanner::new(corpus, schema);
    scanner.run()?;
    debug!(
        documents = scanner.documents,
        paragraphs = scanner.paragraphs,
        segments = scanner.segments.len(),
        "varredura concluída"
    );
    Ok(scanner.segments)
}

#[derive(Debug)]
enum ElementKind {
    Document,
    Paragraph,
    /// Entidade com o valor bruto do atributo de categoria (se presente)
    Entity(Option<String>),
    Other,
}

#[derive(Debug)]
struct OpenElement<'a> {
    name: &'a str,
    offset: usize,
    kind: ElementKind,
}

struct Scanner<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
    schema: &'a MarkupSchema,
    stack: Vec<OpenElement<'a>>,
    segments: Vec<Segment>,
    documents: usize,
    paragraphs: usize,
}

impl<'a> Scanner<'a> {
    fn new(src: &'a str, schema: &'a MarkupSchema) -> Self {
        Self {
            src,
            bytes: src.as_bytes(),
            pos: 0,
            schema,
            stack: Vec::new(),
            segments: Vec::new(),
            documents: 0,
            paragraphs: 0,
        }
    }

    fn run(&mut self) -> Result<()> {
        while self.pos < self.bytes.len() {
            if self.bytes[self.pos] == b'<' {
                self.markup()?;
            } else {
                self.text();
            }
        }

        if let Some(open) = self.stack.pop() {
            return Err(ParseError::UnclosedElement {
                name: open.name.to_string(),
                offset: open.offset,
            });
        }
        Ok(())
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    /// Avança até logo depois de `terminator`, ou falha com EOF.
    fn skip_past(&mut self, terminator: &'static str) -> Result<&'a str> {
        let start = self.pos;
        match self.rest().find(terminator) {
            Some(idx) => {
                self.pos += idx + terminator.len();
                Ok(&self.src[start..start + idx])
            }
            None => Err(ParseError::UnexpectedEof {
                expected: terminator,
                offset: self.bytes.len(),
            }),
        }
    }

    fn skip_whitespace(&mut self) {
        while self.pos < self.bytes.len() && self.bytes[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn inside_document(&self) -> bool {
        self.stack
            .iter()
            .any(|open| matches!(open.kind, ElementKind::Document))
    }

    fn current_category(&self) -> Option<String> {
        self.stack.iter().rev().find_map(|open| match &open.kind {
            ElementKind::Entity(category) => Some(category.clone()),
            _ => None,
        })?
    }

    fn text(&mut self) {
        let start = self.pos;
        let end = self.rest().find('<').map_or(self.bytes.len(), |idx| start + idx);
        self.pos = end;
        let src = self.src;
        self.push_text(decode_entities(&src[start..end]));
    }

    fn push_text(&mut self, text: Cow<'_, str>) {
        if !self.inside_document() || text.trim().is_empty() {
            return;
        }
        let category = self.current_category();
        self.segments.push(Segment {
            text: text.into_owned(),
            category,
        });
    }

    fn markup(&mut self) -> Result<()> {
        let offset = self.pos;
        let rest = self.rest();

        if rest.starts_with("<?") {
            self.pos += 2;
            self.skip_past("?>")?;
            trace!(offset, "instrução de processamento ignorada");
        } else if rest.starts_with("<!--") {
            self.pos += 4;
            self.skip_past("-->")?;
            trace!(offset, "comentário ignorado");
        } else if rest.starts_with("<![CDATA[") {
            self.pos += 9;
            let content = self.skip_past("]]>")?;
            self.push_text(Cow::Borrowed(content));
        } else if rest.starts_with("<!") {
            self.pos += 2;
            self.declaration()?;
            trace!(offset, "declaração ignorada");
        } else if rest.starts_with("</") {
            self.pos += 2;
            self.end_tag(offset)?;
        } else {
            self.pos += 1;
            self.start_tag(offset)?;
        }
        Ok(())
    }

    /// `<!DOCTYPE ...>`, incluindo um eventual subconjunto interno entre colchetes.
    fn declaration(&mut self) -> Result<()> {
        let mut depth = 0usize;
        let mut quote: Option<u8> = None;

        while let Some(byte) = self.peek() {
            self.pos += 1;
            match (quote, byte) {
                (Some(q), b) if b == q => quote = None,
                (Some(_), _) => {}
                (None, b'"') | (None, b'\'') => quote = Some(byte),
                (None, b'[') => depth += 1,
                (None, b']') => depth = depth.saturating_sub(1),
                (None, b'>') if depth == 0 => return Ok(()),
                _ => {}
            }
        }

        Err(ParseError::UnexpectedEof {
            expected: ">",
            offset: self.bytes.len(),
        })
    }

    fn name(&mut self) -> Result<&'a str> {
        let start = self.pos;
        while let Some(byte) = self.peek() {
            if byte.is_ascii_whitespace() || matches!(byte, b'>' | b'/' | b'=' | b'<') {
                break;
            }
            self.pos += 1;
        }

        if self.pos == start {
            return match self.peek() {
                None => Err(ParseError::UnexpectedEof {
                    expected: "nome",
                    offset: self.pos,
                }),
                Some(_) => Err(ParseError::MalformedTag {
                    reason: "nome ausente",
                    offset: start,
                }),
            };
        }
        Ok(&self.src[start..self.pos])
    }

    fn end_tag(&mut self, offset: usize) -> Result<()> {
        let found = self.name()?;
        self.skip_whitespace();
        match self.peek() {
            Some(b'>') => self.pos += 1,
            Some(_) => {
                return Err(ParseError::MalformedTag {
                    reason: "tag de fechamento com conteúdo extra",
                    offset,
                })
            }
            None => {
                return Err(ParseError::UnexpectedEof {
                    expected: ">",
                    offset: self.pos,
                })
            }
        }

        match self.stack.pop() {
            Some(open) if open.name == found => Ok(()),
            Some(open) => Err(ParseError::MismatchedTag {
                expected: open.name.to_string(),
                found: found.to_string(),
                offset,
            }),
            None => Err(ParseError::UnexpectedClosingTag {
                found: found.to_string(),
                offset,
            }),
        }
    }

    fn start_tag(&mut self, offset: usize) -> Result<()> {
        let name = self.name()?;
        let is_entity = name == self.schema.entity;
        let mut category: Option<String> = None;

        let self_closing = loop {
            self.skip_whitespace();
            match self.peek() {
                Some(b'>') => {
                    self.pos += 1;
                    break false;
                }
                Some(b'/') => {
                    self.pos += 1;
                    if self.peek() != Some(b'>') {
                        return Err(ParseError::MalformedTag {
                            reason: "'/' fora de '/>'",
                            offset,
                        });
                    }
                    self.pos += 1;
                    break true;
                }
                Some(_) => {
                    let (attr, value) = self.attribute(offset)?;
                    if is_entity && attr == self.schema.category_attribute {
                        category = Some(value.into_owned());
                    }
                }
                None => {
                    return Err(ParseError::UnexpectedEof {
                        expected: ">",
                        offset: self.pos,
                    })
                }
            }
        };

        if self_closing {
            return Ok(());
        }

        let kind = if name == self.schema.document {
            self.documents += 1;
            ElementKind::Document
        } else if name == self.schema.paragraph {
            self.paragraphs += 1;
            ElementKind::Paragraph
        } else if is_entity {
            ElementKind::Entity(category)
        } else {
            ElementKind::Other
        };
        self.stack.push(OpenElement { name, offset, kind });
        Ok(())
    }

    /// `nome="valor"` ou `nome='valor'`.
    fn attribute(&mut self, tag_offset: usize) -> Result<(&'a str, Cow<'a, str>)> {
        let attr = self.name()?;
        self.skip_whitespace();
        match self.peek() {
            Some(b'=') => self.pos += 1,
            Some(_) => {
                return Err(ParseError::MalformedTag {
                    reason: "atributo sem '='",
                    offset: tag_offset,
                })
            }
            None => {
                return Err(ParseError::UnexpectedEof {
                    expected: "=",
                    offset: self.pos,
                })
            }
        }
        self.skip_whitespace();

        let terminator = match self.peek() {
            Some(b'"') => "\"",
            Some(b'\'') => "'",
            Some(_) => {
                return Err(ParseError::MalformedTag {
                    reason: "valor de atributo sem aspas",
                    offset: tag_offset,
                })
            }
            None => {
                return Err(ParseError::UnexpectedEof {
                    expected: "valor de atributo",
                    offset: self.pos,
                })
            }
        };
        self.pos += 1;
        let raw = self.skip_past(terminator)?;
        Ok((attr, decode_entities(raw)))
    }
}

/// Decodifica as entidades XML predefinidas e referências numéricas.
/// Referências desconhecidas são mantidas como estão.
fn decode_entities(raw: &str) -> Cow<'_, str> {
    if !raw.contains('&') {
        return Cow::Borrowed(raw);
    }

    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];
        let decoded = after
            .find(';')
            .filter(|&semi| semi <= 10)
            .and_then(|semi| decode_reference(&after[..semi]).map(|ch| (ch, semi)));

        match decoded {
            Some((ch, semi)) => {
                out.push(ch);
                rest = &after[semi + 1..];
            }
            None => {
                out.push('&');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

fn decode_reference(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let code = if let Some(hex) = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
                u32::from_str_radix(hex, 16).ok()?
            } else {
                name.strip_prefix('#')?.parse().ok()?
            };
            char::from_u32(code)
        }
    }
}
