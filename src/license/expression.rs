//! SPDX license-expression resolution on top of the `spdx` crate parser.
//!
//! Scanner output is looser than what `spdx::Expression` accepts: identifiers
//! come in any case and many are not on the SPDX list at all. Each word is
//! first folded onto its canonical spelling:
//!
//! - the SPDX list spelling for standard licenses and exceptions,
//! - the registered spelling for custom licenses,
//! - a normalized `LicenseRef-` / `DocumentRef-` prefix for other references.
//!
//! Words the list does not know reach the parser as a `LicenseRef-` stand-in
//! and are mapped back by their offset in the parser input.

use super::{canonical_spdx_id, ExprInfo, ExpressionResolver};
use crate::model::LICENSE_REF_PREFIX;
use indexmap::IndexSet;
use spdx::expression::{ExprNode, Operator};
use std::collections::HashMap;

const DOCUMENT_REF_PREFIX: &str = "DocumentRef-";

/// Lexed by `spdx` as a user-defined license reference
const UNLISTED_STAND_IN: &str = "LicenseRef-unlisted";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Word {
    Open,
    Close,
    And,
    Or,
    With,
    Id(String),
}

impl Word {
    fn as_str(&self) -> &str {
        match self {
            Self::Open => "(",
            Self::Close => ")",
            Self::And => "AND",
            Self::Or => "OR",
            Self::With => "WITH",
            Self::Id(id) => id,
        }
    }
}

/// Split on whitespace and parentheses, matching operators case-insensitively
fn split_words(expr: &str) -> Vec<Word> {
    let mut words = Vec::new();
    let mut chars = expr.chars().peekable();
    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
        } else if c == '(' {
            words.push(Word::Open);
            chars.next();
        } else if c == ')' {
            words.push(Word::Close);
            chars.next();
        } else {
            let mut word = String::new();
            while let Some(&c) = chars.peek() {
                if c.is_whitespace() || c == '(' || c == ')' {
                    break;
                }
                word.push(c);
                chars.next();
            }
            words.push(if word.eq_ignore_ascii_case("AND") {
                Word::And
            } else if word.eq_ignore_ascii_case("OR") {
                Word::Or
            } else if word.eq_ignore_ascii_case("WITH") {
                Word::With
            } else {
                Word::Id(word)
            });
        }
    }
    words
}

/// Input for `spdx::Expression::parse_mode`, plus the canonical id starting at
/// each identifier offset
fn parser_input(words: &[Word]) -> (String, HashMap<usize, &str>) {
    let mut input = String::new();
    let mut ids = HashMap::new();
    for word in words {
        if !input.is_empty() {
            input.push(' ');
        }
        match word {
            Word::Id(id) => {
                ids.insert(input.len(), id.as_str());
                let listed = canonical_spdx_id(id.strip_suffix('+').unwrap_or(id)).is_some();
                input.push_str(if listed { id } else { UNLISTED_STAND_IN });
            }
            other => input.push_str(other.as_str()),
        }
    }
    (input, ids)
}

/// Drop the parentheses wrapping the whole expression; `words` must be balanced
fn unwrapped(words: &[Word]) -> &[Word] {
    let mut closing = vec![0; words.len()];
    let mut open = Vec::new();
    for (index, word) in words.iter().enumerate() {
        match word {
            Word::Open => open.push(index),
            Word::Close => {
                if let Some(start) = open.pop() {
                    closing[start] = index;
                }
            }
            _ => {}
        }
    }

    let (mut start, mut end) = (0, words.len());
    while end - start >= 2 && words[start] == Word::Open && closing[start] == end - 1 {
        start += 1;
        end -= 1;
    }
    &words[start..end]
}

fn render(words: &[Word]) -> String {
    let mut out = String::new();
    let mut previous: Option<&Word> = None;
    for word in words {
        if previous.is_some_and(|p| *p != Word::Open) && *word != Word::Close {
            out.push(' ');
        }
        out.push_str(word.as_str());
        previous = Some(word);
    }
    out
}

/// Character set of an SPDX `idstring`, plus the `+` suffix and the
/// `DocumentRef-x:LicenseRef-y` separator.
fn is_valid_idstring(raw: &str) -> bool {
    let body = raw.strip_suffix('+').unwrap_or(raw);
    !body.is_empty()
        && body
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | ':'))
}

/// Rewrite a case-mangled reserved prefix into its canonical spelling
fn normalize_prefix(raw: &str, prefix: &str) -> Option<String> {
    let head = raw.get(..prefix.len())?;
    let tail = raw.get(prefix.len()..)?;
    (head.eq_ignore_ascii_case(prefix) && !tail.is_empty()).then(|| format!("{prefix}{tail}"))
}

/// [`ExpressionResolver`] for SPDX expressions using the bundled SPDX list
#[derive(Debug, Clone, Default)]
pub struct SpdxExpressionResolver {
    /// Upper-cased custom id -> registered spelling
    custom_ids: HashMap<String, String>,
}

impl SpdxExpressionResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolver that also restores the spelling of the given custom ids
    pub fn with_custom_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let custom_ids = ids
            .into_iter()
            .map(Into::into)
            .map(|id: String| (id.to_ascii_uppercase(), id))
            .collect();
        Self { custom_ids }
    }

    /// Canonical spelling of one identifier, `None` if it is not a legal idstring
    fn canonical_id(&self, raw: &str) -> Option<String> {
        if !is_valid_idstring(raw) {
            return None;
        }
        if let Some(id) = canonical_spdx_id(raw) {
            return Some(id.to_string());
        }
        if let Some(base) = raw.strip_suffix('+').and_then(canonical_spdx_id) {
            return Some(format!("{base}+"));
        }
        if let Some(id) = self.custom_ids.get(&raw.to_ascii_uppercase()) {
            return Some(id.clone());
        }
        match raw.split_once(':') {
            Some((document, license)) => Some(format!(
                "{}:{}",
                normalize_prefix(document, DOCUMENT_REF_PREFIX)?,
                normalize_prefix(license, LICENSE_REF_PREFIX)?
            )),
            None => Some(normalize_prefix(raw, LICENSE_REF_PREFIX).unwrap_or_else(|| raw.to_string())),
        }
    }

    fn canonical_words(&self, expression: &str) -> Option<Vec<Word>> {
        split_words(expression)
            .into_iter()
            .map(|word| match word {
                Word::Id(raw) => self.canonical_id(&raw).map(Word::Id),
                other => Some(other),
            })
            .collect()
    }
}

impl ExpressionResolver for SpdxExpressionResolver {
    fn resolve(&self, expression: &str) -> ExprInfo {
        let Some(words) = self.canonical_words(expression) else {
            return ExprInfo::invalid(expression);
        };
        let (input, ids_at) = parser_input(&words);
        let Ok(parsed) = spdx::Expression::parse_mode(&input, spdx::ParseMode::LAX) else {
            return ExprInfo::invalid(expression);
        };

        let mut licenses = IndexSet::new();
        for req in parsed.requirements() {
            if let Some(id) = ids_at.get(&(req.span.start as usize)) {
                licenses.insert((*id).to_string());
            }
            if let Some(exception) = &req.req.exception {
                licenses.insert(exception.name.to_string());
            }
        }

        // Nodes come in postfix order: the last one is the root
        let mut nodes = parsed.iter();
        let is_id_only = match (nodes.next(), nodes.next()) {
            (Some(ExprNode::Req(req)), None) => req.req.exception.is_none(),
            _ => false,
        };
        let or_present = matches!(parsed.iter().last(), Some(ExprNode::Op(Operator::Or)));

        ExprInfo {
            valid: true,
            is_id_only,
            or_present,
            licenses: licenses.into_iter().collect(),
            friendly_expr: render(unwrapped(&words)),
        }
    }
}
