//! Format string grammars and the registry that maps format tags to them.
//!
//! A message flagged `csharp-format` must keep the `{n}` directives of its
//! source text in every translation; a message flagged `ycp-format` must keep
//! its `%n` directives, and so on. Each grammar implements [`FormatParser`]
//! and is registered under its tag.
//!
//! # Example
//!
//! ```rust
//! use pocat::format::{CheckMode, lookup};
//!
//! let parser = lookup("csharp").unwrap();
//! let original = parser.parse("{0} items for {1}")?;
//! let translation = parser.parse("{1}: {0} éléments")?;
//! assert_eq!(parser.directive_count(&original), 2);
//! assert!(parser.check(&original, &translation, CheckMode::Equality).is_ok());
//! # Ok::<(), pocat::format::InvalidFormat>(())
//! ```

pub mod csharp;
pub mod ycp;

use std::collections::BTreeMap;

use lazy_static::lazy_static;
use thiserror::Error;

lazy_static! {
    /// Format tag (the `<tag>` of a `<tag>-format` flag) → grammar.
    static ref REGISTRY: BTreeMap<&'static str, &'static dyn FormatParser> = {
        let mut m: BTreeMap<&'static str, &'static dyn FormatParser> = BTreeMap::new();
        m.insert("csharp", &csharp::CsharpFormat);
        m.insert("ycp", &ycp::YCP);
        // GNU Smalltalk's bindWith: uses the same syntax as YCP.
        m.insert("smalltalk", &ycp::SMALLTALK);
        m
    };
}

/// How strictly a translation must match its original.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckMode {
    /// Same directives on both sides.
    Equality,
    /// The translation may omit directives of the original but not add any.
    AtLeast,
}

/// Structural description of one parsed format string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatSpec {
    Csharp(csharp::Spec),
    Ycp(ycp::Spec),
}

impl FormatSpec {
    /// Total number of directives, literal escapes included where the grammar
    /// counts them.
    pub fn directive_count(&self) -> usize {
        match self {
            FormatSpec::Csharp(spec) => spec.directives,
            FormatSpec::Ycp(spec) => spec.directives,
        }
    }

    /// 1-based argument numbers referenced, for grammars where directive order
    /// does not matter. `None` when the grammar only tracks a count.
    pub fn used_arguments(&self) -> Option<Vec<usize>> {
        match self {
            FormatSpec::Csharp(_) => None,
            FormatSpec::Ycp(spec) => Some(spec.used_arguments()),
        }
    }
}

/// Why a string is not a valid format string. Directive numbers are 1-based.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidFormat {
    #[error("in the directive number {directive}, '{{' is not followed by an argument number")]
    MissingArgumentNumber { directive: usize },

    #[error("in the directive number {directive}, ',' is not followed by a number")]
    MissingWidth { directive: usize },

    #[error("the string ends in the middle of directive number {directive}")]
    UnterminatedDirective { directive: usize },

    #[error("the directive number {directive} ends with an invalid character {found:?} instead of '}}'")]
    InvalidTerminator { directive: usize, found: char },

    #[error("the string starts in the middle of a directive: found '}}' without matching '{{'")]
    UnmatchedClosingBrace,

    #[error("the string contains a lone '}}' after directive number {directive}")]
    LoneClosingBrace { directive: usize },

    #[error("in the directive number {directive}, the character {found:?} is not a digit between 1 and 9")]
    NotAnArgumentDigit { directive: usize, found: char },
}

impl InvalidFormat {
    /// The 1-based number of the offending directive, when one was reached.
    pub fn directive(&self) -> Option<usize> {
        match self {
            InvalidFormat::MissingArgumentNumber { directive }
            | InvalidFormat::MissingWidth { directive }
            | InvalidFormat::UnterminatedDirective { directive }
            | InvalidFormat::InvalidTerminator { directive, .. }
            | InvalidFormat::LoneClosingBrace { directive }
            | InvalidFormat::NotAnArgumentDigit { directive, .. } => Some(*directive),
            InvalidFormat::UnmatchedClosingBrace => None,
        }
    }
}

/// Why a translation's directives are incompatible with the original's.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatMismatch {
    #[error("number of format specifications does not match (original: {original}, translation: {translation})")]
    ArgumentCount { original: usize, translation: usize },

    #[error("a format specification for argument {argument} doesn't exist in the translation")]
    MissingArgument { argument: usize },

    #[error("a format specification for argument {argument} in the translation doesn't exist in the original")]
    ExtraArgument { argument: usize },

    #[error("format descriptors of different languages cannot be compared")]
    IncompatibleSpecs,
}

/// One format-string grammar.
///
/// Implementations are stateless; the registry hands out `&'static` references.
pub trait FormatParser: Send + Sync {
    /// The tag this grammar is registered under.
    fn name(&self) -> &'static str;

    /// Parses `text` into a descriptor.
    fn parse(&self, text: &str) -> Result<FormatSpec, InvalidFormat>;

    fn directive_count(&self, spec: &FormatSpec) -> usize {
        spec.directive_count()
    }

    /// Compares the descriptor of an original string with that of its translation.
    fn check(
        &self,
        original: &FormatSpec,
        translation: &FormatSpec,
        mode: CheckMode,
    ) -> Result<(), FormatMismatch>;
}

/// Looks up the grammar registered for a format tag such as `"csharp"`.
pub fn lookup(tag: &str) -> Option<&'static dyn FormatParser> {
    REGISTRY.get(tag).copied()
}

/// All registered format tags, sorted.
pub fn tags() -> Vec<&'static str> {
    REGISTRY.keys().copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_lookup() {
        assert_eq!(tags(), vec!["csharp", "smalltalk", "ycp"]);
        assert_eq!(lookup("csharp").unwrap().name(), "csharp");
        assert_eq!(lookup("smalltalk").unwrap().name(), "smalltalk");
        assert!(lookup("c").is_none());
    }

    #[test]
    fn test_specs_of_different_languages_do_not_compare() {
        let csharp = lookup("csharp").unwrap();
        let ycp = lookup("ycp").unwrap();
        let a = csharp.parse("{0}").unwrap();
        let b = ycp.parse("%1").unwrap();
        assert_eq!(
            csharp.check(&a, &b, CheckMode::Equality),
            Err(FormatMismatch::IncompatibleSpecs)
        );
        assert_eq!(
            ycp.check(&a, &b, CheckMode::AtLeast),
            Err(FormatMismatch::IncompatibleSpecs)
        );
    }

    #[test]
    fn test_invalid_format_messages_name_the_directive() {
        let err = InvalidFormat::InvalidTerminator {
            directive: 2,
            found: 'x',
        };
        assert_eq!(
            err.to_string(),
            "the directive number 2 ends with an invalid character 'x' instead of '}'"
        );
        assert_eq!(err.directive(), Some(2));
        assert_eq!(InvalidFormat::UnmatchedClosingBrace.directive(), None);
    }

    #[test]
    fn test_used_arguments() {
        let spec = lookup("ycp").unwrap().parse("%3 and %1").unwrap();
        assert_eq!(spec.used_arguments(), Some(vec![1, 3]));
        let spec = lookup("csharp").unwrap().parse("{3}").unwrap();
        assert_eq!(spec.used_arguments(), None);
    }
}
