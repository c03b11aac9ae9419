//! Single-digit percent format strings (YCP `sformat`, GNU Smalltalk `bindWith:`).
//!
//! A directive is `%` followed by `%` (a literal percent) or by a digit `1`–`9`
//! naming the argument. Directive order is irrelevant; only which arguments
//! are referenced matters.

use super::{CheckMode, FormatMismatch, FormatParser, FormatSpec, InvalidFormat};

pub static YCP: DigitFormat = DigitFormat { name: "ycp" };
pub static SMALLTALK: DigitFormat = DigitFormat { name: "smalltalk" };

/// Descriptor of a parsed percent-digit string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Spec {
    /// Number of directives, `%%` included.
    pub directives: usize,
    /// `args_used[i]` is true when argument `i + 1` is referenced. The list is
    /// only as long as the highest referenced argument.
    pub args_used: Vec<bool>,
}

impl Spec {
    pub fn arg_count(&self) -> usize {
        self.args_used.len()
    }

    pub fn is_used(&self, index: usize) -> bool {
        self.args_used.get(index).copied().unwrap_or(false)
    }

    /// 1-based numbers of the referenced arguments, ascending.
    pub fn used_arguments(&self) -> Vec<usize> {
        self.args_used
            .iter()
            .enumerate()
            .filter(|(_, used)| **used)
            .map(|(i, _)| i + 1)
            .collect()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DigitFormat {
    name: &'static str,
}

impl FormatParser for DigitFormat {
    fn name(&self) -> &'static str {
        self.name
    }

    fn parse(&self, text: &str) -> Result<FormatSpec, InvalidFormat> {
        parse(text).map(FormatSpec::Ycp)
    }

    fn check(
        &self,
        original: &FormatSpec,
        translation: &FormatSpec,
        mode: CheckMode,
    ) -> Result<(), FormatMismatch> {
        let (FormatSpec::Ycp(original), FormatSpec::Ycp(translation)) = (original, translation)
        else {
            return Err(FormatMismatch::IncompatibleSpecs);
        };
        check(original, translation, mode)
    }
}

/// Parses a percent-digit format string.
pub fn parse(text: &str) -> Result<Spec, InvalidFormat> {
    let bytes = text.as_bytes();
    let mut spec = Spec::default();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'%' {
            i += 1;
            continue;
        }

        spec.directives += 1;
        let directive = spec.directives;

        match bytes.get(i + 1) {
            Some(b'%') => {}
            Some(d @ b'1'..=b'9') => {
                let index = (d - b'1') as usize;
                if spec.args_used.len() <= index {
                    spec.args_used.resize(index + 1, false);
                }
                spec.args_used[index] = true;
            }
            Some(_) => {
                // The byte after '%' may start a multi-byte character.
                let found = text[i + 1..].chars().next().unwrap_or('\u{FFFD}');
                return Err(InvalidFormat::NotAnArgumentDigit { directive, found });
            }
            None => return Err(InvalidFormat::UnterminatedDirective { directive }),
        }
        i += 2;
    }

    Ok(spec)
}

/// Compares argument usage index by index.
///
/// Under [`CheckMode::Equality`] both strings must reference the same set of
/// arguments. Under [`CheckMode::AtLeast`] the translation may leave out
/// arguments of the original but may not reference new ones.
pub fn check(original: &Spec, translation: &Spec, mode: CheckMode) -> Result<(), FormatMismatch> {
    let len = original.arg_count().max(translation.arg_count());
    for i in 0..len {
        let used_original = original.is_used(i);
        let used_translation = translation.is_used(i);
        let mismatch = match mode {
            CheckMode::Equality => used_original != used_translation,
            CheckMode::AtLeast => !used_original && used_translation,
        };
        if mismatch {
            let argument = i + 1;
            return Err(if used_original {
                FormatMismatch::MissingArgument { argument }
            } else {
                FormatMismatch::ExtraArgument { argument }
            });
        }
    }
    Ok(())
}
