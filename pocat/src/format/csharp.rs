//! Numbered-brace format strings, as used by .NET `String.Format`.
//!
//! Literal text, doubled braces `{{` / `}}` standing for a single brace, and
//! directives of the form `{index[,[-]width][:spec]}`. The spec part is free
//! text interpreted by the argument at runtime, so only the index is checked.

use super::{CheckMode, FormatMismatch, FormatParser, FormatSpec, InvalidFormat};

/// Descriptor of a parsed numbered-brace string.
///
/// No per-index usage is kept, so two strings with the same number of
/// directives compare equal even if the indices differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Spec {
    pub directives: usize,
    /// Highest argument index referenced plus one.
    pub numbered_arg_count: usize,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CsharpFormat;

impl FormatParser for CsharpFormat {
    fn name(&self) -> &'static str {
        "csharp"
    }

    fn parse(&self, text: &str) -> Result<FormatSpec, InvalidFormat> {
        parse(text).map(FormatSpec::Csharp)
    }

    fn check(
        &self,
        original: &FormatSpec,
        translation: &FormatSpec,
        mode: CheckMode,
    ) -> Result<(), FormatMismatch> {
        let (FormatSpec::Csharp(original), FormatSpec::Csharp(translation)) =
            (original, translation)
        else {
            return Err(FormatMismatch::IncompatibleSpecs);
        };
        check(original, translation, mode)
    }
}

/// Parses a numbered-brace format string.
pub fn parse(text: &str) -> Result<Spec, InvalidFormat> {
    let mut spec = Spec::default();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' => {
                if chars.next_if_eq(&'{').is_some() {
                    continue;
                }

                spec.directives += 1;
                let directive = spec.directives;

                match chars.peek() {
                    None => return Err(InvalidFormat::UnterminatedDirective { directive }),
                    Some(d) if d.is_ascii_digit() => {}
                    Some(_) => return Err(InvalidFormat::MissingArgumentNumber { directive }),
                }
                let mut number: usize = 0;
                while let Some(d) = chars.next_if(char::is_ascii_digit) {
                    let digit = d as usize - '0' as usize;
                    number = number.saturating_mul(10).saturating_add(digit);
                }

                if chars.next_if_eq(&',').is_some() {
                    chars.next_if_eq(&'-');
                    // End of input counts as a missing width, not an open brace.
                    if !chars.peek().is_some_and(char::is_ascii_digit) {
                        return Err(InvalidFormat::MissingWidth { directive });
                    }
                    while chars.next_if(char::is_ascii_digit).is_some() {}
                }

                if chars.next_if_eq(&':').is_some() {
                    while chars.next_if(|&c| c != '}').is_some() {}
                }

                match chars.next() {
                    Some('}') => {}
                    Some(found) => {
                        return Err(InvalidFormat::InvalidTerminator { directive, found });
                    }
                    None => return Err(InvalidFormat::UnterminatedDirective { directive }),
                }

                spec.numbered_arg_count = spec.numbered_arg_count.max(number.saturating_add(1));
            }
            '}' => {
                if chars.next_if_eq(&'}').is_some() {
                    continue;
                }
                return Err(if spec.directives == 0 {
                    InvalidFormat::UnmatchedClosingBrace
                } else {
                    InvalidFormat::LoneClosingBrace {
                        directive: spec.directives,
                    }
                });
            }
            _ => {}
        }
    }

    Ok(spec)
}

/// Compares directive counts only. Which indices the directives reference is
/// not looked at, so `{0}{1}` and `{5}{9}` are considered equivalent.
pub fn check(original: &Spec, translation: &Spec, mode: CheckMode) -> Result<(), FormatMismatch> {
    let mismatch = match mode {
        CheckMode::Equality => original.directives != translation.directives,
        CheckMode::AtLeast => original.directives < translation.directives,
    };
    if mismatch {
        return Err(FormatMismatch::ArgumentCount {
            original: original.directives,
            translation: translation.directives,
        });
    }
    Ok(())
}
