//! Checking translations against the format strings of their originals.
//!
//! A message opts into checking through `<tag>-format` flags. Problems are
//! collected as [`FormatIssue`] values; nothing here aborts a run.

use std::fmt::{Display, Formatter};

use serde::{Serialize, Serializer};
use tracing::{debug, warn};

use crate::{
    format::{self, CheckMode, FormatMismatch, FormatParser, FormatSpec, InvalidFormat},
    options::CheckOptions,
    plural_rules::{PluralValidationReport, collect_plural_issues},
    types::{Message, MessageDomainStore, Occurrence},
};

/// What went wrong with one string of a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "reason", rename_all = "snake_case")]
pub enum Problem {
    /// The source text is not a valid format string; the message is not checked further.
    InvalidOriginal(#[serde(serialize_with = "serialize_display")] InvalidFormat),
    InvalidTranslation(#[serde(serialize_with = "serialize_display")] InvalidFormat),
    Mismatch(#[serde(serialize_with = "serialize_display")] FormatMismatch),
}

impl Problem {
    /// Issues in translated text, as opposed to issues in the source text.
    pub fn is_translation_side(&self) -> bool {
        !matches!(self, Problem::InvalidOriginal(_))
    }
}

impl Display for Problem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Problem::InvalidOriginal(reason) => write!(f, "invalid source format string: {}", reason),
            Problem::InvalidTranslation(reason) => write!(f, "invalid format string: {}", reason),
            Problem::Mismatch(reason) => write!(f, "{}", reason),
        }
    }
}

/// A format problem found in one field of one message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormatIssue {
    pub domain: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    pub msgid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Occurrence>,
    /// Format tag the message was checked with.
    pub format: &'static str,
    /// `msgid`, `msgid_plural`, `msgstr` or `msgstr[i]`.
    pub field: String,
    /// The offending text.
    pub text: String,
    pub problem: Problem,
}

impl Display for FormatIssue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.location {
            Some(location) => write!(f, "{}: ", location)?,
            None => write!(f, "msgid {:?}: ", self.msgid)?,
        }
        write!(
            f,
            "{} ({}-format) '{}': {}",
            self.field, self.format, self.text, self.problem
        )
    }
}

/// Outcome of checking a whole catalog.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct CheckReport {
    /// Messages that went through at least one format check.
    pub checked: usize,
    /// Messages skipped (header, fuzzy, untranslated, or no format flag).
    pub skipped: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<FormatIssue>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub plural_issues: Vec<PluralValidationReport>,
}

impl CheckReport {
    /// Number of issues that fail the run under the given strictness.
    pub fn error_count(&self, strict: bool) -> usize {
        let format_errors = self
            .issues
            .iter()
            .filter(|issue| strict || issue.problem.is_translation_side())
            .count();
        format_errors + self.plural_issues.len()
    }

    pub fn is_failure(&self, strict: bool) -> bool {
        self.error_count(strict) > 0
    }
}

/// Checks every message of `store`.
pub fn check_store(store: &MessageDomainStore, options: &CheckOptions) -> CheckReport {
    let mut report = CheckReport::default();

    for domain in &store.domains {
        for message in &domain.messages {
            if !is_checkable(message, options) {
                report.skipped += 1;
                continue;
            }
            report.checked += 1;
            report
                .issues
                .extend(check_message(&domain.name, message, options));
        }
    }

    report.plural_issues = collect_plural_issues(store);
    if options.noisy {
        for issue in &report.plural_issues {
            warn!("{}", issue);
        }
    }

    debug!(
        checked = report.checked,
        skipped = report.skipped,
        issues = report.issues.len(),
        plural_issues = report.plural_issues.len(),
        "checked format strings"
    );
    report
}

/// Checks one message against every grammar named by its format flags.
///
/// Returns no issues for messages that are not checkable (see
/// [`CheckReport::skipped`]).
pub fn check_message(domain: &str, message: &Message, options: &CheckOptions) -> Vec<FormatIssue> {
    let mut issues = Vec::new();
    if !is_checkable(message, options) {
        return issues;
    }

    for tag in message.format_tags() {
        let Some(parser) = format::lookup(tag) else {
            debug!(tag, msgid = %message.msgid, "no grammar registered for format tag");
            continue;
        };
        let mut ctx = IssueContext {
            domain,
            message,
            parser,
            issues: &mut issues,
            noisy: options.noisy,
        };
        check_with(&mut ctx);
    }

    issues
}

fn is_checkable(message: &Message, options: &CheckOptions) -> bool {
    !message.is_header()
        && (options.include_fuzzy || !message.is_fuzzy())
        && message.is_translated()
        && !message.format_tags().is_empty()
}

struct IssueContext<'a> {
    domain: &'a str,
    message: &'a Message,
    parser: &'static dyn FormatParser,
    issues: &'a mut Vec<FormatIssue>,
    noisy: bool,
}

impl IssueContext<'_> {
    fn report(&mut self, field: String, text: &str, problem: Problem) {
        let issue = FormatIssue {
            domain: self.domain.to_string(),
            context: self.message.context.clone(),
            msgid: self.message.msgid.clone(),
            location: self.message.location().cloned(),
            format: self.parser.name(),
            field,
            text: text.to_string(),
            problem,
        };
        if self.noisy {
            warn!("{}", issue);
        }
        self.issues.push(issue);
    }

    fn parse_original(&mut self, field: &str, text: &str) -> Option<FormatSpec> {
        match self.parser.parse(text) {
            Ok(spec) => Some(spec),
            Err(reason) => {
                self.report(field.to_string(), text, Problem::InvalidOriginal(reason));
                None
            }
        }
    }
}

fn check_with(ctx: &mut IssueContext<'_>) {
    let message = ctx.message;
    let Some(singular) = ctx.parse_original("msgid", &message.msgid) else {
        return;
    };

    // Plural translations are checked against the plural source text, and may
    // drop arguments (a language's "one" form often omits the number).
    let (original, mode) = match &message.msgid_plural {
        Some(plural) => match ctx.parse_original("msgid_plural", plural) {
            Some(spec) => (spec, CheckMode::AtLeast),
            None => return,
        },
        None => (singular, CheckMode::Equality),
    };

    let indexed = message.is_plural() || message.msgstr.len() > 1;
    for (i, form) in message.msgstr.iter().enumerate() {
        if form.is_empty() {
            continue;
        }
        let field = if indexed {
            format!("msgstr[{}]", i)
        } else {
            "msgstr".to_string()
        };
        match ctx.parser.parse(form) {
            Ok(translation) => {
                if let Err(mismatch) = ctx.parser.check(&original, &translation, mode) {
                    ctx.report(field, form, Problem::Mismatch(mismatch));
                }
            }
            Err(reason) => ctx.report(field, form, Problem::InvalidTranslation(reason)),
        }
    }
}

fn serialize_display<T: Display, S: Serializer>(value: &T, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}
