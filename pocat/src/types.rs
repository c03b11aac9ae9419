//! Core, syntax-agnostic types for pocat.
//! Readers decode into these; writers serialize these.

use std::{
    collections::BTreeSet,
    fmt::{Display, Formatter},
};

use serde::{Deserialize, Serialize};

use crate::{error::Error, traits::CatalogFile};

/// Name of the domain holding messages that were not tagged with one.
pub const DEFAULT_DOMAIN: &str = "messages";

impl CatalogFile for MessageDomainStore {
    fn from_reader<R: std::io::BufRead>(reader: R) -> Result<Self, Error> {
        serde_json::from_reader(reader).map_err(Error::Parse)
    }

    fn to_writer<W: std::io::Write>(&self, mut writer: W) -> Result<(), Error> {
        serde_json::to_writer_pretty(&mut writer, self).map_err(Error::Parse)
    }
}

/// A source location a message was extracted from (`#: file:line` in PO).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Occurrence {
    pub file: String,
    pub line: usize,
}

impl Occurrence {
    pub fn new(file: impl Into<String>, line: usize) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }
}

impl Display for Occurrence {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// The identity of a message inside one domain.
///
/// Ordering is lexicographic on `(context, msgid)`; a message without context
/// sorts before any message with one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageKey {
    pub context: Option<String>,
    pub msgid: String,
}

/// A single catalog message.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Message {
    /// Disambiguating context (`msgctxt`).
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub context: Option<String>,

    /// Singular source text, the message key.
    pub msgid: String,

    /// Plural source text, present for plural-capable messages.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub msgid_plural: Option<String>,

    /// Translated forms. One for singular messages, one per plural form otherwise.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(default)]
    pub msgstr: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(default)]
    pub occurrences: Vec<Occurrence>,

    /// Translator comments.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(default)]
    pub comments: Vec<String>,

    /// Comments extracted from the program sources.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(default)]
    pub extracted_comments: Vec<String>,

    /// PO-style flags such as `fuzzy` or `csharp-format`.
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    #[serde(default)]
    pub flags: BTreeSet<String>,

    /// Number of input catalogs that defined this message. Set by the merge.
    #[serde(skip)]
    pub contributions: usize,
}

impl Message {
    /// Creates a singular message with one translated form.
    pub fn new(msgid: impl Into<String>, msgstr: impl Into<String>) -> Self {
        Self {
            context: None,
            msgid: msgid.into(),
            msgid_plural: None,
            msgstr: vec![msgstr.into()],
            occurrences: Vec::new(),
            comments: Vec::new(),
            extracted_comments: Vec::new(),
            flags: BTreeSet::new(),
            contributions: 0,
        }
    }

    /// Creates a plural message with the given translated forms.
    pub fn plural(
        msgid: impl Into<String>,
        msgid_plural: impl Into<String>,
        forms: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            msgid_plural: Some(msgid_plural.into()),
            msgstr: forms.into_iter().collect(),
            ..Self::new(msgid, "")
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_occurrence(mut self, file: impl Into<String>, line: usize) -> Self {
        self.occurrences.push(Occurrence::new(file, line));
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comments.push(comment.into());
        self
    }

    pub fn with_extracted_comment(mut self, comment: impl Into<String>) -> Self {
        self.extracted_comments.push(comment.into());
        self
    }

    pub fn with_flag(mut self, flag: impl Into<String>) -> Self {
        self.flags.insert(flag.into());
        self
    }

    pub fn key(&self) -> MessageKey {
        MessageKey {
            context: self.context.clone(),
            msgid: self.msgid.clone(),
        }
    }

    /// The header entry carries catalog metadata in its translation.
    pub fn is_header(&self) -> bool {
        self.msgid.is_empty() && self.context.is_none()
    }

    pub fn is_plural(&self) -> bool {
        self.msgid_plural.is_some()
    }

    /// True when at least one translated form is non-empty.
    pub fn is_translated(&self) -> bool {
        self.msgstr.iter().any(|form| !form.is_empty())
    }

    pub fn is_fuzzy(&self) -> bool {
        self.flags.contains("fuzzy")
    }

    /// Format languages this message is declared to use, from `<tag>-format`
    /// flags. A `no-<tag>-format` flag cancels the tag.
    pub fn format_tags(&self) -> Vec<&str> {
        self.flags
            .iter()
            .filter(|flag| !flag.starts_with("no-"))
            .filter_map(|flag| flag.strip_suffix("-format"))
            .filter(|tag| !self.flags.contains(&format!("no-{}-format", tag)))
            .collect()
    }

    /// The first recorded occurrence, used to locate diagnostics.
    pub fn location(&self) -> Option<&Occurrence> {
        self.occurrences.first()
    }
}

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.context {
            Some(context) => write!(f, "Message {{ context: {}, msgid: {} }}", context, self.msgid),
            None => write!(f, "Message {{ msgid: {} }}", self.msgid),
        }
    }
}

/// A named partition of messages.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MessageDomain {
    pub name: String,

    /// Messages in insertion order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(default)]
    pub messages: Vec<Message>,
}

impl MessageDomain {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            messages: Vec::new(),
        }
    }

    pub fn with_message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// One catalog: an ordered list of domains.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct MessageDomainStore {
    /// Language of the translations (e.g. "fr", "pt_BR").
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub language: Option<String>,

    /// Label of the input this catalog was read from.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub source: Option<String>,

    #[serde(default)]
    pub domains: Vec<MessageDomain>,
}

impl MessageDomainStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_domain(mut self, domain: MessageDomain) -> Self {
        self.domains.push(domain);
        self
    }

    pub fn domain(&self, name: &str) -> Option<&MessageDomain> {
        self.domains.iter().find(|d| d.name == name)
    }

    /// Returns the named domain, appending an empty one if it does not exist yet.
    pub fn domain_mut_or_insert(&mut self, name: &str) -> &mut MessageDomain {
        let index = match self.domains.iter().position(|d| d.name == name) {
            Some(index) => index,
            None => {
                self.domains.push(MessageDomain::new(name));
                self.domains.len() - 1
            }
        };
        &mut self.domains[index]
    }

    /// Iterates over every message of every domain, in order.
    pub fn messages(&self) -> impl Iterator<Item = &Message> {
        self.domains.iter().flat_map(|d| d.messages.iter())
    }

    pub fn message_count(&self) -> usize {
        self.domains.iter().map(MessageDomain::len).sum()
    }

    /// The header entry of the default domain, if any.
    pub fn header(&self) -> Option<&Message> {
        self.domain(DEFAULT_DOMAIN)
            .and_then(|d| d.messages.iter().find(|m| m.is_header()))
    }

    /// Reads a `Field: value` line from the header entry.
    pub fn header_field(&self, field: &str) -> Option<String> {
        let header = self.header()?;
        let text = header.msgstr.first()?;
        text.lines().find_map(|line| {
            let (name, value) = line.split_once(':')?;
            (name.trim() == field).then(|| value.trim().to_string())
        })
    }

    /// Language from the explicit tag, falling back to the header's `Language` field.
    pub fn effective_language(&self) -> Option<String> {
        self.language
            .clone()
            .filter(|l| !l.trim().is_empty())
            .or_else(|| self.header_field("Language").filter(|l| !l.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(text: &str) -> Message {
        Message::new("", text)
    }

    #[test]
    fn test_message_key_ordering() {
        let plain = Message::new("b", "").key();
        let with_context = Message::new("a", "").with_context("menu").key();
        let other = Message::new("a", "").key();
        assert!(other < plain);
        assert!(plain < with_context);
    }

    #[test]
    fn test_message_predicates() {
        let message = Message::new("Hello", "");
        assert!(!message.is_translated());
        assert!(!message.is_plural());
        assert!(!message.is_header());

        let plural = Message::plural("file", "files", vec![String::new(), "fichiers".into()]);
        assert!(plural.is_translated());
        assert!(plural.is_plural());

        assert!(header("Language: fr\n").is_header());
        assert!(!header("x").with_context("ctx").is_header());
    }

    #[test]
    fn test_format_tags() {
        let message = Message::new("{0}", "{0}")
            .with_flag("csharp-format")
            .with_flag("fuzzy")
            .with_flag("ycp-format")
            .with_flag("no-ycp-format");
        assert_eq!(message.format_tags(), vec!["csharp"]);
        assert!(message.is_fuzzy());
    }

    #[test]
    fn test_domain_mut_or_insert_keeps_order() {
        let mut store = MessageDomainStore::new();
        store.domain_mut_or_insert("b");
        store.domain_mut_or_insert("a");
        store.domain_mut_or_insert("b");
        let names: Vec<&str> = store.domains.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn test_header_field_and_language() {
        let store = MessageDomainStore::new().with_domain(
            MessageDomain::new(DEFAULT_DOMAIN).with_message(header(
                "Project-Id-Version: demo\nLanguage: pt_BR\nContent-Type: text/plain; charset=UTF-8\n",
            )),
        );
        assert_eq!(store.header_field("Project-Id-Version").as_deref(), Some("demo"));
        assert_eq!(store.effective_language().as_deref(), Some("pt_BR"));
    }

    #[test]
    fn test_store_json_roundtrip_skips_contributions() {
        let mut message = Message::new("Hello", "Bonjour").with_occurrence("src/main.c", 3);
        message.contributions = 4;
        let store = MessageDomainStore::new()
            .with_language("fr")
            .with_domain(MessageDomain::new(DEFAULT_DOMAIN).with_message(message));

        let mut writer = Vec::new();
        store.to_writer(&mut writer).unwrap();
        let text = String::from_utf8(writer).unwrap();
        assert!(!text.contains("contributions"));

        let parsed = MessageDomainStore::from_str(&text).unwrap();
        let message = &parsed.domains[0].messages[0];
        assert_eq!(message.contributions, 0);
        assert_eq!(message.occurrences, vec![Occurrence::new("src/main.c", 3)]);
        assert_eq!(parsed.language.as_deref(), Some("fr"));
    }

    #[test]
    fn test_occurrence_display() {
        assert_eq!(Occurrence::new("a.c", 12).to_string(), "a.c:12");
    }
}
