use std::{
    collections::BTreeMap,
    fmt::{Display, Formatter},
};

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use unic_langid::LanguageIdentifier;

use crate::types::{MessageDomainStore, Occurrence};

/// Plural form count used for languages missing from the table.
pub const DEFAULT_PLURAL_FORMS: usize = 2;

lazy_static! {
    /// Static mapping from base language subtag → number of plural forms (gettext `nplurals`).
    static ref PLURAL_FORMS: BTreeMap<&'static str, usize> = {
        let mut m: BTreeMap<&'static str, usize> = BTreeMap::new();

        // No distinction between singular and plural
        for code in ["ja","zh","ko","th","vi","km","lo","my","yue","id","ms"] {
            m.insert(code, 1);
        }

        // Singular/plural
        for code in [
            "en","de","nl","sv","da","nb","nn","no","is","fi","et","fa","hi","bn","gu",
            "ta","te","kn","ml","mr","it","es","pt","mk","el","eu","gl","af","sw","ur",
            "fil","tl","tr","fr","hy","kab","he","iw","hu","bg","ca","eo"
        ] {
            m.insert(code, 2);
        }

        // Slavic and Baltic families, Romanian
        for code in ["ru","uk","be","sr","hr","bs","sh","pl","cs","sk","lt","lv","ro"] {
            m.insert(code, 3);
        }

        m.insert("sl", 4);
        m.insert("ga", 5);
        m.insert("ar", 6);

        m
    };

    static ref NPLURALS: Regex = Regex::new(r"nplurals\s*=\s*(\d+)").unwrap();
}

/// Non-fatal report for a plural message whose number of translated forms is wrong.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluralValidationReport {
    pub language: String,
    pub domain: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    pub msgid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Occurrence>,
    pub expected: usize,
    pub found: usize,
}

impl Display for PluralValidationReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.location {
            Some(location) => write!(f, "{}: ", location)?,
            None => write!(f, "msgid {:?}: ", self.msgid)?,
        }
        write!(
            f,
            "lang='{}': expected {} plural forms, found {}",
            self.language, self.expected, self.found
        )
    }
}

/// Returns the number of plural forms a language uses.
///
/// Only the base language subtag selects the rule. Unknown languages get
/// [`DEFAULT_PLURAL_FORMS`].
pub fn expected_plural_forms(lang: &LanguageIdentifier) -> usize {
    PLURAL_FORMS
        .get(lang.language.as_str())
        .copied()
        .unwrap_or(DEFAULT_PLURAL_FORMS)
}

/// Helper for string language codes (accepts underscores, normalizes to hyphen).
pub fn expected_plural_forms_for_str(lang: &str) -> usize {
    let normalized = lang.replace('_', "-");
    match normalized.parse::<LanguageIdentifier>() {
        Ok(parsed) => expected_plural_forms(&parsed),
        Err(_) => DEFAULT_PLURAL_FORMS,
    }
}

/// The `nplurals` value of the header's `Plural-Forms` field, if declared.
pub fn declared_plural_forms(store: &MessageDomainStore) -> Option<usize> {
    let field = store.header_field("Plural-Forms")?;
    NPLURALS.captures(&field)?.get(1)?.as_str().parse().ok()
}

/// Collect non-fatal plural issues for a catalog.
///
/// A header `Plural-Forms` declaration wins over the language table. Without
/// either a language or a declaration nothing is checked.
pub fn collect_plural_issues(store: &MessageDomainStore) -> Vec<PluralValidationReport> {
    let language = store.effective_language();
    let expected = match (declared_plural_forms(store), &language) {
        (Some(declared), _) => declared,
        (None, Some(language)) => expected_plural_forms_for_str(language),
        (None, None) => return Vec::new(),
    };
    let language = language.unwrap_or_default();

    let mut reports = Vec::new();
    for domain in &store.domains {
        for message in &domain.messages {
            if !message.is_plural() || !message.is_translated() {
                continue;
            }
            if message.msgstr.len() != expected {
                reports.push(PluralValidationReport {
                    language: language.clone(),
                    domain: domain.name.clone(),
                    context: message.context.clone(),
                    msgid: message.msgid.clone(),
                    location: message.location().cloned(),
                    expected,
                    found: message.msgstr.len(),
                });
            }
        }
    }
    reports
}
