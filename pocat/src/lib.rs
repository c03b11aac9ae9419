#![forbid(unsafe_code)]
//! Message catalog concatenation and format string checking.
//!
//! Catalogs are read into the syntax-agnostic [`MessageDomainStore`] model,
//! merged by message identity, filtered by how many inputs defined each
//! message, sorted, and written back out.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use pocat::{CatOptions, MessageDomainStore, catenate, traits::CatalogFile, write_catalog};
//!
//! let stores = vec![
//!     MessageDomainStore::read_from("fr-core.json")?,
//!     MessageDomainStore::read_from("fr-plugins.json")?,
//! ];
//! let options = CatOptions::new().with_unique().with_sort_by_msgid(true);
//! let merged = catenate(&stores, &options)?;
//! std::fs::write("fr-unique.json", write_catalog(&merged, &options)?)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Format checks
//!
//! Messages flagged `<tag>-format` are checked against the grammar registered
//! for `<tag>` (see [`format`]):
//!
//! - **csharp**: .NET numbered braces, `{0}`, `{1,-10:N2}`
//! - **ycp** / **smalltalk**: single-digit percent directives, `%1` … `%9`

pub mod check;
pub mod encoding;
pub mod error;
pub mod fill;
pub mod format;
pub mod merge;
pub mod options;
pub mod pipeline;
pub mod plural_rules;
pub mod select;
pub mod sort;
pub mod traits;
pub mod types;

// Re-export most used types for easy consumption
pub use crate::{
    check::{CheckReport, FormatIssue, Problem, check_message, check_store},
    encoding::{OutputEncoding, lookup_encoding},
    error::Error,
    fill::fill_from_source,
    format::{CheckMode, FormatMismatch, FormatParser, FormatSpec, InvalidFormat},
    merge::{MergeEngine, OverridePolicy, merge_stores},
    options::{CatOptions, CheckOptions, OutputSyntax, SelectionRange, SortMode},
    pipeline::{CatalogWriter, JsonWriter, catenate, write_catalog},
    plural_rules::{PluralValidationReport, collect_plural_issues, expected_plural_forms},
    select::select_messages,
    sort::sort_store,
    types::{DEFAULT_DOMAIN, Message, MessageDomain, MessageDomainStore, MessageKey, Occurrence},
};
