//! Options controlling catalog concatenation and format checking.

use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::{encoding::OutputEncoding, error::Error};

/// Bounds on the contribution count of a message, both exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionRange {
    more_than: usize,
    less_than: usize,
}

impl SelectionRange {
    /// Upper bound meaning "no limit".
    pub const UNBOUNDED: usize = usize::MAX;

    /// Creates a range, rejecting ones that cannot admit at least one count.
    pub fn new(more_than: usize, less_than: usize) -> Result<Self, Error> {
        if more_than >= less_than || less_than < 2 {
            return Err(Error::InvalidSelection {
                more_than,
                less_than,
            });
        }
        Ok(Self {
            more_than,
            less_than,
        })
    }

    pub fn more_than(&self) -> usize {
        self.more_than
    }

    pub fn less_than(&self) -> usize {
        self.less_than
    }

    pub fn admits(&self, count: usize) -> bool {
        self.more_than < count && count < self.less_than
    }

    /// True when every possible count is admitted and filtering is a no-op.
    pub fn is_unbounded(&self) -> bool {
        self.more_than == 0 && self.less_than == Self::UNBOUNDED
    }
}

impl Default for SelectionRange {
    fn default() -> Self {
        Self {
            more_than: 0,
            less_than: Self::UNBOUNDED,
        }
    }
}

/// Output ordering of the merged catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// First-seen order across the inputs.
    #[default]
    Insertion,
    /// By `(context, msgid)`.
    ByMsgid,
    /// By earliest source location.
    ByFile,
}

/// Syntax the finalized catalog is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputSyntax {
    #[default]
    Json,
    Po,
    Properties,
    StringTable,
}

impl OutputSyntax {
    /// Java properties and string tables are always written as UTF-8.
    pub fn forces_utf8(&self) -> bool {
        matches!(self, OutputSyntax::Properties | OutputSyntax::StringTable)
    }
}

impl Display for OutputSyntax {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputSyntax::Json => write!(f, "json"),
            OutputSyntax::Po => write!(f, "po"),
            OutputSyntax::Properties => write!(f, "properties"),
            OutputSyntax::StringTable => write!(f, "stringtable"),
        }
    }
}

impl FromStr for OutputSyntax {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        match s.as_str() {
            "json" => Ok(OutputSyntax::Json),
            "po" | "pot" => Ok(OutputSyntax::Po),
            "properties" => Ok(OutputSyntax::Properties),
            "stringtable" | "strings" => Ok(OutputSyntax::StringTable),
            other => Err(Error::UnknownSyntax(other.to_string())),
        }
    }
}

/// Options for [`crate::pipeline::catenate`].
///
/// Flags are kept as given so that conflicting combinations can be reported
/// by [`CatOptions::validate`] before any catalog is touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatOptions {
    pub more_than: usize,
    pub less_than: usize,
    /// Keep the first non-empty translation instead of the latest one.
    pub use_first: bool,
    pub sort_by_msgid: bool,
    pub sort_by_file: bool,
    /// Keep source locations in the result.
    pub location: bool,
    /// Target encoding of the output; `None` keeps UTF-8.
    pub to_code: Option<String>,
    pub output_syntax: OutputSyntax,
}

impl Default for CatOptions {
    fn default() -> Self {
        Self {
            more_than: 0,
            less_than: SelectionRange::UNBOUNDED,
            use_first: false,
            sort_by_msgid: false,
            sort_by_file: false,
            location: true,
            to_code: None,
            output_syntax: OutputSyntax::Json,
        }
    }
}

impl CatOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_more_than(mut self, more_than: usize) -> Self {
        self.more_than = more_than;
        self
    }

    pub fn with_less_than(mut self, less_than: usize) -> Self {
        self.less_than = less_than;
        self
    }

    /// Only keep messages defined by a single input.
    pub fn with_unique(self) -> Self {
        self.with_less_than(2)
    }

    pub fn with_use_first(mut self, use_first: bool) -> Self {
        self.use_first = use_first;
        self
    }

    pub fn with_sort_by_msgid(mut self, sort_by_msgid: bool) -> Self {
        self.sort_by_msgid = sort_by_msgid;
        self
    }

    pub fn with_sort_by_file(mut self, sort_by_file: bool) -> Self {
        self.sort_by_file = sort_by_file;
        self
    }

    pub fn with_location(mut self, location: bool) -> Self {
        self.location = location;
        self
    }

    pub fn with_to_code(mut self, to_code: Option<String>) -> Self {
        self.to_code = to_code;
        self
    }

    pub fn with_output_syntax(mut self, output_syntax: OutputSyntax) -> Self {
        self.output_syntax = output_syntax;
        self
    }

    /// Checks option combinations. Runs before any input is merged.
    pub fn validate(&self) -> Result<(), Error> {
        self.sort_mode()?;
        self.selection()?;
        OutputEncoding::resolve(self.to_code.as_deref(), self.output_syntax)?;
        Ok(())
    }

    pub fn selection(&self) -> Result<SelectionRange, Error> {
        SelectionRange::new(self.more_than, self.less_than)
    }

    pub fn sort_mode(&self) -> Result<SortMode, Error> {
        if !self.location && self.sort_by_file {
            return Err(Error::conflicting_options("--no-location", "--sort-by-file"));
        }
        match (self.sort_by_msgid, self.sort_by_file) {
            (true, true) => Err(Error::conflicting_options(
                "--sort-output",
                "--sort-by-file",
            )),
            (true, false) => Ok(SortMode::ByMsgid),
            (false, true) => Ok(SortMode::ByFile),
            (false, false) => Ok(SortMode::Insertion),
        }
    }
}

/// Options for [`crate::check::check_store`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CheckOptions {
    /// Treat every issue, including unparsable source strings, as a failure.
    pub strict: bool,
    /// Emit a diagnostic for each issue as it is found.
    pub noisy: bool,
    /// Also check messages flagged `fuzzy`.
    pub include_fuzzy: bool,
}

impl CheckOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_noisy(mut self, noisy: bool) -> Self {
        self.noisy = noisy;
        self
    }

    pub fn with_include_fuzzy(mut self, include_fuzzy: bool) -> Self {
        self.include_fuzzy = include_fuzzy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_range_rejects_impossible_bounds() {
        assert!(SelectionRange::new(5, 3).is_err());
        assert!(SelectionRange::new(3, 3).is_err());
        assert!(SelectionRange::new(0, 1).is_err());
        assert!(SelectionRange::new(0, 2).is_ok());
    }

    #[test]
    fn test_selection_range_admits() {
        let range = SelectionRange::default();
        assert!(range.is_unbounded());
        assert!(range.admits(1));
        assert!(range.admits(1000));

        let unique = SelectionRange::new(0, 2).unwrap();
        assert!(unique.admits(1));
        assert!(!unique.admits(2));

        let common = SelectionRange::new(1, SelectionRange::UNBOUNDED).unwrap();
        assert!(!common.admits(1));
        assert!(common.admits(2));
    }

    #[test]
    fn test_sort_mode_conflicts() {
        let options = CatOptions::new()
            .with_sort_by_msgid(true)
            .with_sort_by_file(true);
        assert!(matches!(
            options.validate(),
            Err(Error::ConflictingOptions { .. })
        ));

        let options = CatOptions::new()
            .with_location(false)
            .with_sort_by_file(true);
        let err = options.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "--no-location and --sort-by-file are mutually exclusive"
        );

        assert_eq!(
            CatOptions::new().with_sort_by_msgid(true).sort_mode().unwrap(),
            SortMode::ByMsgid
        );
        assert_eq!(CatOptions::new().sort_mode().unwrap(), SortMode::Insertion);
    }

    #[test]
    fn test_validate_rejects_bad_ranges() {
        let options = CatOptions::new().with_more_than(5).with_less_than(3);
        assert!(matches!(
            options.validate(),
            Err(Error::InvalidSelection { .. })
        ));
        assert!(CatOptions::new().with_less_than(1).validate().is_err());
        assert!(CatOptions::new().with_unique().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_unknown_encoding() {
        let options = CatOptions::new().with_to_code(Some("no-such-charset".to_string()));
        assert!(matches!(options.validate(), Err(Error::UnknownEncoding(_))));
    }

    #[test]
    fn test_validate_rejects_decode_only_encoding() {
        let options = CatOptions::new().with_to_code(Some("UTF-16LE".to_string()));
        let err = options.validate().unwrap_err();
        assert!(matches!(err, Error::UnsupportedEncoding(_)));
        assert!(err.is_configuration_error());
        assert!(
            CatOptions::new()
                .with_to_code(Some("latin1".to_string()))
                .validate()
                .is_ok()
        );
    }

    #[test]
    fn test_output_syntax_from_str() {
        assert_eq!("JSON".parse::<OutputSyntax>().unwrap(), OutputSyntax::Json);
        assert_eq!("po".parse::<OutputSyntax>().unwrap(), OutputSyntax::Po);
        assert_eq!(
            "stringtable".parse::<OutputSyntax>().unwrap(),
            OutputSyntax::StringTable
        );
        assert!("yaml".parse::<OutputSyntax>().is_err());
        assert!(OutputSyntax::Properties.forces_utf8());
        assert!(!OutputSyntax::Po.forces_utf8());
    }
}
