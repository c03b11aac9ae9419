//! Resolving the ordered list of input catalogs.

use std::{
    collections::HashSet,
    io::{BufReader, Read},
    path::{Path, PathBuf},
};

use pocat::{Error, MessageDomainStore, traits::CatalogFile};
use tracing::debug;

/// Name that stands for standard input.
pub const STDIN: &str = "-";

/// Where one input catalog is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

impl InputSource {
    /// Label recorded as the catalog's source.
    pub fn label(&self) -> String {
        match self {
            InputSource::Stdin => "<stdin>".to_string(),
            InputSource::File(path) => path.display().to_string(),
        }
    }

    /// Reads and decodes the catalog.
    pub fn read(&self) -> Result<MessageDomainStore, Error> {
        let mut store = match self {
            InputSource::Stdin => {
                let mut text = String::new();
                BufReader::new(std::io::stdin()).read_to_string(&mut text)?;
                MessageDomainStore::from_str(&text)?
            }
            InputSource::File(path) => MessageDomainStore::read_from(path)?,
        };
        store.source = Some(self.label());
        Ok(store)
    }
}

/// Reads input names from a `--files-from` list: one per line, blank lines
/// and `#` comments ignored.
pub fn read_files_from(path: &Path) -> Result<Vec<String>, String> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("Cannot read file list {}: {}", path.display(), e))?;
    Ok(parse_file_list(&text))
}

pub fn parse_file_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Builds the ordered input list: names from `files_from` first, then the
/// positional names, without duplicates.
///
/// A relative name that does not exist is looked up in each of `directories`
/// in turn; if no directory has it, the name is kept as given so that reading
/// it reports the error.
pub fn resolve_inputs(
    files_from: Option<&Path>,
    names: &[String],
    directories: &[PathBuf],
) -> Result<Vec<InputSource>, String> {
    let mut all = Vec::new();
    if let Some(list) = files_from {
        all.extend(read_files_from(list)?);
    }
    all.extend(names.iter().cloned());

    let mut seen = HashSet::new();
    let mut sources = Vec::new();
    for name in all {
        if !seen.insert(name.clone()) {
            debug!(name, "skipping duplicate input");
            continue;
        }
        sources.push(resolve_one(&name, directories));
    }
    Ok(sources)
}

fn resolve_one(name: &str, directories: &[PathBuf]) -> InputSource {
    if name == STDIN {
        return InputSource::Stdin;
    }
    let path = Path::new(name);
    if path.is_absolute() || path.exists() {
        return InputSource::File(path.to_path_buf());
    }
    directories
        .iter()
        .map(|dir| dir.join(path))
        .find(|candidate| candidate.exists())
        .map(InputSource::File)
        .unwrap_or_else(|| InputSource::File(path.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_parse_file_list() {
        let names = parse_file_list("a.json\n\n# vendor catalogs\n  b.json  \n#c.json\n");
        assert_eq!(names, vec!["a.json", "b.json"]);
    }

    #[test]
    fn test_resolve_inputs_dedupes_and_orders() {
        let temp_dir = TempDir::new().unwrap();
        let list = temp_dir.path().join("LINGUAS");
        fs::write(&list, "first.json\nsecond.json\n").unwrap();

        let sources = resolve_inputs(
            Some(&list),
            &["second.json".to_string(), "-".to_string(), "third.json".to_string()],
            &[],
        )
        .unwrap();
        assert_eq!(
            sources,
            vec![
                InputSource::File(PathBuf::from("first.json")),
                InputSource::File(PathBuf::from("second.json")),
                InputSource::Stdin,
                InputSource::File(PathBuf::from("third.json")),
            ]
        );
    }

    #[test]
    fn test_resolve_inputs_searches_directories() {
        let temp_dir = TempDir::new().unwrap();
        let empty = temp_dir.path().join("empty");
        let po = temp_dir.path().join("po");
        fs::create_dir_all(&empty).unwrap();
        fs::create_dir_all(&po).unwrap();
        fs::write(po.join("fr.json"), "{}").unwrap();

        let sources =
            resolve_inputs(None, &["fr.json".to_string()], &[empty, po.clone()]).unwrap();
        assert_eq!(sources, vec![InputSource::File(po.join("fr.json"))]);
    }

    #[test]
    fn test_missing_files_from_list() {
        let err = resolve_inputs(Some(Path::new("no/such/list")), &[], &[]).unwrap_err();
        assert!(err.contains("Cannot read file list"));
    }

    #[test]
    fn test_read_records_source() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("fr.json");
        fs::write(&path, r#"{ "language": "fr", "domains": [] }"#).unwrap();

        let store = InputSource::File(path.clone()).read().unwrap();
        assert_eq!(store.language.as_deref(), Some("fr"));
        assert_eq!(store.source, Some(path.display().to_string()));
    }
}
