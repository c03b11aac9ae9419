//! Reading and writing catalogs as files.

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Cursor, Read, Write},
    path::Path,
};

use encoding_rs_io::DecodeReaderBytesBuilder;

use crate::error::Error;

/// A catalog that lives in a file.
///
/// Implementors only describe how to decode from UTF-8 text and how to encode
/// themselves; files and byte slices are passed through a byte order mark
/// sniffer first, so UTF-16 catalogs with a BOM read like UTF-8 ones.
///
/// # Example
///
/// ```rust,no_run
/// use pocat::{MessageDomainStore, traits::CatalogFile};
/// let store = MessageDomainStore::read_from("fr.json")?;
/// store.write_to("fr_copy.json")?;
/// Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait CatalogFile {
    /// Decodes a catalog from UTF-8 text.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error>
    where
        Self: Sized;

    /// Encodes the catalog as UTF-8 text.
    fn to_writer<W: Write>(&self, writer: W) -> Result<(), Error>;

    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error>
    where
        Self: Sized,
    {
        let file = File::open(path)?;
        Self::from_reader(bom_decoded(file))
    }

    /// Writes the catalog to `path`, replacing any existing file.
    fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.to_writer(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    fn from_str(s: &str) -> Result<Self, Error>
    where
        Self: Sized,
    {
        Self::from_reader(Cursor::new(s))
    }

    /// Like [`CatalogFile::read_from`], for bytes already in memory.
    fn from_bytes(bytes: &[u8]) -> Result<Self, Error>
    where
        Self: Sized,
    {
        Self::from_reader(bom_decoded(bytes))
    }
}

/// UTF-8 view of `source`; a UTF-16 BOM switches decoding, a UTF-8 BOM is dropped.
fn bom_decoded<R: Read>(source: R) -> impl BufRead {
    BufReader::new(
        DecodeReaderBytesBuilder::new()
            .bom_override(true)
            .build(source),
    )
}

#[cfg(test)]
mod tests {
    use super::CatalogFile;
    use crate::types::MessageDomainStore;

    const STORE: &str =
        r#"{"language":"de","domains":[{"name":"messages","messages":[{"msgid":"Tür","msgstr":["Tür"]}]}]}"#;

    fn utf16le_with_bom(text: &str) -> Vec<u8> {
        let mut bytes = vec![0xFF, 0xFE];
        for unit in text.encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        bytes
    }

    #[test]
    fn test_read_from_utf16_with_bom() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, utf16le_with_bom(STORE)).unwrap();

        let store = MessageDomainStore::read_from(&path).unwrap();
        assert_eq!(store.domains[0].messages[0].msgid, "Tür");
    }

    #[test]
    fn test_from_bytes_sniffs_bom() {
        let store = MessageDomainStore::from_bytes(&utf16le_with_bom(STORE)).unwrap();
        assert_eq!(store.language.as_deref(), Some("de"));

        let mut utf8 = vec![0xEF, 0xBB, 0xBF];
        utf8.extend_from_slice(STORE.as_bytes());
        assert!(MessageDomainStore::from_bytes(&utf8).is_ok());
    }

    #[test]
    fn test_write_to_then_read_from() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("copy.json");
        let store = MessageDomainStore::from_str(STORE).unwrap();
        store.write_to(&path).unwrap();
        assert_eq!(MessageDomainStore::read_from(&path).unwrap(), store);
    }

    #[test]
    fn test_from_bytes_rejects_garbage() {
        assert!(MessageDomainStore::from_bytes(b"not json").is_err());
    }
}
