//! The concatenation pipeline: merge, filter, sort, then write.

use tracing::{debug, info};

use crate::{
    encoding::OutputEncoding,
    error::Error,
    merge::{OverridePolicy, merge_stores, strip_locations},
    options::{CatOptions, OutputSyntax},
    select::select_messages,
    sort::sort_store,
    types::MessageDomainStore,
};

/// Concatenates catalogs into one.
///
/// Options are validated first; an invalid combination is reported before any
/// input is looked at.
///
/// # Example
///
/// ```rust
/// use pocat::{CatOptions, Message, MessageDomain, MessageDomainStore, catenate};
///
/// let a = MessageDomainStore::new()
///     .with_domain(MessageDomain::new("messages").with_message(Message::new("Hello", "Bonjour")));
/// let b = MessageDomainStore::new()
///     .with_domain(MessageDomain::new("messages").with_message(Message::new("Hello", "Salut")));
///
/// let merged = catenate(&[a.clone(), b.clone()], &CatOptions::new())?;
/// assert_eq!(merged.domains[0].messages[0].msgstr, vec!["Salut"]);
///
/// let merged = catenate(&[a, b], &CatOptions::new().with_use_first(true))?;
/// assert_eq!(merged.domains[0].messages[0].msgstr, vec!["Bonjour"]);
/// # Ok::<(), pocat::Error>(())
/// ```
pub fn catenate(
    stores: &[MessageDomainStore],
    options: &CatOptions,
) -> Result<MessageDomainStore, Error> {
    options.validate()?;
    let sort_mode = options.sort_mode()?;
    let selection = options.selection()?;

    let mut result = merge_stores(stores, OverridePolicy::from_use_first(options.use_first));
    if !options.location {
        strip_locations(&mut result);
    }

    let merged = result.message_count();
    select_messages(&mut result, selection);
    sort_store(&mut result, sort_mode);

    info!(
        inputs = stores.len(),
        merged,
        kept = result.message_count(),
        "concatenated catalogs"
    );
    Ok(result)
}

/// Turns a finalized catalog into bytes of some output syntax.
pub trait CatalogWriter {
    fn write(&self, store: &MessageDomainStore, syntax: OutputSyntax) -> Result<Vec<u8>, Error>;
}

/// Writes the catalog model itself as pretty-printed JSON.
#[derive(Debug, Clone, Default)]
pub struct JsonWriter {
    /// `None` writes UTF-8 and leaves the header untouched.
    encoding: Option<OutputEncoding>,
}

impl JsonWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_encoding(mut self, encoding: OutputEncoding) -> Self {
        self.encoding = Some(encoding);
        self
    }

    pub fn from_options(options: &CatOptions) -> Result<Self, Error> {
        let mut writer = Self::new();
        if options.to_code.is_some() {
            let encoding =
                OutputEncoding::resolve(options.to_code.as_deref(), options.output_syntax)?;
            writer = writer.with_encoding(encoding);
        }
        Ok(writer)
    }
}

impl CatalogWriter for JsonWriter {
    fn write(&self, store: &MessageDomainStore, syntax: OutputSyntax) -> Result<Vec<u8>, Error> {
        if syntax != OutputSyntax::Json {
            return Err(Error::UnsupportedSyntax(syntax.to_string()));
        }

        let mut text = match &self.encoding {
            Some(encoding) => {
                let mut store = store.clone();
                encoding.rewrite_header(&mut store);
                serde_json::to_string_pretty(&store)?
            }
            None => serde_json::to_string_pretty(store)?,
        };
        text.push('\n');

        let bytes = match &self.encoding {
            Some(encoding) => encoding.encode(&text)?,
            None => text.into_bytes(),
        };
        debug!(bytes = bytes.len(), %syntax, "serialized catalog");
        Ok(bytes)
    }
}

/// Serializes a catalog the way `options` ask for, with the built-in writer.
pub fn write_catalog(store: &MessageDomainStore, options: &CatOptions) -> Result<Vec<u8>, Error> {
    JsonWriter::from_options(options)?.write(store, options.output_syntax)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        traits::CatalogFile,
        types::{DEFAULT_DOMAIN, Message, MessageDomain},
    };

    fn store(messages: Vec<Message>) -> MessageDomainStore {
        let mut domain = MessageDomain::new(DEFAULT_DOMAIN);
        domain.messages = messages;
        MessageDomainStore::new().with_domain(domain)
    }

    #[test]
    fn test_catenate_rejects_bad_options_before_merging() {
        let options = CatOptions::new().with_more_than(5).with_less_than(3);
        assert!(matches!(
            catenate(&[], &options),
            Err(Error::InvalidSelection {
                more_than: 5,
                less_than: 3
            })
        ));
    }

    #[test]
    fn test_catenate_rejects_decode_only_encoding_before_merging() {
        let a = store(vec![Message::new("Hello", "Bonjour")]);
        let options = CatOptions::new().with_to_code(Some("UTF-16LE".to_string()));
        let err = catenate(&[a], &options).unwrap_err();
        assert!(err.is_configuration_error());
        assert!(matches!(err, Error::UnsupportedEncoding(label) if label == "UTF-16LE"));
    }

    #[test]
    fn test_catenate_unique_and_sorted() {
        let a = store(vec![
            Message::new("", "Content-Type: text/plain; charset=UTF-8\n"),
            Message::new("b", "B").with_occurrence("a.c", 1),
            Message::new("shared", "S").with_occurrence("a.c", 2),
        ]);
        let b = store(vec![
            Message::new("shared", "S2").with_occurrence("b.c", 1),
            Message::new("a", "A").with_occurrence("b.c", 2),
        ]);

        let options = CatOptions::new().with_unique().with_sort_by_msgid(true);
        let result = catenate(&[a, b], &options).unwrap();
        let msgids: Vec<&str> = result.messages().map(|m| m.msgid.as_str()).collect();
        assert_eq!(msgids, vec!["", "a", "b"]);
    }

    #[test]
    fn test_catenate_without_locations() {
        let a = store(vec![Message::new("x", "X").with_occurrence("a.c", 1)]);
        let result = catenate(&[a], &CatOptions::new().with_location(false)).unwrap();
        assert!(result.domains[0].messages[0].occurrences.is_empty());
    }

    #[test]
    fn test_json_writer_roundtrip() {
        let a = store(vec![Message::new("Hello", "Bonjour").with_flag("fuzzy")]);
        let bytes = write_catalog(&a, &CatOptions::new()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.ends_with('\n'));
        assert_eq!(MessageDomainStore::from_str(&text).unwrap(), a);
    }

    #[test]
    fn test_json_writer_applies_encoding() {
        let a = store(vec![
            Message::new("", "Content-Type: text/plain; charset=UTF-8\n"),
            Message::new("Coffee", "Café"),
        ]);
        let options = CatOptions::new().with_to_code(Some("ISO-8859-1".to_string()));
        let bytes = write_catalog(&a, &options).unwrap();

        assert!(bytes.windows(4).any(|w| w == b"Caf\xE9"));
        let text: String = bytes.iter().map(|&b| b as char).collect();
        assert!(text.contains("charset=ISO-8859-1"));
        // The input is not modified.
        assert_eq!(
            a.header_field("Content-Type").as_deref(),
            Some("text/plain; charset=UTF-8")
        );
    }

    #[test]
    fn test_unsupported_syntax() {
        let a = store(vec![Message::new("Hello", "Bonjour")]);
        let options = CatOptions::new().with_output_syntax(OutputSyntax::Po);
        assert!(matches!(
            write_catalog(&a, &options),
            Err(Error::UnsupportedSyntax(syntax)) if syntax == "po"
        ));
    }
}
