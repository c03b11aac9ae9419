//! Target encoding of written catalogs.
//!
//! Labels are resolved with `encoding_rs`, so the usual aliases (`latin1`,
//! `ISO-8859-1`, `cp1252`, ...) are accepted. The label given by the user is
//! what ends up in the header's `charset=`.

use encoding_rs::{Encoding, UTF_8};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, warn};

use crate::{
    error::Error,
    options::OutputSyntax,
    types::{DEFAULT_DOMAIN, MessageDomainStore},
};

lazy_static! {
    static ref CHARSET: Regex = Regex::new(r"charset=[^\s;]*").unwrap();
}

/// Resolves an encoding label, rejecting unknown ones.
pub fn lookup_encoding(label: &str) -> Result<&'static Encoding, Error> {
    Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| Error::UnknownEncoding(label.to_string()))
}

/// The encoding a catalog is written in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputEncoding {
    label: String,
    encoding: &'static Encoding,
}

impl Default for OutputEncoding {
    fn default() -> Self {
        Self::utf8()
    }
}

impl OutputEncoding {
    pub fn utf8() -> Self {
        Self {
            label: "UTF-8".to_string(),
            encoding: UTF_8,
        }
    }

    /// Picks the output encoding for a requested `to_code` and syntax.
    ///
    /// Syntaxes that only exist in UTF-8 ignore `to_code`.
    pub fn resolve(to_code: Option<&str>, syntax: OutputSyntax) -> Result<Self, Error> {
        let Some(label) = to_code else {
            return Ok(Self::utf8());
        };
        let encoding = lookup_encoding(label)?;
        if syntax.forces_utf8() {
            if encoding != UTF_8 {
                warn!(requested = label, %syntax, "output syntax is always UTF-8, ignoring target encoding");
            }
            return Ok(Self::utf8());
        }
        // encoding_rs can decode UTF-16 and a few others but never encodes to them.
        if encoding.output_encoding() != encoding {
            return Err(Error::UnsupportedEncoding(label.trim().to_string()));
        }
        Ok(Self {
            label: label.trim().to_string(),
            encoding,
        })
    }

    /// The label written into the header.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    pub fn is_utf8(&self) -> bool {
        self.encoding == UTF_8
    }

    /// Rewrites the `charset=` of the header entry's `Content-Type` to this
    /// encoding. Catalogs without a header or without a charset are left alone.
    pub fn rewrite_header(&self, store: &mut MessageDomainStore) {
        let Some(domain) = store.domains.iter_mut().find(|d| d.name == DEFAULT_DOMAIN) else {
            return;
        };
        let Some(header) = domain.messages.iter_mut().find(|m| m.is_header()) else {
            return;
        };
        let Some(text) = header.msgstr.first_mut() else {
            return;
        };
        let replacement = format!("charset={}", self.label);
        let rewritten = CHARSET.replace(text.as_str(), replacement.as_str()).into_owned();
        if rewritten != *text {
            debug!(charset = %self.label, "rewrote header charset");
            *text = rewritten;
        }
    }

    /// Encodes serialized output, failing on characters the encoding cannot represent.
    pub fn encode(&self, text: &str) -> Result<Vec<u8>, Error> {
        if self.is_utf8() {
            return Ok(text.as_bytes().to_vec());
        }
        let (bytes, _, had_errors) = self.encoding.encode(text);
        if had_errors {
            let culprit = text
                .chars()
                .find(|c| {
                    let mut buf = [0u8; 4];
                    self.encoding.encode(c.encode_utf8(&mut buf)).2
                })
                .map(|c| format!("cannot represent {:?} (U+{:04X})", c, c as u32))
                .unwrap_or_else(|| "unmappable character".to_string());
            return Err(Error::Encoding {
                encoding: self.label.clone(),
                message: culprit,
            });
        }
        Ok(bytes.into_owned())
    }
}
