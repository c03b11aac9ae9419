//! Filling translations with their source text, for catalogs in the source
//! language itself.

use tracing::debug;

use crate::types::{Message, MessageDomainStore};

/// Gives untranslated messages their source text as translation.
///
/// Only messages whose forms are all empty are touched; existing translations
/// stay. Singular messages get `msgid`. Plural messages get `msgid` for the
/// first form and `msgid_plural` for every other one; the number of forms is
/// kept, with a minimum of two. The header entry is left as is.
pub fn fill_from_source(mut store: MessageDomainStore) -> MessageDomainStore {
    let mut filled = 0;
    for domain in &mut store.domains {
        for message in domain
            .messages
            .iter_mut()
            .filter(|m| !m.is_header() && !m.is_translated())
        {
            fill_message(message);
            filled += 1;
        }
    }
    debug!(filled, "filled translations from source text");
    store
}

fn fill_message(message: &mut Message) {
    match &message.msgid_plural {
        Some(plural) => {
            let forms = message.msgstr.len().max(2);
            message.msgstr = std::iter::once(message.msgid.clone())
                .chain(std::iter::repeat_n(plural.clone(), forms - 1))
                .collect();
        }
        None => message.msgstr = vec![message.msgid.clone()],
    }
}
