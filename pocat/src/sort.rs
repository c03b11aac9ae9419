//! Deterministic ordering of a merged catalog.

use std::collections::HashMap;

use crate::{
    options::SortMode,
    types::{Message, MessageDomainStore},
};

/// Reorders the messages of every domain. All modes are stable and keep the
/// header entry in front.
pub fn sort_store(store: &mut MessageDomainStore, mode: SortMode) {
    match mode {
        SortMode::Insertion => {}
        SortMode::ByMsgid => {
            for domain in &mut store.domains {
                domain.messages.sort_by(|a, b| {
                    b.is_header()
                        .cmp(&a.is_header())
                        .then_with(|| a.context.cmp(&b.context))
                        .then_with(|| a.msgid.cmp(&b.msgid))
                });
            }
        }
        SortMode::ByFile => {
            let ranks = file_ranks(store);
            for domain in &mut store.domains {
                domain
                    .messages
                    .sort_by_cached_key(|m| file_position_key(m, &ranks));
            }
        }
    }
}

/// Ranks source files by first appearance across the catalog.
fn file_ranks(store: &MessageDomainStore) -> HashMap<String, usize> {
    let mut ranks = HashMap::new();
    for occurrence in store.messages().flat_map(|m| m.occurrences.iter()) {
        let next = ranks.len();
        ranks.entry(occurrence.file.clone()).or_insert(next);
    }
    ranks
}

// (header first, located before unlocated, file rank, line)
fn file_position_key(
    message: &Message,
    ranks: &HashMap<String, usize>,
) -> (bool, bool, usize, usize) {
    let earliest = message
        .occurrences
        .iter()
        .map(|o| (ranks.get(&o.file).copied().unwrap_or(usize::MAX), o.line))
        .min();
    match earliest {
        Some((rank, line)) => (!message.is_header(), false, rank, line),
        None => (!message.is_header(), true, 0, 0),
    }
}
