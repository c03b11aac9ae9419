//! Combining several catalogs into one.

use std::collections::HashMap;

use tracing::debug;

use crate::types::{Message, MessageDomain, MessageDomainStore, MessageKey};

/// Which definition of a translation survives when several inputs provide one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverridePolicy {
    /// A later non-empty translation replaces an earlier one.
    #[default]
    Latest,
    /// The first non-empty translation is kept.
    First,
}

impl OverridePolicy {
    pub fn from_use_first(use_first: bool) -> Self {
        if use_first {
            OverridePolicy::First
        } else {
            OverridePolicy::Latest
        }
    }
}

/// Accumulates catalogs one at a time into a single result catalog.
///
/// Lookups go through a per-domain index so that merging stays linear in the
/// total number of messages.
#[derive(Debug, Default)]
pub struct MergeEngine {
    policy: OverridePolicy,
    result: MessageDomainStore,
    index: HashMap<String, HashMap<MessageKey, usize>>,
}

impl MergeEngine {
    pub fn new(policy: OverridePolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Adds every message of `store` to the result.
    pub fn add(&mut self, store: &MessageDomainStore) {
        if self.result.language.is_none() {
            self.result.language = store.language.clone().filter(|l| !l.trim().is_empty());
        }

        for domain in &store.domains {
            let target = self.result.domain_mut_or_insert(&domain.name);
            let index = self.index.entry(domain.name.clone()).or_default();
            for message in &domain.messages {
                merge_message(target, index, message, self.policy);
            }
        }
    }

    pub fn finish(self) -> MessageDomainStore {
        self.result
    }
}

/// Merges `stores` in order into one catalog.
pub fn merge_stores(stores: &[MessageDomainStore], policy: OverridePolicy) -> MessageDomainStore {
    let mut engine = MergeEngine::new(policy);
    for store in stores {
        engine.add(store);
    }
    let merged = engine.finish();
    debug!(
        inputs = stores.len(),
        domains = merged.domains.len(),
        messages = merged.message_count(),
        "merged catalogs"
    );
    merged
}

/// Drops every recorded source location.
pub fn strip_locations(store: &mut MessageDomainStore) {
    for domain in &mut store.domains {
        for message in &mut domain.messages {
            message.occurrences.clear();
        }
    }
}

fn merge_message(
    target: &mut MessageDomain,
    index: &mut HashMap<MessageKey, usize>,
    incoming: &Message,
    policy: OverridePolicy,
) {
    let key = incoming.key();
    let Some(&position) = index.get(&key) else {
        let mut message = incoming.clone();
        message.contributions = 1;
        index.insert(key, target.messages.len());
        target.messages.push(message);
        return;
    };

    let existing = &mut target.messages[position];
    existing.contributions += 1;
    existing
        .occurrences
        .extend(incoming.occurrences.iter().cloned());
    existing.comments.extend(incoming.comments.iter().cloned());
    existing
        .extracted_comments
        .extend(incoming.extracted_comments.iter().cloned());
    existing.flags.extend(incoming.flags.iter().cloned());

    let take_translation = incoming.is_translated()
        && match policy {
            OverridePolicy::Latest => true,
            OverridePolicy::First => !existing.is_translated(),
        };
    if take_translation {
        existing.msgstr = incoming.msgstr.clone();
        if incoming.msgid_plural.is_some() {
            existing.msgid_plural = incoming.msgid_plural.clone();
        }
    } else if existing.msgid_plural.is_none() {
        existing.msgid_plural = incoming.msgid_plural.clone();
    }
}
