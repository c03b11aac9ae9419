//! Filtering merged messages by how many inputs defined them.

use tracing::debug;

use crate::{options::SelectionRange, types::MessageDomainStore};

/// Removes messages whose contribution count lies outside `range`.
///
/// Domains left empty are kept. The header entry is always kept.
pub fn select_messages(store: &mut MessageDomainStore, range: SelectionRange) {
    if range.is_unbounded() {
        return;
    }

    let before = store.message_count();
    for domain in &mut store.domains {
        domain
            .messages
            .retain(|m| m.is_header() || range.admits(m.contributions));
    }
    debug!(
        more_than = range.more_than(),
        less_than = range.less_than(),
        removed = before - store.message_count(),
        "applied message selection"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DEFAULT_DOMAIN, Message, MessageDomain};

    fn counted(msgid: &str, contributions: usize) -> Message {
        let mut message = Message::new(msgid, "");
        message.contributions = contributions;
        message
    }

    fn store() -> MessageDomainStore {
        let mut domain = MessageDomain::new(DEFAULT_DOMAIN);
        domain.messages = vec![
            counted("", 3),
            counted("one", 1),
            counted("two", 2),
            counted("three", 3),
        ];
        MessageDomainStore::new()
            .with_domain(domain)
            .with_domain(MessageDomain::new("other").with_message(counted("shared", 2)))
    }

    fn msgids(store: &MessageDomainStore) -> Vec<&str> {
        store.messages().map(|m| m.msgid.as_str()).collect()
    }

    #[test]
    fn test_default_range_keeps_everything() {
        let mut store = store();
        select_messages(&mut store, SelectionRange::default());
        assert_eq!(msgids(&store), vec!["", "one", "two", "three", "shared"]);
    }

    #[test]
    fn test_unique_keeps_single_definitions_and_header() {
        let mut store = store();
        select_messages(&mut store, SelectionRange::new(0, 2).unwrap());
        assert_eq!(msgids(&store), vec!["", "one"]);
        assert_eq!(store.domains.len(), 2);
        assert!(store.domains[1].is_empty());
    }

    #[test]
    fn test_more_than_one() {
        let mut store = store();
        select_messages(
            &mut store,
            SelectionRange::new(1, SelectionRange::UNBOUNDED).unwrap(),
        );
        assert_eq!(msgids(&store), vec!["", "two", "three", "shared"]);
    }

    #[test]
    fn test_closed_window() {
        let mut store = store();
        select_messages(&mut store, SelectionRange::new(1, 3).unwrap());
        assert_eq!(msgids(&store), vec!["", "two", "shared"]);
    }
}
