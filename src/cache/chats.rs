//! Chat histories keyed by session and document.

use crate::core::{ChatKey, ChatTurn};
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Handle to a user turn that has not been answered yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnId(u64);

#[derive(Debug, Clone)]
struct StoredTurn {
    id: u64,
    turn: ChatTurn,
}

/// `(session, url)` -> ordered turns.
///
/// A question is added with [`ChatStore::begin_turn`] before the model is
/// called. Depending on the outcome the caller either
/// [`commit`](ChatStore::commit)s the answer or
/// [`rollback`](ChatStore::rollback)s the question. Rollback removes exactly
/// that question even if other turns were appended meanwhile.
#[derive(Debug, Default)]
pub struct ChatStore {
    histories: DashMap<ChatKey, Vec<StoredTurn>>,
    next_id: AtomicU64,
}

impl ChatStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty history for `key` if there is none.
    pub fn ensure(&self, key: &ChatKey) {
        self.histories.entry(key.clone()).or_default();
    }

    /// Appends a user turn and returns its handle with the history that
    /// includes it.
    pub fn begin_turn(&self, key: &ChatKey, text: impl Into<String>) -> (TurnId, Vec<ChatTurn>) {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let mut history = self.histories.entry(key.clone()).or_default();
        history.push(StoredTurn {
            id,
            turn: ChatTurn::user(text),
        });
        let snapshot = history.iter().map(|stored| stored.turn.clone()).collect();
        (TurnId(id), snapshot)
    }

    /// Places the model's answer directly after its pending user turn.
    ///
    /// Returns false, storing nothing, if the user turn is no longer present.
    pub fn commit(&self, key: &ChatKey, pending: TurnId, answer: impl Into<String>) -> bool {
        let Some(mut history) = self.histories.get_mut(key) else {
            return false;
        };
        let Some(pos) = history.iter().rposition(|stored| stored.id == pending.0) else {
            return false;
        };
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        history.insert(
            pos + 1,
            StoredTurn {
                id,
                turn: ChatTurn::model(answer),
            },
        );
        true
    }

    /// Removes a pending user turn. Returns false if it is no longer present.
    pub fn rollback(&self, key: &ChatKey, pending: TurnId) -> bool {
        let Some(mut history) = self.histories.get_mut(key) else {
            return false;
        };
        let Some(pos) = history.iter().rposition(|stored| stored.id == pending.0) else {
            return false;
        };
        history.remove(pos);
        true
    }

    /// Returns the turns for `key`, oldest first.
    #[must_use]
    pub fn history(&self, key: &ChatKey) -> Option<Vec<ChatTurn>> {
        self.histories
            .get(key)
            .map(|history| history.iter().map(|stored| stored.turn.clone()).collect())
    }

    /// Number of conversations, including empty ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.histories.len()
    }

    /// Returns true if no conversation exists.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.histories.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ChatRole;

    fn key() -> ChatKey {
        ChatKey::new("session", "https://paper")
    }

    #[test]
    fn test_ensure_creates_empty_history_once() {
        let store = ChatStore::new();
        store.ensure(&key());
        let (_, _) = store.begin_turn(&key(), "q");
        store.ensure(&key());
        assert_eq!(store.len(), 1);
        assert_eq!(store.history(&key()).unwrap().len(), 1);
    }

    #[test]
    fn test_begin_and_commit() {
        let store = ChatStore::new();
        let (pending, snapshot) = store.begin_turn(&key(), "What is it?");
        assert_eq!(snapshot, vec![ChatTurn::user("What is it?")]);

        store.commit(&key(), pending, "A paper.");
        let history = store.history(&key()).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].role, ChatRole::Model);
        assert_eq!(history[1].text, "A paper.");
    }

    #[test]
    fn test_rollback_removes_only_the_pending_turn() {
        let store = ChatStore::new();
        let (first, _) = store.begin_turn(&key(), "first");
        let (second, _) = store.begin_turn(&key(), "second");

        assert!(store.rollback(&key(), first));
        assert_eq!(store.history(&key()).unwrap(), vec![ChatTurn::user("second")]);

        assert!(!store.rollback(&key(), first));
        assert!(store.rollback(&key(), second));
        assert_eq!(store.history(&key()).unwrap(), Vec::<ChatTurn>::new());
    }

    #[test]
    fn test_rollback_distinguishes_identical_text() {
        let store = ChatStore::new();
        let (a, _) = store.begin_turn(&key(), "same");
        store.commit(&key(), a, "answer");
        let (b, _) = store.begin_turn(&key(), "same");

        assert!(store.rollback(&key(), b));
        assert_eq!(
            store.history(&key()).unwrap(),
            vec![ChatTurn::user("same"), ChatTurn::model("answer")]
        );
    }

    #[test]
    fn test_commit_pairs_answer_with_its_question() {
        let store = ChatStore::new();
        let (first, _) = store.begin_turn(&key(), "first");
        let (second, _) = store.begin_turn(&key(), "second");

        assert!(store.commit(&key(), second, "answer two"));
        assert!(store.commit(&key(), first, "answer one"));
        assert_eq!(
            store.history(&key()).unwrap(),
            vec![
                ChatTurn::user("first"),
                ChatTurn::model("answer one"),
                ChatTurn::user("second"),
                ChatTurn::model("answer two"),
            ]
        );
    }

    #[test]
    fn test_commit_after_rollback_stores_nothing() {
        let store = ChatStore::new();
        let (pending, _) = store.begin_turn(&key(), "q");
        assert!(store.rollback(&key(), pending));

        assert!(!store.commit(&key(), pending, "late answer"));
        assert!(!store.commit(&ChatKey::new("other", "https://p"), pending, "x"));
        assert_eq!(store.history(&key()).unwrap(), Vec::<ChatTurn>::new());
    }

    #[test]
    fn test_histories_are_per_session() {
        let store = ChatStore::new();
        store.begin_turn(&ChatKey::new("a", "https://p"), "q");
        assert!(store.history(&ChatKey::new("b", "https://p")).is_none());
        assert!(!store.rollback(&ChatKey::new("b", "https://p"), TurnId(0)));
    }
}
