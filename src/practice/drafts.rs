use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The four STAR answer parts, in presentation and export order.
pub const STAR_SECTIONS: [&str; 4] = ["situation", "task", "action", "result"];

/// Identifies one answer fragment: a practice question plus a STAR part.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DraftKey {
    pub question: String,
    pub section: String,
}

impl DraftKey {
    pub fn new(question: &str, section: &str) -> Self {
        Self {
            question: question.to_string(),
            section: section.to_string(),
        }
    }
}

/// In-memory copy of all saved answer drafts. Serializes as the plain
/// `{question: {section: text}}` object that is the on-disk contract;
/// an absent key means "no draft".
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DraftStore {
    entries: BTreeMap<String, BTreeMap<String, String>>,
}

impl DraftStore {
    pub fn merge(&mut self, key: &DraftKey, text: &str) {
        self.entries
            .entry(key.question.clone())
            .or_default()
            .insert(key.section.clone(), text.to_string());
    }

    pub fn get(&self, key: &DraftKey) -> Option<&str> {
        self.entries
            .get(&key.question)
            .and_then(|sections| sections.get(&key.section))
            .map(String::as_str)
    }

    /// Drop every section saved for the question. Returns whether anything
    /// was there; clearing an absent question is fine.
    pub fn clear_question(&mut self, question: &str) -> bool {
        self.entries.remove(question).is_some()
    }

    pub fn has_question(&self, question: &str) -> bool {
        self.entries.contains_key(question)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate all saved fragments as (question, section, text).
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &str)> {
        self.entries.iter().flat_map(|(question, sections)| {
            sections
                .iter()
                .map(move |(section, text)| (question.as_str(), section.as_str(), text.as_str()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_then_get() {
        let mut store = DraftStore::default();
        let key = DraftKey::new("q1", "situation");
        store.merge(&key, "we were behind schedule");
        assert_eq!(store.get(&key), Some("we were behind schedule"));
        assert_eq!(store.get(&DraftKey::new("q1", "task")), None);
    }

    #[test]
    fn merge_overwrites_same_key() {
        let mut store = DraftStore::default();
        let key = DraftKey::new("q1", "action");
        store.merge(&key, "first");
        store.merge(&key, "second");
        assert_eq!(store.get(&key), Some("second"));
    }

    #[test]
    fn clear_question_removes_all_sections() {
        let mut store = DraftStore::default();
        store.merge(&DraftKey::new("q1", "situation"), "a");
        store.merge(&DraftKey::new("q1", "result"), "b");
        store.merge(&DraftKey::new("q2", "task"), "c");

        assert!(store.clear_question("q1"));
        assert!(!store.has_question("q1"));
        assert_eq!(store.get(&DraftKey::new("q2", "task")), Some("c"));

        // Absent question: no-op, reported as such.
        assert!(!store.clear_question("q1"));
    }

    #[test]
    fn serializes_as_the_bare_contract_object() {
        let mut store = DraftStore::default();
        store.merge(&DraftKey::new("q1", "situation"), "ctx");
        let json = serde_json::to_string(&store).unwrap();
        assert_eq!(json, r#"{"q1":{"situation":"ctx"}}"#);

        let back: DraftStore = serde_json::from_str(&json).unwrap();
        assert_eq!(back, store);
    }

    #[test]
    fn empty_text_is_a_value_not_an_absence() {
        let mut store = DraftStore::default();
        let key = DraftKey::new("q1", "task");
        store.merge(&key, "");
        assert_eq!(store.get(&key), Some(""));
        assert!(store.has_question("q1"));
    }
}
