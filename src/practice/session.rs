use std::time::{Duration, Instant};

use anyhow::Result;
use thiserror::Error;

use crate::content::Question;
use crate::practice::debounce::Debouncer;
use crate::practice::drafts::{DraftKey, DraftStore, STAR_SECTIONS};
use crate::practice::timer::{CountdownTimer, TimerEvent};
use crate::store::json_store::JsonStore;
use crate::ui::text_area::TextArea;

/// How long the per-field "saved" marker stays visible after a write.
const SAVED_INDICATOR: Duration = Duration::from_secs(2);

/// Destination for exported answers. Injected so the session logic never
/// touches the real clipboard in tests.
pub trait ClipboardWriter {
    fn write(&mut self, text: &str) -> Result<()>;
}

/// System clipboard via arboard. The handle is opened per write; some
/// platforms invalidate long-lived handles.
pub struct SystemClipboard;

impl ClipboardWriter for SystemClipboard {
    fn write(&mut self, text: &str) -> Result<()> {
        let mut clipboard = arboard::Clipboard::new()?;
        clipboard.set_text(text)?;
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("unknown question: {0}")]
    UnknownQuestion(String),
    #[error("clipboard write failed: {0}")]
    Clipboard(String),
}

/// One answer field: a STAR part of one question.
pub struct Field {
    pub key: DraftKey,
    pub area: TextArea,
    saved_until: Option<Instant>,
}

/// Practice-mode state: the field buffers (one per question per STAR part,
/// in deck order), the draft store with its debounced autosave, the
/// countdown timer, and the view's focus state.
pub struct PracticeSession {
    questions: Vec<Question>,
    fields: Vec<Field>,
    drafts: DraftStore,
    debounce: Debouncer,
    pub timer: CountdownTimer,
    pub question_idx: usize,
    pub field_focus: usize,
    pub editing: bool,
}

impl PracticeSession {
    pub fn new(questions: &[Question], timer_seconds: u32, debounce_delay: Duration) -> Self {
        let fields = questions
            .iter()
            .flat_map(|q| {
                STAR_SECTIONS.iter().copied().map(move |section| Field {
                    key: DraftKey::new(&q.id, section),
                    area: TextArea::new(),
                    saved_until: None,
                })
            })
            .collect();

        Self {
            questions: questions.to_vec(),
            fields,
            drafts: DraftStore::default(),
            debounce: Debouncer::new(debounce_delay),
            timer: CountdownTimer::new(timer_seconds),
            question_idx: 0,
            field_focus: 0,
            editing: false,
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn current_question(&self) -> &Question {
        &self.questions[self.question_idx]
    }

    /// The four fields of the current question, in STAR order.
    pub fn current_fields(&self) -> &[Field] {
        let start = self.question_idx * STAR_SECTIONS.len();
        &self.fields[start..start + STAR_SECTIONS.len()]
    }

    pub fn focused_field(&self) -> &Field {
        &self.fields[self.question_idx * STAR_SECTIONS.len() + self.field_focus]
    }

    pub fn focused_field_mut(&mut self) -> &mut Field {
        &mut self.fields[self.question_idx * STAR_SECTIONS.len() + self.field_focus]
    }

    fn field_mut(&mut self, key: &DraftKey) -> Option<&mut Field> {
        self.fields.iter_mut().find(|f| f.key == *key)
    }

    pub fn focus_next_field(&mut self) {
        self.field_focus = (self.field_focus + 1) % STAR_SECTIONS.len();
    }

    pub fn focus_prev_field(&mut self) {
        self.field_focus = if self.field_focus == 0 {
            STAR_SECTIONS.len() - 1
        } else {
            self.field_focus - 1
        };
    }

    pub fn next_question(&mut self) {
        self.question_idx = (self.question_idx + 1) % self.questions.len();
        self.field_focus = 0;
        self.editing = false;
    }

    pub fn prev_question(&mut self) {
        self.question_idx = if self.question_idx == 0 {
            self.questions.len() - 1
        } else {
            self.question_idx - 1
        };
        self.field_focus = 0;
        self.editing = false;
    }

    /// Queue the focused field's current text for a debounced save. Call on
    /// every edit keystroke; bursts collapse to one write of the last value.
    pub fn record_focused(&mut self, now: Instant) {
        let key = self.focused_field().key.clone();
        let text = self.focused_field().area.value().to_string();
        self.debounce.record(key, text, now);
    }

    /// Drive deferred work: fire due autosaves (persisting the whole store
    /// as one blob), arm the saved markers, and tick the countdown.
    pub fn poll(&mut self, now: Instant, store: Option<&JsonStore>) -> Option<TimerEvent> {
        let due = self.debounce.poll(now);
        if !due.is_empty() {
            for (key, text) in &due {
                self.drafts.merge(key, text);
            }
            self.persist(store);
            for (key, _) in due {
                if let Some(field) = self.field_mut(&key) {
                    field.saved_until = Some(now + SAVED_INDICATOR);
                }
            }
        }

        self.timer.poll(now)
    }

    /// Populate fields from the persisted blob. A malformed blob has already
    /// been reduced to an empty store by the loader; entries for questions
    /// not in the current deck stay in the store but fill nothing.
    pub fn load_drafts(&mut self, store: &JsonStore) {
        self.drafts = store.load_drafts();
        let restored: Vec<(DraftKey, String)> = self
            .drafts
            .iter()
            .map(|(q, s, text)| (DraftKey::new(q, s), text.to_string()))
            .collect();
        for (key, text) in restored {
            if let Some(field) = self.field_mut(&key) {
                field.area.set_text(&text);
            }
        }
    }

    /// Empty every field of the question, drop its entry, re-persist.
    /// Clearing a question with no saved entry still empties the fields.
    pub fn clear_draft(&mut self, question: &str, store: Option<&JsonStore>) {
        for field in self
            .fields
            .iter_mut()
            .filter(|f| f.key.question == question)
        {
            field.area.clear();
            field.saved_until = None;
        }
        self.debounce.discard(question);
        if self.drafts.clear_question(question) {
            self.persist(store);
        }
    }

    pub fn clear_current_draft(&mut self, store: Option<&JsonStore>) {
        let question = self.current_question().id.clone();
        self.clear_draft(&question, store);
    }

    /// Format the question's answer as a labeled text block and place it on
    /// the clipboard. Empty sections keep their label so the pasted skeleton
    /// stays complete.
    pub fn export_answer(
        &self,
        question: &str,
        clipboard: &mut dyn ClipboardWriter,
    ) -> Result<(), ExportError> {
        if !self.questions.iter().any(|q| q.id == question) {
            return Err(ExportError::UnknownQuestion(question.to_string()));
        }

        let mut block = String::new();
        for field in self.fields.iter().filter(|f| f.key.question == question) {
            block.push_str(&format!(
                "**{}:**\n{}\n\n",
                field.key.section.to_uppercase(),
                field.area.value()
            ));
        }
        clipboard
            .write(&block)
            .map_err(|e| ExportError::Clipboard(e.to_string()))?;
        Ok(())
    }

    /// Persist anything still inside the debounce window. Called on quit.
    pub fn flush(&mut self, store: Option<&JsonStore>) {
        let pending = self.debounce.flush();
        if pending.is_empty() {
            return;
        }
        for (key, text) in pending {
            self.drafts.merge(&key, &text);
        }
        self.persist(store);
    }

    fn persist(&self, store: Option<&JsonStore>) {
        if let Some(store) = store
            && let Err(e) = store.save_drafts(&self.drafts)
        {
            log::warn!("failed to save drafts: {e}");
        }
    }

    pub fn saved_visible(&self, field: &Field, now: Instant) -> bool {
        field.saved_until.is_some_and(|until| now < until)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn questions() -> Vec<Question> {
        vec![
            Question {
                id: "conflict".into(),
                prompt: "Tell me about a conflict.".into(),
                hint: String::new(),
            },
            Question {
                id: "deadline".into(),
                prompt: "Tell me about a deadline.".into(),
                hint: String::new(),
            },
        ]
    }

    fn session() -> PracticeSession {
        PracticeSession::new(&questions(), 120, Duration::from_millis(500))
    }

    fn temp_store() -> (TempDir, JsonStore) {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
        (dir, store)
    }

    #[derive(Default)]
    struct MemClipboard {
        content: Option<String>,
        fail: bool,
    }

    impl ClipboardWriter for MemClipboard {
        fn write(&mut self, text: &str) -> Result<()> {
            if self.fail {
                anyhow::bail!("denied");
            }
            self.content = Some(text.to_string());
            Ok(())
        }
    }

    #[test]
    fn fields_follow_star_order_per_question() {
        let session = session();
        let sections: Vec<&str> = session
            .current_fields()
            .iter()
            .map(|f| f.key.section.as_str())
            .collect();
        assert_eq!(sections, STAR_SECTIONS);
    }

    #[test]
    fn debounced_edit_persists_once_with_last_value() {
        let (_dir, store) = temp_store();
        let start = Instant::now();
        let mut session = session();

        for text in ["s", "so", "som"] {
            session.focused_field_mut().area.set_text(text);
            session.record_focused(start);
        }
        session.poll(start + Duration::from_millis(100), Some(&store));
        assert!(store.load_drafts().is_empty());

        session.poll(start + Duration::from_millis(600), Some(&store));
        let saved = store.load_drafts();
        assert_eq!(saved.get(&DraftKey::new("conflict", "situation")), Some("som"));
    }

    #[test]
    fn saved_indicator_arms_and_expires() {
        let (_dir, store) = temp_store();
        let start = Instant::now();
        let mut session = session();

        session.focused_field_mut().area.set_text("ctx");
        session.record_focused(start);
        let fired = start + Duration::from_millis(600);
        session.poll(fired, Some(&store));

        let field = session.focused_field();
        assert!(session.saved_visible(field, fired + Duration::from_secs(1)));
        assert!(!session.saved_visible(field, fired + Duration::from_secs(3)));
    }

    #[test]
    fn load_drafts_restores_matching_fields() {
        let (_dir, store) = temp_store();
        let mut drafts = DraftStore::default();
        drafts.merge(&DraftKey::new("deadline", "action"), "cut scope to two items");
        drafts.merge(&DraftKey::new("gone-question", "task"), "orphaned");
        store.save_drafts(&drafts).unwrap();

        let mut session = session();
        session.load_drafts(&store);

        let field = session
            .fields
            .iter()
            .find(|f| f.key == DraftKey::new("deadline", "action"))
            .unwrap();
        assert_eq!(field.area.value(), "cut scope to two items");
    }

    #[test]
    fn unknown_question_entries_survive_a_save() {
        let (_dir, store) = temp_store();
        let mut drafts = DraftStore::default();
        drafts.merge(&DraftKey::new("gone-question", "task"), "orphaned");
        store.save_drafts(&drafts).unwrap();

        let start = Instant::now();
        let mut session = session();
        session.load_drafts(&store);
        session.focused_field_mut().area.set_text("new");
        session.record_focused(start);
        session.poll(start + Duration::from_secs(1), Some(&store));

        let saved = store.load_drafts();
        assert_eq!(saved.get(&DraftKey::new("gone-question", "task")), Some("orphaned"));
        assert_eq!(saved.get(&DraftKey::new("conflict", "situation")), Some("new"));
    }

    #[test]
    fn clear_draft_empties_fields_and_store() {
        let (_dir, store) = temp_store();
        let start = Instant::now();
        let mut session = session();

        session.focused_field_mut().area.set_text("something");
        session.record_focused(start);
        session.poll(start + Duration::from_secs(1), Some(&store));
        assert!(!store.load_drafts().is_empty());

        session.clear_current_draft(Some(&store));
        assert!(session.focused_field().area.is_empty());
        assert!(store.load_drafts().is_empty());

        // No entry left: clearing again must not fail.
        session.clear_current_draft(Some(&store));
    }

    #[test]
    fn clear_draft_cancels_pending_saves() {
        let (_dir, store) = temp_store();
        let start = Instant::now();
        let mut session = session();

        session.focused_field_mut().area.set_text("half-typed");
        session.record_focused(start);
        session.clear_current_draft(Some(&store));

        session.poll(start + Duration::from_secs(2), Some(&store));
        assert!(store.load_drafts().is_empty());
    }

    #[test]
    fn export_is_star_ordered_with_uppercase_labels() {
        let mut session = session();
        session.field_focus = 0;
        session.focused_field_mut().area.set_text("we were late");
        session.field_focus = 2;
        session.focused_field_mut().area.set_text("I cut scope");

        let mut clipboard = MemClipboard::default();
        session.export_answer("conflict", &mut clipboard).unwrap();
        assert_eq!(
            clipboard.content.unwrap(),
            "**SITUATION:**\nwe were late\n\n**TASK:**\n\n\n**ACTION:**\nI cut scope\n\n**RESULT:**\n\n\n"
        );
    }

    #[test]
    fn export_failures_are_reported_not_thrown() {
        let session = session();
        let mut clipboard = MemClipboard {
            fail: true,
            ..Default::default()
        };
        assert!(matches!(
            session.export_answer("conflict", &mut clipboard),
            Err(ExportError::Clipboard(_))
        ));
        assert!(matches!(
            session.export_answer("nope", &mut clipboard),
            Err(ExportError::UnknownQuestion(_))
        ));
    }

    #[test]
    fn flush_persists_edits_still_inside_the_window() {
        let (_dir, store) = temp_store();
        let start = Instant::now();
        let mut session = session();

        session.focused_field_mut().area.set_text("quit mid-type");
        session.record_focused(start);
        session.flush(Some(&store));

        assert_eq!(
            store.load_drafts().get(&DraftKey::new("conflict", "situation")),
            Some("quit mid-type")
        );
    }

    #[test]
    fn round_trip_into_a_fresh_session() {
        let (_dir, store) = temp_store();
        let start = Instant::now();
        let mut first = session();
        first.focused_field_mut().area.set_text("exact text, kept verbatim");
        first.record_focused(start);
        first.poll(start + Duration::from_secs(1), Some(&store));

        let mut second = session();
        second.load_drafts(&store);
        assert_eq!(second.focused_field().area.value(), "exact text, kept verbatim");
    }
}
