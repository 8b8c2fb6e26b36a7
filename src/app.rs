use std::collections::HashMap;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;

use crate::cards::CardView;
use crate::config::Config;
use crate::content::Deck;
use crate::nav::{Navigator, ORDER, Section};
use crate::practice::session::{ClipboardWriter, PracticeSession, SystemClipboard};
use crate::practice::timer::TimerEvent;
use crate::store::json_store::{JsonStore, StoredLocation};
use crate::ui::components::toast::ToastKind;
use crate::ui::theme::Theme;

const TOAST_DURATION: Duration = Duration::from_secs(3);

pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    expires_at: Instant,
}

/// Everything the event loop mutates: navigation, practice state, card
/// views, theme, and the transient UI bits (toast, confirm prompt).
pub struct App {
    pub navigator: Navigator,
    pub location: StoredLocation,
    pub deck: Deck,
    pub cards: HashMap<Section, CardView>,
    pub practice: PracticeSession,
    pub theme: &'static Theme,
    pub config: Config,
    pub store: Option<JsonStore>,
    pub toast: Option<Toast>,
    pub confirm_clear: bool,
    pub should_quit: bool,
    clipboard: Box<dyn ClipboardWriter>,
}

impl App {
    pub fn new(
        section_override: Option<&str>,
        theme_override: Option<&str>,
        data_dir_override: Option<PathBuf>,
    ) -> Result<Self> {
        let mut config = Config::load().unwrap_or_default();
        if let Some(name) = theme_override {
            config.theme = name.to_string();
        }

        let store = match data_dir_override {
            Some(dir) => JsonStore::with_base_dir(dir),
            None => JsonStore::new(),
        };
        let store = store
            .map_err(|e| log::warn!("draft persistence unavailable: {e}"))
            .ok();

        Self::build(config, store, section_override)
    }

    fn build(config: Config, store: Option<JsonStore>, section_override: Option<&str>) -> Result<Self> {
        let theme = Theme::load(&config.theme).unwrap_or_default();
        let theme: &'static Theme = Box::leak(Box::new(theme));

        let deck = Deck::load()?;

        let mut location = match section_override {
            Some(id) => StoredLocation::with_override(store.as_ref(), id),
            None => StoredLocation::new(store.as_ref()),
        };
        let mut navigator = Navigator::new();
        navigator.init_from_location(&mut location);

        let mut practice = PracticeSession::new(
            deck.questions(),
            config.timer_seconds,
            Duration::from_millis(config.debounce_ms),
        );
        if let Some(ref store) = store {
            practice.load_drafts(store);
        }

        let cards = ORDER
            .iter()
            .filter(|s| s.has_cards())
            .map(|s| (*s, CardView::new()))
            .collect();

        Ok(Self {
            navigator,
            location,
            deck,
            cards,
            practice,
            theme,
            config,
            store,
            toast: None,
            confirm_clear: false,
            should_quit: false,
            clipboard: Box::new(SystemClipboard),
        })
    }

    pub fn on_tick(&mut self) {
        self.tick_at(Instant::now());
    }

    fn tick_at(&mut self, now: Instant) {
        if self.practice.poll(now, self.store.as_ref()) == Some(TimerEvent::Finished) {
            self.show_toast_at(
                ToastKind::Success,
                "Time's up! Great practice session!",
                now,
            );
        }

        if self.toast.as_ref().is_some_and(|t| now >= t.expires_at) {
            self.toast = None;
        }
    }

    pub fn show_toast(&mut self, kind: ToastKind, message: impl Into<String>) {
        self.show_toast_at(kind, message, Instant::now());
    }

    /// A new toast replaces whatever is showing.
    fn show_toast_at(&mut self, kind: ToastKind, message: impl Into<String>, now: Instant) {
        self.toast = Some(Toast {
            message: message.into(),
            kind,
            expires_at: now + TOAST_DURATION,
        });
    }

    pub fn go_to(&mut self, id: &str) {
        self.navigator.go_to(id, &mut self.location);
    }

    pub fn step(&mut self, direction: i32) {
        self.navigator.step(direction, &mut self.location);
    }

    /// Flip dark/light, apply immediately, remember the choice.
    pub fn toggle_theme(&mut self) {
        let name = Theme::toggled_name(&self.config.theme);
        let Some(theme) = Theme::load(name) else {
            return;
        };
        let theme: &'static Theme = Box::leak(Box::new(theme));
        self.theme = theme;
        self.config.theme = name.to_string();
        if let Err(e) = self.config.save() {
            log::warn!("failed to save theme preference: {e}");
        }
    }

    pub fn current_card_count(&self) -> usize {
        self.deck
            .cards(self.navigator.current())
            .map(|set| set.cards.len())
            .unwrap_or(0)
    }

    pub fn current_card_view_mut(&mut self) -> Option<&mut CardView> {
        self.cards.get_mut(&self.navigator.current())
    }

    pub fn export_current_answer(&mut self) {
        let question = self.practice.current_question().id.clone();
        match self.practice.export_answer(&question, self.clipboard.as_mut()) {
            Ok(()) => self.show_toast(ToastKind::Success, "Answer copied to clipboard!"),
            Err(e) => {
                log::error!("export failed: {e}");
                self.show_toast(ToastKind::Error, "Could not copy to clipboard");
            }
        }
    }

    pub fn clear_current_draft(&mut self) {
        self.practice.clear_current_draft(self.store.as_ref());
        self.show_toast(ToastKind::Info, "Draft cleared");
    }

    /// Persist anything still pending before the terminal goes away.
    pub fn shutdown(&mut self) {
        self.practice.flush(self.store.as_ref());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        App::build(Config::default(), None, None).unwrap()
    }

    #[test]
    fn starts_on_first_section_without_saved_state() {
        let app = app();
        assert_eq!(app.navigator.current(), Section::Basics);
    }

    #[test]
    fn section_override_wins() {
        let app = App::build(Config::default(), None, Some("practice")).unwrap();
        assert_eq!(app.navigator.current(), Section::Practice);
    }

    #[test]
    fn bad_section_override_falls_back_to_first() {
        let app = App::build(Config::default(), None, Some("nope")).unwrap();
        assert_eq!(app.navigator.current(), Section::Basics);
    }

    #[test]
    fn timer_finish_raises_a_toast_that_expires() {
        let mut app = app();
        let start = Instant::now();
        app.practice.timer = crate::practice::timer::CountdownTimer::new(1);
        app.practice.timer.toggle(start);

        app.tick_at(start + Duration::from_secs(1));
        assert!(app.toast.is_some());

        app.tick_at(start + Duration::from_secs(10));
        assert!(app.toast.is_none());
    }

    #[test]
    fn new_toast_replaces_the_old_one() {
        let mut app = app();
        app.show_toast(ToastKind::Info, "first");
        app.show_toast(ToastKind::Error, "second");
        assert_eq!(app.toast.as_ref().unwrap().message, "second");
    }

    #[test]
    fn every_card_section_has_a_view() {
        let app = app();
        assert_eq!(app.cards.len(), 5);
        assert!(!app.cards.contains_key(&Section::Practice));
    }
}
