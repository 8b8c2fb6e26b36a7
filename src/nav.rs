//! Section navigation: the fixed tab order, the current-section state, and
//! the derived view state (progress, prev/next enablement).

/// One top-level content section, in the fixed study order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Section {
    Basics,
    Components,
    Questions,
    Tips,
    Examples,
    Practice,
}

pub const ORDER: [Section; 6] = [
    Section::Basics,
    Section::Components,
    Section::Questions,
    Section::Tips,
    Section::Examples,
    Section::Practice,
];

impl Section {
    pub fn id(self) -> &'static str {
        match self {
            Section::Basics => "basics",
            Section::Components => "components",
            Section::Questions => "questions",
            Section::Tips => "tips",
            Section::Examples => "examples",
            Section::Practice => "practice",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Section::Basics => "Basics",
            Section::Components => "Components",
            Section::Questions => "Questions",
            Section::Tips => "Tips",
            Section::Examples => "Examples",
            Section::Practice => "Practice",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        ORDER.iter().copied().find(|s| s.id() == id)
    }

    pub fn index(self) -> usize {
        ORDER.iter().position(|s| *s == self).unwrap_or(0)
    }

    /// Card sections show the flashcard deck; Practice has its own view.
    pub fn has_cards(self) -> bool {
        self != Section::Practice
    }
}

/// Where the "current section" is mirrored outside the app. The production
/// implementation persists it so a relaunch reopens the same section;
/// replace never stacks history.
pub trait Location {
    fn read(&self) -> Option<String>;
    fn replace(&mut self, id: &str);
}

/// Owns the current-section index and the visible scroll offset.
/// The index is always a valid position in [`ORDER`].
pub struct Navigator {
    index: usize,
    pub scroll: u16,
}

impl Navigator {
    pub fn new() -> Self {
        Self { index: 0, scroll: 0 }
    }

    pub fn current(&self) -> Section {
        ORDER[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Switch to the named section. Unknown ids are a silent no-op.
    pub fn go_to(&mut self, id: &str, location: &mut dyn Location) {
        let Some(section) = Section::from_id(id) else {
            return;
        };
        self.index = section.index();
        self.scroll = 0;
        location.replace(id);
    }

    /// Move one section forward (+1) or back (-1); out of range is a no-op.
    pub fn step(&mut self, direction: i32, location: &mut dyn Location) {
        let candidate = self.index as i32 + direction;
        if candidate < 0 || candidate >= ORDER.len() as i32 {
            return;
        }
        self.go_to(ORDER[candidate as usize].id(), location);
    }

    /// Restore the section the location names, if it names a valid one.
    pub fn init_from_location(&mut self, location: &mut dyn Location) {
        if let Some(id) = location.read()
            && Section::from_id(&id).is_some()
        {
            self.go_to(&id, location);
        }
    }

    pub fn progress_percent(&self) -> f64 {
        (self.index + 1) as f64 / ORDER.len() as f64 * 100.0
    }

    pub fn prev_enabled(&self) -> bool {
        self.index > 0
    }

    pub fn next_enabled(&self) -> bool {
        self.index < ORDER.len() - 1
    }

    pub fn next_label(&self) -> &'static str {
        if self.next_enabled() { "Next" } else { "Complete" }
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_add(lines);
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_sub(lines);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct MemLocation {
        id: Option<String>,
        replaces: usize,
    }

    impl Location for MemLocation {
        fn read(&self) -> Option<String> {
            self.id.clone()
        }

        fn replace(&mut self, id: &str) {
            self.id = Some(id.to_string());
            self.replaces += 1;
        }
    }

    #[test]
    fn go_to_every_valid_id_sets_matching_index() {
        let mut nav = Navigator::new();
        let mut loc = MemLocation::default();
        for section in ORDER {
            nav.go_to(section.id(), &mut loc);
            assert_eq!(nav.current(), section);
            assert_eq!(nav.index(), section.index());
            assert_eq!(loc.read().as_deref(), Some(section.id()));
        }
    }

    #[test]
    fn go_to_unknown_id_is_a_noop() {
        let mut nav = Navigator::new();
        let mut loc = MemLocation::default();
        nav.go_to("tips", &mut loc);
        let before_replaces = loc.replaces;

        nav.go_to("bogus", &mut loc);
        assert_eq!(nav.current(), Section::Tips);
        assert_eq!(loc.replaces, before_replaces);
    }

    #[test]
    fn step_is_bounded() {
        let mut nav = Navigator::new();
        let mut loc = MemLocation::default();
        nav.step(-1, &mut loc);
        assert_eq!(nav.current(), Section::Basics);

        nav.go_to("practice", &mut loc);
        nav.step(1, &mut loc);
        assert_eq!(nav.current(), Section::Practice);
    }

    #[test]
    fn five_steps_from_basics_reach_practice() {
        let mut nav = Navigator::new();
        let mut loc = MemLocation::default();
        for _ in 0..5 {
            nav.step(1, &mut loc);
        }
        assert_eq!(nav.current(), Section::Practice);
        assert!(!nav.next_enabled());
        assert_eq!(nav.next_label(), "Complete");
        assert!(nav.prev_enabled());
        assert_eq!(nav.progress_percent(), 100.0);
    }

    #[test]
    fn go_to_resets_scroll() {
        let mut nav = Navigator::new();
        let mut loc = MemLocation::default();
        nav.scroll_down(7);
        nav.go_to("examples", &mut loc);
        assert_eq!(nav.scroll, 0);
    }

    #[test]
    fn init_from_location_restores_valid_section() {
        let mut nav = Navigator::new();
        let mut loc = MemLocation {
            id: Some("questions".to_string()),
            replaces: 0,
        };
        nav.init_from_location(&mut loc);
        assert_eq!(nav.current(), Section::Questions);
    }

    #[test]
    fn init_from_location_ignores_garbage() {
        let mut nav = Navigator::new();
        let mut loc = MemLocation {
            id: Some("not-a-section".to_string()),
            replaces: 0,
        };
        nav.init_from_location(&mut loc);
        assert_eq!(nav.current(), Section::Basics);
        assert_eq!(loc.replaces, 0);
    }

    #[test]
    fn progress_percent_tracks_position() {
        let mut nav = Navigator::new();
        let mut loc = MemLocation::default();
        assert!((nav.progress_percent() - 100.0 / 6.0).abs() < 1e-9);
        nav.go_to("components", &mut loc);
        assert!((nav.progress_percent() - 200.0 / 6.0).abs() < 1e-9);
    }
}
