//! Mobile menu and active-link tracking.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MenuState {
    #[default]
    Closed,
    Open,
}

/// Body scroll side effect of a menu transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollLock {
    Locked,
    Released,
}

impl From<MenuState> for ScrollLock {
    fn from(state: MenuState) -> Self {
        match state {
            MenuState::Open => ScrollLock::Locked,
            MenuState::Closed => ScrollLock::Released,
        }
    }
}

/// A `section[id]` with its active range, measured from layout on the tick
/// that uses it.
#[derive(Clone, Debug, PartialEq)]
pub struct NavSection {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

impl NavSection {
    /// `offset_top` is shifted up by `lead` so a link lights up a little
    /// before its section reaches the top of the screen.
    pub fn from_layout(id: impl Into<String>, offset_top: f64, offset_height: f64, lead: f64) -> Self {
        Self {
            id: id.into(),
            top: offset_top - lead,
            height: offset_height,
        }
    }

    pub fn contains(&self, scroll: f64) -> bool {
        self.top <= scroll && scroll < self.top + self.height
    }
}

/// Section whose range holds `scroll`.
///
/// Every section is checked on its own, so when ranges overlap the last one
/// in document order wins. That mirrors the shipped pages; it is probably an
/// accident of the per-section check rather than an intended priority.
pub fn active_section(scroll: f64, sections: &[NavSection]) -> Option<&NavSection> {
    sections.iter().filter(|s| s.contains(scroll)).last()
}

/// Does a nav link's `href` point at `section_id`? Substring match, like the
/// `[href*=id]` selector the pages use.
pub fn link_targets(href: &str, section_id: &str) -> bool {
    !section_id.is_empty() && href.contains(section_id)
}

pub fn header_scrolled(scroll: f64, threshold: f64) -> bool {
    scroll > threshold
}

/// Scroll position that puts an anchor target just below the fixed header.
pub fn anchor_scroll_target(offset_top: f64, header_height: f64) -> f64 {
    offset_top - header_height
}

#[derive(Debug, Default)]
pub struct NavState {
    menu: MenuState,
    active: Option<String>,
    close_on_outside_click: bool,
}

impl NavState {
    pub fn new(close_on_outside_click: bool) -> Self {
        Self {
            close_on_outside_click,
            ..Self::default()
        }
    }

    pub fn menu(&self) -> MenuState {
        self.menu
    }

    pub fn outside_close_enabled(&self) -> bool {
        self.close_on_outside_click
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn toggle_clicked(&mut self) -> ScrollLock {
        self.set_menu(MenuState::Open)
    }

    pub fn close_clicked(&mut self) -> ScrollLock {
        self.set_menu(MenuState::Closed)
    }

    pub fn link_clicked(&mut self) -> ScrollLock {
        self.set_menu(MenuState::Closed)
    }

    /// Only closes when the page opts in; `None` means nothing changed.
    pub fn outside_clicked(&mut self) -> Option<ScrollLock> {
        if self.close_on_outside_click && self.menu == MenuState::Open {
            Some(self.set_menu(MenuState::Closed))
        } else {
            None
        }
    }

    /// Recomputes the active link. Returns true when it changed.
    pub fn scrolled(&mut self, scroll: f64, sections: &[NavSection]) -> bool {
        let next = active_section(scroll, sections).map(|s| s.id.clone());
        if next == self.active {
            return false;
        }
        self.active = next;
        true
    }

    fn set_menu(&mut self, menu: MenuState) -> ScrollLock {
        self.menu = menu;
        ScrollLock::from(menu)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sections() -> Vec<NavSection> {
        vec![
            NavSection::from_layout("inicio", 0.0, 700.0, 200.0),
            NavSection::from_layout("servicios", 700.0, 900.0, 200.0),
            NavSection::from_layout("nosotros", 1600.0, 600.0, 200.0),
            NavSection::from_layout("contacto", 2200.0, 800.0, 200.0),
        ]
    }

    #[test]
    fn menu_transitions_lock_and_release_scroll() {
        let mut nav = NavState::new(false);
        assert_eq!(nav.toggle_clicked(), ScrollLock::Locked);
        assert_eq!(nav.menu(), MenuState::Open);
        assert_eq!(nav.link_clicked(), ScrollLock::Released);
        assert_eq!(nav.menu(), MenuState::Closed);

        nav.toggle_clicked();
        assert_eq!(nav.close_clicked(), ScrollLock::Released);
    }

    #[test]
    fn outside_click_ignored_unless_enabled() {
        let mut nav = NavState::new(false);
        nav.toggle_clicked();
        assert_eq!(nav.outside_clicked(), None);
        assert_eq!(nav.menu(), MenuState::Open);

        let mut nav = NavState::new(true);
        assert_eq!(nav.outside_clicked(), None);
        nav.toggle_clicked();
        assert_eq!(nav.outside_clicked(), Some(ScrollLock::Released));
        assert_eq!(nav.menu(), MenuState::Closed);
    }

    #[test]
    fn active_section_uses_offset_ranges() {
        let sections = sections();
        assert_eq!(active_section(0.0, &sections).map(|s| s.id.as_str()), Some("inicio"));
        // servicios starts at 700 - 200 = 500
        assert_eq!(active_section(499.0, &sections).map(|s| s.id.as_str()), Some("inicio"));
        assert_eq!(active_section(500.0, &sections).map(|s| s.id.as_str()), Some("servicios"));
        assert_eq!(active_section(2799.0, &sections).map(|s| s.id.as_str()), Some("contacto"));
        assert_eq!(active_section(2800.0, &sections), None);
        assert_eq!(active_section(-300.0, &sections), None);
    }

    #[test]
    fn overlapping_sections_last_match_wins() {
        let sections = vec![
            NavSection::from_layout("a", 0.0, 1000.0, 0.0),
            NavSection::from_layout("b", 400.0, 200.0, 0.0),
        ];
        assert_eq!(active_section(450.0, &sections).map(|s| s.id.as_str()), Some("b"));
        assert_eq!(active_section(700.0, &sections).map(|s| s.id.as_str()), Some("a"));
    }

    #[test]
    fn scrolled_reports_changes_only() {
        let sections = sections();
        let mut nav = NavState::default();
        assert!(!nav.scrolled(-500.0, &sections));
        assert!(nav.scrolled(100.0, &sections));
        assert_eq!(nav.active(), Some("inicio"));
        assert!(!nav.scrolled(200.0, &sections));
        assert!(nav.scrolled(5000.0, &sections));
        assert_eq!(nav.active(), None);
    }

    #[test]
    fn link_matching_and_header() {
        assert!(link_targets("#servicios", "servicios"));
        assert!(link_targets("index.html#contacto", "contacto"));
        assert!(!link_targets("#contacto", "nosotros"));
        assert!(!link_targets("#contacto", ""));

        assert!(!header_scrolled(100.0, 100.0));
        assert!(header_scrolled(100.5, 100.0));
        assert_eq!(anchor_scroll_target(1600.0, 80.0), 1520.0);
    }

    proptest! {
        #[test]
        fn active_is_highest_matching_index(
            ranges in prop::collection::vec((0.0f64..4000.0, 0.0f64..1500.0), 0..8),
            scroll in -200.0f64..6000.0,
        ) {
            let sections: Vec<NavSection> = ranges
                .iter()
                .enumerate()
                .map(|(i, (top, height))| NavSection::from_layout(i.to_string(), *top, *height, 200.0))
                .collect();

            let expected = (0..sections.len())
                .rev()
                .find(|&i| sections[i].top <= scroll && scroll < sections[i].top + sections[i].height)
                .map(|i| i.to_string());

            prop_assert_eq!(active_section(scroll, &sections).map(|s| s.id.clone()), expected);
        }
    }
}
