use std::collections::HashMap;

use crate::scroll::{ScrollSample, SectionBounds};

pub const CANDIDATE_CLASS: &str = "reveal";
pub const REVEALED_CLASS: &str = "active";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RevealState {
    #[default]
    Pending,
    Revealed,
}

impl RevealState {
    /// One-way: once revealed, leaving the viewport changes nothing.
    pub fn observe(self, intersecting: bool) -> Self {
        match self {
            Self::Pending if intersecting => Self::Revealed,
            other => other,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RevealAction {
    /// `(section id, is intersecting)` reports from one observer callback.
    Observe(Vec<(String, bool)>),
    RevealAll,
}

/// Reveal state for every tagged section.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RevealBoard {
    states: HashMap<String, RevealState>,
}

impl RevealBoard {
    pub fn with_sections<'a>(ids: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            states: ids
                .into_iter()
                .map(|id| (id.to_string(), RevealState::Pending))
                .collect(),
        }
    }

    pub fn state(&self, id: &str) -> Option<RevealState> {
        self.states.get(id).copied()
    }

    pub fn is_revealed(&self, id: &str) -> bool {
        self.state(id) == Some(RevealState::Revealed)
    }

    /// Feeds one intersection report. Untagged ids are ignored. Returns
    /// whether the section transitioned to revealed.
    pub fn observe(&mut self, id: &str, intersecting: bool) -> bool {
        let Some(state) = self.states.get_mut(id) else {
            return false;
        };

        let next = state.observe(intersecting);
        let transitioned = next != *state;
        *state = next;
        transitioned
    }

    /// Applies an action. Returns whether any section changed state.
    pub fn apply(&mut self, action: RevealAction) -> bool {
        match action {
            RevealAction::Observe(reports) => {
                reports.iter().fold(false, |changed, (id, intersecting)| {
                    self.observe(id, *intersecting) || changed
                })
            }
            RevealAction::RevealAll => {
                let had_pending = !self.all_revealed();
                self.reveal_all();
                had_pending
            }
        }
    }

    pub fn reveal_all(&mut self) {
        for state in self.states.values_mut() {
            *state = RevealState::Revealed;
        }
    }

    pub fn pending(&self) -> impl Iterator<Item = &str> {
        self.states
            .iter()
            .filter(|(_, state)| **state == RevealState::Pending)
            .map(|(id, _)| id.as_str())
    }

    pub fn all_revealed(&self) -> bool {
        self.pending().next().is_none()
    }

    pub fn class_for(&self, id: &str) -> Option<&'static str> {
        self.is_revealed(id).then_some(REVEALED_CLASS)
    }
}

/// Root margin string contracting the observed viewport from the bottom.
pub fn root_margin(bottom_margin: f64) -> String {
    format!("0px 0px -{}px 0px", bottom_margin.max(0.0).round())
}

/// Fraction of a section inside the viewport, with the bottom edge pulled up
/// by `bottom_margin`. Used when no intersection observer is available.
pub fn visible_fraction(
    section: &SectionBounds,
    sample: &ScrollSample,
    bottom_margin: f64,
) -> f64 {
    if section.height <= 0.0 {
        return 0.0;
    }

    let view_top = sample.scroll_y;
    let view_bottom = sample.scroll_y + sample.viewport_height - bottom_margin;
    let overlap = view_bottom.min(section.top + section.height) - view_top.max(section.top);

    (overlap / section.height).clamp(0.0, 1.0)
}

/// Ids of sections that cross `threshold` in the given sample.
pub fn sections_in_view<'a>(
    sections: &'a [SectionBounds],
    sample: &ScrollSample,
    threshold: f64,
    bottom_margin: f64,
) -> Vec<&'a str> {
    sections
        .iter()
        .filter(|section| {
            let fraction = visible_fraction(section, sample, bottom_margin);
            fraction > 0.0 && fraction >= threshold
        })
        .map(|section| section.id.as_str())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(scroll_y: f64) -> ScrollSample {
        ScrollSample {
            scroll_y,
            header_height: 70.0,
            viewport_height: 800.0,
        }
    }

    #[test]
    fn enter_then_exit_stays_revealed() {
        let mut board = RevealBoard::with_sections(["about", "projects"]);

        assert!(board.observe("about", true));
        assert!(!board.observe("about", false));

        assert!(board.is_revealed("about"));
        assert_eq!(board.class_for("about"), Some(REVEALED_CLASS));
        assert_eq!(board.class_for("projects"), None);
    }

    #[test]
    fn non_intersecting_reports_keep_section_pending() {
        let mut board = RevealBoard::with_sections(["skills"]);
        assert!(!board.observe("skills", false));
        assert_eq!(board.state("skills"), Some(RevealState::Pending));
    }

    #[test]
    fn untagged_sections_are_ignored() {
        let mut board = RevealBoard::with_sections(["about"]);
        assert!(!board.observe("footer", true));
        assert_eq!(board.state("footer"), None);
    }

    #[test]
    fn reveal_all_empties_the_pending_set() {
        let mut board = RevealBoard::with_sections(["hero", "about", "contact"]);
        board.observe("hero", true);
        assert_eq!(board.pending().count(), 2);

        board.reveal_all();
        assert!(board.all_revealed());
    }

    #[test]
    fn batched_reports_apply_every_entry() {
        let mut board = RevealBoard::with_sections(["hero", "about", "skills"]);

        let changed = board.apply(RevealAction::Observe(vec![
            ("hero".to_string(), true),
            ("about".to_string(), false),
            ("skills".to_string(), true),
        ]));
        assert!(changed);
        assert!(board.is_revealed("hero"));
        assert!(!board.is_revealed("about"));
        assert!(board.is_revealed("skills"));

        let repeat = board.apply(RevealAction::Observe(vec![("hero".to_string(), false)]));
        assert!(!repeat);
        assert!(board.is_revealed("hero"));
    }

    #[test]
    fn reveal_all_reports_change_only_once() {
        let mut board = RevealBoard::with_sections(["hero", "about"]);
        assert!(board.apply(RevealAction::RevealAll));
        assert!(!board.apply(RevealAction::RevealAll));
        assert!(board.all_revealed());
    }

    #[test]
    fn root_margin_contracts_bottom_edge() {
        assert_eq!(root_margin(50.0), "0px 0px -50px 0px");
    }

    #[test]
    fn visible_fraction_respects_bottom_margin() {
        // Viewport [0, 750) after the 50px contraction; section starts at 700.
        let section = SectionBounds::new("about", 700.0, 500.0);
        assert_eq!(visible_fraction(&section, &sample(0.0), 50.0), 0.1);
        assert_eq!(visible_fraction(&section, &sample(0.0), 100.0), 0.0);
    }

    #[test]
    fn fallback_reveals_only_sections_past_threshold() {
        let sections = vec![
            SectionBounds::new("hero", 0.0, 600.0),
            SectionBounds::new("about", 600.0, 1_000.0),
            SectionBounds::new("contact", 1_600.0, 400.0),
        ];

        let ids = sections_in_view(&sections, &sample(0.0), 0.1, 50.0);
        assert_eq!(ids, vec!["hero", "about"]);

        let ids = sections_in_view(&sections, &sample(1_500.0), 0.1, 50.0);
        assert_eq!(ids, vec!["about", "contact"]);
    }
}
