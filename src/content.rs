pub const SITE_OWNER: &str = "Madhumitha T";
pub const HERO_ROLE: &str = "Software Engineer | Full Stack Developer";
pub const HERO_BLURB: &str =
    "I build reliable web applications end to end, from data models to polished interfaces.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavEntry {
    pub label: &'static str,
    pub section: &'static str,
}

impl NavEntry {
    pub fn href(self) -> String {
        format!("#{}", self.section)
    }
}

/// Section ids double as nav-link fragments.
pub const NAV_ENTRIES: [NavEntry; 5] = [
    NavEntry { label: "Home", section: "hero" },
    NavEntry { label: "About", section: "about" },
    NavEntry { label: "Skills", section: "skills" },
    NavEntry { label: "Projects", section: "projects" },
    NavEntry { label: "Contact", section: "contact" },
];

pub fn section_ids() -> impl Iterator<Item = &'static str> {
    NAV_ENTRIES.iter().map(|entry| entry.section)
}

pub const ABOUT_PARAGRAPHS: [&str; 2] = [
    "I am a software engineer who enjoys turning loose ideas into small, dependable products.",
    "Most of my work sits between the browser and the database: APIs, data pipelines, and the interfaces that sit on top of them.",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SkillGroup {
    pub title: &'static str,
    pub icon: &'static str,
    pub items: &'static [&'static str],
}

pub const SKILL_GROUPS: [SkillGroup; 3] = [
    SkillGroup {
        title: "Languages",
        icon: "fa-code",
        items: &["Rust", "TypeScript", "Python", "Java", "SQL"],
    },
    SkillGroup {
        title: "Frontend",
        icon: "fa-palette",
        items: &["HTML", "CSS", "React", "Yew"],
    },
    SkillGroup {
        title: "Backend & Tools",
        icon: "fa-server",
        items: &["Node.js", "PostgreSQL", "Docker", "Git"],
    },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Project {
    pub title: &'static str,
    pub summary: &'static str,
    pub stack: &'static [&'static str],
    pub href: &'static str,
}

pub const PROJECTS: [Project; 3] = [
    Project {
        title: "Task Board",
        summary: "Kanban board with drag-and-drop columns and offline drafts.",
        stack: &["TypeScript", "React", "IndexedDB"],
        href: "https://github.com/",
    },
    Project {
        title: "Expense Tracker",
        summary: "Budget dashboard with monthly rollups and CSV import.",
        stack: &["Python", "Flask", "PostgreSQL"],
        href: "https://github.com/",
    },
    Project {
        title: "Weather Lens",
        summary: "Forecast viewer that caches API responses per location.",
        stack: &["Rust", "Yew", "WebAssembly"],
        href: "https://github.com/",
    },
];

pub const CONTACT_EMAIL: &str = "hello@example.com";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nav_entries_are_fragments_of_unique_sections() {
        let ids: Vec<_> = section_ids().collect();
        let mut unique = ids.clone();
        unique.sort_unstable();
        unique.dedup();

        assert_eq!(ids.len(), unique.len());
        assert_eq!(NAV_ENTRIES[0].href(), "#hero");
        assert_eq!(
            crate::router::fragment_id(&NAV_ENTRIES[4].href()),
            Some("contact")
        );
    }

    #[test]
    fn home_entry_matches_default_home_section() {
        let config = crate::config::BehaviorConfig::default();
        assert_eq!(NAV_ENTRIES[0].section, config.home_section);
    }
}
