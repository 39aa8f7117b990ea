use crate::config::BehaviorConfig;

const SHADOW_RESTING: &str = "0 2px 10px rgba(0, 0, 0, 0.1)";
const SHADOW_RAISED: &str = "0 2px 20px rgba(0, 0, 0, 0.1)";

/// Document-space extent of one page section.
#[derive(Clone, Debug, PartialEq)]
pub struct SectionBounds {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

impl SectionBounds {
    pub fn new(id: impl Into<String>, top: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            top,
            height,
        }
    }

    pub fn contains(&self, position: f64) -> bool {
        position >= self.top && position < self.top + self.height
    }
}

/// Live measurements read at evaluation time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollSample {
    pub scroll_y: f64,
    pub header_height: f64,
    pub viewport_height: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HeaderShadow {
    #[default]
    Resting,
    Raised,
}

impl HeaderShadow {
    pub fn css(self) -> &'static str {
        match self {
            Self::Resting => SHADOW_RESTING,
            Self::Raised => SHADOW_RAISED,
        }
    }

    pub fn style(self) -> String {
        format!("box-shadow: {};", self.css())
    }
}

/// Everything one scroll evaluation decides.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScrollView {
    pub active_section: Option<String>,
    pub scroll_top_visible: bool,
    pub header_shadow: HeaderShadow,
}

impl ScrollView {
    pub fn is_active(&self, section_id: &str) -> bool {
        self.active_section.as_deref() == Some(section_id)
    }
}

/// First section in document order whose range holds `position`.
pub fn section_at(position: f64, sections: &[SectionBounds]) -> Option<&SectionBounds> {
    sections.iter().find(|section| section.contains(position))
}

pub fn resolve_active_section(
    sample: &ScrollSample,
    sections: &[SectionBounds],
    config: &BehaviorConfig,
) -> Option<String> {
    if sample.scroll_y < config.home_override_below {
        return Some(config.home_section.clone());
    }

    let position = sample.scroll_y + sample.header_height + config.active_lookahead;
    section_at(position, sections).map(|section| section.id.clone())
}

pub fn scroll_top_visible(scroll_y: f64, config: &BehaviorConfig) -> bool {
    scroll_y > config.scroll_top_after
}

pub fn header_shadow(scroll_y: f64, config: &BehaviorConfig) -> HeaderShadow {
    if scroll_y > config.shadow_after {
        HeaderShadow::Raised
    } else {
        HeaderShadow::Resting
    }
}

pub fn evaluate(
    sample: &ScrollSample,
    sections: &[SectionBounds],
    config: &BehaviorConfig,
) -> ScrollView {
    ScrollView {
        active_section: resolve_active_section(sample, sections, config),
        scroll_top_visible: scroll_top_visible(sample.scroll_y, config),
        header_shadow: header_shadow(sample.scroll_y, config),
    }
}
