pub const ICON_CLOSED: &str = "fa-bars";
pub const ICON_OPEN: &str = "fa-times";
pub const OPEN_CLASS: &str = "active";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuAction {
    Toggle,
    Close,
}

/// Mobile navigation menu. The open flag drives both the container class and
/// the toggle icon, so the two cannot drift apart.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MenuState {
    open: bool,
}

impl MenuState {
    pub fn is_open(self) -> bool {
        self.open
    }

    pub fn toggled(self) -> Self {
        Self { open: !self.open }
    }

    pub fn closed(self) -> Self {
        Self { open: false }
    }

    pub fn apply(self, action: MenuAction) -> Self {
        match action {
            MenuAction::Toggle => self.toggled(),
            MenuAction::Close => self.closed(),
        }
    }

    pub fn icon(self) -> &'static str {
        if self.open {
            ICON_OPEN
        } else {
            ICON_CLOSED
        }
    }

    pub fn container_class(self) -> Option<&'static str> {
        self.open.then_some(OPEN_CLASS)
    }

    pub fn toggle_label(self) -> &'static str {
        if self.open {
            "Close navigation menu"
        } else {
            "Open navigation menu"
        }
    }
}

/// Whether a document-level click should close the menu.
pub fn click_closes_menu(inside_menu: bool, inside_toggle: bool) -> bool {
    !inside_menu && !inside_toggle
}
