//! Cosmetic view adapters. None of these feed the passcode workflow; front
//! ends wire them up independently.

use std::collections::HashSet;

/// Show/hide toggle for the password input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PasswordVisibility {
    visible: bool,
}

impl PasswordVisibility {
    pub fn toggle(&mut self) -> bool {
        self.visible = !self.visible;
        self.visible
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn input_type(&self) -> &'static str {
        if self.visible {
            "text"
        } else {
            "password"
        }
    }

    pub fn icon_class(&self) -> &'static str {
        if self.visible {
            "fa-eye-slash"
        } else {
            "fa-eye"
        }
    }

    pub fn render(&self, password: &str) -> String {
        if self.visible {
            password.to_string()
        } else {
            "*".repeat(password.chars().count())
        }
    }
}

/// Tracks which input groups carry the `focused` highlight.
#[derive(Debug, Clone, Default)]
pub struct FocusHighlight {
    focused: HashSet<String>,
}

impl FocusHighlight {
    pub fn on_focus(&mut self, input: &str) {
        self.focused.insert(input.to_string());
    }

    pub fn on_blur(&mut self, input: &str) {
        self.focused.remove(input);
    }

    pub fn is_highlighted(&self, input: &str) -> bool {
        self.focused.contains(input)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineStyle {
    pub transform: &'static str,
    pub opacity: &'static str,
}

const LINES_CLOSED: [LineStyle; 3] = [
    LineStyle {
        transform: "none",
        opacity: "1",
    },
    LineStyle {
        transform: "none",
        opacity: "1",
    },
    LineStyle {
        transform: "none",
        opacity: "1",
    },
];

const LINES_OPEN: [LineStyle; 3] = [
    LineStyle {
        transform: "rotate(45deg) translate(5px, 5px)",
        opacity: "1",
    },
    LineStyle {
        transform: "none",
        opacity: "0",
    },
    LineStyle {
        transform: "rotate(-45deg) translate(7px, -6px)",
        opacity: "1",
    },
];

/// Hamburger navigation dropdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavMenu {
    active: bool,
}

impl NavMenu {
    pub fn toggle(&mut self) -> bool {
        self.active = !self.active;
        self.active
    }

    /// Page click; closes the dropdown unless it landed on the menu or its toggle.
    pub fn on_document_click(&mut self, inside_dropdown: bool, inside_toggle: bool) {
        if !inside_dropdown && !inside_toggle {
            self.active = false;
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn line_styles(&self) -> [LineStyle; 3] {
        if self.active {
            LINES_OPEN
        } else {
            LINES_CLOSED
        }
    }
}
