//! Terminal bindings for the registration page: the form is filled from CLI
//! flags, the passcode modal is rendered as lines on a writer.

use std::io::Write;

use client_core::{FormView, Notice, NoticeKind, OtpView, PageEvent, SubmitControl};
use shared::domain::{FormField, RegistrationDraft, OTP_LENGTH};

pub struct ArgsForm {
    draft: RegistrationDraft,
}

impl ArgsForm {
    pub fn new(draft: RegistrationDraft) -> Self {
        Self { draft }
    }
}

impl FormView for ArgsForm {
    fn text_value(&self, field: FormField) -> String {
        self.draft.text(field).unwrap_or_default().to_string()
    }

    fn is_checked(&self, field: FormField) -> bool {
        field == FormField::Terms && self.draft.terms_accepted
    }
}

pub const SUBMIT_LABEL: &str = "Create Account";

pub struct TerminalView<W: Write> {
    out: W,
    cells: [Option<char>; OTP_LENGTH],
    focused: Option<usize>,
    control: SubmitControl,
    navigated: Option<String>,
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            cells: [None; OTP_LENGTH],
            focused: None,
            control: SubmitControl::enabled(SUBMIT_LABEL),
            navigated: None,
        }
    }

    pub fn navigated(&self) -> Option<&str> {
        self.navigated.as_deref()
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    /// `[4][8][_][_][_][_]` with the focused cell marked by `>`.
    pub fn row(&self) -> String {
        self.cells
            .iter()
            .enumerate()
            .map(|(index, cell)| {
                let marker = if self.focused == Some(index) { ">" } else { "" };
                format!("{marker}[{}]", cell.unwrap_or('_'))
            })
            .collect()
    }
}

impl<W: Write> OtpView for TerminalView<W> {
    fn set_modal_visible(&mut self, visible: bool) {
        let _ = if visible {
            writeln!(
                self.out,
                "Enter the {OTP_LENGTH}-digit code \
                 (':resend' for a new code, ':back' to return, '<' erases)"
            )
        } else {
            writeln!(self.out, "Code entry closed.")
        };
    }

    fn set_cell(&mut self, index: usize, value: Option<char>) {
        if let Some(cell) = self.cells.get_mut(index) {
            *cell = value;
        }
    }

    fn focus_cell(&mut self, index: usize) {
        self.focused = Some(index);
    }

    fn submit_control(&self) -> SubmitControl {
        self.control.clone()
    }

    fn set_submit_control(&mut self, control: SubmitControl) {
        if control.disabled {
            let _ = writeln!(self.out, "{}", control.label);
        }
        self.control = control;
    }

    fn set_back_enabled(&mut self, enabled: bool) {
        if !enabled {
            let _ = writeln!(self.out, "(waiting for the server; ':back' is unavailable)");
        }
    }

    fn notify(&mut self, notice: &Notice) {
        let prefix = match notice.kind() {
            NoticeKind::Info => "i",
            NoticeKind::Success => "ok",
            NoticeKind::Error => "!",
        };
        let _ = writeln!(self.out, "{prefix} {notice}");
    }

    fn navigate(&mut self, destination: &str) {
        let _ = writeln!(self.out, "Continue at {destination}");
        self.navigated = Some(destination.to_string());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keystroke {
    Char(char),
    Backspace,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    Retry,
    Back,
    Resend,
    Submit,
    Keys(Vec<Keystroke>),
}

pub fn parse_line(line: &str) -> Command {
    match line.trim() {
        ":quit" | ":q" => Command::Quit,
        ":retry" => Command::Retry,
        ":back" => Command::Back,
        ":resend" => Command::Resend,
        ":submit" | "" => Command::Submit,
        keys => Command::Keys(
            keys.chars()
                .filter(|ch| !ch.is_whitespace())
                .map(|ch| match ch {
                    '<' => Keystroke::Backspace,
                    other => Keystroke::Char(other),
                })
                .collect(),
        ),
    }
}

/// Keystroke delivered to the focused cell.
pub fn keystroke_event(key: Keystroke, focused: usize) -> PageEvent {
    match key {
        Keystroke::Char(ch) => PageEvent::CellInput {
            index: focused,
            value: ch.to_string(),
        },
        Keystroke::Backspace => PageEvent::Backspace { index: focused },
    }
}

#[cfg(test)]
#[path = "tests/terminal_tests.rs"]
mod tests;
