//! Chat transcript entries and their markup

use std::sync::OnceLock;

use regex::Regex;

use crate::error::PageResult;
use crate::view::View;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    /// Style class carried by every entry from this sender
    pub fn css_class(self) -> &'static str {
        match self {
            Sender::User => "user-message",
            Sender::Bot => "bot-message",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    pub text: String,
    pub sender: Sender,
}

impl TranscriptEntry {
    pub fn user(text: impl Into<String>) -> Self {
        Self { text: text.into(), sender: Sender::User }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self { text: text.into(), sender: Sender::Bot }
    }
}

fn bold_pattern() -> &'static Regex {
    static BOLD: OnceLock<Regex> = OnceLock::new();
    // `.` stops at newlines, so a bold pair never spans lines.
    BOLD.get_or_init(|| Regex::new(r"\*\*(.*?)\*\*").expect("static regex"))
}

/// Turn `**bold**` into `<strong>` and newlines into `<br>`.
///
/// The result is inserted as markup as-is; it is not escaped.
pub fn format_markup(text: &str) -> String {
    bold_pattern()
        .replace_all(text, "<strong>${1}</strong>")
        .replace('\n', "<br>")
}

/// The append-only list of entries rendered into one container element.
#[derive(Debug, Clone)]
pub struct Transcript {
    container_id: String,
}

impl Transcript {
    pub fn new(container_id: impl Into<String>) -> Self {
        Self { container_id: container_id.into() }
    }

    /// Render `entry` at the end of the transcript and scroll it into view.
    pub fn render_message<V: View>(&self, view: &V, entry: &TranscriptEntry) -> PageResult<()> {
        let markup = format_markup(&entry.text);
        view.append_markup(&self.container_id, &markup, &["message", entry.sender.css_class()])?;
        view.scroll_to_bottom(&self.container_id)
    }
}
