//! Terminal markdown rendering for assistant replies.
//!
//! Replies are short prose; they are rendered through a `termimad` skin
//! so emphasis and lists display sensibly in the terminal.

use termimad::MadSkin;

/// Terminal markdown renderer.
pub struct ChatRenderer {
    skin: MadSkin,
}

impl ChatRenderer {
    pub fn new() -> Self {
        let mut skin = MadSkin::default_dark();
        skin.inline_code
            .set_fg(termimad::crossterm::style::Color::Yellow);
        Self { skin }
    }

    /// Render one reply as formatted terminal text.
    pub fn render(&self, markdown: &str) -> String {
        format!("{}", self.skin.term_text(markdown))
    }
}

impl Default for ChatRenderer {
    fn default() -> Self {
        Self::new()
    }
}
