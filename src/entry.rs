//! Glyph-picker name entry for boards without a keyboard.

use alloc::string::{
    String,
    ToString,
};

use crate::{
    Result,
    io::{
        EntryOutcome,
        EntryView,
        Input,
        Key,
        NameEntry,
        RenderSink,
    },
};

/// Glyphs selectable with Up/Down. Index 0 doubles as the word separator.
pub const GLYPHS: &[u8] = b" ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789-._";

/// Result of feeding one key to a [`TextEntry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryStep {
    Editing,
    Accepted(String),
    Cancelled,
}

/// Editing state: committed text plus the glyph under the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEntry {
    text: String,
    pending: usize,
    max_len: usize,
}

impl TextEntry {
    #[must_use]
    pub const fn new(max_len: usize) -> Self {
        Self {
            text: String::new(),
            pending: 0,
            max_len,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn pending(&self) -> char {
        char::from(GLYPHS[self.pending])
    }

    pub fn view<'a>(&'a self, prompt: &'a str) -> EntryView<'a> {
        EntryView {
            prompt,
            text: &self.text,
            pending: self.pending(),
        }
    }

    pub fn press(&mut self, key: Key) -> EntryStep {
        match key {
            Key::Up => self.pending = (self.pending + 1) % GLYPHS.len(),
            Key::Down => self.pending = (self.pending + GLYPHS.len() - 1) % GLYPHS.len(),
            Key::Right => self.commit(),
            Key::Left => {
                if self.pending == 0 {
                    self.text.pop();
                } else {
                    self.pending = 0;
                }
            }
            Key::Accept => {
                self.commit();
                let name = self.text.trim();
                if !name.is_empty() {
                    return EntryStep::Accepted(name.to_string());
                }
                self.text.clear();
            }
            Key::Cancel => return EntryStep::Cancelled,
        }
        EntryStep::Editing
    }

    fn commit(&mut self) {
        if self.text.len() < self.max_len {
            self.text.push(self.pending());
        }
        self.pending = 0;
    }
}

/// [`NameEntry`] that renders a [`TextEntry`] and feeds it keys until it
/// resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickerEntry {
    max_len: usize,
}

impl PickerEntry {
    #[must_use]
    pub const fn new(max_len: usize) -> Self {
        Self { max_len }
    }
}

impl NameEntry for PickerEntry {
    async fn run<R: RenderSink, I: Input>(
        &mut self,
        prompt: &str,
        render: &mut R,
        input: &mut I,
    ) -> Result<EntryOutcome> {
        let mut entry = TextEntry::new(self.max_len);
        loop {
            render.render_overlay(&entry.view(prompt)).await?;
            match entry.press(input.next_key().await?) {
                EntryStep::Editing => {}
                EntryStep::Accepted(name) => return Ok(EntryOutcome::Accepted(name)),
                EntryStep::Cancelled => return Ok(EntryOutcome::Cancelled),
            }
        }
    }
}
