use nabu_engine::input::{Facts, Key, KeyState};

/// Caret and selection of one text input, kept in persistent state by id.
///
/// The text itself belongs to the application (`&mut String` passed to the
/// builder each frame); this only remembers where the caret is. All offsets
/// are byte offsets on char boundaries of that string, re-clamped whenever
/// the string changed underneath.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct EditCursor {
    /// Byte offset of the caret.
    pub cursor: usize,
    /// Byte offset of the selection anchor. `cursor == anchor` means no selection.
    pub anchor: usize,
    /// Horizontal pixel offset the text has been scrolled to the left.
    pub scroll_offset: f32,
}

impl EditCursor {
    /// Caret at the end of `text`.
    pub fn at_end(text: &str) -> Self {
        Self { cursor: text.len(), anchor: text.len(), scroll_offset: 0.0 }
    }

    /// Returns `(lo, hi)` sorted byte range of the selection.
    #[inline]
    pub fn sel_range(&self) -> (usize, usize) {
        (self.cursor.min(self.anchor), self.cursor.max(self.anchor))
    }

    #[inline]
    pub fn has_selection(&self) -> bool {
        self.cursor != self.anchor
    }

    /// Pulls both offsets back onto valid boundaries of `text`.
    pub fn clamp_to(&mut self, text: &str) {
        self.cursor = floor_boundary(text, self.cursor);
        self.anchor = floor_boundary(text, self.anchor);
    }

    // ── cursor movement ───────────────────────────────────────────────────

    pub fn move_left(&mut self, text: &str, shift: bool) {
        if !shift && self.has_selection() {
            let left = self.sel_range().0;
            self.cursor = left;
            self.anchor = left;
        } else {
            self.cursor = prev_char(text, self.cursor);
            if !shift { self.anchor = self.cursor; }
        }
    }

    pub fn move_right(&mut self, text: &str, shift: bool) {
        if !shift && self.has_selection() {
            let right = self.sel_range().1;
            self.cursor = right;
            self.anchor = right;
        } else {
            self.cursor = next_char(text, self.cursor);
            if !shift { self.anchor = self.cursor; }
        }
    }

    /// Ctrl+←
    pub fn move_word_left(&mut self, text: &str, shift: bool) {
        self.cursor = prev_word(text, self.cursor);
        if !shift { self.anchor = self.cursor; }
    }

    /// Ctrl+→
    pub fn move_word_right(&mut self, text: &str, shift: bool) {
        self.cursor = next_word(text, self.cursor);
        if !shift { self.anchor = self.cursor; }
    }

    pub fn move_home(&mut self, shift: bool) {
        self.cursor = 0;
        if !shift { self.anchor = self.cursor; }
    }

    pub fn move_end(&mut self, text: &str, shift: bool) {
        self.cursor = text.len();
        if !shift { self.anchor = self.cursor; }
    }

    pub fn select_all(&mut self, text: &str) {
        self.anchor = 0;
        self.cursor = text.len();
    }

    // ── editing ───────────────────────────────────────────────────────────

    /// Inserts as much of `s` as fits in `max_chars` (0 = unlimited),
    /// replacing the selection. Returns true if the text changed.
    pub fn insert_str(&mut self, text: &mut String, s: &str, max_chars: usize) -> bool {
        let mut changed = self.delete_selection(text);
        let room = if max_chars == 0 { usize::MAX } else { max_chars.saturating_sub(text.chars().count()) };
        let end = s.char_indices().nth(room).map_or(s.len(), |(i, _)| i);
        let accepted = &s[..end];
        if !accepted.is_empty() {
            text.insert_str(self.cursor, accepted);
            self.cursor += accepted.len();
            self.anchor = self.cursor;
            changed = true;
        }
        changed
    }

    /// Backspace. Deletes the selection if any.
    pub fn delete_backward(&mut self, text: &mut String) -> bool {
        if self.delete_selection(text) { return true; }
        if self.cursor == 0 { return false; }
        let prev = prev_char(text, self.cursor);
        text.drain(prev..self.cursor);
        self.cursor = prev;
        self.anchor = prev;
        true
    }

    /// Delete key. Deletes the selection if any.
    pub fn delete_forward(&mut self, text: &mut String) -> bool {
        if self.delete_selection(text) { return true; }
        if self.cursor >= text.len() { return false; }
        let next = next_char(text, self.cursor);
        text.drain(self.cursor..next);
        true
    }

    // ── facts ─────────────────────────────────────────────────────────────

    /// Applies this frame's typed characters, editing keys and committed IME
    /// text to `text`. Returns true if the text changed.
    ///
    /// Enter, Escape and Tab are left to the caller.
    pub fn apply_facts(&mut self, text: &mut String, facts: &Facts, max_chars: usize) -> bool {
        self.clamp_to(text);
        let mut changed = false;

        for ev in facts.keys().iter().filter(|k| k.state == KeyState::Pressed) {
            let shift = ev.modifiers.shift;
            let ctrl = ev.modifiers.ctrl || ev.modifiers.meta;
            match ev.key {
                Key::Backspace => changed |= self.delete_backward(text),
                Key::Delete => changed |= self.delete_forward(text),
                Key::ArrowLeft if ctrl => self.move_word_left(text, shift),
                Key::ArrowLeft => self.move_left(text, shift),
                Key::ArrowRight if ctrl => self.move_word_right(text, shift),
                Key::ArrowRight => self.move_right(text, shift),
                Key::Home => self.move_home(shift),
                Key::End => self.move_end(text, shift),
                Key::Char('a') if ctrl => self.select_all(text),
                _ => {}
            }
        }

        if !facts.modifiers().ctrl && !facts.modifiers().meta {
            let mut buf = [0u8; 4];
            for &c in facts.chars() {
                changed |= self.insert_str(text, c.encode_utf8(&mut buf), max_chars);
            }
        }

        let committed = &facts.ime().committed;
        if !committed.is_empty() {
            changed |= self.insert_str(text, committed, max_chars);
        }
        changed
    }

    /// Adjusts `scroll_offset` so a caret at `caret_x` stays within `[0, inner_width]`.
    pub fn ensure_visible(&mut self, caret_x: f32, inner_width: f32) {
        if caret_x < self.scroll_offset {
            self.scroll_offset = caret_x;
        } else if caret_x > self.scroll_offset + inner_width {
            self.scroll_offset = caret_x - inner_width;
        }
        self.scroll_offset = self.scroll_offset.max(0.0);
    }

    fn delete_selection(&mut self, text: &mut String) -> bool {
        if !self.has_selection() { return false; }
        let (lo, hi) = self.sel_range();
        text.drain(lo..hi);
        self.cursor = lo;
        self.anchor = lo;
        true
    }
}

// ── UTF-8 helpers ─────────────────────────────────────────────────────────

fn floor_boundary(s: &str, mut i: usize) -> usize {
    i = i.min(s.len());
    while !s.is_char_boundary(i) { i -= 1; }
    i
}

/// Step one codepoint boundary backward from `from`.
fn prev_char(s: &str, from: usize) -> usize {
    if from == 0 { return 0; }
    let mut i = from - 1;
    while !s.is_char_boundary(i) { i -= 1; }
    i
}

/// Step one codepoint boundary forward from `from`.
fn next_char(s: &str, from: usize) -> usize {
    if from >= s.len() { return s.len(); }
    let mut i = from + 1;
    while i < s.len() && !s.is_char_boundary(i) { i += 1; }
    i
}

/// Jump backward over whitespace then word characters.
fn prev_word(s: &str, from: usize) -> usize {
    let trimmed = s[..from].trim_end();
    trimmed.trim_end_matches(|c: char| !c.is_whitespace()).len()
}

/// Jump forward over word characters then whitespace.
fn next_word(s: &str, from: usize) -> usize {
    let after = &s[from..];
    let after_word = after.trim_start_matches(|c: char| !c.is_whitespace());
    from + (after.len() - after_word.trim_start().len())
}
