// src/format/scanner.rs
//! Byte cursor used by the key/value and profile readers

/// Forward-only cursor over a text document
pub(crate) struct Scanner<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    pub(crate) fn peek(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    pub(crate) fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    pub(crate) fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.bump();
        }
    }

    /// Consume `expected` if it is the next character
    pub(crate) fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Advance to the next occurrence of `c`, leaving the cursor on it
    pub(crate) fn seek_char(&mut self, c: char) -> bool {
        match self.text[self.pos..].find(c) {
            Some(offset) => {
                self.pos += offset;
                true
            }
            None => {
                self.pos = self.text.len();
                false
            }
        }
    }

    /// Advance past the next occurrence of `needle`
    pub(crate) fn seek_past(&mut self, needle: &str) -> bool {
        match self.text[self.pos..].find(needle) {
            Some(offset) => {
                self.pos += offset + needle.len();
                true
            }
            None => {
                self.pos = self.text.len();
                false
            }
        }
    }

    /// Read a `"..."` string with `\"` and `\\` escapes.
    ///
    /// The cursor must sit on the opening quote. Returns `None` for an
    /// unterminated string.
    pub(crate) fn read_quoted(&mut self) -> Option<String> {
        if !self.eat('"') {
            return None;
        }
        let mut out = String::new();
        loop {
            match self.bump()? {
                '"' => return Some(out),
                '\\' => match self.bump()? {
                    'n' => out.push('\n'),
                    't' => out.push('\t'),
                    other => out.push(other),
                },
                c => out.push(c),
            }
        }
    }

    /// Text up to the next `needle`, or the rest of the document when there
    /// is none. The cursor lands on `needle`.
    pub(crate) fn take_segment(&mut self, needle: &str) -> &'a str {
        let start = self.pos;
        let end = self.text[start..]
            .find(needle)
            .map_or(self.text.len(), |offset| start + offset);
        self.pos = end;
        &self.text[start..end]
    }

    /// Text up to (not including) the next `c`; the cursor lands on `c`
    pub(crate) fn take_until(&mut self, c: char) -> Option<&'a str> {
        let start = self.pos;
        let offset = self.text[start..].find(c)?;
        self.pos = start + offset;
        Some(&self.text[start..start + offset])
    }
}

/// Quote a string for the formats in this module
pub(crate) fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    out.push('"');
    out
}
