//! Splitting of a single directive line into argument words.
//!
//! Only single and double quotes are understood. There is no escaping, no nesting and no
//! continuation onto the next line: an unterminated quote simply stays open until the end
//! of the line.
//!
//! The lexer works on raw bytes. Quotes and spaces are ASCII, so every other byte passes
//! through untouched and arguments reach the child exactly as written in the script.

use std::ffi::OsString;

/// How runs of unquoted spaces are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Separators {
    /// Every unquoted space ends a word, so `a  b` yields `["a", "", "b"]`.
    /// Existing scripts rely on this, hence the default.
    #[default]
    Strict,
    /// A run of unquoted spaces is a single separator. Quoted empty strings (`''`)
    /// still produce an empty word.
    Collapse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LexingState {
    Unquoted,
    SingleQuote,
    DoubleQuote,
}

struct LexingFSM<'a> {
    input: std::slice::Iter<'a, u8>,
    state: LexingState,
    separators: Separators,
    buffer: Vec<u8>,
    // Set once a quote opened inside the current word, so `''` survives collapsing.
    quoted: bool,
}

impl<'a> LexingFSM<'a> {
    fn new(line: &'a [u8], separators: Separators) -> Self {
        LexingFSM {
            input: line.iter(),
            state: LexingState::Unquoted,
            separators,
            buffer: Vec::new(),
            quoted: false,
        }
    }

    /// Walks the whole line and returns the words in order.
    ///
    /// Quote characters that toggle a state are dropped; a quote of the other kind inside an
    /// active quote is kept as a literal character.
    fn make_words(mut self) -> Vec<Vec<u8>> {
        let mut out = Vec::new();

        while let Some(&byte) = self.input.next() {
            match self.state {
                LexingState::Unquoted => self.handle_unquoted(byte, &mut out),
                LexingState::SingleQuote => self.handle_quoted(byte, b'\''),
                LexingState::DoubleQuote => self.handle_quoted(byte, b'"'),
            }
        }

        // No trailing empty word, even after a separator.
        if !self.buffer.is_empty() || (self.quoted && self.separators == Separators::Collapse) {
            out.push(self.buffer);
        }
        out
    }

    fn handle_unquoted(&mut self, byte: u8, out: &mut Vec<Vec<u8>>) {
        match byte {
            b' ' => self.flush(out),
            b'\'' => {
                self.state = LexingState::SingleQuote;
                self.quoted = true;
            }
            b'"' => {
                self.state = LexingState::DoubleQuote;
                self.quoted = true;
            }
            b => self.buffer.push(b),
        }
    }

    fn handle_quoted(&mut self, byte: u8, closing: u8) {
        if byte == closing {
            self.state = LexingState::Unquoted;
        } else {
            self.buffer.push(byte);
        }
    }

    fn flush(&mut self, out: &mut Vec<Vec<u8>>) {
        let keep = match self.separators {
            Separators::Strict => true,
            Separators::Collapse => !self.buffer.is_empty() || self.quoted,
        };
        if keep {
            out.push(std::mem::take(&mut self.buffer));
        }
        self.quoted = false;
    }
}

/// Splits `line` into argument words using the default [`Separators::Strict`] mode.
pub fn tokenize(line: &str) -> Vec<String> {
    tokenize_with(line, Separators::Strict)
}

/// Splits `line` into argument words.
///
/// An empty or space-only line yields no words in [`Separators::Collapse`] mode. In strict
/// mode a space-only line yields empty words; an empty program name is never spawned.
pub fn tokenize_with(line: &str, separators: Separators) -> Vec<String> {
    LexingFSM::new(line.as_bytes(), separators)
        .make_words()
        .into_iter()
        // Cuts only fall on ASCII bytes, so each word is still valid UTF-8.
        .map(|word| String::from_utf8_lossy(&word).into_owned())
        .collect()
}

/// Splits a raw script line into process arguments without any re-encoding.
pub fn tokenize_bytes(line: &[u8], separators: Separators) -> Vec<OsString> {
    LexingFSM::new(line, separators)
        .make_words()
        .into_iter()
        .map(os_string_from_bytes)
        .collect()
}

#[cfg(unix)]
fn os_string_from_bytes(bytes: Vec<u8>) -> OsString {
    use std::os::unix::ffi::OsStringExt;
    OsString::from_vec(bytes)
}

// Other platforms have no byte-exact OsString constructor.
#[cfg(not(unix))]
fn os_string_from_bytes(bytes: Vec<u8>) -> OsString {
    String::from_utf8_lossy(&bytes).into_owned().into()
}
