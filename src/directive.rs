//! Classification of script lines by their leading byte.

pub const TOK_ON_SUCCESS: u8 = b'?';
pub const TOK_ON_FAILURE: u8 = b'!';
pub const TOK_GUARDED: u8 = b'\t';
pub const TOK_COMMENT: u8 = b'#';

/// One script line, borrowed from the line buffer.
///
/// Command-carrying variants hold the raw bytes after the leading character, untokenized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive<'a> {
    /// `?cmd`: run `cmd`, open the gate when it exits with 0.
    OnSuccess(&'a [u8]),
    /// `!cmd`: run `cmd`, open the gate when it exits non-zero.
    OnFailure(&'a [u8]),
    /// `<TAB>cmd`: run `cmd` only while the gate is open.
    Guarded(&'a [u8]),
    Comment,
    /// Empty line; closes the gate.
    Blank,
    /// Anything else, kept whole for the diagnostic.
    Unrecognized(&'a [u8]),
}

impl<'a> Directive<'a> {
    pub fn parse(line: &'a [u8]) -> Self {
        let Some((&tag, rest)) = line.split_first() else {
            return Directive::Blank;
        };
        match tag {
            TOK_ON_SUCCESS => Directive::OnSuccess(rest),
            TOK_ON_FAILURE => Directive::OnFailure(rest),
            TOK_GUARDED => Directive::Guarded(rest),
            TOK_COMMENT => Directive::Comment,
            _ => Directive::Unrecognized(line),
        }
    }
}
