//! Line-level lexical parsers for scene documents.
//!
//! Scene documents are YAML streams whose documents are introduced by tagged
//! header lines such as `--- !u!224 &1843201`. The parsers here recognize the
//! handful of line shapes the rest of the crate cares about:
//!
//! - header lines ([`header`])
//! - `key: value` lines ([`key_value`])
//! - `- entry` list lines ([`list_entry`])
//! - embedded `fileID: <id>` references ([`file_id_ref`])
//!
//! Every parser works on a single line and never fails loudly: callers treat
//! a failed parse as "this line is not of that shape".

use winnow::{
    Parser as _,
    ascii::{digit1, space0, space1},
    combinator::{opt, preceded, separated_pair},
    error::{ContextError, ErrMode},
    token::{literal, rest, take_while},
};

type Input<'src> = &'src str;
type IResult<O> = std::result::Result<O, ErrMode<ContextError>>;

/// Marker that opens every block boundary line.
pub(crate) const BOUNDARY_MARKER: &str = "---";

/// Tag prefix that precedes the type code in a header line.
const TYPE_TAG: &str = "!u!";

/// Marker character that precedes an object identifier.
const ANCHOR: char = '&';

/// Reference key embedded in inline mappings.
const FILE_ID_KEY: &str = "fileID:";

/// The parsed tokens of a block header line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Header<'src> {
    pub type_code: &'src str,
    pub id: &'src str,
    /// Set for prefab placeholder blocks (`--- !u!114 &5 stripped`).
    pub stripped: bool,
}

/// Returns `true` if the line starts a new block, whether or not its header
/// turns out to be well formed.
pub(crate) fn is_boundary(line: &str) -> bool {
    line.strip_prefix(BOUNDARY_MARKER)
        .is_some_and(|tail| tail.is_empty() || tail.starts_with(char::is_whitespace))
}

/// A bare type code: one or more ASCII alphanumerics.
fn type_code<'src>(input: &mut Input<'src>) -> IResult<&'src str> {
    take_while(1.., |c: char| c.is_ascii_alphanumeric()).parse_next(input)
}

/// An object identifier: digits with an optional leading minus sign.
fn object_id<'src>(input: &mut Input<'src>) -> IResult<&'src str> {
    (opt('-'), digit1).take().parse_next(input)
}

/// `--- !u!<type-code> &<id>`
fn header_tokens<'src>(input: &mut Input<'src>) -> IResult<(&'src str, &'src str)> {
    preceded(
        (literal(BOUNDARY_MARKER), space1, literal(TYPE_TAG)),
        separated_pair(type_code, space1, preceded(ANCHOR, object_id)),
    )
    .parse_next(input)
}

/// Parse a header line. Returns `None` when the line lacks either token.
pub(crate) fn header(line: &str) -> Option<Header<'_>> {
    let mut input = line.trim_end();
    let (type_code, id) = header_tokens(&mut input).ok()?;

    // Anything after the identifier must be whitespace-separated.
    if !input.is_empty() && !input.starts_with(char::is_whitespace) {
        return None;
    }
    let stripped = input.split_whitespace().any(|token| token == "stripped");

    Some(Header {
        type_code,
        id,
        stripped,
    })
}

/// `<indent><key>:<value>`
fn key_value_tokens<'src>(input: &mut Input<'src>) -> IResult<(&'src str, &'src str)> {
    preceded(
        space0,
        (
            take_while(1.., |c: char| c != ':' && !c.is_whitespace()),
            preceded(':', rest),
        ),
    )
    .parse_next(input)
}

/// Parse a `key: value` line, returning the key and the trimmed value.
///
/// The value may be empty, which is how list headers such as
/// `m_Children:` are written.
pub(crate) fn key_value(line: &str) -> Option<(&str, &str)> {
    let mut input = line;
    let (key, value) = key_value_tokens(&mut input).ok()?;
    if key.starts_with('-') {
        return None;
    }
    if !value.is_empty() && !value.starts_with(char::is_whitespace) {
        return None;
    }
    Some((key, value.trim()))
}

/// `<indent>- <entry>`
fn list_entry_tokens<'src>(input: &mut Input<'src>) -> IResult<&'src str> {
    preceded((space0, '-'), rest).parse_next(input)
}

/// Parse a `- entry` list line, returning the trimmed entry text.
pub(crate) fn list_entry(line: &str) -> Option<&str> {
    let mut input = line;
    let entry = list_entry_tokens(&mut input).ok()?;
    if !entry.is_empty() && !entry.starts_with(char::is_whitespace) {
        return None;
    }
    Some(entry.trim())
}

/// Extract the identifier of the first `fileID: <id>` reference in `text`.
pub(crate) fn file_id_ref(text: &str) -> Option<&str> {
    let start = text.find(FILE_ID_KEY)? + FILE_ID_KEY.len();
    let mut input = &text[start..];
    preceded(space0, object_id).parse_next(&mut input).ok()
}

/// Number of leading spaces of a line.
pub(crate) fn indent(line: &str) -> usize {
    line.len() - line.trim_start_matches(' ').len()
}
