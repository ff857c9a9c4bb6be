//! Block Splitter: segments document text into header-delimited blocks.
//!
//! A block starts at every boundary line (`--- ...`) and runs up to, but not
//! including, the next boundary. Text before the first boundary holds no
//! object and is discarded. A boundary whose header does not parse drops its
//! whole block.

use std::iter::Peekable;

use log::debug;

use crate::{lexer, span::Span};

/// One line of the source, without its line terminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Line<'src> {
    text: &'src str,
    span: Span,
}

impl<'src> Line<'src> {
    pub(crate) fn text(&self) -> &'src str {
        self.text
    }

    pub(crate) fn span(&self) -> Span {
        self.span
    }
}

/// A header-delimited span of the document representing one object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Block<'src> {
    type_code: &'src str,
    id: &'src str,
    stripped: bool,
    header_span: Span,
    body: Vec<Line<'src>>,
}

impl<'src> Block<'src> {
    pub(crate) fn type_code(&self) -> &'src str {
        self.type_code
    }

    pub(crate) fn id(&self) -> &'src str {
        self.id
    }

    pub(crate) fn is_stripped(&self) -> bool {
        self.stripped
    }

    pub(crate) fn header_span(&self) -> Span {
        self.header_span
    }

    pub(crate) fn body(&self) -> &[Line<'src>] {
        &self.body
    }
}

/// Iterator over the lines of a document with their byte spans.
#[derive(Debug)]
struct Lines<'src> {
    source: &'src str,
    offset: usize,
}

impl<'src> Iterator for Lines<'src> {
    type Item = Line<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.offset >= self.source.len() {
            return None;
        }
        let rest = &self.source[self.offset..];
        let raw = match rest.find('\n') {
            Some(end) => &rest[..=end],
            None => rest,
        };
        let start = self.offset;
        self.offset += raw.len();

        let text = raw.trim_end_matches(['\n', '\r']);
        Some(Line {
            text,
            span: Span::new(start..start + text.len()),
        })
    }
}

/// Lazy, single-pass iterator of [`Block`]s in document order.
#[derive(Debug)]
pub(crate) struct Blocks<'src> {
    lines: Peekable<Lines<'src>>,
}

impl<'src> Iterator for Blocks<'src> {
    type Item = Block<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            // Skip to the next boundary: preamble or the body of a dropped block.
            let boundary = loop {
                let line = self.lines.next()?;
                if lexer::is_boundary(line.text()) {
                    break line;
                }
            };

            let Some(header) = lexer::header(boundary.text()) else {
                debug!(offset = boundary.span().start(); "Dropping block with malformed header");
                continue;
            };

            let mut body = Vec::new();
            while let Some(line) = self
                .lines
                .next_if(|line| !lexer::is_boundary(line.text()))
            {
                body.push(line);
            }

            return Some(Block {
                type_code: header.type_code,
                id: header.id,
                stripped: header.stripped,
                header_span: boundary.span(),
                body,
            });
        }
    }
}

/// Split a document into blocks.
pub(crate) fn split(source: &str) -> Blocks<'_> {
    Blocks {
        lines: Lines { source, offset: 0 }.peekable(),
    }
}
