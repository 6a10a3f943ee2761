//! Core data models used throughout subfuse.
//!
//! These types represent the sources, lines, and chunks that flow through
//! the fetch → chunk → write pipeline.

/// Kind of content a remote source serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// UTF-8 text, one subscription entry per line.
    Plain,
    /// A base64 encoding of UTF-8 text.
    Base64,
}

impl SourceKind {
    /// Short lowercase label for log lines and the `sources` table.
    pub fn label(&self) -> &'static str {
        match self {
            SourceKind::Plain => "plain",
            SourceKind::Base64 => "base64",
        }
    }
}

/// One remote URL supplying subscription entries.
#[derive(Debug, Clone)]
pub struct Source {
    pub url: String,
    pub kind: SourceKind,
}

/// A size-bounded group of lines destined for one output file.
///
/// `text` is the header line plus the content lines, newline-joined — the
/// exact payload the writer base64-encodes.
#[derive(Debug, Clone)]
pub struct Chunk {
    /// 1-based output file index.
    pub index: usize,
    pub text: String,
    /// Content lines in this chunk; the header line is not counted.
    pub line_count: usize,
}
