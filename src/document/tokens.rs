//! Line-level token recognition.
//!
//! Only "atx"-style headings beginning with `#` are recognized, not the
//! "setext" style using underlines of `=` or `-`; those headings are
//! invisible to the TOC.

use lazy_static::lazy_static;
use regex::Regex;

use crate::toc::format::{LABEL_BEGIN_TOC, LABEL_END_TOC, LABEL_TOC};

lazy_static! {
    /// ATX heading: a `#` run, the display text, an optional trailing `#`
    /// run. The text must end in something other than a space or `#`, so a
    /// line of nothing but markers is not a heading.
    static ref HEADING_REGEX: Regex = Regex::new(r"^(#+) *(.*[^ #])( *#+)?$").unwrap();

    /// Code fence: three or more backticks at the start of a line
    static ref CODE_FENCE_REGEX: Regex = Regex::new(r"^```+").unwrap();

    /// Reference-style empty link definition used as a TOC marker,
    /// e.g. `[toc]: #` or `[endtoc]: # (generated)`
    static ref MARKER_REGEX: Regex =
        Regex::new(r"^\[([^\]]*)\]: #([-0-9A-Za-z]*)( +\(([^)]*)\))? *$").unwrap();
}

/// A classified TOC marker line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TocMarker {
    /// `[toc]: #` — single self-contained insertion point
    Toc,
    /// `[begintoc]: #` — opens a replaceable span
    Begin,
    /// `[endtoc]: #` — closes a replaceable span
    End,
}

/// Strip the line terminator: a trailing LF and any CR preceding it
pub fn strip_terminator(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

/// Match an ATX heading, returning its display text and level
pub fn heading(line: &str) -> Option<(String, usize)> {
    let caps = HEADING_REGEX.captures(strip_terminator(line))?;
    let level = caps[1].len();
    let text = caps[2].to_string();
    Some((text, level))
}

/// Whether the line opens or closes a fenced code block
pub fn is_code_fence(line: &str) -> bool {
    CODE_FENCE_REGEX.is_match(strip_terminator(line))
}

/// Match a TOC marker line. Link definitions with non-reserved labels are
/// ordinary content, not markers.
pub fn marker(line: &str) -> Option<TocMarker> {
    let caps = MARKER_REGEX.captures(strip_terminator(line))?;
    match &caps[1] {
        LABEL_TOC => Some(TocMarker::Toc),
        LABEL_BEGIN_TOC => Some(TocMarker::Begin),
        LABEL_END_TOC => Some(TocMarker::End),
        _ => None,
    }
}
