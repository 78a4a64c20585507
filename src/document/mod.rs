mod tokens;

pub use tokens::TocMarker;

use std::io::{Read, Write};

use log::debug;

use crate::toc::{RenderOptions, Toc};
use crate::utils::error::{BoxResult, MdtocError};

/// One classified region of the source, produced by the shared tokenizer
/// and replayed by both the parse and write passes. Sharing one event list
/// guarantees that what parsing skips is exactly what writing replaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanEvent {
    /// Plain line at `lines[index]`, passed through verbatim
    Line(usize),
    /// ATX heading line at `lines[index]`
    Heading {
        index: usize,
        level: usize,
        text: String,
    },
    /// Fenced code block spanning `lines[start..end]`, passed through
    /// verbatim; heading and marker recognition is suppressed inside
    CodeFence { start: usize, end: usize },
    /// TOC marker span `lines[start..end]`, replaced on write
    TocSpan { start: usize, end: usize },
}

/// A Markdown document buffered as raw lines, with the table of contents
/// accumulated from its headings.
///
/// Rudimentary by design: regex-based line classification, no AST. Each
/// line keeps its terminator so untouched lines round-trip byte for byte.
/// `parse` must be called before `write`.
pub struct MarkdownDocument {
    lines: Vec<String>,
    filename: String,
    events: Vec<ScanEvent>,
    scanned: bool,
    toc: Option<Toc>,
}

/// Split text into lines that keep their terminators, recognizing LF, CRLF,
/// and lone-CR conventions. Concatenating the lines reproduces the input
/// exactly.
fn split_lines(text: &str) -> Vec<String> {
    let bytes = text.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        let at_break = match bytes[i] {
            b'\n' => true,
            b'\r' => i + 1 >= bytes.len() || bytes[i + 1] != b'\n',
            _ => false,
        };
        if at_break {
            lines.push(text[start..=i].to_string());
            start = i + 1;
        }
        i += 1;
    }
    if start < bytes.len() {
        lines.push(text[start..].to_string());
    }
    lines
}

impl MarkdownDocument {
    /// Build a document from already-read text
    pub fn from_text(text: &str, filename: &str) -> Self {
        let lines = split_lines(text);
        Self {
            lines,
            filename: filename.to_string(),
            events: Vec::new(),
            scanned: false,
            toc: None,
        }
    }

    /// Read a document to EOF from any reader
    pub fn from_reader<R: Read>(reader: &mut R, filename: &str) -> BoxResult<Self> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Ok(Self::from_text(&text, filename))
    }

    /// Printable input filename
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// The accumulated table of contents, present after `parse`
    pub fn toc(&self) -> Option<&Toc> {
        self.toc.as_ref()
    }

    /// Printable `file:line` position, 1-based
    fn position(&self, index: usize) -> String {
        format!("{}:{}", self.filename, index + 1)
    }

    fn syntax_error(&self, index: usize, message: &str) -> MdtocError {
        MdtocError::Syntax {
            position: self.position(index),
            message: message.to_string(),
        }
    }

    /// Classify every line into events. Recognition order per line:
    /// marker, then code fence, then heading.
    fn scan(&mut self) -> Result<(), MdtocError> {
        if self.scanned {
            return Ok(());
        }
        let mut events = Vec::new();
        let mut index = 0;
        while index < self.lines.len() {
            let line = &self.lines[index];
            if let Some(marker) = tokens::marker(line) {
                match marker {
                    TocMarker::Toc => {
                        events.push(ScanEvent::TocSpan {
                            start: index,
                            end: index + 1,
                        });
                        index += 1;
                    }
                    TocMarker::Begin => {
                        let end = self.scan_toc_span(index)?;
                        events.push(ScanEvent::TocSpan { start: index, end });
                        index = end;
                    }
                    TocMarker::End => {
                        return Err(self.syntax_error(index, "dangling [endtoc]"));
                    }
                }
            } else if tokens::is_code_fence(line) {
                let end = self.scan_code_fence(index);
                events.push(ScanEvent::CodeFence { start: index, end });
                index = end;
            } else if let Some((text, level)) = tokens::heading(line) {
                events.push(ScanEvent::Heading { index, level, text });
                index += 1;
            } else {
                events.push(ScanEvent::Line(index));
                index += 1;
            }
        }
        self.events = events;
        self.scanned = true;
        Ok(())
    }

    /// Find the end (exclusive) of a `[begintoc]`..`[endtoc]` span opened at
    /// `start`. Markers may not nest; an unterminated span runs to EOF.
    fn scan_toc_span(&self, start: usize) -> Result<usize, MdtocError> {
        let mut index = start + 1;
        while index < self.lines.len() {
            match tokens::marker(&self.lines[index]) {
                Some(TocMarker::Toc) => {
                    return Err(self.syntax_error(index, "nested [toc]"));
                }
                Some(TocMarker::Begin) => {
                    return Err(self.syntax_error(index, "nested [begintoc]"));
                }
                Some(TocMarker::End) => return Ok(index + 1),
                None => index += 1,
            }
        }
        Ok(index)
    }

    /// Find the close (exclusive) of a code fence opened at `start`; an
    /// unterminated fence runs to EOF
    fn scan_code_fence(&self, start: usize) -> usize {
        let mut index = start + 1;
        while index < self.lines.len() {
            if tokens::is_code_fence(&self.lines[index]) {
                return index + 1;
            }
            index += 1;
        }
        index
    }

    /// Scan the document, build the table of contents from its headings,
    /// and return the raw input text unmodified
    pub fn parse(
        &mut self,
        heading_text: &str,
        heading_level: usize,
        skip_level: usize,
    ) -> BoxResult<String> {
        self.scan()?;
        let mut toc = Toc::new(heading_text, heading_level, skip_level);
        let mut heading_count = 0;
        for event in &self.events {
            if let ScanEvent::Heading { level, text, .. } = event {
                toc.add_heading(text, *level);
                heading_count += 1;
            }
        }
        debug!("{}: {} headings", self.filename, heading_count);
        self.toc = Some(toc);
        Ok(self.lines.concat())
    }

    /// Write the document to `sink`, replacing every TOC span with the
    /// freshly rendered table of contents
    pub fn write<W: Write>(&self, options: &RenderOptions, sink: &mut W) -> BoxResult<()> {
        let toc = self.toc.as_ref().ok_or("write called before parse")?;
        for event in &self.events {
            match event {
                ScanEvent::Line(index) | ScanEvent::Heading { index, .. } => {
                    sink.write_all(self.lines[*index].as_bytes())?;
                }
                ScanEvent::CodeFence { start, end } => {
                    for line in &self.lines[*start..*end] {
                        sink.write_all(line.as_bytes())?;
                    }
                }
                ScanEvent::TocSpan { .. } => {
                    sink.write_all(toc.format(options).as_bytes())?;
                }
            }
        }
        Ok(())
    }
}
