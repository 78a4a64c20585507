//! File handling for documents that are read in full, then rewritten in
//! place. The path `-` selects the standard streams.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};

use log::debug;

use crate::utils::error::{BoxResult, MdtocError};

/// Path value that selects stdin for input and stdout for output
pub const STDIO_PATH: &str = "-";

/// Output newline convention applied by `NewlineWriter`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Newline {
    Lf,
    CrLf,
    Cr,
}

impl Newline {
    fn as_bytes(&self) -> &'static [u8] {
        match self {
            Newline::Lf => b"\n",
            Newline::CrLf => b"\r\n",
            Newline::Cr => b"\r",
        }
    }
}

/// A text file processed read-then-rewrite-in-place. Output is only opened
/// once reading (and parsing) is done, so a structural error in the input
/// never truncates the file.
pub struct TextIoFile {
    path: String,
    output_newline: Option<Newline>,
}

impl TextIoFile {
    pub fn new(path: &str, output_newline: Option<Newline>) -> Self {
        Self {
            path: path.to_string(),
            output_newline,
        }
    }

    /// Printable name for error positions
    pub fn printable_name(&self) -> &str {
        if self.path == STDIO_PATH {
            "<stdin>"
        } else {
            &self.path
        }
    }

    /// Open the file (or stdin) for input
    pub fn open_for_input(&self) -> BoxResult<Box<dyn Read>> {
        if self.path == STDIO_PATH {
            return Ok(Box::new(io::stdin()));
        }
        match File::open(&self.path) {
            Ok(file) => Ok(Box::new(BufReader::new(file))),
            Err(err) => {
                debug!("{}: {}", self.path, err);
                Err(Box::new(MdtocError::FileOpen {
                    path: self.path.clone(),
                    mode: "r".to_string(),
                    purpose: "input".to_string(),
                }))
            }
        }
    }

    /// Open the file (or stdout) for output, truncating it. When a newline
    /// convention is configured the writer is wrapped in a `NewlineWriter`;
    /// otherwise output is byte-faithful.
    pub fn open_for_output(&self) -> BoxResult<Box<dyn Write>> {
        let sink: Box<dyn Write> = if self.path == STDIO_PATH {
            Box::new(io::stdout())
        } else {
            match File::create(&self.path) {
                Ok(file) => Box::new(BufWriter::new(file)),
                Err(err) => {
                    debug!("{}: {}", self.path, err);
                    return Err(Box::new(MdtocError::FileOpen {
                        path: self.path.clone(),
                        mode: "w".to_string(),
                        purpose: "output".to_string(),
                    }));
                }
            }
        };
        Ok(match self.output_newline {
            Some(newline) => Box::new(NewlineWriter::new(sink, newline)),
            None => sink,
        })
    }
}

/// Writer adapter that rewrites every line terminator (`\n`, `\r`, or
/// `\r\n`) to one convention. A `\r` at the end of one write call is held
/// until the next byte decides whether it pairs with a `\n`.
pub struct NewlineWriter<W: Write> {
    inner: W,
    newline: Newline,
    pending_cr: bool,
}

impl<W: Write> NewlineWriter<W> {
    pub fn new(inner: W, newline: Newline) -> Self {
        Self {
            inner,
            newline,
            pending_cr: false,
        }
    }

    fn emit_newline(&mut self) -> io::Result<()> {
        self.inner.write_all(self.newline.as_bytes())
    }
}

impl<W: Write> Write for NewlineWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        for &byte in buf {
            match byte {
                b'\r' => {
                    if self.pending_cr {
                        self.emit_newline()?;
                    }
                    self.pending_cr = true;
                }
                b'\n' => {
                    self.pending_cr = false;
                    self.emit_newline()?;
                }
                _ => {
                    if self.pending_cr {
                        self.emit_newline()?;
                        self.pending_cr = false;
                    }
                    self.inner.write_all(&[byte])?;
                }
            }
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if self.pending_cr {
            self.emit_newline()?;
            self.pending_cr = false;
        }
        self.inner.flush()
    }
}
