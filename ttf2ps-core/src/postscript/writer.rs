use std::fmt;
use std::io::Write;

use crate::error::Result;

/// Write-only PostScript output stream that counts what it writes
///
/// Implements an inherent `write_fmt`, so `write!` and `writeln!` work on it
/// directly and report errors as [`FontError`](crate::FontError).
pub struct PsWriter<W: Write> {
    writer: W,
    bytes_written: u64,
}

impl<W: Write> PsWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            bytes_written: 0,
        }
    }

    pub fn put_bytes(&mut self, data: &[u8]) -> Result<()> {
        self.writer.write_all(data)?;
        self.bytes_written += data.len() as u64;
        Ok(())
    }

    pub fn put_char(&mut self, c: u8) -> Result<()> {
        self.put_bytes(&[c])
    }

    pub fn put_str(&mut self, s: &str) -> Result<()> {
        self.put_bytes(s.as_bytes())
    }

    pub fn write_fmt(&mut self, args: fmt::Arguments<'_>) -> Result<()> {
        match args.as_str() {
            Some(s) => self.put_str(s),
            None => self.put_str(&fmt::format(args)),
        }
    }

    /// Write the body of a PostScript string literal, without the
    /// surrounding parentheses.
    ///
    /// Parentheses and backslashes are escaped; bytes outside printable
    /// ASCII become three-digit octal escapes.
    pub fn put_ps_string(&mut self, data: &[u8]) -> Result<()> {
        let mut escaped = Vec::with_capacity(data.len());
        for &b in data {
            match b {
                b'(' | b')' | b'\\' => escaped.extend_from_slice(&[b'\\', b]),
                32..=126 => escaped.push(b),
                _ => escaped.extend_from_slice(format!("\\{b:03o}").as_bytes()),
            }
        }
        self.put_bytes(&escaped)
    }

    /// Write the text of a `%%` comment line with control characters
    /// replaced by spaces, so the comment cannot end early.
    pub fn put_comment_text(&mut self, data: &[u8]) -> Result<()> {
        let cleaned: Vec<u8> = data
            .iter()
            .map(|&b| if b < 0x20 || b == 0x7F { b' ' } else { b })
            .collect();
        self.put_bytes(&cleaned)
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Format a real number without trailing zeros.
pub fn format_real(value: f64) -> String {
    let formatted = format!("{value:.6}");
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" | "" => "0".to_string(),
        other => other.to_string(),
    }
}
