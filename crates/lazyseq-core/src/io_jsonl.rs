//! JSON Lines (NDJSON) helpers for streaming value sequences.
//!
//! Memory-efficient line-by-line reading/writing: one JSON value per line,
//! parsed only when the consumer pulls.
//!
//! - **Reader**: an iterator that *owns* its reader and yields
//!   `Result<Value>` so callers can surface per-line errors with their
//!   1-based line number. (No borrowed iterators that outlive their
//!   buffers.)
//! - **Writer**: uses `serde_json::to_writer` to avoid intermediate
//!   `String`s and drains any pipeline lazily.
//!
//! We treat `.jsonl` and `.ndjson` as equivalent line-delimited JSON.

use crate::error::{Error, Result};
use crate::source::{Pull, Sequence};
use crate::value::Value;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Owning JSONL iterator over [`Value`] items.
pub struct JsonlValueIter<R: BufRead + ?Sized> {
    buf: String,
    line_no: usize,
    rdr: Box<R>,
}

impl<R: BufRead + ?Sized> JsonlValueIter<R> {
    /// Wrap an owned reader.
    pub fn new(rdr: Box<R>) -> Self {
        Self {
            rdr,
            buf: String::with_capacity(8 << 10),
            line_no: 0,
        }
    }
}

impl<R: BufRead + ?Sized> Iterator for JsonlValueIter<R> {
    type Item = Result<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();
        match self.rdr.read_line(&mut self.buf) {
            Ok(0) => None, // EOF
            Ok(_) => {
                self.line_no += 1;
                // Trim a single trailing '\n' or '\r\n'.
                if self.buf.ends_with('\n') {
                    self.buf.pop();
                    if self.buf.ends_with('\r') {
                        self.buf.pop();
                    }
                }
                Some(
                    serde_json::from_str(&self.buf).map_err(|source| Error::Parse {
                        line: self.line_no,
                        source,
                    }),
                )
            }
            Err(e) => Some(Err(Error::Io(e))),
        }
    }
}

/// Open a JSONL file as a lazy sequence (keys assigned `0..`).
///
/// # Errors
/// Opening the file may fail. Individual pulled items may be `Err` if a
/// particular line is malformed.
pub fn from_jsonl_path<P: AsRef<Path>>(path: P) -> Result<Sequence> {
    let f = File::open(path.as_ref())?;
    Ok(Sequence::from_jsonl(BufReader::new(f)))
}

/// Drain a pipeline to a writer, one compact JSON value per line.
///
/// Stops at the first in-band error and returns it; everything already
/// written stays written.
///
/// # Errors
/// Fails on I/O errors, on serialization failure, or on the first `Err`
/// item pulled from the pipeline.
pub fn write_jsonl<W, I>(w: W, seq: I) -> Result<()>
where
    W: Write,
    I: Iterator<Item = Pull>,
{
    let mut w = BufWriter::new(w);
    for pull in seq {
        let (_, v) = pull?;
        serde_json::to_writer(&mut w, &v).map_err(Error::Serialize)?;
        w.write_all(b"\n")?;
    }
    w.flush()?;
    Ok(())
}

/// Write a pipeline to a JSONL file path.
///
/// # Errors
/// As [`write_jsonl`], plus file creation.
pub fn write_jsonl_path<P, I>(path: P, seq: I) -> Result<()>
where
    P: AsRef<Path>,
    I: Iterator<Item = Pull>,
{
    let f = File::create(path.as_ref())?;
    write_jsonl(f, seq)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reads_one_value_per_line() {
        let input = "1\n\"two\"\n[3,null]\n";
        let got: Vec<Value> = Sequence::from_jsonl(Cursor::new(input.to_owned()))
            .map(|r| r.unwrap().1)
            .collect();
        assert_eq!(
            got,
            vec![
                Value::Int(1),
                Value::Str("two".into()),
                Value::List(vec![Value::Int(3), Value::Null]),
            ]
        );
    }

    #[test]
    fn parse_errors_carry_line_numbers() {
        let input = "1\nnot json\n3\n";
        let mut seq = Sequence::from_jsonl(Cursor::new(input.to_owned()));
        assert!(seq.next().unwrap().is_ok());
        match seq.next() {
            Some(Err(Error::Parse { line, .. })) => assert_eq!(line, 2),
            other => panic!("expected parse error, got {other:?}"),
        }
        // Fused after the error.
        assert!(seq.next().is_none());
    }

    #[test]
    fn round_trips_through_a_buffer() {
        let vals = vec![Value::Int(1), Value::Float(2.5), Value::Str("x".into())];
        let mut buf = Vec::new();
        write_jsonl(&mut buf, Sequence::from_values(vals.clone())).unwrap();
        let back: Vec<Value> = Sequence::from_jsonl(Cursor::new(buf))
            .map(|r| r.unwrap().1)
            .collect();
        assert_eq!(back, vals);
    }
}
