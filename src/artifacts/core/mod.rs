//! Output plumbing shared by the commands

use minus::Pager;
use std::io::{self, Write};

/// `std::io::Write` adapter feeding the `minus` pager
///
/// Writes may split a multi-byte character; the incomplete tail is held back
/// until the next write completes it. Invalid sequences are pushed lossily so
/// a stray byte in a commit message never aborts `log`.
pub struct PagerWriter {
    pager: Pager,
    pending: Vec<u8>,
}

impl PagerWriter {
    pub fn new(pager: Pager) -> Self {
        PagerWriter {
            pager,
            pending: Vec::new(),
        }
    }

    fn push(&mut self, text: &str) -> io::Result<()> {
        self.pager.push_str(text).map_err(io::Error::other)
    }
}

impl Write for PagerWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.pending.extend_from_slice(buf);

        let pending = std::mem::take(&mut self.pending);
        match std::str::from_utf8(&pending) {
            Ok(text) => self.push(text)?,
            Err(err) if err.error_len().is_none() => {
                // incomplete character at the end, keep it for the next write
                let (valid, rest) = pending.split_at(err.valid_up_to());
                self.push(&String::from_utf8_lossy(valid))?;
                self.pending = rest.to_vec();
            }
            Err(_) => self.push(&String::from_utf8_lossy(&pending))?,
        }

        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if !self.pending.is_empty() {
            let pending = std::mem::take(&mut self.pending);
            self.push(&String::from_utf8_lossy(&pending))?;
        }

        Ok(())
    }
}
