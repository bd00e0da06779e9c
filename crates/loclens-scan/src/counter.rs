//! Newline-delimited line counting.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Count the lines in a file.
///
/// A line is a newline-delimited record; a final record without a
/// trailing newline still counts. Works on raw bytes, so files that are
/// not valid UTF-8 count fine too.
pub fn count_lines(path: &Path) -> io::Result<u64> {
    let file = File::open(path)?;
    count_from(BufReader::new(file))
}

fn count_from(mut reader: impl BufRead) -> io::Result<u64> {
    let mut count = 0u64;
    let mut last_byte = b'\n';

    loop {
        let chunk = reader.fill_buf()?;
        if chunk.is_empty() {
            break;
        }
        count += chunk.iter().filter(|&&byte| byte == b'\n').count() as u64;
        last_byte = chunk[chunk.len() - 1];
        let len = chunk.len();
        reader.consume(len);
    }

    // Unterminated trailing record.
    if last_byte != b'\n' {
        count += 1;
    }
    Ok(count)
}
