//! Loading newline-delimited word lists.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::info;

use crate::distance::Word;
use crate::error::Result;

/// Read words from any buffered reader, one per line.
///
/// Surrounding whitespace is trimmed; blank lines and lines starting with `#`
/// are skipped.
pub fn read_words<R: BufRead>(reader: R) -> Result<Vec<Word>> {
    let mut words = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let entry = line.trim();
        if entry.is_empty() || entry.starts_with('#') {
            continue;
        }
        words.push(Word::from(entry));
    }
    Ok(words)
}

/// Load a word list from a UTF-8 file.
pub fn load_words(path: impl AsRef<Path>) -> Result<Vec<Word>> {
    let path = path.as_ref();
    let words = read_words(BufReader::new(File::open(path)?))?;
    info!("loaded {} words from {}", words.len(), path.display());
    Ok(words)
}
