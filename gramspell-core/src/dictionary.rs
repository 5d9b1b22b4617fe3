//! Plain-text word lists.
//!
//! One word per line. Surrounding whitespace is trimmed and blank lines
//! are ignored; `\r\n` line endings and a leading byte order mark are
//! accepted.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

use memchr::memchr;

use gramspell_types::Result;

/// A word list held in memory.
#[derive(Debug, Clone, Default)]
pub struct PlainTextDictionary {
    text: String,
}

impl PlainTextDictionary {
    pub fn from_text(text: impl Into<String>) -> Self {
        let mut text = text.into();
        if text.starts_with('\u{feff}') {
            text.replace_range(..'\u{feff}'.len_utf8(), "");
        }
        Self { text }
    }

    /// Reads a whole word list from `reader`.
    ///
    /// # Errors
    ///
    /// Returns [`SuggestError::IndexUnavailable`](gramspell_types::SuggestError::IndexUnavailable)
    /// on read failure or if the input is not UTF-8.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Ok(Self::from_text(text))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_reader(File::open(path)?)
    }

    /// Words in file order.
    pub fn words(&self) -> Words<'_> {
        Words {
            bytes: self.text.as_bytes(),
            text: &self.text,
            pos: 0,
        }
    }

    /// Number of words, counted by walking the list.
    pub fn len(&self) -> usize {
        self.words().count()
    }

    pub fn is_empty(&self) -> bool {
        self.words().next().is_none()
    }
}

/// Iterator over the words of a [`PlainTextDictionary`].
#[derive(Debug, Clone)]
pub struct Words<'a> {
    text: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Iterator for Words<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        while self.pos < self.text.len() {
            let start = self.pos;
            // '\n' is ASCII, so both ends are char boundaries
            let end = match memchr(b'\n', &self.bytes[start..]) {
                Some(offset) => start + offset,
                None => self.text.len(),
            };
            self.pos = end + 1;

            let word = self.text[start..end].trim();
            if !word.is_empty() {
                return Some(word);
            }
        }
        None
    }
}

/// Streams words from `reader` one line at a time.
///
/// Feeds [`Suggester::try_index_dictionary`](crate::Suggester::try_index_dictionary)
/// without holding the whole list in memory. A read failure is yielded
/// once and ends the stream.
pub fn stream_words<R: BufRead>(reader: R) -> WordLines<R> {
    WordLines {
        reader,
        line: String::new(),
        first: true,
        done: false,
    }
}

/// Opens `path` and streams its words.
pub fn stream_words_from_path(path: impl AsRef<Path>) -> Result<WordLines<BufReader<File>>> {
    Ok(stream_words(BufReader::new(File::open(path)?)))
}

/// Iterator returned by [`stream_words`].
#[derive(Debug)]
pub struct WordLines<R> {
    reader: R,
    line: String,
    first: bool,
    done: bool,
}

impl<R: BufRead> Iterator for WordLines<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            self.line.clear();
            match self.reader.read_line(&mut self.line) {
                Ok(0) => self.done = true,
                Ok(_) => {
                    let mut line = self.line.as_str();
                    if self.first {
                        self.first = false;
                        line = line.strip_prefix('\u{feff}').unwrap_or(line);
                    }
                    let word = line.trim();
                    if !word.is_empty() {
                        return Some(Ok(word.to_owned()));
                    }
                }
                Err(err) => {
                    self.done = true;
                    return Some(Err(err));
                }
            }
        }
        None
    }
}
