use std::fmt::{self, Debug};

use super::{MissingMarker, ParsingError};

/// A pair of markers delimiting a single line field, or opening and closing a
/// block spanning many lines.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Tag {
    open: &'static str,
    close: &'static str,
}

impl Tag {
    pub const fn new(open: &'static str, close: &'static str) -> Self {
        Tag { open, close }
    }

    pub fn open(&self) -> &'static str {
        self.open
    }

    pub fn close(&self) -> &'static str {
        self.close
    }

    /// Returns true if the line carries the open marker.
    pub fn opens(&self, line: &str) -> bool {
        line.contains(self.open)
    }

    /// Returns true if the line carries the close marker.
    pub fn closes(&self, line: &str) -> bool {
        line.contains(self.close)
    }

    /// Extracts the value of this field from the line.
    /// See [extract_field].
    pub fn extract<'a>(&self, line: &'a str) -> Result<&'a str, MissingMarker> {
        extract_field(line, self.open, self.close)
    }
}

impl Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.open, self.close)
    }
}

/// Returns the text strictly between the first occurrence of `open` and the
/// first occurrence of `close` that follows it. The value is returned as is,
/// no trimming takes place.
pub fn extract_field<'a>(
    line: &'a str,
    open: &'static str,
    close: &'static str,
) -> Result<&'a str, MissingMarker> {
    let start = line
        .find(open)
        .ok_or(MissingMarker { marker: open })?
        + open.len();
    let end = line[start..]
        .find(close)
        .ok_or(MissingMarker { marker: close })?
        + start;
    Ok(&line[start..end])
}

/// A cursor over the lines of a single game data file.
///
/// The format is not real markup, it is a sequence of one-tag-per-line
/// records grouped into blocks, so the stream works a line at a time. A
/// field never spans more than one line, a block may span many and may
/// contain nested blocks, which are scanned by calling
/// [TagStream::scan_block] again from within the visitor of the outer block.
pub struct TagStream<'a, S: AsRef<str>> {
    lines: &'a [S],
    cursor: usize,
    /// Close markers of the blocks being scanned, innermost last
    enclosing: Vec<&'static str>,
}

impl<'a, S: AsRef<str>> TagStream<'a, S> {
    pub fn new(lines: &'a [S]) -> Self {
        TagStream {
            lines,
            cursor: 0,
            enclosing: Vec::new(),
        }
    }

    /// The 1-based number of the line under the cursor.
    pub fn line_number(&self) -> usize {
        self.cursor + 1
    }

    /// Returns true once every line has been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.lines.len()
    }

    fn current(&self) -> Option<&'a str> {
        self.lines.get(self.cursor).map(|l| l.as_ref())
    }

    /// Moves the cursor to the next line carrying `open`, starting with the
    /// line under the cursor, and returns that line. Returns [None] and
    /// exhausts the stream if there is no such line, whatever trails the last
    /// block is not an error.
    pub fn seek(&mut self, open: &str) -> Option<&'a str> {
        while let Some(line) = self.current() {
            if line.contains(open) {
                return Some(line);
            }
            self.cursor += 1;
        }
        None
    }

    /// Moves the cursor past the line under it.
    pub fn advance(&mut self) {
        if !self.is_exhausted() {
            self.cursor += 1;
        }
    }

    /// Extracts the field `tag` from a line of this stream, reporting the
    /// current line number on failure.
    pub fn field(&self, line: &'a str, tag: Tag) -> Result<&'a str, ParsingError> {
        tag.extract(line)
            .map_err(|e| ParsingError::malformed(tag, e, self.line_number()))
    }

    /// Scans a block that opens on the line under the cursor and ends on the
    /// first line carrying `close`.
    ///
    /// Every line before the closing one, the opening line included, is
    /// handed to `visit`. The visitor may recurse into a nested block by
    /// calling this method on the stream it is given; if it moved the cursor
    /// the scan resumes from there, otherwise it moves on to the next line.
    /// On success the cursor rests just after the closing line.
    ///
    /// The block is an [ParsingError::UnterminatedBlock], reported at the
    /// opening line, if the lines run out before `close` shows up, if another
    /// line carries `open`, or if the close marker of an enclosing block
    /// shows up first.
    pub fn scan_block<F>(
        &mut self,
        open: &'static str,
        close: &'static str,
        mut visit: F,
    ) -> Result<(), ParsingError>
    where
        F: FnMut(&mut Self, &'a str) -> Result<(), ParsingError>,
    {
        let first = self.cursor;
        let unterminated = ParsingError::UnterminatedBlock {
            close,
            line: first + 1,
        };
        let mut result = Ok(());
        self.enclosing.push(close);
        loop {
            let line = match self.current() {
                Some(line) => line,
                None => {
                    result = Err(unterminated);
                    break;
                }
            };
            if line.contains(close) {
                self.cursor += 1;
                break;
            }
            let depth = self.enclosing.len() - 1;
            if (self.cursor != first && line.contains(open))
                || self.enclosing[..depth].iter().any(|c| line.contains(*c))
            {
                result = Err(unterminated);
                break;
            }
            let before = self.cursor;
            if let Err(e) = visit(self, line) {
                result = Err(e);
                break;
            }
            if self.cursor == before {
                self.cursor += 1;
            }
        }
        self.enclosing.pop();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ITEM: Tag = Tag::new("<Item>", "</Item>");

    #[test]
    fn test_extract() {
        assert_eq!(extract_field("  <Item>abc</Item>", "<Item>", "</Item>"), Ok("abc"));
        assert_eq!(ITEM.extract("<Item></Item>"), Ok(""));
        assert_eq!(ITEM.extract("<Item> spaced </Item>"), Ok(" spaced "));
    }

    #[test]
    fn test_extract_first_occurrence() {
        let line = "<LocID>a</LocID><Text>b</Text><Text>c</Text>";
        assert_eq!(extract_field(line, "<Text>", "</Text>"), Ok("b"));
        assert_eq!(extract_field("<X ID=\"sym_01\">", "<X ID=\"", "\">"), Ok("sym_01"));
    }

    #[test]
    fn test_extract_missing() {
        assert_eq!(
            ITEM.extract("abc</Item>"),
            Err(MissingMarker { marker: "<Item>" })
        );
        assert_eq!(
            ITEM.extract("<Item>abc"),
            Err(MissingMarker { marker: "</Item>" })
        );
        // a close marker before the open one does not count
        assert_eq!(
            ITEM.extract("</Item><Item>abc"),
            Err(MissingMarker { marker: "</Item>" })
        );
    }

    #[test]
    fn test_field_line_number() {
        let lines = ["<Block>", "<Item>oops"];
        let mut stream = TagStream::new(&lines);
        let mut result = Ok(());
        stream
            .scan_block("<Block>", "</Block>", |s, line| {
                if ITEM.opens(line) {
                    result = s.field(line, ITEM).map(|_| ());
                }
                Ok(())
            })
            .unwrap_err();
        assert_eq!(
            result,
            Err(ParsingError::MalformedField {
                field: "<Item>",
                marker: "</Item>",
                line: 2
            })
        );
    }

    #[test]
    fn test_scan_block() {
        let lines = ["<Block>", "<Item>a</Item>", "<Item>b</Item>", "</Block>", "tail"];
        let mut stream = TagStream::new(&lines);
        let mut items = Vec::new();
        stream
            .scan_block("<Block>", "</Block>", |s, line| {
                if ITEM.opens(line) {
                    items.push(s.field(line, ITEM)?);
                }
                Ok(())
            })
            .unwrap();
        assert_eq!(items, vec!["a", "b"]);
        assert_eq!(stream.line_number(), 5);
    }

    #[test]
    fn test_nested_block() {
        let lines = [
            "<Block>",
            "<Item>a</Item>",
            "<List>",
            "<Item>b</Item>",
            "<Item>c</Item>",
            "</List>",
            "<Item>d</Item>",
            "</Block>",
        ];
        let mut stream = TagStream::new(&lines);
        let mut outer = Vec::new();
        let mut inner = Vec::new();
        stream
            .scan_block("<Block>", "</Block>", |s, line| {
                if line.contains("<List>") {
                    s.scan_block("<List>", "</List>", |s, line| {
                        if ITEM.opens(line) {
                            inner.push(s.field(line, ITEM)?);
                        }
                        Ok(())
                    })
                } else if ITEM.opens(line) {
                    outer.push(s.field(line, ITEM)?);
                    Ok(())
                } else {
                    Ok(())
                }
            })
            .unwrap();
        assert_eq!(outer, vec!["a", "d"]);
        assert_eq!(inner, vec!["b", "c"]);
        assert!(stream.is_exhausted());
    }

    #[test]
    fn test_unterminated() {
        let lines = ["head", "<Block>", "<Item>a</Item>"];
        let mut stream = TagStream::new(&lines);
        assert!(stream.seek("<Block>").is_some());
        let err = stream.scan_block("<Block>", "</Block>", |_, _| Ok(())).unwrap_err();
        assert_eq!(
            err,
            ParsingError::UnterminatedBlock {
                close: "</Block>",
                line: 2
            }
        );
    }

    #[test]
    fn test_unterminated_nested() {
        let lines = [
            "<Block>",
            "<List>",
            "<Item>a</Item>",
            "</Block>",
            "<Block>",
            "<List>",
            "</List>",
            "</Block>",
        ];
        let mut stream = TagStream::new(&lines);
        // the outer close marker shows up while the list is still open
        let err = stream
            .scan_block("<Block>", "</Block>", |s, line| {
                if line.contains("<List>") {
                    s.scan_block("<List>", "</List>", |_, _| Ok(()))?;
                }
                Ok(())
            })
            .unwrap_err();
        assert_eq!(
            err,
            ParsingError::UnterminatedBlock {
                close: "</List>",
                line: 2
            }
        );
    }

    #[test]
    fn test_reopened_block() {
        let lines = ["<Block>", "<Item>a</Item>", "<Block>", "<Item>b</Item>", "</Block>"];
        let mut stream = TagStream::new(&lines);
        let mut items = Vec::new();
        let err = stream
            .scan_block("<Block>", "</Block>", |s, line| {
                if ITEM.opens(line) {
                    items.push(s.field(line, ITEM)?);
                }
                Ok(())
            })
            .unwrap_err();
        assert_eq!(
            err,
            ParsingError::UnterminatedBlock {
                close: "</Block>",
                line: 1
            }
        );
        assert_eq!(items, vec!["a"]);
    }

    #[test]
    fn test_sibling_blocks() {
        let lines = ["<Block>", "</Block>", "<Block>", "<List>", "</List>", "</Block>"];
        let mut stream = TagStream::new(&lines);
        let mut blocks = 0;
        while stream.seek("<Block>").is_some() {
            stream
                .scan_block("<Block>", "</Block>", |s, line| {
                    if line.contains("<List>") {
                        s.scan_block("<List>", "</List>", |_, _| Ok(()))?;
                    }
                    Ok(())
                })
                .unwrap();
            blocks += 1;
        }
        assert_eq!(blocks, 2);
    }

    #[test]
    fn test_seek() {
        let lines = ["<?xml?>", "<Database>", "<Block>", "</Block>", "</Database>"];
        let mut stream = TagStream::new(&lines);
        assert_eq!(stream.seek("<Block>"), Some("<Block>"));
        assert_eq!(stream.line_number(), 3);
        stream.scan_block("<Block>", "</Block>", |_, _| Ok(())).unwrap();
        assert_eq!(stream.seek("<Block>"), None);
        assert!(stream.is_exhausted());
        stream.advance();
        assert!(stream.is_exhausted());
    }
}
