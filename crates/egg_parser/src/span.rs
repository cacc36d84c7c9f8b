use std::fmt::Display;

/// A byte offset somewhere in the source code
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct BytePos(usize);

impl BytePos {
    pub fn new(pos: usize) -> Self {
        BytePos(pos)
    }

    /// Move forward over `len` bytes of source.
    pub fn advance(self, len: usize) -> Self {
        BytePos(self.0 + len)
    }

    pub fn offset(self) -> usize {
        self.0
    }
}

impl Display for BytePos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Translate a byte offset into a 1-based "line:column" pair for error reporting.
pub fn line_col(source: &str, pos: BytePos) -> (usize, usize) {
    let offset = pos.offset().min(source.len());
    let before = &source[..floor_char_boundary(source, offset)];

    let line = before.matches('\n').count() + 1;
    let column = match before.rfind('\n') {
        Some(newline) => before[newline + 1..].chars().count() + 1,
        None => before.chars().count() + 1,
    };

    (line, column)
}

fn floor_char_boundary(source: &str, mut offset: usize) -> usize {
    while !source.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance() {
        let pos = BytePos::new(3).advance(4);
        assert_eq!(pos, BytePos::new(7));
        assert_eq!(pos.offset(), 7);
    }

    #[test]
    fn test_line_col() {
        let source = "do(\n  x,\n  y)";
        assert_eq!(line_col(source, BytePos::new(0)), (1, 1));
        assert_eq!(line_col(source, BytePos::new(3)), (1, 4));
        assert_eq!(line_col(source, BytePos::new(6)), (2, 3));
        assert_eq!(line_col(source, BytePos::new(12)), (3, 4));
        // Offsets past the end are clamped
        assert_eq!(line_col(source, BytePos::new(100)), (3, 5));
    }
}
