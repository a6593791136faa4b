//! Source regions for identifier text.
//!
//! Stores the byte range of a piece of identifier text for diagnostic
//! positioning. Regions always refer to the original identifier string
//! handed to the parser.

use text_size::{TextRange, TextSize};

/// A region of the original identifier string (byte offsets).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextRegion {
    range: TextRange,
}

impl TextRegion {
    /// Create a region from start/end byte offsets.
    ///
    /// # Panics
    /// Panics if `start > end` (enforced by [`TextRange`]).
    pub fn new(start: u32, end: u32) -> Self {
        Self {
            range: TextRange::new(TextSize::new(start), TextSize::new(end)),
        }
    }

    /// Create an empty region at the given offset.
    pub fn empty(offset: u32) -> Self {
        Self {
            range: TextRange::empty(TextSize::new(offset)),
        }
    }

    /// Create a region covering all of `text`, starting at offset 0.
    pub fn of(text: &str) -> Self {
        Self {
            range: TextRange::up_to(TextSize::of(text)),
        }
    }

    /// The underlying range.
    pub fn range(&self) -> TextRange {
        self.range
    }

    /// Start offset.
    pub fn start(&self) -> u32 {
        self.range.start().into()
    }

    /// End offset (exclusive).
    pub fn end(&self) -> u32 {
        self.range.end().into()
    }

    /// Length in bytes.
    pub fn len(&self) -> u32 {
        self.range.len().into()
    }

    /// Whether the region is empty.
    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    /// Slice the region out of the source string.
    ///
    /// # Panics
    /// Panics if the region does not lie within `source`.
    pub fn slice<'a>(&self, source: &'a str) -> &'a str {
        &source[self.range]
    }

    /// A region spanning from the start of `self` to the end of `other`.
    pub fn cover(&self, other: TextRegion) -> TextRegion {
        Self {
            range: self.range.cover(other.range),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_accessors() {
        let region = TextRegion::new(3, 8);
        assert_eq!(region.start(), 3);
        assert_eq!(region.end(), 8);
        assert_eq!(region.len(), 5);
        assert!(!region.is_empty());
    }

    #[test]
    fn test_empty_region() {
        let region = TextRegion::empty(0);
        assert_eq!(region.start(), 0);
        assert_eq!(region.end(), 0);
        assert!(region.is_empty());
    }

    #[test]
    fn test_slice() {
        let source = "policy.premium";
        let region = TextRegion::new(7, 14);
        assert_eq!(region.slice(source), "premium");
        assert_eq!(TextRegion::of(source).slice(source), source);
    }

    #[test]
    fn test_cover() {
        let a = TextRegion::new(2, 4);
        let b = TextRegion::new(6, 9);
        assert_eq!(a.cover(b), TextRegion::new(2, 9));
    }
}
