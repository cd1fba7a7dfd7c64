/// A byte offset range into the expression text a diagnostic refers to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Placeholder span for diagnostics that are not tied to source text.
    pub fn dummy() -> Self {
        Self { start: 0, end: 0 }
    }

    /// Span covering the whole of `text`.
    pub fn covering(text: &str) -> Self {
        Self {
            start: 0,
            end: text.len() as u32,
        }
    }

    pub fn is_dummy(&self) -> bool {
        self.start == 0 && self.end == 0
    }

    pub(crate) fn range(&self) -> std::ops::Range<usize> {
        self.start as usize..self.end as usize
    }
}
