//! Responsive breakpoint between the mobile and desktop layouts.

/// A single `min-width` media query tracked against the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Breakpoint {
    min_width: u32,
    width: u32,
}

impl Breakpoint {
    pub fn new(min_width: u32, width: u32) -> Self {
        Self { min_width, width }
    }

    /// Whether the current viewport is desktop width.
    pub fn matches(&self) -> bool {
        self.width >= self.min_width
    }

    pub fn min_width(&self) -> u32 {
        self.min_width
    }

    /// Record a new viewport width.
    ///
    /// Returns `Some(matches)` when the width crossed the threshold in
    /// either direction, `None` otherwise.
    pub fn resize(&mut self, width: u32) -> Option<bool> {
        let before = self.matches();
        self.width = width;
        let after = self.matches();
        (before != after).then_some(after)
    }
}
