//! Viewport management for scrolling.
//!
//! The [`Viewport`] holds a page's rendered lines and the scroll window over
//! them. Every mutation keeps `offset <= max(0, total_lines - height)`.

use std::ops::Range;

use ratatui::text::Line;

use crate::input::Key;
use crate::markdown::StyledText;

/// Manages the visible portion of a rendered page.
///
/// The viewport tracks:
/// - Body dimensions (width, height)
/// - Current scroll offset (in lines)
/// - The rendered content
/// - Whether the terminal size is known yet
///
/// # Example
///
/// ```
/// use folio::ui::viewport::Viewport;
/// use ratatui::text::Line;
///
/// let mut vp = Viewport::default();
/// vp.initialize(80, 24);
/// vp.set_content((0..100).map(|i| Line::from(i.to_string())).collect());
/// assert_eq!(vp.visible_range(), 0..24);
///
/// vp.scroll_down(10);
/// assert_eq!(vp.visible_range(), 10..34);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Viewport {
    width: u16,
    height: u16,
    offset: usize,
    content: StyledText,
    ready: bool,
}

impl Viewport {
    /// Create a ready viewport with the given size and content.
    pub fn new(width: u16, height: u16, content: StyledText) -> Self {
        Self {
            width,
            height,
            offset: 0,
            content,
            ready: true,
        }
    }

    /// Get the current scroll offset.
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Get the viewport width.
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Get the viewport height.
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Whether the first terminal size has been applied.
    pub const fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn content(&self) -> &[Line<'static>] {
        &self.content
    }

    /// Get the total number of content lines.
    pub fn total_lines(&self) -> usize {
        self.content.len()
    }

    /// First sizing, once the terminal dimensions are known.
    pub fn initialize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.ready = true;
        self.clamp();
    }

    /// Resize the viewport, clamping the offset to the new maximum.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.clamp();
    }

    /// Replace the content, keeping the offset when it is still in range.
    pub fn set_content(&mut self, content: StyledText) {
        self.content = content;
        self.clamp();
    }

    /// Get the range of visible lines.
    pub fn visible_range(&self) -> Range<usize> {
        let start = self.offset.min(self.total_lines());
        let end = (self.offset + self.height as usize).min(self.total_lines());
        start..end
    }

    /// Lines currently inside the window. Never padded.
    pub fn visible_slice(&self) -> &[Line<'static>] {
        &self.content[self.visible_range()]
    }

    /// Scroll position as a fraction in `[0, 1]`.
    ///
    /// Zero when all content fits.
    pub fn scroll_percent(&self) -> f64 {
        let max_offset = self.max_offset();
        if max_offset == 0 {
            return 0.0;
        }
        // Line counts stay far below f64 precision limits.
        #[allow(clippy::cast_precision_loss)]
        let percent = self.offset as f64 / max_offset as f64;
        percent.clamp(0.0, 1.0)
    }

    /// Scroll by a signed number of lines, clamped to the valid range.
    pub fn scroll(&mut self, delta: isize) {
        if delta < 0 {
            self.scroll_up(delta.unsigned_abs());
        } else {
            self.scroll_down(delta.unsigned_abs());
        }
    }

    /// Scroll up by n lines.
    pub const fn scroll_up(&mut self, n: usize) {
        self.offset = self.offset.saturating_sub(n);
    }

    /// Scroll down by n lines.
    pub fn scroll_down(&mut self, n: usize) {
        self.offset = self.offset.saturating_add(n).min(self.max_offset());
    }

    /// Scroll up one page.
    pub const fn page_up(&mut self) {
        self.scroll_up(self.height as usize);
    }

    /// Scroll down one page.
    pub fn page_down(&mut self) {
        self.scroll_down(self.height as usize);
    }

    /// Scroll up half a page.
    pub const fn half_page_up(&mut self) {
        self.scroll_up(self.height as usize / 2);
    }

    /// Scroll down half a page.
    pub fn half_page_down(&mut self) {
        self.scroll_down(self.height as usize / 2);
    }

    /// Go to the beginning of the content.
    pub const fn go_to_top(&mut self) {
        self.offset = 0;
    }

    /// Go to the end of the content.
    pub fn go_to_bottom(&mut self) {
        self.offset = self.max_offset();
    }

    /// Apply a scroll key. Returns false for keys the viewport does not own.
    pub fn handle_key(&mut self, key: Key) -> bool {
        match key {
            Key::ScrollUp => self.scroll_up(1),
            Key::ScrollDown => self.scroll_down(1),
            Key::PageUp => self.page_up(),
            Key::PageDown => self.page_down(),
            Key::HalfPageUp => self.half_page_up(),
            Key::HalfPageDown => self.half_page_down(),
            Key::Top => self.go_to_top(),
            Key::Bottom => self.go_to_bottom(),
            _ => return false,
        }
        true
    }

    /// Calculate the maximum valid offset.
    pub fn max_offset(&self) -> usize {
        self.total_lines().saturating_sub(self.height as usize)
    }

    fn clamp(&mut self) {
        self.offset = self.offset.min(self.max_offset());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(count: usize) -> StyledText {
        (0..count).map(|i| Line::from(format!("line {i}"))).collect()
    }

    fn viewport(height: u16, total: usize) -> Viewport {
        Viewport::new(80, height, lines(total))
    }

    #[test]
    fn test_default_viewport_is_not_ready() {
        let vp = Viewport::default();
        assert!(!vp.is_ready());
        assert_eq!(vp.height(), 0);
        assert!(vp.visible_slice().is_empty());
    }

    #[test]
    fn test_initialize_marks_ready() {
        let mut vp = Viewport::default();
        vp.initialize(40, 10);
        assert!(vp.is_ready());
        assert_eq!((vp.width(), vp.height()), (40, 10));
    }

    #[test]
    fn test_visible_range_at_top() {
        let vp = viewport(24, 100);
        assert_eq!(vp.visible_range(), 0..24);
    }

    #[test]
    fn test_visible_range_at_bottom() {
        let mut vp = viewport(24, 100);
        vp.go_to_bottom();
        assert_eq!(vp.visible_range(), 76..100);
    }

    #[test]
    fn test_visible_slice_with_short_content() {
        let vp = viewport(24, 10);
        assert_eq!(vp.visible_slice().len(), 10);
    }

    #[test]
    fn test_visible_slice_starts_at_offset() {
        let mut vp = viewport(5, 100);
        vp.scroll_down(7);
        assert_eq!(vp.visible_slice()[0], Line::from("line 7"));
    }

    #[test]
    fn test_zero_height_shows_nothing() {
        let vp = viewport(0, 10);
        assert!(vp.visible_slice().is_empty());
        assert_eq!(vp.max_offset(), 10);
    }

    #[test]
    fn test_scroll_down_clamps_to_max() {
        let mut vp = viewport(24, 100);
        vp.scroll_down(1000);
        assert_eq!(vp.offset(), 76);
    }

    #[test]
    fn test_signed_scroll() {
        let mut vp = viewport(24, 100);
        vp.scroll(30);
        assert_eq!(vp.offset(), 30);
        vp.scroll(-12);
        assert_eq!(vp.offset(), 18);
        vp.scroll(-100);
        assert_eq!(vp.offset(), 0);
    }

    #[test]
    fn test_page_and_half_page() {
        let mut vp = viewport(24, 100);
        vp.page_down();
        assert_eq!(vp.offset(), 24);
        vp.half_page_down();
        assert_eq!(vp.offset(), 36);
        vp.half_page_up();
        assert_eq!(vp.offset(), 24);
        vp.page_up();
        assert_eq!(vp.offset(), 0);
    }

    #[test]
    fn test_handle_key_only_takes_scroll_keys() {
        let mut vp = viewport(24, 100);
        assert!(vp.handle_key(Key::Bottom));
        assert_eq!(vp.offset(), 76);
        assert!(vp.handle_key(Key::ScrollUp));
        assert_eq!(vp.offset(), 75);
        assert!(vp.handle_key(Key::Top));
        assert_eq!(vp.offset(), 0);
        assert!(!vp.handle_key(Key::Next));
        assert!(!vp.handle_key(Key::Unknown));
    }

    #[test]
    fn test_scroll_percent_bounds() {
        let mut vp = viewport(24, 100);
        assert!(vp.scroll_percent().abs() < f64::EPSILON);
        vp.go_to_bottom();
        assert!((vp.scroll_percent() - 1.0).abs() < f64::EPSILON);
        vp.scroll_up(38);
        assert!((vp.scroll_percent() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_scroll_percent_zero_when_content_fits() {
        assert!(viewport(24, 10).scroll_percent().abs() < f64::EPSILON);
        assert!(viewport(24, 24).scroll_percent().abs() < f64::EPSILON);
        assert!(viewport(24, 0).scroll_percent().abs() < f64::EPSILON);
    }

    #[test]
    fn test_resize_keeps_valid_offset() {
        let mut vp = viewport(24, 100);
        vp.scroll_down(50);
        vp.resize(80, 60);
        assert_eq!(vp.offset(), 40);
    }

    #[test]
    fn test_set_content_preserves_offset_in_range() {
        let mut vp = viewport(10, 100);
        vp.scroll_down(20);
        vp.set_content(lines(80));
        assert_eq!(vp.offset(), 20);
    }

    #[test]
    fn test_set_content_clamps_offset() {
        let mut vp = viewport(24, 100);
        vp.scroll_down(80);
        vp.set_content(lines(50));
        assert_eq!(vp.offset(), 26);
        vp.set_content(lines(5));
        assert_eq!(vp.offset(), 0);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn scroll_never_exceeds_bounds(
                total_lines in 0..2000usize,
                height in 0..100u16,
                delta in -5000..5000isize,
            ) {
                let mut vp = viewport(height, total_lines);
                vp.scroll(delta);
                prop_assert!(vp.offset() <= total_lines.saturating_sub(height as usize));
            }

            #[test]
            fn set_content_clamps(
                before in 0..2000usize,
                after in 0..2000usize,
                height in 0..100u16,
                offset in 0..2000usize,
            ) {
                let mut vp = viewport(height, before);
                vp.scroll_down(offset);
                vp.set_content(lines(after));
                let h = height as usize;
                if h >= after {
                    prop_assert_eq!(vp.offset(), 0);
                } else {
                    prop_assert!(vp.offset() <= after - h);
                }
            }

            #[test]
            fn visible_slice_within_bounds(
                total_lines in 0..2000usize,
                height in 0..100u16,
                offset in 0..2000usize,
            ) {
                let mut vp = viewport(height, total_lines);
                vp.scroll_down(offset);
                let range = vp.visible_range();
                prop_assert!(range.start <= range.end);
                prop_assert!(range.end <= total_lines);
                prop_assert!(vp.visible_slice().len() <= height as usize);
            }

            #[test]
            fn percent_always_valid(
                total_lines in 0..2000usize,
                height in 0..100u16,
                offset in 0..2000usize,
            ) {
                let mut vp = viewport(height, total_lines);
                vp.scroll_down(offset);
                let percent = vp.scroll_percent();
                prop_assert!((0.0..=1.0).contains(&percent));
            }
        }
    }
}
