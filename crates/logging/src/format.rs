//! crates/logging/src/format.rs
//! Bounded message rendering.
//!
//! Messages are rendered into a fixed-size stack buffer. Output that does not
//! fit is dropped at the last whole character; the location suffix is only
//! added when the message left enough room for it.

use std::fmt::{self, Write};

/// Capacity of a rendered message in bytes.
pub const MESSAGE_CAPACITY: usize = 256;

/// Space that must remain after the message before a location suffix is added.
pub const LOCATION_SLACK: usize = 10;

/// A fixed-capacity UTF-8 buffer that truncates instead of failing.
#[derive(Clone)]
pub struct MessageBuffer<const N: usize = MESSAGE_CAPACITY> {
    bytes: [u8; N],
    len: usize,
    truncated: bool,
}

impl<const N: usize> MessageBuffer<N> {
    /// Creates an empty buffer.
    pub const fn new() -> Self {
        Self {
            bytes: [0; N],
            len: 0,
            truncated: false,
        }
    }

    /// Returns the rendered text.
    pub fn as_str(&self) -> &str {
        // Only whole characters are ever copied in, so this cannot fail.
        std::str::from_utf8(&self.bytes[..self.len]).unwrap_or_default()
    }

    /// Returns the number of bytes written.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Reports whether nothing was written.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the bytes still free, less one reserved byte.
    pub const fn remaining(&self) -> usize {
        N.saturating_sub(self.len).saturating_sub(1)
    }

    /// Reports whether any output was dropped.
    pub const fn is_truncated(&self) -> bool {
        self.truncated
    }

    fn push_str(&mut self, text: &str) {
        let free = N - self.len;
        let take = if text.len() <= free {
            text.len()
        } else {
            self.truncated = true;
            floor_char_boundary(text, free)
        };
        self.bytes[self.len..self.len + take].copy_from_slice(&text.as_bytes()[..take]);
        self.len += take;
    }
}

impl<const N: usize> Default for MessageBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Write for MessageBuffer<N> {
    fn write_str(&mut self, text: &str) -> fmt::Result {
        if !self.truncated {
            self.push_str(text);
        }
        Ok(())
    }
}

impl<const N: usize> fmt::Debug for MessageBuffer<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageBuffer")
            .field("text", &self.as_str())
            .field("truncated", &self.truncated)
            .finish()
    }
}

impl<const N: usize> fmt::Display for MessageBuffer<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn floor_char_boundary(text: &str, limit: usize) -> usize {
    let mut index = limit.min(text.len());
    while !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

/// Renders `args` into a message buffer.
pub fn render(args: fmt::Arguments<'_>) -> MessageBuffer {
    let mut buffer = MessageBuffer::new();
    let _ = buffer.write_fmt(args);
    buffer
}

/// Renders `args` and appends ` (<file>:<line>)` when there is room.
///
/// # Examples
///
/// ```
/// let short = logging::render_with_location(format_args!("hello"), "main.rs", 7);
/// assert_eq!(short.as_str(), "hello (main.rs:7)");
///
/// let long = "x".repeat(250);
/// let full = logging::render_with_location(format_args!("{long}"), "main.rs", 7);
/// assert_eq!(full.as_str(), long);
/// ```
pub fn render_with_location(args: fmt::Arguments<'_>, file: &str, line: u32) -> MessageBuffer {
    let mut buffer = render(args);
    if !buffer.is_truncated() && buffer.remaining() > LOCATION_SLACK {
        let _ = write!(buffer, " ({file}:{line})");
    }
    buffer
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_message_renders_whole() {
        assert_eq!(render(format_args!("{} + {}", 2, 3)).as_str(), "2 + 3");
    }

    #[test]
    fn overflow_truncates_at_capacity() {
        let long = "a".repeat(400);
        let buffer = render(format_args!("{long}"));
        assert_eq!(buffer.len(), MESSAGE_CAPACITY);
        assert!(buffer.is_truncated());
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let mut buffer = MessageBuffer::<5>::new();
        let _ = buffer.write_str("ab\u{e9}\u{e9}");
        assert_eq!(buffer.as_str(), "ab\u{e9}");
        assert!(buffer.is_truncated());
    }

    #[test]
    fn writes_after_truncation_are_ignored() {
        let mut buffer = MessageBuffer::<4>::new();
        let _ = buffer.write_str("abcdef");
        let _ = buffer.write_str("z");
        assert_eq!(buffer.as_str(), "abcd");
    }

    #[test]
    fn suffix_added_when_slack_exceeds_threshold() {
        let body = "m".repeat(MESSAGE_CAPACITY - 1 - (LOCATION_SLACK + 1));
        let buffer = render_with_location(format_args!("{body}"), "f.rs", 1);
        assert!(buffer.as_str().starts_with(&body));
        assert!(buffer.as_str().len() > body.len());
    }

    #[test]
    fn suffix_omitted_at_exact_threshold() {
        let body = "m".repeat(MESSAGE_CAPACITY - 1 - LOCATION_SLACK);
        let buffer = render_with_location(format_args!("{body}"), "f.rs", 1);
        assert_eq!(buffer.as_str(), body);
    }

    #[test]
    fn suffix_may_itself_be_cut() {
        let body = "m".repeat(MESSAGE_CAPACITY - 1 - (LOCATION_SLACK + 1));
        let buffer = render_with_location(format_args!("{body}"), "a/very/long/path.rs", 1234);
        assert_eq!(buffer.len(), MESSAGE_CAPACITY);
        assert!(buffer.as_str().ends_with(" (a/very/lon"), "{buffer}");
    }

    #[test]
    fn truncated_message_gets_no_suffix() {
        let long = "x".repeat(MESSAGE_CAPACITY * 2);
        let buffer = render_with_location(format_args!("{long}"), "f.rs", 3);
        assert!(!buffer.as_str().contains("f.rs"));
    }
}
