//! Last-request-wins ordering for overlapping conversions.
//!
//! The pipeline itself is synchronous; when a caller overlaps conversions
//! anyway (a slider moved twice before the first run finished), the newest
//! request must win by issue order, not by completion order. A
//! [`ConversionSession`] hands out monotonically increasing tickets and
//! refuses results whose ticket is older than the newest accepted one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use crate::converter::AsciiArt;

/// Issue-order handle for one conversion request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

#[derive(Debug, Default)]
pub struct ConversionSession {
    next: AtomicU64,
    latest: Mutex<Option<(Ticket, AsciiArt)>>,
}

impl ConversionSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserves the next sequence slot. Call before starting the conversion.
    pub fn begin(&self) -> Ticket {
        Ticket(self.next.fetch_add(1, Ordering::Relaxed))
    }

    /// Offers a finished conversion. Returns `false` when a conversion
    /// started later has already been accepted; the stale result is dropped.
    pub fn submit(&self, ticket: Ticket, art: AsciiArt) -> bool {
        let mut latest = self.latest.lock().expect("session lock poisoned");
        if latest.as_ref().is_some_and(|(newest, _)| *newest > ticket) {
            return false;
        }
        *latest = Some((ticket, art));
        true
    }

    /// The newest accepted result, if any conversion has completed yet.
    pub fn latest(&self) -> Option<AsciiArt> {
        self.latest
            .lock()
            .expect("session lock poisoned")
            .as_ref()
            .map(|(_, art)| art.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converter::{convert, ConversionConfig};
    use crate::glyphs::GlyphTable;
    use image::{Rgba, RgbaImage};

    fn art_of(value: u8) -> AsciiArt {
        let image = RgbaImage::from_pixel(2, 2, Rgba([value, value, value, 255]));
        let config = ConversionConfig {
            cell_size: 2,
            contrast: 0.0,
            brightness: 0.0,
            greyscale: "Average".to_string(),
            invert: false,
        };
        convert(&image, &config, &GlyphTable::builtin()).unwrap()
    }

    #[test]
    fn tickets_increase_monotonically() {
        let session = ConversionSession::new();
        let first = session.begin();
        let second = session.begin();
        assert!(second > first);
    }

    #[test]
    fn latest_is_empty_before_any_submission() {
        assert_eq!(ConversionSession::new().latest(), None);
    }

    #[test]
    fn newest_submission_wins() {
        let session = ConversionSession::new();
        let ticket = session.begin();
        assert!(session.submit(ticket, art_of(0)));
        assert_eq!(session.latest(), Some(art_of(0)));

        let newer = session.begin();
        assert!(session.submit(newer, art_of(255)));
        assert_eq!(session.latest(), Some(art_of(255)));
    }

    #[test]
    fn stale_completion_never_replaces_a_newer_result() {
        let session = ConversionSession::new();
        let old = session.begin();
        let new = session.begin();

        // the newer request finishes first
        assert!(session.submit(new, art_of(255)));
        assert!(!session.submit(old, art_of(0)));
        assert_eq!(session.latest(), Some(art_of(255)));
    }
}
