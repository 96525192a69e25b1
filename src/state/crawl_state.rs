//! Crawl state definitions for the pagination walk
//!
//! The walk moves `Start -> Walking` once the profile page is seeded, and
//! ends in either `Done` (feed exhausted) or `Aborted` (transport failure).

use std::fmt;

/// Represents the current state of a feed walk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlState {
    // ===== Active States =====
    /// Profile page not yet fetched
    Start,

    /// Requesting next pages with the last seen cursor
    Walking,

    // ===== Terminal States =====
    /// The server reported no more data
    Done,

    /// A page fetch failed and the walk stopped early
    Aborted,
}

impl CrawlState {
    /// Returns true if this is a terminal state (no further pages are fetched)
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Aborted)
    }

    /// Returns true if the walk finished by exhausting the feed
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Checks whether moving from this state to `next` is allowed
    ///
    /// `Start` may also go straight to `Done` when the profile page has no
    /// entries, since there is no cursor to walk from.
    pub fn can_transition_to(&self, next: CrawlState) -> bool {
        matches!(
            (self, next),
            (Self::Start, Self::Walking)
                | (Self::Start, Self::Done)
                | (Self::Start, Self::Aborted)
                | (Self::Walking, Self::Walking)
                | (Self::Walking, Self::Done)
                | (Self::Walking, Self::Aborted)
        )
    }

    /// Short lowercase label used in logs and reports
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Walking => "walking",
            Self::Done => "done",
            Self::Aborted => "aborted",
        }
    }
}

impl fmt::Display for CrawlState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
