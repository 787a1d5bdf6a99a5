//! Conversation windows around a target sender.
//!
//! [`extract_windows`] makes a single left-to-right pass over one week's
//! messages. Every message from the target user that is not yet covered opens
//! a window of `context_size` messages on each side, clipped to the slice.
//! Every index in that window is then consumed. A target message that is
//! already consumed neither opens a window nor widens the one that covers it,
//! so close occurrences collapse into the window of the first one. The
//! leading context of a later window may repeat messages that an earlier
//! window already showed.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use weekpack::Message;
//! use weekpack::core::window::extract_windows;
//!
//! let ts = NaiveDate::from_ymd_opt(2024, 1, 26).unwrap().and_hms_opt(9, 0, 0).unwrap();
//! let users = ["a", "b", "target", "c", "target", "d", "e", "f", "g"];
//! let messages: Vec<Message> = users.iter().map(|u| Message::new(ts, *u, "x")).collect();
//!
//! let windows = extract_windows(&messages, "target", 2);
//! assert_eq!(windows.len(), 1);
//! assert_eq!(windows[0].range(), 0..5);
//! ```

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::Message;

/// A half-open slice `[lo, hi)` of one week's messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationWindow {
    /// First index in the window.
    pub lo: usize,
    /// One past the last index in the window.
    pub hi: usize,
    /// Index of the target message that opened the window.
    pub anchor: usize,
}

impl ConversationWindow {
    /// Returns the window as an index range.
    pub fn range(&self) -> Range<usize> {
        self.lo..self.hi
    }

    /// Number of messages covered.
    pub fn len(&self) -> usize {
        self.hi - self.lo
    }

    /// Returns `true` if the window covers no message.
    pub fn is_empty(&self) -> bool {
        self.hi == self.lo
    }

    /// Returns `true` if `index` lies inside the window.
    pub fn contains(&self, index: usize) -> bool {
        self.range().contains(&index)
    }

    /// Returns the covered messages of `messages`.
    ///
    /// `messages` must be the slice the window was extracted from.
    pub fn slice<'a>(&self, messages: &'a [Message]) -> &'a [Message] {
        &messages[self.range()]
    }
}

/// Extracts windows around each uncovered message from `target_user`.
///
/// Windows come out in increasing order of their anchor and therefore of
/// their `lo` bound. A `context_size` larger than the slice is clipped to
/// its bounds. Only the anchor of a window is guaranteed to be outside
/// every earlier window; its leading context may overlap the previous one.
pub fn extract_windows(
    messages: &[Message],
    target_user: &str,
    context_size: usize,
) -> Vec<ConversationWindow> {
    let n = messages.len();
    let mut consumed = vec![false; n];
    let mut windows = Vec::new();

    for (i, msg) in messages.iter().enumerate() {
        if !msg.is_from(target_user) {
            continue;
        }
        if consumed[i] {
            tracing::trace!(index = i, "target message already covered");
            continue;
        }

        let lo = i.saturating_sub(context_size);
        let hi = n.min(i.saturating_add(context_size).saturating_add(1));
        consumed[lo..hi].fill(true);

        tracing::trace!(lo, hi, anchor = i, "window");
        windows.push(ConversationWindow { lo, hi, anchor: i });
    }

    windows
}
