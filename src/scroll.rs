//! Reconciling programmatic jumps with scroll-position tracking
//!
//! The page surface reports which page is most visible and by how much.
//! Those reports drive the toolbar's current page — except right after a
//! programmatic jump, when the view is still travelling and intermediate
//! pages flash past. A two-state machine keeps the two sources of truth
//! from fighting: while a jump is pending, reports are only compared
//! against the jump target; once it lands (or the deadline passes),
//! reports are trusted again.

use std::time::{Duration, Instant};

/// Minimum visibility for the jump target to count as reached
const TARGET_RATIO: f32 = 0.55;
/// Minimum visibility for a hand-scrolled page to take over
const MANUAL_RATIO: f32 = 0.6;
/// How long a programmatic jump may stay pending
const SETTLE_DEADLINE: Duration = Duration::from_millis(600);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Idle,
    Pending { target: u32, deadline: Instant },
}

#[derive(Debug)]
pub struct ScrollSync {
    state: State,
}

impl Default for ScrollSync {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollSync {
    pub fn new() -> Self {
        Self { state: State::Idle }
    }

    /// Arm tracking for a programmatic jump to `target`.
    pub fn arm(&mut self, target: u32) {
        self.state = State::Pending {
            target,
            deadline: Instant::now() + SETTLE_DEADLINE,
        };
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, State::Pending { .. })
    }

    /// Consume one visibility report `(page, ratio)`.
    ///
    /// Returns the page the viewer should now consider current, or None
    /// when the report changes nothing.
    pub fn observe(&mut self, current_page: u32, page: u32, ratio: f32) -> Option<u32> {
        self.observe_at(current_page, page, ratio, Instant::now())
    }

    fn observe_at(
        &mut self,
        current_page: u32,
        page: u32,
        ratio: f32,
        now: Instant,
    ) -> Option<u32> {
        match self.state {
            State::Pending { deadline, .. } if now >= deadline => {
                self.state = State::Idle;
                self.observe_at(current_page, page, ratio, now)
            }
            State::Pending { target, .. } => {
                if page == target && ratio >= TARGET_RATIO {
                    self.state = State::Idle;
                    (current_page != target).then_some(target)
                } else {
                    // still travelling; intermediate pages are noise
                    None
                }
            }
            State::Idle => {
                (page != current_page && ratio >= MANUAL_RATIO).then_some(page)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_scroll_moves_current_page() {
        let mut sync = ScrollSync::new();

        assert_eq!(sync.observe(1, 3, 0.8), Some(3));
        assert_eq!(sync.observe(3, 3, 0.9), None);
        assert_eq!(sync.observe(3, 4, 0.3), None);
    }

    #[test]
    fn test_pending_ignores_intermediate_pages() {
        let mut sync = ScrollSync::new();
        sync.arm(7);

        // pages flashing past on the way down
        assert_eq!(sync.observe(1, 3, 0.9), None);
        assert_eq!(sync.observe(1, 5, 1.0), None);
        assert!(sync.is_pending());

        // target barely visible: not settled yet
        assert_eq!(sync.observe(1, 7, 0.4), None);

        assert_eq!(sync.observe(1, 7, 0.6), Some(7));
        assert!(!sync.is_pending());
    }

    #[test]
    fn test_settling_on_current_page_reports_nothing() {
        let mut sync = ScrollSync::new();
        sync.arm(2);
        // the toolbar already shows 2; landing there is not a change
        assert_eq!(sync.observe(2, 2, 0.9), None);
        assert!(!sync.is_pending());
    }

    #[test]
    fn test_deadline_expiry_restores_manual_tracking() {
        let mut sync = ScrollSync::new();
        let start = Instant::now();
        sync.arm(7);

        let after = start + SETTLE_DEADLINE + Duration::from_millis(10);
        // never reached page 7; by now the report is the user's scroll
        assert_eq!(sync.observe_at(1, 4, 0.9, after), Some(4));
        assert!(!sync.is_pending());
    }

    #[test]
    fn test_rearming_replaces_target() {
        let mut sync = ScrollSync::new();
        sync.arm(3);
        sync.arm(9);

        assert_eq!(sync.observe(1, 3, 1.0), None);
        assert_eq!(sync.observe(1, 9, 0.7), Some(9));
    }
}
