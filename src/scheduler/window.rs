//! Admission Window Module
//!
//! Sliding-window bookkeeping for the request scheduler.

use std::collections::VecDeque;
use std::time::Duration;

use tokio::time::Instant;

// == Admission Window ==
/// Tracks admission timestamps against a sliding rate window.
///
/// At most `max_per_window` admissions may fall inside any trailing
/// interval of `window` length. A sliding window is used rather than
/// fixed buckets: a fixed bucket-per-interval scheme would allow bursts
/// of twice the cap across a bucket boundary.
#[derive(Debug)]
pub struct AdmissionWindow {
    /// Timestamps of recent admissions, oldest first
    timestamps: VecDeque<Instant>,
    /// Maximum admissions inside the window
    max_per_window: usize,
    /// Length of the sliding window
    window: Duration,
}

impl AdmissionWindow {
    // == Constructor ==
    /// Creates a new admission window.
    pub fn new(max_per_window: usize, window: Duration) -> Self {
        Self {
            timestamps: VecDeque::with_capacity(max_per_window),
            max_per_window,
            window,
        }
    }

    // == Try Admit ==
    /// Attempts to admit one unit of work at `now`.
    ///
    /// Timestamps that have aged out of the window are discarded first.
    /// On admission, `now` is recorded and `None` is returned. When the
    /// window is full, returns the time until the oldest tracked admission
    /// ages out (`window - (now - oldest)`); nothing is recorded.
    pub fn try_admit(&mut self, now: Instant) -> Option<Duration> {
        self.prune(now);

        if self.timestamps.len() < self.max_per_window {
            self.timestamps.push_back(now);
            return None;
        }

        self.timestamps
            .front()
            .map(|&oldest| self.window.saturating_sub(now - oldest))
    }

    // == In Window ==
    /// Returns how many admissions currently fall inside the window.
    pub fn in_window(&mut self, now: Instant) -> usize {
        self.prune(now);
        self.timestamps.len()
    }

    /// Discards timestamps older than `window` from the front.
    fn prune(&mut self, now: Instant) {
        while let Some(&oldest) = self.timestamps.front() {
            if now - oldest >= self.window {
                self.timestamps.pop_front();
            } else {
                break;
            }
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_millis(1000);

    #[test]
    fn test_admits_up_to_cap() {
        let mut window = AdmissionWindow::new(3, WINDOW);
        let now = Instant::now();

        assert_eq!(window.try_admit(now), None);
        assert_eq!(window.try_admit(now), None);
        assert_eq!(window.try_admit(now), None);
        assert_eq!(window.in_window(now), 3);
    }

    #[test]
    fn test_full_window_reports_wait() {
        let mut window = AdmissionWindow::new(3, WINDOW);
        let start = Instant::now();

        for _ in 0..3 {
            assert_eq!(window.try_admit(start), None);
        }

        // 400ms into the window, the oldest admission needs another 600ms
        // to age out.
        let later = start + Duration::from_millis(400);
        assert_eq!(window.try_admit(later), Some(Duration::from_millis(600)));
        // Nothing was recorded by the refusal.
        assert_eq!(window.in_window(later), 3);
    }

    #[test]
    fn test_aged_out_admissions_free_slots() {
        let mut window = AdmissionWindow::new(3, WINDOW);
        let start = Instant::now();

        for _ in 0..3 {
            assert_eq!(window.try_admit(start), None);
        }

        let after_window = start + WINDOW;
        assert_eq!(window.try_admit(after_window), None);
        // The three old timestamps aged out, one new one was recorded.
        assert_eq!(window.in_window(after_window), 1);
    }

    #[test]
    fn test_sliding_not_bucketed() {
        // Admissions staggered across the window age out one at a time,
        // not all at once on an interval boundary.
        let mut window = AdmissionWindow::new(2, WINDOW);
        let start = Instant::now();

        assert_eq!(window.try_admit(start), None);
        assert_eq!(window.try_admit(start + Duration::from_millis(500)), None);

        // At start+1000 only the first admission has aged out.
        let t = start + Duration::from_millis(1000);
        assert_eq!(window.try_admit(t), None);
        assert_eq!(
            window.try_admit(t),
            Some(Duration::from_millis(500)),
            "second slot frees only once the 500ms admission ages out"
        );
    }

    #[test]
    fn test_wait_never_underflows() {
        let mut window = AdmissionWindow::new(1, WINDOW);
        let start = Instant::now();

        assert_eq!(window.try_admit(start), None);

        // Probing just shy of the boundary yields a tiny wait, never an
        // underflowed duration.
        let almost = start + WINDOW - Duration::from_millis(1);
        assert_eq!(window.try_admit(almost), Some(Duration::from_millis(1)));
    }
}
