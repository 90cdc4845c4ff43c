//! Hook invoked after the selection or the tree changed
//!
//! The editor canvas implements [`RefreshNotifier`] to redraw. The notifier
//! must not call back into the selection.

use std::cell::Cell;
use std::rc::Rc;

pub trait RefreshNotifier {
    fn notify_changed(&mut self);
}

impl<F: FnMut()> RefreshNotifier for F {
    fn notify_changed(&mut self) {
        self()
    }
}

/// Notifier that ignores every refresh
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRefreshNotifier;

impl RefreshNotifier for NoopRefreshNotifier {
    fn notify_changed(&mut self) {}
}

/// Notifier that counts refreshes
///
/// Clones share the counter, so a test can hand one clone to the selection
/// and keep the other to read the count.
#[derive(Debug, Clone, Default)]
pub struct CountingRefreshNotifier {
    count: Rc<Cell<usize>>,
}

impl CountingRefreshNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.count.get()
    }

    pub fn reset(&self) {
        self.count.set(0);
    }
}

impl RefreshNotifier for CountingRefreshNotifier {
    fn notify_changed(&mut self) {
        self.count.set(self.count.get() + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counting_notifier_shares_counter() {
        let counter = CountingRefreshNotifier::new();
        let mut handle = counter.clone();

        handle.notify_changed();
        handle.notify_changed();

        assert_eq!(counter.count(), 2);
        counter.reset();
        assert_eq!(handle.count(), 0);
    }

    #[test]
    fn test_closure_notifier() {
        let mut calls = 0;
        {
            let mut notifier = || calls += 1;
            notifier.notify_changed();
        }
        assert_eq!(calls, 1);
    }
}
