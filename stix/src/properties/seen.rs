use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::{Audit, Check, Compare, Order, Outcome, Timestamp};

use super::PropertyGroup;

/// When an object was first and last seen. Both ends are optional.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeenWindow {
    pub first_seen: Option<Timestamp>,
    pub last_seen: Option<Timestamp>,
}

impl SeenWindow {
    pub fn set_first_seen(&mut self, value: impl Into<Timestamp>) {
        self.first_seen = Some(value.into());
    }

    pub fn set_last_seen(&mut self, value: impl Into<Timestamp>) {
        self.last_seen = Some(value.into());
    }
}

impl PropertyGroup for SeenWindow {
    const KEYS: &'static [&'static str] = &["first_seen", "last_seen"];
}

impl Check for SeenWindow {
    fn check(&self) -> Outcome {
        let mut acc = Audit::new();
        acc.check_timestamp("first_seen", self.first_seen.as_ref());
        acc.check_timestamp("last_seen", self.last_seen.as_ref());
        if self.first_seen.is_some() {
            acc.check_order(
                "last_seen",
                self.first_seen.as_ref(),
                self.last_seen.as_ref(),
                Order::NotBefore,
            );
        }
        acc.finish()
    }
}

impl Compare for SeenWindow {
    fn compare(&self, other: &Self) -> Outcome {
        let mut acc = Audit::new();
        acc.compare_timestamp("first_seen", self.first_seen.as_ref(), other.first_seen.as_ref());
        acc.compare_timestamp("last_seen", self.last_seen.as_ref(), other.last_seen.as_ref());
        acc.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_window_is_valid() {
        let outcome = SeenWindow::default().check();
        assert!(outcome.is_ok());
        assert!(outcome.diagnostics().is_empty());
    }

    #[test]
    fn last_seen_before_first_seen() {
        let mut window = SeenWindow::default();
        window.set_first_seen("2016-05-01T00:00:00Z");
        window.set_last_seen("2016-04-01T00:00:00Z");

        let outcome = window.check();
        assert_eq!(outcome.problem_count(), 1);

        window.set_last_seen("2016-05-01T00:00:00Z");
        assert!(window.check().is_ok());
    }
}
