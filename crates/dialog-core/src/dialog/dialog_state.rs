//! Dialog state management
//!
//! Represents the various states a SIP dialog can be in during its lifecycle.
//!
//! The variants are declared in progress order and the enum derives `Ord`;
//! `Dialog::transition` leans on that ordering to refuse regressions, and the
//! termination watcher uses it to decide whether a dying transaction still
//! matters (`state < Confirmed`).

use std::fmt;
use serde::{Serialize, Deserialize};

/// Represents the state of a dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DialogState {
    /// Dialog created, no response observed yet
    Initial,

    /// A provisional response carrying a tag has been observed
    Early,

    /// Dialog is confirmed and established
    Confirmed,

    /// Dialog has been terminated; terminal
    Terminated,
}

impl fmt::Display for DialogState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DialogState::Initial => write!(f, "Initial"),
            DialogState::Early => write!(f, "Early"),
            DialogState::Confirmed => write!(f, "Confirmed"),
            DialogState::Terminated => write!(f, "Terminated"),
        }
    }
}

impl DialogState {
    /// Check if the dialog is active (can process requests)
    pub fn is_active(&self) -> bool {
        matches!(self, DialogState::Early | DialogState::Confirmed)
    }

    /// Check if the dialog is confirmed
    pub fn is_confirmed(&self) -> bool {
        matches!(self, DialogState::Confirmed)
    }

    /// Check if the dialog is terminated
    pub fn is_terminated(&self) -> bool {
        matches!(self, DialogState::Terminated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialog_state_display() {
        assert_eq!(DialogState::Initial.to_string(), "Initial");
        assert_eq!(DialogState::Early.to_string(), "Early");
        assert_eq!(DialogState::Confirmed.to_string(), "Confirmed");
        assert_eq!(DialogState::Terminated.to_string(), "Terminated");
    }

    #[test]
    fn test_dialog_state_progress_ordering() {
        assert!(DialogState::Initial < DialogState::Early);
        assert!(DialogState::Early < DialogState::Confirmed);
        assert!(DialogState::Confirmed < DialogState::Terminated);
    }

    #[test]
    fn test_dialog_state_helpers() {
        assert!(DialogState::Early.is_active());
        assert!(DialogState::Confirmed.is_active());
        assert!(!DialogState::Initial.is_active());
        assert!(!DialogState::Terminated.is_active());
        assert!(DialogState::Terminated.is_terminated());
    }
}
