//! Core dialog types and functionality
//!
//! This module contains the core dialog types and operations:
//!
//! - [`DialogId`]: correlation identifiers derived from Call-ID plus tags
//! - [`Dialog`]: main dialog implementation with state management
//! - [`DialogState`]: dialog lifecycle states (Initial, Early, Confirmed, Terminated)
//! - [`dialog_utils`]: the pluggable token generation capability
//!
//! ## Dialog Lifecycle
//!
//! ```text
//! Initial → Early → Confirmed → Terminated
//!    ↓        ↓        ↓            ↓
//!  INVITE   18x      2xx         BYE sent/recv'd,
//!  sent     recv'd   recv'd      or transaction died unanswered
//! ```
//!
//! Dialogs are created through the
//! [`DialogUserAgent`](crate::ua::DialogUserAgent) factory and handled
//! through the role sessions in [`crate::api`].

pub mod dialog_id;
pub mod dialog_impl;
pub mod dialog_state;
pub mod dialog_utils;

// Re-export main types
pub use dialog_id::DialogId;
pub use dialog_impl::Dialog;
pub use dialog_state::DialogState;
pub use dialog_utils::{TokenError, TokenGenerator, UuidTokenGenerator};
