//! Termination watcher
//!
//! An exchange abandoned before completion (the far end never answers, the
//! transaction times out, the caller cancels) must still be reflected in
//! dialog state without anyone polling. The watcher wires that up: it
//! registers a one-shot callback on the initiating transaction which forces
//! the dialog to `Terminated` if, and only if, the dialog has not reached
//! `Confirmed` by the time the transaction dies.
//!
//! A dialog that ends after establishment is terminated through an explicit
//! call (`bye()`/`terminate()` on the session), not by this watcher.

use std::sync::Arc;

use tracing::debug;

use crate::dialog::{Dialog, DialogState};

use super::TransactionHandle;

/// Register the termination watcher for `dialog` on `transaction`.
///
/// The callback fires at most once, whenever the transaction's own lifecycle
/// concludes. It reads the dialog's state at execution time: anything
/// earlier than `Confirmed` is forced to `Terminated` (subject to the
/// non-regression rule of [`Dialog::transition`]); `Confirmed` or later
/// makes the callback a no-op. A termination signal queued while the dialog
/// was still early but delivered after it confirmed therefore cannot undo
/// the established dialog.
pub fn watch_transaction<T>(dialog: &Arc<Dialog>, transaction: &T)
where
    T: TransactionHandle + ?Sized,
{
    let dialog = Arc::clone(dialog);
    transaction.on_terminate(Box::new(move || {
        let state = dialog.state();
        if state < DialogState::Confirmed {
            // The transaction died before the exchange completed.
            debug!(call_id = %dialog.call_id(), %state, "invite transaction terminated before answer, ending dialog");
            dialog.transition(DialogState::Terminated);
        }
    }));
}
