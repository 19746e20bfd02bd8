//! Messages for the user screens.
//!
//! All internal communication for a screen flows through its message
//! type: user actions, lifecycle, and async results alike. Each screen
//! owns its own channel; a result arriving after the screen was left is
//! dropped with it.

use crate::users::model::{User, UserId};

/// Messages for the list (home) screen.
#[derive(Debug, Clone)]
pub enum HomeMsg {
    // === Collection ===
    /// Re-fetch the full collection from the backend
    Refresh,
    /// Fresh snapshot arrived
    UsersLoaded(Vec<User>),
    /// The fetch failed; the snapshot is cleared
    FetchFailed(String),

    // === Delete ===
    /// Open the confirmation dialog for one record
    RequestDelete(UserId),
    /// User confirmed the pending delete
    ConfirmDelete,
    /// User cancelled the pending delete
    CancelDelete,
    /// Delete succeeded on the backend
    UserDeleted,
    /// Delete failed on the backend
    DeleteFailed(String),

    // === Navigation ===
    /// Open the registration form
    OpenRegister,
    /// Open the edit form for one record
    OpenEdit(UserId),
    /// Leave the application
    Quit,

    // === Alert ===
    /// Explicitly close the visible alert
    DismissAlert,
}

/// Messages for the create/edit form screen.
#[derive(Debug, Clone)]
pub enum FormMsg {
    // === Edit-mode preload ===
    /// Fetch the record being edited
    Load(UserId),
    /// The record arrived; pre-populate the draft
    Loaded(User),
    /// The record could not be fetched; the empty form stays usable
    LoadFailed(String),

    // === Submit ===
    /// Validate the draft and, if it passes, create or update
    Submit,
    /// Create succeeded
    Created(User),
    /// Update succeeded
    Updated(User),
    /// Create or update failed on the backend
    SaveFailed(String),

    // === Navigation ===
    /// Return to the list (delayed after a successful edit)
    ReturnToList,
    /// Abandon the draft and go back
    Cancel,

    // === Alert ===
    /// Explicitly close the visible alert
    DismissAlert,
}
