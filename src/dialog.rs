//! Add/update-status dialog state machine.
//!
//! DESIGN
//! ======
//! The dialog offers the three reading statuses as mutually exclusive choices
//! and, for books already on the shelf, a remove action behind a
//! confirmation step.
//!
//! ```text
//!   Closed --open--> Selecting --request_removal--> ConfirmingRemoval
//!     ^                 |  ^                           |        ^
//!     |              confirm  \---dismiss_removal-----/         |
//!     |                 |                                confirm_removal
//!     +-- cancel (any) -+                                 (failure)
//!     ^                                                         |
//!     +------------------ (success) ---- Removing <-------------+
//! ```
//!
//! Side effects go through [`StatusActions`]; the dialog itself never
//! touches the store. After `confirm` the caller decides whether to close.
//!
//! The in-flight labels ("Updating...", "Adding...", "Removing...") and
//! `is_loading` are only observable while `confirm` or `confirm_removal` is
//! awaiting. Pages are rendered after the action settles, so a server-rendered
//! dialog always shows the idle labels.

use uuid::Uuid;

use crate::services::shelf::{BookRef, ReadingStatus, ShelfError, ShelfStore};

#[derive(Debug, thiserror::Error)]
pub enum DialogError {
    #[error("dialog is not accepting a selection")]
    NotSelecting,
    #[error(transparent)]
    Shelf(#[from] ShelfError),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DialogPhase {
    #[default]
    Closed,
    Selecting,
    ConfirmingRemoval,
    Removing,
}

/// The two mutations the dialog can trigger.
#[async_trait::async_trait]
pub trait StatusActions: Send + Sync {
    async fn set_status(&self, status: ReadingStatus) -> Result<(), ShelfError>;
    async fn remove(&self) -> Result<(), ShelfError>;
}

/// [`StatusActions`] bound to one user's entry for one book.
pub struct ShelfActions<'a> {
    pub store: &'a dyn ShelfStore,
    pub user_id: Uuid,
    pub book: &'a BookRef,
}

#[async_trait::async_trait]
impl StatusActions for ShelfActions<'_> {
    async fn set_status(&self, status: ReadingStatus) -> Result<(), ShelfError> {
        self.store.set_status(self.user_id, self.book, status).await?;
        Ok(())
    }

    async fn remove(&self) -> Result<(), ShelfError> {
        self.store.remove_book(self.user_id, &self.book.book_id).await
    }
}

#[derive(Debug, Clone)]
pub struct StatusDialog {
    book: BookRef,
    current_status: Option<ReadingStatus>,
    show_remove_button: bool,
    phase: DialogPhase,
    selected: ReadingStatus,
    saving: bool,
    last_error: Option<String>,
}

impl StatusDialog {
    /// A closed dialog for `book`. `current_status` is `None` when the book
    /// is not yet on the shelf.
    #[must_use]
    pub fn new(book: BookRef, current_status: Option<ReadingStatus>, show_remove_button: bool) -> Self {
        Self {
            book,
            current_status,
            show_remove_button,
            phase: DialogPhase::Closed,
            selected: current_status.unwrap_or_default(),
            saving: false,
            last_error: None,
        }
    }

    #[must_use]
    pub fn book(&self) -> &BookRef {
        &self.book
    }

    #[must_use]
    pub fn current_status(&self) -> Option<ReadingStatus> {
        self.current_status
    }

    #[must_use]
    pub fn phase(&self) -> DialogPhase {
        self.phase
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.phase != DialogPhase::Closed
    }

    #[must_use]
    pub fn selected(&self) -> ReadingStatus {
        self.selected
    }

    /// True while a status update is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.saving
    }

    #[must_use]
    pub fn is_removing(&self) -> bool {
        self.phase == DialogPhase::Removing
    }

    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Whether the remove affordance is offered at all.
    #[must_use]
    pub fn can_remove(&self) -> bool {
        self.show_remove_button && self.current_status.is_some()
    }

    #[must_use]
    pub fn confirmation_open(&self) -> bool {
        matches!(self.phase, DialogPhase::ConfirmingRemoval | DialogPhase::Removing)
    }

    /// Open the dialog, seeding the selection from the current status.
    pub fn open(&mut self) {
        self.selected = self.current_status.unwrap_or_default();
        self.last_error = None;
        self.phase = DialogPhase::Selecting;
    }

    /// Change the pending selection. Nothing is persisted.
    pub fn select(&mut self, status: ReadingStatus) {
        if self.phase == DialogPhase::Selecting {
            self.selected = status;
        }
    }

    /// Persist the selected status through `actions`.
    ///
    /// The dialog stays open either way; the caller closes it on success.
    ///
    /// # Errors
    ///
    /// Returns [`DialogError::NotSelecting`] outside the selecting phase
    /// (closed, confirming or mid-removal) without calling `set_status`, and
    /// [`DialogError::Shelf`] when the store rejects the update.
    pub async fn confirm(&mut self, actions: &dyn StatusActions) -> Result<ReadingStatus, DialogError> {
        if self.phase != DialogPhase::Selecting || self.saving {
            return Err(DialogError::NotSelecting);
        }
        self.saving = true;
        let result = actions.set_status(self.selected).await;
        self.saving = false;
        match result {
            Ok(()) => {
                self.last_error = None;
                Ok(self.selected)
            }
            Err(e) => {
                self.last_error = Some(e.to_string());
                Err(e.into())
            }
        }
    }

    /// Show the removal confirmation. Returns `false` when removal is not offered.
    pub fn request_removal(&mut self) -> bool {
        if self.phase != DialogPhase::Selecting || !self.can_remove() || self.saving {
            return false;
        }
        self.phase = DialogPhase::ConfirmingRemoval;
        true
    }

    /// Close the confirmation only, back to selecting.
    pub fn dismiss_removal(&mut self) {
        if self.phase == DialogPhase::ConfirmingRemoval {
            self.phase = DialogPhase::Selecting;
        }
    }

    /// Remove the book through `actions`.
    ///
    /// On success both the confirmation and the dialog close. On failure the
    /// error is logged and recorded and the confirmation stays open.
    pub async fn confirm_removal(&mut self, actions: &dyn StatusActions) -> bool {
        if self.phase != DialogPhase::ConfirmingRemoval {
            return false;
        }
        self.phase = DialogPhase::Removing;
        match actions.remove().await {
            Ok(()) => {
                self.last_error = None;
                self.phase = DialogPhase::Closed;
                true
            }
            Err(e) => {
                tracing::error!(error = %e, book_id = %self.book.book_id, "failed to remove book");
                self.last_error = Some(e.to_string());
                self.phase = DialogPhase::ConfirmingRemoval;
                false
            }
        }
    }

    /// Close from any sub-state, discarding the selection.
    pub fn cancel(&mut self) {
        self.phase = DialogPhase::Closed;
        self.selected = self.current_status.unwrap_or_default();
    }

    // =========================================================================
    // PRESENTATION
    // =========================================================================

    #[must_use]
    pub fn title(&self) -> &'static str {
        if self.current_status.is_some() { "Update Status" } else { "Add to Shelf" }
    }

    #[must_use]
    pub fn description(&self) -> String {
        if self.current_status.is_some() {
            format!("Update the reading status for \"{}\"", self.book.title)
        } else {
            format!("How would you like to track \"{}\"?", self.book.title)
        }
    }

    #[must_use]
    pub fn confirm_label(&self) -> &'static str {
        match (self.saving, self.current_status.is_some()) {
            (true, true) => "Updating...",
            (true, false) => "Adding...",
            (false, true) => "Update Status",
            (false, false) => "Add to Shelf",
        }
    }

    #[must_use]
    pub fn remove_label(&self) -> &'static str {
        if self.is_removing() { "Removing..." } else { "Remove" }
    }

    #[must_use]
    pub fn removal_warning(&self) -> String {
        format!(
            "Are you sure you want to remove \"{}\" from your shelf? This action cannot be undone and will delete all progress data.",
            self.book.title
        )
    }

    /// Buttons are disabled while any mutation is in flight.
    #[must_use]
    pub fn controls_disabled(&self) -> bool {
        self.saving || self.is_removing()
    }
}

#[cfg(test)]
#[path = "dialog_test.rs"]
mod tests;
