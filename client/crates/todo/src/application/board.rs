//! Todo Board Controller
//!
//! Owns the in-memory list and every piece of transient list UI state.
//! At most one item is pending a remote mutation at a time; the front-end
//! keeps other rows disabled while that holds, so mutations never overlap
//! on the same item.
//!
//! Reloads are the one place a stale response can race a session change,
//! so they run in two phases: [`TodoBoard::begin_reload`] captures an
//! epoch ticket and [`TodoBoard::finish_reload`] discards results whose
//! ticket is no longer current. The async [`TodoBoard::reload`] wraps the
//! two for drivers that do not interleave.

use std::sync::Arc;

use kernel::id::{TodoId, UserId};

use crate::application::config::TodoConfig;
use crate::application::messages;
use crate::domain::entities::TodoItem;
use crate::domain::repository::TodoRepository;
use crate::domain::value_objects::Title;
use crate::error::{TodoError, TodoResult};

/// Proof that a reload was started against the current session
///
/// The epoch is bumped on every session change; a ticket from an older
/// epoch is discarded without touching state.
#[derive(Debug)]
pub struct ReloadTicket {
    user: UserId,
    epoch: u64,
}

#[derive(Debug, Clone)]
struct EditState {
    id: TodoId,
    title: String,
}

/// Todo list controller
pub struct TodoBoard<R>
where
    R: TodoRepository,
{
    repo: Arc<R>,
    config: TodoConfig,
    user: Option<UserId>,
    epoch: u64,
    items: Vec<TodoItem>,
    loading: bool,
    creating: bool,
    error: Option<String>,
    editing: Option<EditState>,
    pending: Option<TodoId>,

    /// New-item title input
    pub draft_title: String,
}

impl<R> TodoBoard<R>
where
    R: TodoRepository,
{
    pub fn new(repo: Arc<R>, config: TodoConfig) -> Self {
        Self {
            repo,
            config,
            user: None,
            epoch: 0,
            items: Vec::new(),
            loading: false,
            creating: false,
            error: None,
            editing: None,
            pending: None,
            draft_title: String::new(),
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn items(&self) -> &[TodoItem] {
        &self.items
    }

    pub fn user(&self) -> Option<&UserId> {
        self.user.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_creating(&self) -> bool {
        self.creating
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn editing_id(&self) -> Option<&TodoId> {
        self.editing.as_ref().map(|e| &e.id)
    }

    pub fn editing_title(&self) -> Option<&str> {
        self.editing.as_ref().map(|e| e.title.as_str())
    }

    pub fn pending_id(&self) -> Option<&TodoId> {
        self.pending.as_ref()
    }

    // ========================================================================
    // Session binding
    // ========================================================================

    /// Bind the board to a (possibly absent) session
    ///
    /// Any actual change invalidates in-flight reloads and resets the
    /// board: the list, edit selection, messages, and input all belong to
    /// the previous user. Returns whether the session changed.
    pub fn set_session(&mut self, user: Option<UserId>) -> bool {
        if self.user == user {
            return false;
        }

        self.epoch += 1;
        self.user = user;
        self.items.clear();
        self.editing = None;
        self.pending = None;
        self.error = None;
        self.loading = false;
        self.creating = false;
        self.draft_title.clear();
        true
    }

    // ========================================================================
    // Reload
    // ========================================================================

    /// Start a reload for the current session
    ///
    /// Without a session the list is already clear and no call is made.
    pub fn begin_reload(&mut self) -> Option<ReloadTicket> {
        let user = self.user.clone()?;
        self.loading = true;
        self.error = None;
        Some(ReloadTicket {
            user,
            epoch: self.epoch,
        })
    }

    /// Apply a reload result, unless the session moved on meanwhile
    pub fn finish_reload(&mut self, ticket: ReloadTicket, result: TodoResult<Vec<TodoItem>>) {
        if ticket.epoch != self.epoch {
            tracing::debug!(user = %ticket.user, "Discarding stale reload result");
            return;
        }

        self.loading = false;
        match result {
            Ok(items) => {
                self.items = items;
            }
            Err(err) => {
                err.log();
                self.error = Some(Self::remote_text(&err, messages::LIST_FAILED));
            }
        }
    }

    /// Fetch the current user's items and replace the list
    pub async fn reload(&mut self) {
        let Some(ticket) = self.begin_reload() else {
            return;
        };

        let repo = Arc::clone(&self.repo);
        let limit = self.config.list_limit;
        let result = repo.list_for_user(&ticket.user, limit).await;
        self.finish_reload(ticket, result);
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Create an item from the draft title input
    ///
    /// Silently does nothing without a session or with a blank draft,
    /// matching the disabled submit control.
    pub async fn create(&mut self) {
        let Some(user) = self.user.clone() else {
            return;
        };
        let Ok(title) = Title::new(&self.draft_title) else {
            return;
        };

        self.creating = true;
        self.error = None;

        let repo = Arc::clone(&self.repo);
        let result = repo.create(&user, &title).await;
        self.creating = false;

        match result {
            Ok(item) => {
                tracing::info!(todo = %item.id, "Todo created");
                self.items.insert(0, item);
                self.draft_title.clear();
            }
            Err(err) => {
                err.log();
                self.error = Some(Self::remote_text(&err, messages::CREATE_FAILED));
            }
        }
    }

    /// Select an item for editing, seeding the editable title copy
    pub fn begin_edit(&mut self, id: &TodoId) {
        let Some(item) = self.items.iter().find(|item| item.id == *id) else {
            return;
        };
        self.editing = Some(EditState {
            id: item.id.clone(),
            title: item.title.as_str().to_string(),
        });
        self.error = None;
    }

    /// Drop the edit selection without saving
    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Replace the editable title copy
    pub fn set_editing_title(&mut self, title: impl Into<String>) {
        if let Some(edit) = &mut self.editing {
            edit.title = title.into();
        }
    }

    /// Persist the edited title
    ///
    /// Silently does nothing without a selection or with a blank title;
    /// on failure the item stays in edit mode for another attempt.
    pub async fn save_edit(&mut self) {
        let Some(edit) = self.editing.clone() else {
            return;
        };
        let Ok(title) = Title::new(&edit.title) else {
            return;
        };

        self.pending = Some(edit.id.clone());
        self.error = None;

        let repo = Arc::clone(&self.repo);
        let result = repo.rename(&edit.id, &title).await;
        self.pending = None;

        match result {
            Ok(updated) => {
                tracing::info!(todo = %updated.id, "Todo renamed");
                if let Some(slot) = self.items.iter_mut().find(|item| item.id == updated.id) {
                    *slot = updated;
                }
                self.editing = None;
            }
            Err(err) => {
                err.log();
                self.error = Some(Self::remote_text(&err, messages::UPDATE_FAILED));
            }
        }
    }

    /// Delete an item by identifier
    pub async fn delete(&mut self, id: &TodoId) {
        self.pending = Some(id.clone());
        self.error = None;

        let repo = Arc::clone(&self.repo);
        let result = repo.delete(id).await;
        self.pending = None;

        match result {
            Ok(()) => {
                tracing::info!(todo = %id, "Todo deleted");
                self.items.retain(|item| item.id != *id);
                if self.editing.as_ref().is_some_and(|e| e.id == *id) {
                    self.editing = None;
                }
            }
            Err(err) => {
                err.log();
                self.error = Some(Self::remote_text(&err, messages::DELETE_FAILED));
            }
        }
    }

    /// The server's own message when it sent one, otherwise the
    /// operation-specific fallback.
    fn remote_text(err: &TodoError, fallback: &str) -> String {
        match err {
            TodoError::Api(api) => api
                .server_message()
                .map(str::to_string)
                .unwrap_or_else(|| fallback.to_string()),
            _ => fallback.to_string(),
        }
    }
}
