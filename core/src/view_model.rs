//! Client-side state for the tabbed todo list.
//!
//! # Design
//! `TodoListViewModel` owns the snapshot, the active tab and the set of
//! in-flight mutations. It never touches the network: user actions return a
//! `PendingMutation` carrying the `HttpRequest` to run, and the host reports
//! the outcome later through `resolve`. All transitions happen on the
//! caller's single event thread, so the state is a plain owned struct.
//!
//! Toggles and deletes are applied to the view immediately and rolled back
//! if the server rejects them. A todo with a delete in flight stays in the
//! underlying list but is hidden from every view, so a failed delete brings
//! it back exactly where it was. At most one mutation per todo id is in
//! flight; repeated triggers for that id are ignored until it resolves.

use std::collections::{BTreeMap, HashSet};

use crate::client::TodoClient;
use crate::config::ViewModelConfig;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::types::{Tab, Todo, TodoId, TodoStatus};

/// What a pending mutation will do on the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    UpdateStatus { to: TodoStatus },
    Delete,
}

/// A mutation the host must execute, then report back via
/// [`TodoListViewModel::resolve`] with the same `todo_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingMutation {
    pub todo_id: TodoId,
    pub kind: MutationKind,
    pub request: HttpRequest,
}

#[derive(Debug, Clone, Copy)]
enum InFlight {
    Toggle { previous: TodoStatus, target: TodoStatus },
    Delete,
}

#[derive(Debug)]
pub struct TodoListViewModel {
    client: TodoClient,
    config: ViewModelConfig,
    /// Fetch order, including todos hidden by an in-flight delete.
    todos: Vec<Todo>,
    last_fetch: Option<Vec<Todo>>,
    tab: Tab,
    in_flight: BTreeMap<TodoId, InFlight>,
    stale: bool,
}

impl TodoListViewModel {
    pub fn new(config: ViewModelConfig) -> Self {
        Self {
            client: TodoClient::new(&config.base_url),
            config,
            todos: Vec::new(),
            last_fetch: None,
            tab: Tab::default(),
            in_flight: BTreeMap::new(),
            stale: false,
        }
    }

    /// The todos currently shown under `Tab::All`.
    pub fn snapshot(&self) -> Vec<Todo> {
        self.todos_in(Tab::All).cloned().collect()
    }

    pub fn active_tab(&self) -> Tab {
        self.tab
    }

    pub fn is_in_flight(&self, id: TodoId) -> bool {
        self.in_flight.contains_key(&id)
    }

    /// True after a confirmed toggle when `refetch_after_toggle` is set,
    /// until the next fetch result arrives.
    pub fn needs_refresh(&self) -> bool {
        self.stale
    }

    /// Request for the remote fetch, filtered by the configured statuses.
    pub fn fetch_request(&self) -> HttpRequest {
        self.client.build_fetch_all_todos(&self.config.fetch_query())
    }

    /// Parse a fetch response and load it. On error the snapshot is untouched.
    pub fn apply_fetch(&mut self, response: HttpResponse) -> Result<(), ApiError> {
        let todos = self.client.parse_fetch_all_todos(response)?;
        self.load(todos);
        Ok(())
    }

    /// Replace the snapshot wholesale with a fetch result.
    ///
    /// Duplicate ids keep their first occurrence. Mutations still in flight
    /// are laid back over the fresh set so the user's pending intent stays
    /// visible until the server answers.
    pub fn load(&mut self, todos: Vec<Todo>) {
        let mut seen = HashSet::with_capacity(todos.len());
        let mut fresh = Vec::with_capacity(todos.len());
        for todo in todos {
            if seen.insert(todo.id) {
                fresh.push(todo);
            } else {
                tracing::warn!(todo_id = %todo.id, "dropping duplicate todo from fetch result");
            }
        }

        self.last_fetch = Some(fresh.clone());
        self.stale = false;
        self.replace_todos(fresh);
    }

    fn replace_todos(&mut self, fresh: Vec<Todo>) {
        tracing::debug!(count = fresh.len(), "loading todo snapshot");
        self.todos = fresh;
        for (id, mutation) in self.in_flight.iter_mut() {
            if let InFlight::Toggle { previous, target } = mutation {
                if let Some(todo) = self.todos.iter_mut().find(|t| t.id == *id) {
                    *previous = todo.status;
                    todo.status = *target;
                }
            }
        }
    }

    /// Flip a todo's status locally and return the update request.
    ///
    /// Returns `Ok(None)` when the id is not in the snapshot or already has a
    /// mutation in flight.
    pub fn toggle_status(&mut self, id: TodoId) -> Result<Option<PendingMutation>, ApiError> {
        if self.in_flight.contains_key(&id) {
            tracing::debug!(todo_id = %id, "ignoring toggle, mutation already in flight");
            return Ok(None);
        }
        let Some(index) = self.position(id) else {
            tracing::debug!(todo_id = %id, "ignoring toggle of unknown todo");
            return Ok(None);
        };

        let previous = self.todos[index].status;
        let target = previous.toggled();
        let request = self.client.build_update_todo_status(id, target)?;

        self.todos[index].status = target;
        self.in_flight.insert(id, InFlight::Toggle { previous, target });
        Ok(Some(PendingMutation {
            todo_id: id,
            kind: MutationKind::UpdateStatus { to: target },
            request,
        }))
    }

    /// Hide a todo from every view and return the delete request.
    pub fn delete_todo(&mut self, id: TodoId) -> Option<PendingMutation> {
        if self.in_flight.contains_key(&id) {
            tracing::debug!(todo_id = %id, "ignoring delete, mutation already in flight");
            return None;
        }
        if self.position(id).is_none() {
            tracing::debug!(todo_id = %id, "ignoring delete of unknown todo");
            return None;
        }

        self.in_flight.insert(id, InFlight::Delete);
        Some(PendingMutation {
            todo_id: id,
            kind: MutationKind::Delete,
            request: self.client.build_delete_todo(id),
        })
    }

    /// Completion event for the mutation in flight on `id`.
    ///
    /// `outcome` is the server response, or `Err` when the host transport
    /// failed. Failures roll the optimistic change back and are returned.
    pub fn resolve(
        &mut self,
        id: TodoId,
        outcome: Result<HttpResponse, ApiError>,
    ) -> Result<(), ApiError> {
        let Some(mutation) = self.in_flight.remove(&id) else {
            tracing::warn!(todo_id = %id, "resolution for todo with no mutation in flight");
            return Ok(());
        };

        match mutation {
            InFlight::Toggle { previous, target } => {
                let confirmed = outcome
                    .and_then(|response| self.client.parse_update_todo_status(response))
                    .and_then(|todo| {
                        if todo.id == id {
                            Ok(todo)
                        } else {
                            Err(ApiError::DeserializationError(format!(
                                "status update for todo {id} answered with todo {}",
                                todo.id
                            )))
                        }
                    });
                match confirmed {
                    Ok(confirmed) => {
                        if confirmed.status != target {
                            tracing::debug!(todo_id = %id, status = %confirmed.status, "server settled on a different status");
                        }
                        let last_fetch = self.last_fetch.iter_mut().flatten();
                        for todo in self.todos.iter_mut().chain(last_fetch) {
                            if todo.id == id {
                                todo.clone_from(&confirmed);
                            }
                        }
                        if self.config.refetch_after_toggle {
                            self.stale = true;
                        }
                        Ok(())
                    }
                    Err(ApiError::NotFound) => {
                        tracing::warn!(todo_id = %id, "todo vanished server-side, dropping it");
                        self.forget(id);
                        Err(ApiError::NotFound)
                    }
                    Err(e) => {
                        tracing::warn!(todo_id = %id, error = %e, "status update failed, rolling back");
                        if let Some(index) = self.position(id) {
                            self.todos[index].status = previous;
                        }
                        Err(e)
                    }
                }
            }
            InFlight::Delete => {
                match outcome.and_then(|response| self.client.parse_delete_todo(response)) {
                    Ok(()) => {
                        self.forget(id);
                        Ok(())
                    }
                    Err(e) => {
                        // Leaving the in-flight map is enough to unhide it.
                        tracing::warn!(todo_id = %id, error = %e, "delete failed, restoring todo");
                        Err(e)
                    }
                }
            }
        }
    }

    /// Set the active tab. Reloads the last fetch result when configured.
    pub fn select_tab(&mut self, tab: Tab) {
        self.tab = tab;
        if self.config.reload_on_tab_change {
            if let Some(last) = self.last_fetch.clone() {
                self.replace_todos(last);
            }
        }
    }

    /// The snapshot filtered by the active tab, in fetch order.
    pub fn visible_todos(&self) -> Vec<Todo> {
        self.todos_in(self.tab).cloned().collect()
    }

    /// Number of todos `tab` would show.
    pub fn count(&self, tab: Tab) -> usize {
        self.todos_in(tab).count()
    }

    fn todos_in(&self, tab: Tab) -> impl Iterator<Item = &Todo> {
        self.todos
            .iter()
            .filter(move |t| !self.is_deleting(t.id) && tab.matches(t))
    }

    fn is_deleting(&self, id: TodoId) -> bool {
        matches!(self.in_flight.get(&id), Some(InFlight::Delete))
    }

    /// Position of a visible todo.
    fn position(&self, id: TodoId) -> Option<usize> {
        self.todos
            .iter()
            .position(|t| t.id == id)
            .filter(|_| !self.is_deleting(id))
    }

    /// Drop a todo the server no longer holds, from the cached fetch too.
    fn forget(&mut self, id: TodoId) {
        self.todos.retain(|t| t.id != id);
        if let Some(last) = self.last_fetch.as_mut() {
            last.retain(|t| t.id != id);
        }
    }
}

impl Default for TodoListViewModel {
    fn default() -> Self {
        Self::new(ViewModelConfig::default())
    }
}
