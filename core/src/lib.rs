//! Client-side core for a tabbed todo list backed by a remote API.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern), and keeps the list's view
//! state in `TodoListViewModel`.
//!
//! # Design
//! - `TodoClient` is stateless, it holds only `base_url`.
//! - Each remote operation is split into `build_*` and `parse_*`, so the I/O
//!   boundary is explicit.
//! - `TodoListViewModel` applies toggles and deletes optimistically, hands
//!   the host a `PendingMutation`, and reconciles when the host calls
//!   `resolve`.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod types;
pub mod view_model;

pub use client::TodoClient;
pub use config::ViewModelConfig;
pub use error::{ApiError, ErrorKind};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{Tab, Todo, TodoId, TodoQuery, TodoStatus, UpdateTodoStatus};
pub use view_model::{MutationKind, PendingMutation, TodoListViewModel};
