//! Runs HTTP requests written in `.http` documents.
//!
//! Requests are separated by `###` lines. A request can be named with
//! `# @name <name>`, and another request can read its response through
//! `{{<name>.response.body.<path>}}` or `{{<name>.response.headers.<header>}}`.
//! A `# @before <name>` line (or `# @before a.b.c` for several names) makes
//! sure the named requests run first, so their responses are cached when the
//! referencing request is substituted.
//!
//! ```http
//! # @name login
//! POST https://api.example.com/login
//! Content-Type: application/json
//!
//! {"user": "admin"}
//!
//! ###
//! # @name getProfile
//! # @before login
//! GET https://api.example.com/profile
//! Authorization: Bearer {{login.response.body.$.token}}
//! ```
//!
//! # Architecture
//!
//! - **document**: access to request documents and their `###` blocks
//! - **parser**: request selection (`@name`, `@note`) and parsing
//! - **dependency**: `@before` scanning, definition lookup and ordering
//! - **variables**: the response cache and request-variable substitution
//! - **executor**: the transport seam and failure classification
//! - **controller**: runs requests with their dependencies
//! - **ui**: response previews
//! - **history**: persisted request history
//! - **config**: user settings
//!
//! The controller talks to its surroundings only through traits
//! ([`document::TextSource`], [`executor::Transport`],
//! [`ui::PreviewRenderer`], [`history::HistoryStore`],
//! [`prompt::UserPrompt`], [`controller::StatusReporter`]), so an editor
//! integration and the `rest-run` command-line driver share it.

pub mod config;
pub mod controller;
pub mod dependency;
pub mod document;
pub mod executor;
pub mod history;
pub mod models;
pub mod parser;
pub mod prompt;
pub mod ui;
pub mod variables;

pub use controller::{Collaborators, RequestController, RequestState};
pub use document::{DocumentId, TextSource};
pub use models::{HttpMethod, HttpRequest, HttpResponse, RequestRange};
