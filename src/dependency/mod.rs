//! Resolution of "run-before" dependencies between requests.
//!
//! A request block can ask for other named requests to be sent first:
//!
//! ```http
//! # @name login
//! POST https://api.example.com/login
//!
//! ###
//!
//! # @name getProfile
//! # @before login
//! GET https://api.example.com/me
//! Authorization: Bearer {{login.response.body.$.token}}
//! ```
//!
//! [`referenced_names`] finds the names, [`locate`] finds the block bound to a
//! name and [`build_dependency_order`] walks the whole graph.

pub mod graph;
pub mod locator;
pub mod scanner;

pub use graph::build_dependency_order;
pub use locator::{definition_ranges, is_definition_of, locate};
pub use scanner::referenced_names;
