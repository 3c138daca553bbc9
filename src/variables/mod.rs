//! Request variables.
//!
//! Responses of named requests are kept in a [`ResponseVariableCache`]; later
//! requests in the same document read values out of them with
//! `{{name.response.body.<path>}}` and `{{name.response.headers.<Header>}}`.

pub mod cache;
pub mod request;
pub mod substitution;

pub use cache::ResponseVariableCache;
pub use request::{extract_response_value, ContentType, ResponsePart};
pub use substitution::substitute_request_variables;

use thiserror::Error;

/// Errors raised while resolving a request variable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VariableError {
    /// The referenced value does not exist in the response.
    #[error("Undefined variable: {0}")]
    UndefinedVariable(String),

    /// The reference or the response can't be interpreted.
    #[error("Invalid syntax: {0}")]
    InvalidSyntax(String),
}
