//! User interaction needed while running requests.

use async_trait::async_trait;

/// Answer to a confirmation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Yes,
    No,
    /// The prompt was closed without an answer.
    Dismissed,
}

impl Confirmation {
    /// Only an explicit `Yes` counts as consent.
    pub fn is_affirmative(self) -> bool {
        self == Confirmation::Yes
    }
}

/// Asks the user questions and shows them errors.
#[async_trait]
pub trait UserPrompt: Send + Sync {
    /// Asks a yes/no question.
    async fn confirm(&self, message: &str) -> Confirmation;

    /// Shows an error message.
    fn show_error(&self, message: &str);
}

/// Confirmation message for a request flagged with `@note`.
pub fn confirmation_message(name: Option<&str>) -> String {
    match name {
        Some(name) => format!("Are you sure you want to send the request \"{}\"?", name),
        None => "Are you sure you want to send this request?".to_string(),
    }
}
