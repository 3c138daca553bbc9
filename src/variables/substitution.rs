//! Request variable substitution.
//!
//! Replaces `{{name.response.<part>.<path>}}` references in request text with
//! values from the cached response of `name` in the same document.
//! References that can't be resolved are left in place so the request is
//! still sent and the unresolved text is visible to the user.

use super::cache::ResponseVariableCache;
use super::request::{extract_response_value, ResponsePart};
use crate::document::DocumentId;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Cached regex for `{{name.response.(body|headers).path}}`.
static REQUEST_VARIABLE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{\s*(\w+)\.response\.(body|headers)\.([^}]+?)\s*\}\}")
        .expect("Failed to compile request variable regex")
});

/// Substitutes every request variable reference in `text`.
///
/// # Arguments
///
/// * `text` - Request block text
/// * `document` - Document the block belongs to
/// * `cache` - Cached responses of named requests
///
/// # Examples
///
/// ```
/// use rest_runner::document::DocumentId;
/// use rest_runner::models::HttpResponse;
/// use rest_runner::variables::{substitute_request_variables, ResponseVariableCache};
///
/// let cache = ResponseVariableCache::new();
/// let doc = DocumentId::new("file:///api.http");
/// let mut login = HttpResponse::new(200, "OK".to_string());
/// login.set_body(br#"{"token": "abc"}"#.to_vec());
/// cache.add(&doc, "login", login);
///
/// let text = "Authorization: Bearer {{login.response.body.$.token}}";
/// assert_eq!(
///     substitute_request_variables(text, &doc, &cache),
///     "Authorization: Bearer abc"
/// );
/// ```
pub fn substitute_request_variables(
    text: &str,
    document: &DocumentId,
    cache: &ResponseVariableCache,
) -> String {
    if !text.contains("{{") {
        return text.to_string();
    }

    REQUEST_VARIABLE_REGEX
        .replace_all(text, |caps: &Captures| {
            let name = &caps[1];
            let Some(response) = cache.get(document, name) else {
                log::warn!(
                    "No response cached for '{}', leaving {} unresolved",
                    name,
                    &caps[0]
                );
                return caps[0].to_string();
            };

            let part = ResponsePart::parse(&caps[2]).unwrap_or(ResponsePart::Body);
            match extract_response_value(&response, part, &caps[3]) {
                Ok(value) => value,
                Err(e) => {
                    log::warn!("Unable to resolve {}: {}", &caps[0], e);
                    caps[0].to_string()
                }
            }
        })
        .into_owned()
}
