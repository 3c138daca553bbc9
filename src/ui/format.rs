//! Plain-text rendering of responses.

use crate::models::HttpResponse;
use crate::variables::ContentType;
use std::time::Duration;

/// Bodies beyond this many bytes are cut for display (1MB).
const MAX_DISPLAY_SIZE: usize = 1024 * 1024;

/// Formats a response as an HTTP message.
///
/// The status line and headers (sorted by name) come first, then a summary
/// line and the body. JSON bodies are pretty-printed; binary bodies are
/// summarised by size.
///
/// # Examples
///
/// ```
/// use rest_runner::models::HttpResponse;
/// use rest_runner::ui::format_response;
///
/// let response = HttpResponse::new(204, "No Content".to_string());
/// assert!(format_response(&response).starts_with("HTTP/1.1 204 No Content\n"));
/// ```
pub fn format_response(response: &HttpResponse) -> String {
    let mut output = format!("HTTP/1.1 {} {}\n", response.status_code, response.status_text);

    let mut headers: Vec<(&String, &String)> = response.headers.iter().collect();
    headers.sort_by(|a, b| a.0.to_lowercase().cmp(&b.0.to_lowercase()));
    for (name, value) in headers {
        output.push_str(&format!("{}: {}\n", name, value));
    }

    output.push_str(&format!(
        "\n# Duration: {} | Size: {}\n",
        format_duration(response.duration),
        format_size(response.size)
    ));

    if response.body.is_empty() {
        return output;
    }

    let is_truncated = response.body.len() > MAX_DISPLAY_SIZE;
    let body = &response.body[..response.body.len().min(MAX_DISPLAY_SIZE)];

    output.push('\n');
    output.push_str(&format_body(body, ContentType::from_response(response)));
    if is_truncated {
        output.push_str("\n\n# Response truncated (exceeds 1MB)");
    }
    output.push('\n');
    output
}

fn format_body(body: &[u8], content_type: Option<ContentType>) -> String {
    let Ok(text) = std::str::from_utf8(body) else {
        return format!("<{} bytes of binary data>", body.len());
    };

    match content_type {
        Some(ContentType::Binary) => format!("<{} bytes of binary data>", body.len()),
        Some(ContentType::Json) | None => serde_json::from_str::<serde_json::Value>(text)
            .ok()
            .and_then(|value| serde_json::to_string_pretty(&value).ok())
            .unwrap_or_else(|| text.to_string()),
        Some(_) => text.to_string(),
    }
}

/// "567ms" below one second, "1.234s" above.
pub fn format_duration(duration: Duration) -> String {
    let millis = duration.as_millis();
    if millis < 1000 {
        format!("{}ms", millis)
    } else {
        format!("{:.3}s", duration.as_secs_f64())
    }
}

/// "456 B", "1.23 KB" or "4.00 MB".
pub fn format_size(size: usize) -> String {
    if size < 1024 {
        format!("{} B", size)
    } else if size < 1024 * 1024 {
        format!("{:.2} KB", size as f64 / 1024.0)
    } else {
        format!("{:.2} MB", size as f64 / (1024.0 * 1024.0))
    }
}
