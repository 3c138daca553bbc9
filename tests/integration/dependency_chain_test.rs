//! Running requests together with their `@before` dependencies.

use super::{block, document, request_line, TestBed};
use rest_runner::models::RequestRange;
use rest_runner::TextSource;

const LOGIN_PROFILE: &str = "\
# @name login
POST https://api.test/login
Content-Type: application/json

{\"user\": \"admin\", \"password\": \"secret\"}

###
# @name getProfile
# @before login
GET https://api.test/profile
Authorization: Bearer {{login.response.body.$.token}}
";

#[tokio::test]
async fn test_login_runs_before_profile() {
    let bed = TestBed::new();
    let doc = std::sync::Arc::new(rest_runner::document::InMemoryDocument::new(
        "mem://login.http",
        LOGIN_PROFILE,
    ));

    bed.controller.run(doc.clone(), RequestRange::line(9)).await;

    assert_eq!(bed.transport.sent_paths(), vec!["/login", "/profile"]);
    let sent = bed.transport.sent.lock().unwrap();
    assert_eq!(sent[0].body.as_deref(), Some("{\"user\": \"admin\", \"password\": \"secret\"}"));
    assert_eq!(sent[1].header("Authorization"), Some("Bearer token-1"));

    let login = bed.cache.get(&doc.identity(), "login").unwrap();
    assert!(login.body_as_string().unwrap().contains("\"token\":\"token-1\""));
    assert_eq!(bed.history_len(), 2);
    assert!(bed.errors().is_empty());
}

#[tokio::test]
async fn test_profile_without_login_keeps_reference_verbatim() {
    let bed = TestBed::new();
    let doc = document(&[
        "# @name getProfile\nGET https://api.test/profile\nAuthorization: Bearer {{login.response.body.$.token}}\n"
            .to_string(),
    ]);

    bed.controller.run(doc, RequestRange::line(1)).await;

    let sent = bed.transport.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(
        sent[0].header("Authorization"),
        Some("Bearer {{login.response.body.$.token}}")
    );
}

#[tokio::test]
async fn test_chain_runs_leaves_first() {
    // r0 depends on r1, r1 on r2, ... r4 on r5
    let depth = 5;
    let blocks: Vec<String> = (0..=depth)
        .map(|i| {
            let before = (i < depth).then(|| format!("r{}", i + 1));
            block(&format!("r{}", i), before.as_deref())
        })
        .collect();
    let doc = document(&blocks);
    let target = request_line(&doc.full_text(), "r0");
    let bed = TestBed::new();

    bed.controller.run(doc, RequestRange::line(target)).await;

    assert_eq!(
        bed.transport.sent_paths(),
        vec!["/r5", "/r4", "/r3", "/r2", "/r1", "/r0"]
    );
}

#[tokio::test]
async fn test_dotted_names_are_siblings() {
    let doc = document(&[
        block("A", None),
        block("B", None),
        block("C", None),
        block("target", Some("A.B.C")),
    ]);
    let target = request_line(&doc.full_text(), "target");
    let bed = TestBed::new();

    bed.controller.run(doc, RequestRange::line(target)).await;

    assert_eq!(bed.transport.sent_paths(), vec!["/C", "/B", "/A", "/target"]);
}

#[tokio::test]
async fn test_mutual_dependency_runs_target_only() {
    let doc = document(&[block("A", Some("B")), block("B", Some("A"))]);
    let target = request_line(&doc.full_text(), "A");
    let bed = TestBed::new();

    bed.controller.run(doc.clone(), RequestRange::line(target)).await;

    assert_eq!(bed.transport.sent_paths(), vec!["/A"]);
    assert!(bed.errors().is_empty());
    assert!(bed.cache.contains(&doc.identity(), "A"));
    assert!(!bed.cache.contains(&doc.identity(), "B"));
}

#[tokio::test]
async fn test_unknown_dependency_is_skipped() {
    let doc = document(&[block("target", Some("missing"))]);
    let target = request_line(&doc.full_text(), "target");
    let bed = TestBed::new();

    bed.controller.run(doc, RequestRange::line(target)).await;

    assert_eq!(bed.transport.sent_paths(), vec!["/target"]);
    assert!(bed.errors().is_empty());
}

#[tokio::test]
async fn test_self_reference_is_ignored() {
    let doc = document(&[block("loop", Some("loop"))]);
    let target = request_line(&doc.full_text(), "loop");
    let bed = TestBed::new();

    bed.controller.run(doc, RequestRange::line(target)).await;

    assert_eq!(bed.transport.sent_paths(), vec!["/loop"]);
}
