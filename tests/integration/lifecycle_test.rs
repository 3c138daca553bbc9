//! Cancellation, rerun, caching and confirmation through the controller.

use super::{block, document, request_line, ScriptedTransport, TestBed};
use rest_runner::models::RequestRange;
use rest_runner::prompt::Confirmation;
use rest_runner::{RequestState, TextSource};

#[tokio::test]
async fn test_cancel_in_flight_leaves_no_trace() {
    let bed = TestBed::with(ScriptedTransport::gated(), Confirmation::Yes);
    let doc = document(&[block("slow", None)]);
    let (started, release) = bed.transport.gate.as_ref().unwrap();

    tokio::join!(
        bed.controller.run(doc.clone(), RequestRange::line(1)),
        async {
            started.notified().await;
            bed.controller.cancel().await;
            release.notify_one();
        }
    );

    assert_eq!(
        bed.status.states(),
        vec![RequestState::Pending, RequestState::Sent, RequestState::Cancelled]
    );
    assert!(bed.cache.is_empty());
    assert_eq!(bed.history_len(), 0);
    assert!(bed.panel_view.panels().is_empty());
    assert!(!bed.controller.has_pending_request());
    assert!(bed.errors().is_empty());
}

#[tokio::test]
async fn test_overlapping_requests_keep_newest_pending() {
    let bed = TestBed::new();
    let doc = document(&[block("one", None), block("two", None)]);
    let one = request_line(&doc.full_text(), "one");
    let two = request_line(&doc.full_text(), "two");
    let release_one = bed.transport.hold("/one");
    let release_two = bed.transport.hold("/two");

    tokio::join!(
        bed.controller.run(doc.clone(), RequestRange::line(one)),
        bed.controller.run(doc.clone(), RequestRange::line(two)),
        async {
            while bed.transport.sent_paths().len() < 2 {
                tokio::task::yield_now().await;
            }
            release_one.notify_one();
            while !bed.cache.contains(&doc.identity(), "one") {
                tokio::task::yield_now().await;
            }

            // the first completion must not clear the newer pending request
            assert!(bed.controller.has_pending_request());
            let last = bed.controller.last_request().map(|r| r.url);
            assert_eq!(last.as_deref(), Some("https://api.test/two"));

            bed.controller.cancel().await;
            release_two.notify_one();
        }
    );

    assert_eq!(bed.transport.sent_paths(), vec!["/one", "/two"]);
    assert!(bed.cache.contains(&doc.identity(), "one"));
    assert!(!bed.cache.contains(&doc.identity(), "two"));
    assert_eq!(bed.history_len(), 1);
    assert!(!bed.controller.has_pending_request());
    assert_eq!(bed.status.states().last(), Some(&RequestState::Cancelled));
}

#[tokio::test]
async fn test_rerun_without_history_is_noop() {
    let bed = TestBed::new();

    bed.controller.rerun().await;

    assert!(bed.transport.sent_paths().is_empty());
    assert!(bed.status.states().is_empty());
    assert!(bed.controller.last_request().is_none());
}

#[tokio::test]
async fn test_rerun_skips_dependencies() {
    let doc = document(&[block("token", None), block("use", Some("token"))]);
    let target = request_line(&doc.full_text(), "use");
    let bed = TestBed::new();
    bed.controller.run(doc, RequestRange::line(target)).await;

    bed.controller.rerun().await;

    assert_eq!(bed.transport.sent_paths(), vec!["/token", "/use", "/use"]);
    assert_eq!(bed.history_len(), 3);
}

#[tokio::test]
async fn test_cache_keeps_latest_response() {
    let doc = document(&[block("counter", None)]);
    let bed = TestBed::new();

    bed.controller.run(doc.clone(), RequestRange::line(1)).await;
    bed.controller.run(doc.clone(), RequestRange::line(1)).await;

    let cached = bed.cache.get(&doc.identity(), "counter").unwrap();
    assert!(cached.body_as_string().unwrap().contains("\"seq\":2"));
    assert_eq!(bed.cache.len(), 1);
}

#[tokio::test]
async fn test_declined_target_is_not_sent() {
    let bed = TestBed::with(ScriptedTransport::default(), Confirmation::No);
    let doc = document(&["# @name wipe\n# @note\nDELETE https://api.test/all\n".to_string()]);

    bed.controller.run(doc, RequestRange::line(2)).await;

    assert!(bed.transport.sent_paths().is_empty());
    assert_eq!(
        *bed.prompt.questions.lock().unwrap(),
        vec!["Are you sure you want to send the request \"wipe\"?".to_string()]
    );
    assert!(bed.errors().is_empty());
}

#[tokio::test]
async fn test_declined_dependency_does_not_stop_target() {
    let doc = document(&[
        "# @name reset\n# @note\nPOST https://api.test/reset\n".to_string(),
        block("check", Some("reset")),
    ]);
    let target = request_line(&doc.full_text(), "check");
    let bed = TestBed::with(ScriptedTransport::default(), Confirmation::Dismissed);

    bed.controller.run(doc, RequestRange::line(target)).await;

    assert_eq!(bed.transport.sent_paths(), vec!["/check"]);
}

#[tokio::test]
async fn test_closing_previews_reports_closed() {
    let bed = TestBed::new();
    let doc = document(&[block("one", None)]);
    bed.controller.run(doc, RequestRange::line(1)).await;
    assert_eq!(bed.panel_view.panels().len(), 1);

    bed.panel_view.close_all();

    assert_eq!(bed.status.states().last(), Some(&RequestState::Closed));
}
