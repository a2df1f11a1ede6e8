//! Boundary adapter behaviour through the public API.

use bytes::Bytes;
use outcome_layer::adapter::DIAGNOSTIC_MARKER;
use outcome_layer::gateway::text_body;
use outcome_layer::{handler_fn, CacheHeaders, Environ, Outcome};

mod common;

fn signal(outcome: Outcome) -> common::Exchange {
    common::exchange(
        handler_fn(move |_, _| Err(outcome.clone().into())),
        Environ::new(),
    )
}

fn content_type() -> Vec<(String, String)> {
    vec![("Content-Type".to_string(), "text/plain; charset=UTF-8".to_string())]
}

#[test]
fn test_no_errors_passes_through() {
    let ex = common::exchange(
        handler_fn(|_, start| {
            start.start("200 OK", vec![("Content-Type".into(), "text/plain".into())], None);
            Ok(text_body("no errors"))
        }),
        Environ::new(),
    );

    assert_eq!(ex.start.calls.len(), 1);
    assert_eq!(ex.start.status(), "200 OK");
    assert_eq!(ex.start.headers(), &vec![("Content-Type".to_string(), "text/plain".to_string())]);
    assert_eq!(ex.body, vec![Bytes::from("no errors")]);
    assert!(ex.errors.contents().is_empty());
    assert!(ex.sink.records().is_empty());
}

#[test]
fn test_302() {
    let ex = signal(Outcome::found("http://example.org"));
    assert_eq!(ex.start.status(), "302 Found");
    assert_eq!(
        ex.start.headers(),
        &vec![("Location".to_string(), "http://example.org".to_string())]
    );
    assert_eq!(ex.body, vec![Bytes::new()]);
}

#[test]
fn test_303() {
    let ex = signal(Outcome::see_other("http://example.org"));
    assert_eq!(ex.start.status(), "303 See Other");
    assert_eq!(ex.start.header("Location"), Some("http://example.org"));
    assert_eq!(ex.body, vec![Bytes::new()]);
}

#[test]
fn test_304_with_etag_only() {
    let ex = signal(Outcome::not_modified(CacheHeaders::from_etag("123abc")));
    assert_eq!(ex.start.status(), "304 Not Modified");
    assert_eq!(ex.start.headers().len(), 1);
    assert_eq!(ex.start.header("ETag"), Some("123abc"));
    assert_eq!(ex.body, vec![Bytes::new()]);
}

#[test]
fn test_304_with_all_validators() {
    let cache = CacheHeaders::new()
        .etag("\"r42\"")
        .vary("Accept")
        .cache_control("no-cache")
        .last_modified("Wed, 21 Oct 2015 07:28:00 GMT")
        .content_location("/bags/common/tiddlers/r42")
        .expires("Thu, 22 Oct 2015 07:28:00 GMT");
    let ex = signal(Outcome::not_modified(cache));

    let expected: Vec<(String, String)> = [
        ("ETag", "\"r42\""),
        ("Vary", "Accept"),
        ("Cache-Control", "no-cache"),
        ("Last-Modified", "Wed, 21 Oct 2015 07:28:00 GMT"),
        ("Content-Location", "/bags/common/tiddlers/r42"),
        ("Expires", "Thu, 22 Oct 2015 07:28:00 GMT"),
    ]
    .into_iter()
    .map(|(n, v)| (n.to_string(), v.to_string()))
    .collect();

    assert_eq!(ex.start.headers(), &expected);
    assert_eq!(ex.body, vec![Bytes::new()]);
}

#[test]
fn test_401() {
    let ex = signal(Outcome::unauthorized("login"));
    assert_eq!(ex.start.status(), "401 Unauthorized");
    assert_eq!(
        ex.start.headers(),
        &vec![("WWW-Authenticate".to_string(), "login".to_string())]
    );
    assert_eq!(ex.body, vec![Bytes::new()]);
}

#[test]
fn test_text_outcomes() {
    let cases = [
        (Outcome::bad_request("error message"), "400 Bad Request"),
        (Outcome::forbidden("error message"), "403 Forbidden"),
        (Outcome::not_found("error message"), "404 Not Found"),
        (Outcome::not_acceptable("error message"), "406 Not Acceptable"),
        (Outcome::conflict("error message"), "409 Conflict"),
        (Outcome::precondition_failed("error message"), "412 Precondition Failed"),
        (Outcome::unsupported_media_type("error message"), "415 Unsupported Media Type"),
    ];

    for (outcome, status) in cases {
        let ex = signal(outcome);
        assert_eq!(ex.start.status(), status);
        assert_eq!(ex.start.headers(), &content_type(), "{status}");
        assert_eq!(ex.body, vec![Bytes::from(format!("{status}: error message"))]);
        // expected outcomes are not diagnostics
        assert!(ex.sink.records().is_empty());
        assert!(ex.errors.contents().is_empty());
    }
}

#[test]
fn test_resource_unavailable_scenario() {
    let ex = signal(Outcome::not_found("resource unavailable"));
    assert_eq!(ex.start.status(), "404 Not Found");
    assert_eq!(ex.start.headers(), &content_type());
    assert_eq!(ex.body_text(), "404 Not Found: resource unavailable");
}

#[test]
fn test_non_ascii_message_round_trips() {
    let ex = signal(Outcome::conflict(["Überarbeitung", "für", "日本語", "✓"]));
    assert_eq!(ex.body_text(), "409 Conflict: Überarbeitung für 日本語 ✓");
}

#[test]
fn test_unexpected_failure_is_500_on_both_sinks() {
    let ex = common::exchange(
        handler_fn(|_, _| {
            let n: u32 = "seven".parse().map_err(anyhow::Error::from)?;
            Ok(text_body(n.to_string()))
        }),
        Environ::new(),
    );

    assert_eq!(ex.start.calls.len(), 1);
    assert_eq!(ex.start.status(), "500 Internal Server Error");
    assert_eq!(ex.start.headers(), &content_type());

    let text = ex.body_text();
    assert!(text.starts_with(DIAGNOSTIC_MARKER));
    assert!(text.contains("invalid digit found in string"));

    // same text on the host error stream, the logging sink, and the context
    assert!(ex.errors.contents().contains(&text));
    assert_eq!(ex.sink.records(), vec![text.clone()]);
    assert_eq!(ex.start.calls[0].2.as_deref(), Some(text.as_str()));
}

#[test]
fn test_panicking_handler_is_500() {
    let ex = common::exchange(
        handler_fn(|environ, _| {
            let v: Vec<u8> = Vec::new();
            Ok(text_body(format!("{}", v[environ.path.len() + 3])))
        }),
        Environ::new(),
    );

    assert_eq!(ex.start.status(), "500 Internal Server Error");
    assert!(ex.body_text().starts_with("Unhandled failure: panic:"));
    assert_eq!(ex.sink.records().len(), 1);
}

#[test]
fn test_handler_sees_request_unchanged() {
    let ex = common::exchange(
        handler_fn(|environ, start| {
            let who = environ.header("X-User").unwrap_or("nobody").to_string();
            start.start("200 OK", Vec::new(), None);
            Ok(text_body(format!("{} {} {}", environ.method, environ.path, who)))
        }),
        Environ::new()
            .with_method("DELETE")
            .with_path("/recipes/default")
            .with_header("x-user", "fnd"),
    );

    assert_eq!(ex.body_text(), "DELETE /recipes/default fnd");
}
