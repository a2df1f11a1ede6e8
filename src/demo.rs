//! Demo application served by the binary.
//!
//! One route per outcome, plus routes that fail on purpose.

use anyhow::{anyhow, Context};
use outcome_layer::{
    gateway::text_body, Body, CacheHeaders, Environ, HandlerResult, Headers, Outcome, StartResponse,
};

const RESOURCE_ETAG: &str = "\"demo-v1\"";

pub fn app(environ: &mut Environ, start: &mut dyn StartResponse) -> HandlerResult<Body> {
    match environ.path.as_str() {
        "/" => ok(start, "outcome-layer demo"),
        "/redirect" => Err(Outcome::found("/").into()),
        "/moved" => Err(Outcome::see_other("/resource").into()),
        "/login" => Err(Outcome::unauthorized("Basic realm=\"demo\"").into()),
        "/forbidden" => Err(Outcome::forbidden("demo content is read-only").into()),
        "/resource" => resource(environ, start),
        "/conflict" => Err(Outcome::conflict(["revision", "is", "stale"]).into()),
        "/precondition" => Err(Outcome::precondition_failed("If-Match did not match").into()),
        "/upload" => upload(environ, start),
        "/negotiate" => negotiate(environ, start),
        "/bad" => Err(Outcome::bad_request(()).into()),
        "/fail" => fail(),
        "/panic" => panic!("demo panic requested"),
        other => Err(Outcome::not_found(format!("no route for {other}")).into()),
    }
}

fn ok(start: &mut dyn StartResponse, text: &str) -> HandlerResult<Body> {
    let headers: Headers = vec![("Content-Type".into(), "text/plain; charset=UTF-8".into())];
    start.start("200 OK", headers, None);
    Ok(text_body(text))
}

fn resource(environ: &mut Environ, start: &mut dyn StartResponse) -> HandlerResult<Body> {
    let cache = CacheHeaders::from_etag(RESOURCE_ETAG).cache_control("max-age=60");
    if environ.header("If-None-Match") == Some(RESOURCE_ETAG) {
        return Err(Outcome::not_modified(cache).into());
    }

    let mut headers = cache.to_headers();
    headers.push(("Content-Type".into(), "text/plain; charset=UTF-8".into()));
    start.start("200 OK", headers, None);
    Ok(text_body("cached resource"))
}

fn upload(environ: &mut Environ, start: &mut dyn StartResponse) -> HandlerResult<Body> {
    let content_type = environ.header("Content-Type").unwrap_or_default();
    if !content_type.starts_with("text/plain") {
        let outcome = Outcome::unsupported_media_type(format!("cannot store {content_type:?}"));
        return Err(outcome.into());
    }
    let text = std::str::from_utf8(&environ.body).context("upload is not UTF-8")?;
    ok(start, &format!("stored {} bytes", text.len()))
}

fn negotiate(environ: &mut Environ, start: &mut dyn StartResponse) -> HandlerResult<Body> {
    let accept = environ.header("Accept").unwrap_or("*/*");
    let acceptable = accept
        .split(',')
        .map(|part| part.split(';').next().unwrap_or("").trim())
        .any(|media| matches!(media, "*/*" | "text/*" | "text/plain"));
    if !acceptable {
        return Err(Outcome::not_acceptable("only text/plain is available").into());
    }
    ok(start, "plain text")
}

fn fail() -> HandlerResult<Body> {
    Err(anyhow!("demo failure requested").into())
}
