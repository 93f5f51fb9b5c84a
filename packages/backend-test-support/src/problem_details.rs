//! Assertions for RFC 7807 problem-details error responses.
//!
//! Kept independent of backend types so both unit and integration tests can
//! check the wire contract exactly as a client sees it.

use actix_web::http::header::HeaderMap;
use actix_web::http::StatusCode;
use serde::Deserialize;

/// Prefix of the `type` URI every backend error carries.
pub const PROBLEM_TYPE_PREFIX: &str = "https://joli.party/errors/";

/// Wire shape of a problem-details body.
#[derive(Debug, Deserialize)]
pub struct ProblemDetailsLike {
    #[serde(rename = "type")]
    pub type_: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    pub code: String,
    pub trace_id: String,
}

/// Assert that response parts carry the stable error contract and return
/// the parsed body for further checks.
///
/// Checks: status, `application/problem+json` content type, body/status
/// agreement, `code`, `type` prefix, and `x-trace-id` header parity with
/// the body's `trace_id`.
pub fn assert_problem_details(
    status: StatusCode,
    headers: &HeaderMap,
    body: &[u8],
    expected_status: StatusCode,
    expected_code: &str,
    expected_detail_contains: Option<&str>,
) -> ProblemDetailsLike {
    assert_eq!(status, expected_status, "unexpected HTTP status");

    let content_type = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(
        content_type.starts_with("application/problem+json"),
        "Content-Type must be application/problem+json (got {content_type})"
    );

    let body_str = std::str::from_utf8(body).expect("problem body should be UTF-8");
    let problem: ProblemDetailsLike = serde_json::from_str(body_str)
        .unwrap_or_else(|e| panic!("body is not problem details ({e}): {body_str}"));

    assert_eq!(problem.status, expected_status.as_u16());
    assert_eq!(problem.code, expected_code);
    assert!(
        problem.type_.starts_with(PROBLEM_TYPE_PREFIX),
        "type should start with {PROBLEM_TYPE_PREFIX}, got {}",
        problem.type_
    );
    assert!(!problem.title.is_empty(), "title should not be empty");

    if let Some(fragment) = expected_detail_contains {
        assert!(
            problem.detail.contains(fragment),
            "detail {:?} should contain {:?}",
            problem.detail,
            fragment
        );
    }

    let trace_header = headers
        .get("x-trace-id")
        .and_then(|v| v.to_str().ok())
        .expect("x-trace-id header should be present");
    assert_eq!(
        trace_header, problem.trace_id,
        "x-trace-id header should match body trace_id"
    );

    problem
}
