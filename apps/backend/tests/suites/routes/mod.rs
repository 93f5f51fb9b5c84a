use std::net::SocketAddr;

use actix_web::test::TestRequest;
use serde_json::Value;

pub mod games;
pub mod security_headers;

pub const CLIENT_ADDR: &str = "203.0.113.7:40000";

/// `POST /api/join` from a fixed client address (the limiter keys on it).
pub fn join_request(body: Value) -> TestRequest {
    TestRequest::post()
        .uri("/api/join")
        .peer_addr(CLIENT_ADDR.parse::<SocketAddr>().unwrap())
        .set_json(body)
}
