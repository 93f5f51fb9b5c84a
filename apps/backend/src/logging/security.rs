use tracing::warn;

use crate::utils::join_code::mask;
use crate::web::trace_ctx;

/// A bearer token was missing or rejected.
pub fn auth_rejected(reason: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_AUTH_REJECTED",
        %trace_id,
        reason,
        "Bearer authentication failed"
    );
}

/// A participant join attempt did not resolve. Repeated hits from one client
/// suggest code guessing.
pub fn join_miss(reason: &str, candidate: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_JOIN_MISS",
        %trace_id,
        reason,
        candidate = %mask(candidate),
        "Join code did not resolve"
    );
}
