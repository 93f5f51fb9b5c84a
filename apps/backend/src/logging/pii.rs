use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Regexes used by [`redact`]. Each is a vetted literal.
struct Patterns {
    email: Regex,
    token: Regex,
    join_code_value: Regex,
}

#[allow(clippy::unwrap_used)]
static PATTERNS: LazyLock<Patterns> = LazyLock::new(|| {
    Patterns {
        email: Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{1,}\b").unwrap(),
        // JWTs, secrets, long hex ids
        token: Regex::new(r"\b[A-Za-z0-9+/]{16,}={0,2}").unwrap(),
        // Postgres unique-violation detail: Key (join_code)=(AB23CD) already exists.
        join_code_value: Regex::new(r"\(join_code\)=\([^)]*\)").unwrap(),
    }
});

/// Masks emails, opaque tokens and join code values in free text.
///
/// Emails keep their first character and domain. Join codes surfaced by
/// database error text are replaced entirely.
pub fn redact(input: &str) -> String {
    let p = &*PATTERNS;

    let out = p
        .join_code_value
        .replace_all(input, "(join_code)=([REDACTED_CODE])");

    let out = p.email.replace_all(&out, |caps: &regex::Captures| {
        let m = &caps[0];
        match m.split_once('@') {
            Some((local, domain)) if !local.is_empty() => {
                format!("{}***@{domain}", &local[..1])
            }
            _ => m.to_string(),
        }
    });

    p.token.replace_all(&out, "[REDACTED_TOKEN]").into_owned()
}

/// Display wrapper that redacts its contents.
pub struct Redacted<'a>(pub &'a str);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}
