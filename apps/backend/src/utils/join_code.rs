//! Join code alphabet, generation and format validation.
//!
//! Codes are short strings participants type by hand. The alphabet leaves out
//! the visually confusable `0`, `O`, `1`, `I` and `L`.

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Symbols a join code may contain.
pub const CODE_ALPHABET: &[u8] = b"ABCDEFGHJKMNPQRSTUVWXYZ23456789";

/// Length of codes issued when nothing else is configured.
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Upper bound on configurable code length; matches the `join_code` column width.
pub const MAX_CODE_LENGTH: usize = 16;

/// A join code that passed format validation.
///
/// Deserialization accepts any length up to [`MAX_CODE_LENGTH`]; callers that
/// need the configured length still go through [`JoinCode::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct JoinCode(String);

#[derive(Debug, Error, PartialEq, Eq)]
#[error("not a join code: expected 1 to 16 symbols from the join code alphabet")]
pub struct MalformedJoinCode;

impl JoinCode {
    /// Accepts `candidate` only if it is a well-formed code of `length` symbols.
    pub fn parse(candidate: &str, length: usize) -> Option<Self> {
        is_valid_format_len(candidate, length).then(|| Self(candidate.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    /// Code with all but the first two symbols masked, for logs.
    pub fn masked(&self) -> String {
        mask(&self.0)
    }
}

impl TryFrom<String> for JoinCode {
    type Error = MalformedJoinCode;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        if raw.len() <= MAX_CODE_LENGTH && is_valid_format_len(&raw, raw.len()) {
            Ok(Self(raw))
        } else {
            Err(MalformedJoinCode)
        }
    }
}

impl From<JoinCode> for String {
    fn from(code: JoinCode) -> Self {
        code.0
    }
}

impl fmt::Display for JoinCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for JoinCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Draw a code of `length` symbols from `rng`, each symbol independent and uniform.
pub fn generate_join_code_with<R: Rng + ?Sized>(rng: &mut R, length: usize) -> JoinCode {
    let code = (0..length)
        .map(|_| CODE_ALPHABET[rng.random_range(0..CODE_ALPHABET.len())] as char)
        .collect();
    JoinCode(code)
}

/// Draw a code of `length` symbols from a freshly OS-seeded `StdRng`.
///
/// ```
/// use joli_backend::utils::join_code::{generate_join_code, is_valid_format};
///
/// let code = generate_join_code(6);
/// assert!(is_valid_format(code.as_str()));
/// ```
pub fn generate_join_code(length: usize) -> JoinCode {
    let mut rng = StdRng::from_os_rng();
    generate_join_code_with(&mut rng, length)
}

/// True iff `candidate` is exactly [`DEFAULT_CODE_LENGTH`] alphabet symbols.
pub fn is_valid_format(candidate: &str) -> bool {
    is_valid_format_len(candidate, DEFAULT_CODE_LENGTH)
}

/// True iff `candidate` is exactly `length` alphabet symbols. Case sensitive.
pub fn is_valid_format_len(candidate: &str, length: usize) -> bool {
    // Alphabet is ASCII, so byte length equals symbol count for any valid input.
    candidate.len() == length
        && length > 0
        && candidate.bytes().all(|b| CODE_ALPHABET.contains(&b))
}

/// Participant input with surrounding whitespace removed and ASCII letters uppercased.
pub fn normalize_candidate(raw: &str) -> String {
    raw.trim().to_ascii_uppercase()
}

/// Mask a code-like string for logging: keep two leading chars.
pub fn mask(code: &str) -> String {
    let head: String = code.chars().take(2).collect();
    format!("{head}****")
}
