//! Basic-auth gate
//!
//! Parses the `Authorization` header into a `(username, password)` pair and
//! checks it against the `Users` table. Header-shape failures are kept
//! distinct from a credential mismatch because the endpoints map them to
//! different status codes: the GPS collector answers 400 for a malformed
//! header, the view counter answers 401 for everything.
//!
//! The gate is stateless and read-only; it must run before any mutating or
//! aggregating operation.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use thiserror::Error;

use crate::db::Database;

#[derive(Error, Debug)]
pub enum AuthError {
    /// Header absent, missing the `Basic ` prefix, not valid base64, or not
    /// exactly `username:password`. Decided without touching the store.
    #[error("malformed authorization header")]
    Malformed,

    /// Well-formed pair that did not match exactly one credential row.
    #[error("credentials did not match")]
    BadCredentials,

    #[error("credential lookup failed")]
    Store(#[from] sqlx::Error),
}

/// Extract the credential pair from a raw `Authorization` header value.
///
/// A password containing `:` is rejected rather than split on the first
/// separator, matching the observed services.
pub fn parse_basic(header: Option<&str>) -> Result<(String, String), AuthError> {
    let header = header.filter(|h| !h.is_empty()).ok_or(AuthError::Malformed)?;

    let encoded = header.strip_prefix("Basic ").ok_or(AuthError::Malformed)?;

    let decoded = STANDARD.decode(encoded).map_err(|_| AuthError::Malformed)?;
    let decoded = String::from_utf8(decoded).map_err(|_| AuthError::Malformed)?;

    let mut parts = decoded.split(':');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(username), Some(password), None) => {
            Ok((username.to_string(), password.to_string()))
        }
        _ => Err(AuthError::Malformed),
    }
}

/// Run the full gate: parse the header, look the pair up, and authorize
/// only when exactly one row matches. Returns the authenticated username.
pub async fn authorize(db: &Database, header: Option<&str>) -> Result<String, AuthError> {
    let (username, password) = parse_basic(header)?;

    let count = db.credential_count(&username, &password).await?;
    if count != 1 {
        return Err(AuthError::BadCredentials);
    }

    Ok(username)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn basic(pair: &str) -> String {
        format!("Basic {}", STANDARD.encode(pair))
    }

    #[test]
    fn parses_a_valid_pair() {
        let header = basic("blog:asdfghjk");
        let (user, pass) = parse_basic(Some(&header)).unwrap();
        assert_eq!(user, "blog");
        assert_eq!(pass, "asdfghjk");
    }

    #[test]
    fn rejects_missing_and_empty_headers() {
        assert!(matches!(parse_basic(None), Err(AuthError::Malformed)));
        assert!(matches!(parse_basic(Some("")), Err(AuthError::Malformed)));
    }

    #[test]
    fn rejects_non_basic_schemes() {
        assert!(matches!(
            parse_basic(Some("Bearer abcdef")),
            Err(AuthError::Malformed)
        ));
        // prefix match is case-sensitive and includes the space
        assert!(matches!(
            parse_basic(Some("BasicYmxvZzphc2RmZ2hqaw==")),
            Err(AuthError::Malformed)
        ));
    }

    #[test]
    fn rejects_invalid_base64() {
        assert!(matches!(
            parse_basic(Some("Basic not-base64!!!")),
            Err(AuthError::Malformed)
        ));
    }

    #[test]
    fn rejects_wrong_separator_counts() {
        // no colon at all
        let header = basic("blogasdfghjk");
        assert!(matches!(parse_basic(Some(&header)), Err(AuthError::Malformed)));

        // password containing a colon is out of scope
        let header = basic("blog:asdf:ghjk");
        assert!(matches!(parse_basic(Some(&header)), Err(AuthError::Malformed)));
    }

    #[test]
    fn empty_halves_still_parse() {
        // "user:" and ":pass" are well-formed pairs; the store decides
        let header = basic("blog:");
        let (user, pass) = parse_basic(Some(&header)).unwrap();
        assert_eq!(user, "blog");
        assert_eq!(pass, "");
    }
}
