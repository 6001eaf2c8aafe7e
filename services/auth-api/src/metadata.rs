//! Call-scoped metadata: session token and deadline extraction

use std::time::Duration;

use tonic::metadata::MetadataMap;
use warden_core::{AuthError, CallContext};
use warden_proto::SESSION_METADATA_KEY;
use warden_types::SessionId;

const GRPC_TIMEOUT_HEADER: &str = "grpc-timeout";

/// Pull the session token out of request metadata.
///
/// A missing, empty or non-ASCII value is `Unauthenticated`.
pub fn session_token(metadata: &MetadataMap) -> Result<SessionId, AuthError> {
    metadata
        .get(SESSION_METADATA_KEY)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(SessionId::from)
        .ok_or(AuthError::Unauthenticated)
}

/// Build the per-call context, honoring the client deadline up to `max`.
pub fn call_context(metadata: &MetadataMap, max: Duration) -> CallContext {
    let timeout = metadata
        .get(GRPC_TIMEOUT_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(parse_grpc_timeout)
        .map_or(max, |t| t.min(max));
    CallContext::new().with_timeout(timeout)
}

/// Parse a `grpc-timeout` value: up to 8 ASCII digits then a unit in `HMSmun`.
pub fn parse_grpc_timeout(value: &str) -> Option<Duration> {
    let value = value.trim();
    if value.len() < 2 || !value.is_ascii() {
        return None;
    }
    let (digits, unit) = value.split_at(value.len() - 1);
    if digits.len() > 8 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let amount: u64 = digits.parse().ok()?;

    let duration = match unit {
        "H" => Duration::from_secs(amount * 3600),
        "M" => Duration::from_secs(amount * 60),
        "S" => Duration::from_secs(amount),
        "m" => Duration::from_millis(amount),
        "u" => Duration::from_micros(amount),
        "n" => Duration::from_nanos(amount),
        _ => return None,
    };
    Some(duration)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_token_present() {
        let mut md = MetadataMap::new();
        md.insert(SESSION_METADATA_KEY, "abc123".parse().unwrap());
        assert_eq!(session_token(&md).unwrap().as_str(), "abc123");
    }

    #[test]
    fn test_session_token_missing_or_empty() {
        let md = MetadataMap::new();
        assert!(matches!(session_token(&md), Err(AuthError::Unauthenticated)));

        let mut md = MetadataMap::new();
        md.insert(SESSION_METADATA_KEY, "  ".parse().unwrap());
        assert!(matches!(session_token(&md), Err(AuthError::Unauthenticated)));
    }

    #[test]
    fn test_parse_grpc_timeout() {
        assert_eq!(parse_grpc_timeout("1H"), Some(Duration::from_secs(3600)));
        assert_eq!(parse_grpc_timeout("2M"), Some(Duration::from_secs(120)));
        assert_eq!(parse_grpc_timeout("5S"), Some(Duration::from_secs(5)));
        assert_eq!(parse_grpc_timeout("250m"), Some(Duration::from_millis(250)));
        assert_eq!(parse_grpc_timeout("100u"), Some(Duration::from_micros(100)));
        assert_eq!(parse_grpc_timeout("7n"), Some(Duration::from_nanos(7)));
    }

    #[test]
    fn test_parse_grpc_timeout_rejects_garbage() {
        for bad in ["", "S", "10", "10x", "-5S", "123456789S", "1.5S"] {
            assert_eq!(parse_grpc_timeout(bad), None, "{bad}");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_call_context_clamps_deadline() {
        let max = Duration::from_secs(30);

        let mut md = MetadataMap::new();
        md.insert(GRPC_TIMEOUT_HEADER, "5S".parse().unwrap());
        assert_eq!(call_context(&md, max).remaining(), Some(Duration::from_secs(5)));

        let mut md = MetadataMap::new();
        md.insert(GRPC_TIMEOUT_HEADER, "2H".parse().unwrap());
        assert_eq!(call_context(&md, max).remaining(), Some(max));

        let md = MetadataMap::new();
        assert_eq!(call_context(&md, max).remaining(), Some(max));
    }
}
