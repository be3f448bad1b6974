//! Per-conversation session cache with idle expiry

pub mod cache;
pub mod clock;
pub mod store;
pub mod sweeper;

pub use cache::SessionCache;
pub use clock::{Clock, ManualClock, SystemClock};
pub use store::{Lookup, SessionFactory, SessionHandle, SessionStore, DEFAULT_TTL};
pub use sweeper::{ExpirySweeper, SweepTarget, DEFAULT_SWEEP_INTERVAL};

/// Upper bound on accepted session id length, in bytes
pub const MAX_SESSION_ID_LEN: usize = 256;

/// Reject ids that cannot be used as cache keys.
///
/// Ids come straight from clients and are otherwise treated as opaque.
pub fn validate_session_id(id: &str) -> crate::Result<()> {
    if id.trim().is_empty() {
        return Err(crate::Error::Validation(
            "session id must not be empty".to_string(),
        ));
    }
    if id.len() > MAX_SESSION_ID_LEN {
        return Err(crate::Error::Validation(format!(
            "session id exceeds {} bytes",
            MAX_SESSION_ID_LEN
        )));
    }
    if id.chars().any(char::is_control) {
        return Err(crate::Error::Validation(
            "session id contains control characters".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_session_id() {
        assert!(validate_session_id("3f1c9a2e-session").is_ok());
        assert!(validate_session_id("").is_err());
        assert!(validate_session_id("   ").is_err());
        assert!(validate_session_id("line\nbreak").is_err());
        assert!(validate_session_id(&"x".repeat(MAX_SESSION_ID_LEN + 1)).is_err());
        assert!(validate_session_id(&"x".repeat(MAX_SESSION_ID_LEN)).is_ok());
    }
}
