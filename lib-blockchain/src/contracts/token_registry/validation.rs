//! Ticker (TLA) validation

use super::types::Rejection;

/// Required ticker length
pub const TLA_LENGTH: usize = 3;

/// A TLA is exactly three lowercase ASCII letters
pub fn validate_tla(tla: &str) -> Result<(), Rejection> {
    let valid = tla.len() == TLA_LENGTH && tla.bytes().all(|b| b.is_ascii_lowercase());
    if valid {
        Ok(())
    } else {
        Err(Rejection::InvalidTla(tla.to_string()))
    }
}
