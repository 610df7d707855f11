use thiserror::Error;

/// Returned when no six-letter lowercase preimage hashes to the requested
/// digest. Mirrors the reference implementation's `E_CRACK_NOT_FOUND`
/// sentinel, exposed here as a proper error type instead of a bare integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no preimage in [a-z]{{6}} hashes to the requested digest")]
pub struct NotFound;

/// The integer sentinel used by [`crate::crack_into`], kept numerically
/// distinct from 0 (success) for callers that prefer a C-ABI-shaped return
/// code over a `Result`.
pub const NOT_FOUND_CODE: i32 = 0x0000_000A;
