// src/utils/token.rs

use rand_core::{OsRng, RngCore};

/// Generates a 256-bit token from the OS CSPRNG, hex-encoded.
///
/// Used for both magic-link tokens and session tokens; the token string is
/// the only secret in either flow, so it must be infeasible to guess.
pub fn generate_token() -> String {
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}
