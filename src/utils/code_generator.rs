//! Short code generation.
//!
//! Codes are drawn uniformly from `[A-Za-z0-9]` with the thread-local
//! CSPRNG. At the default length of 6 this gives 62^6 (about 5.7e10)
//! possible codes, roughly 35.7 bits of entropy.

use rand::{Rng, distr::Alphanumeric};

/// Default short code length.
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Shortest configurable code; keeps entropy above 30 bits.
pub const MIN_CODE_LENGTH: usize = 6;

/// Longest configurable code.
pub const MAX_CODE_LENGTH: usize = 32;

/// Draws a random alphanumeric code of exactly `length` characters.
///
/// Does not check for collisions; see
/// [`crate::application::services::LinkService::generate_unique_code`].
///
/// # Examples
///
/// ```ignore
/// let code = generate_code(6);
/// assert_eq!(code.len(), 6);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code(length: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}
