//! Short code generation.
//!
//! Codes are content-addressed: the same URL yields the same code in every
//! process, so independently running instances agree without coordination.

use md5::{Digest, Md5};

/// Number of hex characters in a short code (2^24 possible values).
pub const CODE_LENGTH: usize = 6;

/// Derives the short code for a full URL.
///
/// Lowercase hex of the MD5 digest, truncated to [`CODE_LENGTH`]
/// characters. Codes issued by earlier deployments of the same table stay
/// valid. Distinct URLs may collide; collisions are not detected.
///
/// # Examples
///
/// ```
/// use shortgate::utils::code_generator::{CODE_LENGTH, generate_code};
///
/// let code = generate_code("https://example.com");
/// assert_eq!(code.len(), CODE_LENGTH);
/// assert_eq!(code, generate_code("https://example.com"));
/// ```
pub fn generate_code(full_url: &str) -> String {
    let digest = Md5::digest(full_url.as_bytes());
    // 3 bytes encode to exactly CODE_LENGTH hex characters
    hex::encode(&digest[..CODE_LENGTH / 2])
}
