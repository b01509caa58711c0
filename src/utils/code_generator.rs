//! Random short code generation.

use rand::Rng;

/// Symbols a generated code is drawn from: upper and lower case letters, then digits.
pub const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Default number of symbols in a generated code.
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Codes that would be shadowed by fixed routes and must never be issued.
const RESERVED_CODES: &[&str] = &["health", "shorten", "api"];

/// Generates a random short code of `length` symbols.
///
/// Each symbol is drawn independently and uniformly from [`ALPHABET`] using the
/// thread-local CSPRNG (ChaCha, seeded from the OS), so issued codes cannot be
/// predicted from earlier ones.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code(6);
/// assert_eq!(code.len(), 6);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code(length: usize) -> String {
    let mut rng = rand::rng();

    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..ALPHABET.len());
            ALPHABET[idx] as char
        })
        .collect()
}

/// Returns true if `code` collides with a fixed route.
pub fn is_reserved(code: &str) -> bool {
    RESERVED_CODES.contains(&code)
}

/// Returns true if `code` could have been produced by [`generate_code`].
pub fn is_well_formed(code: &str) -> bool {
    !code.is_empty() && code.bytes().all(|b| ALPHABET.contains(&b))
}
