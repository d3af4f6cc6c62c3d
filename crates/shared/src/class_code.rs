//! Class join codes.

use rand::Rng;

/// Length of a class join code.
pub const CLASS_CODE_LENGTH: usize = 6;

const CLASS_CODE_CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

lazy_static::lazy_static! {
    pub static ref CLASS_CODE_REGEX: regex::Regex =
        regex::Regex::new(r"^[A-Z0-9]{6}$").unwrap();
}

/// Generate a random six-character class code from `A-Z0-9`.
pub fn generate_class_code() -> String {
    let mut rng = rand::thread_rng();
    (0..CLASS_CODE_LENGTH)
        .map(|_| {
            let idx = rng.gen_range(0..CLASS_CODE_CHARS.len());
            CLASS_CODE_CHARS[idx] as char
        })
        .collect()
}

/// Normalizes a user-typed join code: surrounding whitespace removed, upper-cased.
pub fn normalize_class_code(code: &str) -> String {
    code.trim().to_uppercase()
}
