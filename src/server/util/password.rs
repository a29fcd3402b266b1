//! Password hashing with Argon2.

use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
};
use rand::Rng;

use crate::server::error::AppError;

const GENERATED_PASSWORD_LENGTH: usize = 12;

/// Hashes a password into a PHC string with a fresh random salt.
///
/// # Returns
/// - `Ok(String)` - Encoded hash suitable for storage
/// - `Err(AppError::InternalError)` - Hashing failed
pub fn hash(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {}", e)))
}

/// Checks a password against a stored hash.
///
/// A stored value that is not a valid PHC string never matches, so accounts with a placeholder
/// hash cannot be logged into.
pub fn verify(password: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Generates a random alphanumeric password for admin resets.
pub fn generate() -> String {
    const CHARSET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ\
                             abcdefghijkmnpqrstuvwxyz\
                             23456789";

    let mut rng = rand::rng();

    (0..GENERATED_PASSWORD_LENGTH)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}
