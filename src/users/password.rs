use anyhow::Context;
use argon2::{
    password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;

// password_hash::Error has no std::error::Error impl without its `std` feature
fn describe(e: password_hash::Error) -> anyhow::Error {
    anyhow::anyhow!(e.to_string())
}

/// Hashes a registration password into an argon2 PHC string.
pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let phc = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(describe)
        .context("hash password for registration")?;
    Ok(phc.to_string())
}

/// Checks a login password against the stored PHC string.
///
/// A mismatch is `Ok(false)`. A stored hash that cannot be parsed or checked
/// is an error, so a corrupt record surfaces as a 500 and not as bad credentials.
pub fn verify_password(plain: &str, stored: &str) -> anyhow::Result<bool> {
    let parsed = PasswordHash::new(stored)
        .map_err(describe)
        .context("stored password hash is malformed")?;
    match Argon2::default().verify_password(plain.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(e) => Err(describe(e)).context("verify login password"),
    }
}
