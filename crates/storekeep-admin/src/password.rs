//! Argon2id password hashing and verification.
//!
//! Parameters follow the OWASP ASVS recommendation (memory: 19 MiB,
//! iterations: 2, parallelism: 1). Salt is randomly generated per hash.
//! An optional pepper (server-side secret) is prepended to the password
//! before hashing.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, SaltString};
use argon2::{Argon2, PasswordHasher, PasswordVerifier};

use crate::error::AdminError;

fn hasher() -> Result<Argon2<'static>, AdminError> {
    let params = argon2::Params::new(19456, 2, 1, None)
        .map_err(|e| AdminError::Crypto(format!("argon2 params error: {e}")))?;
    Ok(Argon2::new(
        argon2::Algorithm::Argon2id,
        argon2::Version::V0x13,
        params,
    ))
}

fn peppered<'a>(password: &'a str, pepper: Option<&str>, buf: &'a mut String) -> &'a [u8] {
    match pepper {
        Some(p) => {
            *buf = format!("{p}{password}");
            buf.as_bytes()
        }
        None => password.as_bytes(),
    }
}

/// Hash a password with Argon2id, returning the PHC string form.
pub fn hash_password(password: &str, pepper: Option<&str>) -> Result<String, AdminError> {
    let mut buf = String::new();
    let input = peppered(password, pepper, &mut buf);
    let salt = SaltString::generate(&mut OsRng);
    let hash = hasher()?
        .hash_password(input, &salt)
        .map_err(|e| AdminError::Crypto(format!("hash error: {e}")))?;
    Ok(hash.to_string())
}

/// Verify a password against a stored PHC hash string.
pub fn verify_password(
    password: &str,
    hash: &str,
    pepper: Option<&str>,
) -> Result<bool, AdminError> {
    let parsed =
        PasswordHash::new(hash).map_err(|e| AdminError::Crypto(format!("invalid hash: {e}")))?;
    let mut buf = String::new();
    let input = peppered(password, pepper, &mut buf);
    match hasher()?.verify_password(input, &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AdminError::Crypto(format!("verify error: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correct_password_matches() {
        let hash = hash_password("hunter2", None).unwrap();
        assert!(verify_password("hunter2", &hash, None).unwrap());
    }

    #[test]
    fn wrong_password_does_not_match() {
        let hash = hash_password("hunter2", None).unwrap();
        assert!(!verify_password("wrong", &hash, None).unwrap());
    }

    #[test]
    fn pepper_is_applied() {
        let hash = hash_password("hunter2", Some("pepper!")).unwrap();
        assert!(verify_password("hunter2", &hash, Some("pepper!")).unwrap());
        assert!(!verify_password("hunter2", &hash, None).unwrap());
    }
}
