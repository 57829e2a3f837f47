//! Argon2id hashing for account passwords.

use argon2::{
    password_hash::{
        rand_core::OsRng, Error as HashError, PasswordHash, PasswordHasher, PasswordVerifier,
        SaltString,
    },
    Algorithm, Argon2, Params, Version,
};

use crate::errors::PasswordError;

const MEMORY_KIB: u32 = 15_000;
const ITERATIONS: u32 = 2;
const LANES: u32 = 1;

fn hasher() -> Result<Argon2<'static>, PasswordError> {
    let params = Params::new(MEMORY_KIB, ITERATIONS, LANES, None)
        .map_err(|e| PasswordError::InvalidParameters(e.to_string()))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// PHC-format hash with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    hasher()?
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordError::HashingError(e.to_string()))
}

/// `Ok(false)` on a wrong password; errors only for unreadable hashes.
/// Cost parameters are read from the stored hash.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| PasswordError::InvalidHashFormat(e.to_string()))?;

    match hasher()?.verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(HashError::Password) => Ok(false),
        Err(e) => Err(PasswordError::VerificationError(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashes_are_salted_argon2id() {
        let first = hash_password("Tajne-Haslo-2024!").unwrap();
        let second = hash_password("Tajne-Haslo-2024!").unwrap();

        assert!(first.starts_with("$argon2id$v=19$m=15000,t=2,p=1$"));
        assert_ne!(first, second);
    }

    #[test]
    fn verification_separates_wrong_passwords_from_bad_hashes() {
        let hash = hash_password("Tajne-Haslo-2024!").unwrap();

        assert!(verify_password("Tajne-Haslo-2024!", &hash).unwrap());
        assert!(!verify_password("tajne-haslo-2024!", &hash).unwrap());
        assert!(matches!(
            verify_password("Tajne-Haslo-2024!", "not-a-phc-string"),
            Err(PasswordError::InvalidHashFormat(_))
        ));
    }
}
