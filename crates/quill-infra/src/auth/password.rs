//! Argon2id hashes for account passwords, stored as PHC strings.

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};

use quill_core::ports::{AuthError, PasswordService};

/// Hashes new passwords with Argon2id under one set of cost parameters and
/// verifies any Argon2 PHC string, whatever parameters it was made with.
pub struct Argon2PasswordService {
    argon2: Argon2<'static>,
    params: Params,
}

impl Argon2PasswordService {
    pub fn new() -> Self {
        Self::with_params(Params::default())
    }

    /// Use explicit cost parameters. Stored hashes weaker than these are
    /// reported by [`PasswordService::needs_rehash`].
    pub fn with_params(params: Params) -> Self {
        Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params.clone()),
            params,
        }
    }
}

impl Default for Argon2PasswordService {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordService for Argon2PasswordService {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| AuthError::HashingError(e.to_string()))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        let stored = PasswordHash::new(hash).map_err(|e| AuthError::HashingError(e.to_string()))?;

        // Only a mismatch is a wrong password; anything else is a broken hash.
        match self.argon2.verify_password(password.as_bytes(), &stored) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AuthError::HashingError(e.to_string())),
        }
    }

    fn needs_rehash(&self, hash: &str) -> bool {
        let Ok(stored) = PasswordHash::new(hash) else {
            return false;
        };
        if stored.algorithm != Algorithm::Argon2id.ident()
            || stored.version != Some(Version::V0x13.into())
        {
            return true;
        }

        match Params::try_from(&stored) {
            Ok(p) => {
                p.m_cost() < self.params.m_cost()
                    || p.t_cost() < self.params.t_cost()
                    || p.p_cost() < self.params.p_cost()
            }
            Err(_) => true,
        }
    }
}
