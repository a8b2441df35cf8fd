use std::sync::Arc;

use crate::domain::{Credentials, User};
use crate::error::{DomainError, FieldErrors};
use crate::ports::{Clock, PasswordService, Principal, UserRepository};

const BAD_LOGIN: &str =
    "Please enter a correct username and password. Note that both fields may be case-sensitive.";

/// Sign-up and sign-in over the user repository and the password hasher.
#[derive(Clone)]
pub struct AccountService {
    users: Arc<dyn UserRepository>,
    passwords: Arc<dyn PasswordService>,
    clock: Arc<dyn Clock>,
}

impl AccountService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        passwords: Arc<dyn PasswordService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            passwords,
            clock,
        }
    }

    /// Create an account. Usernames are unique.
    pub async fn register(&self, credentials: Credentials) -> Result<User, DomainError> {
        let credentials = credentials.validated_for_signup()?;

        if self
            .users
            .find_by_username(&credentials.username)
            .await?
            .is_some()
        {
            return Err(DomainError::Duplicate(format!(
                "A user with username {} already exists.",
                credentials.username
            )));
        }

        let hash = self.passwords.hash(&credentials.password)?;
        let user = User::new(credentials.username, hash, self.clock.now());
        let user = self.users.save(user).await?;

        tracing::info!(user_id = %user.id, username = %user.username, "User registered");
        Ok(user)
    }

    /// Check a username and password. Unknown users and wrong passwords fail alike.
    pub async fn authenticate(&self, credentials: Credentials) -> Result<Principal, DomainError> {
        let credentials = credentials.validated()?;

        let Some(user) = self.users.find_by_username(&credentials.username).await? else {
            return Err(bad_login());
        };
        if !self
            .passwords
            .verify(&credentials.password, &user.password_hash)?
        {
            return Err(bad_login());
        }
        if self.passwords.needs_rehash(&user.password_hash) {
            self.upgrade_hash(&user, &credentials.password).await;
        }

        Ok(Principal {
            user_id: user.id,
            username: user.username,
        })
    }

    /// Store the password again under the current hash settings. Failing here
    /// leaves the old hash in place and never fails the sign-in.
    async fn upgrade_hash(&self, user: &User, password: &str) {
        let hash = match self.passwords.hash(password) {
            Ok(hash) => hash,
            Err(e) => {
                tracing::warn!(user_id = %user.id, error = %e, "Password rehash failed");
                return;
            }
        };
        let upgraded = User {
            password_hash: hash,
            ..user.clone()
        };
        match self.users.update(upgraded).await {
            Ok(_) => tracing::info!(user_id = %user.id, "Password hash upgraded"),
            Err(e) => tracing::warn!(user_id = %user.id, error = %e, "Password rehash not stored"),
        }
    }
}

fn bad_login() -> DomainError {
    let mut errors = FieldErrors::new();
    errors.push("password", BAD_LOGIN);
    DomainError::Validation(errors)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    use super::*;
    use crate::error::RepoError;
    use crate::ports::{AuthError, BaseRepository, FixedClock};

    #[derive(Default)]
    struct Users(Mutex<Vec<User>>);

    #[async_trait]
    impl BaseRepository<User, Uuid> for Users {
        async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
            Ok(self.0.lock().unwrap().iter().find(|u| u.id == id).cloned())
        }

        async fn save(&self, user: User) -> Result<User, RepoError> {
            self.0.lock().unwrap().push(user.clone());
            Ok(user)
        }

        async fn update(&self, user: User) -> Result<User, RepoError> {
            let mut users = self.0.lock().unwrap();
            let slot = users
                .iter_mut()
                .find(|u| u.id == user.id)
                .ok_or(RepoError::NotFound)?;
            *slot = user.clone();
            Ok(user)
        }

        async fn delete(&self, _id: Uuid) -> Result<(), RepoError> {
            Ok(())
        }
    }

    #[async_trait]
    impl UserRepository for Users {
        async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
            Ok(self
                .0
                .lock()
                .unwrap()
                .iter()
                .find(|u| u.username == username)
                .cloned())
        }
    }

    struct Reversed;

    impl PasswordService for Reversed {
        fn hash(&self, password: &str) -> Result<String, AuthError> {
            Ok(password.chars().rev().collect())
        }

        fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
            Ok(self.hash(password)? == hash)
        }
    }

    /// Hashes carry a scheme prefix; `old:` ones ask to be upgraded.
    struct Upgrading;

    impl PasswordService for Upgrading {
        fn hash(&self, password: &str) -> Result<String, AuthError> {
            Ok(format!("new:{password}"))
        }

        fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
            let stored = hash
                .strip_prefix("old:")
                .or_else(|| hash.strip_prefix("new:"));
            Ok(stored == Some(password))
        }

        fn needs_rehash(&self, hash: &str) -> bool {
            hash.starts_with("old:")
        }
    }

    fn accounts() -> AccountService {
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 3, 4, 4, 38, 0).unwrap());
        AccountService::new(
            Arc::new(Users::default()),
            Arc::new(Reversed),
            Arc::new(clock),
        )
    }

    #[tokio::test]
    async fn test_register_then_authenticate() {
        let accounts = accounts();

        let user = accounts
            .register(Credentials::new("editor", "correct horse"))
            .await
            .unwrap();
        assert_ne!(user.password_hash, "correct horse");

        let principal = accounts
            .authenticate(Credentials::new("editor", "correct horse"))
            .await
            .unwrap();
        assert_eq!(principal.user_id, user.id);
        assert_eq!(principal.username, "editor");
    }

    #[tokio::test]
    async fn test_register_duplicate_username() {
        let accounts = accounts();
        accounts
            .register(Credentials::new("editor", "correct horse"))
            .await
            .unwrap();

        let result = accounts
            .register(Credentials::new("editor", "another one"))
            .await;

        assert!(matches!(result, Err(DomainError::Duplicate(_))));
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_user_fail_alike() {
        let accounts = accounts();
        accounts
            .register(Credentials::new("editor", "correct horse"))
            .await
            .unwrap();

        for creds in [
            Credentials::new("editor", "wrong password"),
            Credentials::new("nobody", "correct horse"),
        ] {
            match accounts.authenticate(creds).await {
                Err(DomainError::Validation(errors)) => {
                    assert_eq!(errors.for_field("password"), vec![BAD_LOGIN]);
                }
                other => panic!("expected validation error, got {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_sign_in_upgrades_weak_hash() {
        let users = Arc::new(Users::default());
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 3, 4, 4, 38, 0).unwrap());
        let legacy = User::new("editor".to_string(), "old:correct horse".to_string(), clock.now());
        users.0.lock().unwrap().push(legacy.clone());
        let accounts = AccountService::new(users.clone(), Arc::new(Upgrading), Arc::new(clock));

        let principal = accounts
            .authenticate(Credentials::new("editor", "correct horse"))
            .await
            .unwrap();

        assert_eq!(principal.user_id, legacy.id);
        let stored = users.find_by_id(legacy.id).await.unwrap().unwrap();
        assert_eq!(stored.password_hash, "new:correct horse");
    }

    #[tokio::test]
    async fn test_failed_sign_in_keeps_weak_hash() {
        let users = Arc::new(Users::default());
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 3, 4, 4, 38, 0).unwrap());
        let legacy = User::new("editor".to_string(), "old:correct horse".to_string(), clock.now());
        users.0.lock().unwrap().push(legacy.clone());
        let accounts = AccountService::new(users.clone(), Arc::new(Upgrading), Arc::new(clock));

        let result = accounts
            .authenticate(Credentials::new("editor", "wrong password"))
            .await;

        assert!(matches!(result, Err(DomainError::Validation(_))));
        let stored = users.find_by_id(legacy.id).await.unwrap().unwrap();
        assert_eq!(stored.password_hash, "old:correct horse");
    }
}
