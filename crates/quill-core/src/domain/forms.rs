//! Submitted form data and its field constraints.

use crate::error::{DomainError, FieldErrors};

use super::user::USERNAME_MAX_LEN;

pub const TITLE_MAX_LEN: usize = 100;
pub const COMMENT_AUTHOR_MAX_LEN: usize = 100;

pub const PASSWORD_MIN_LEN: usize = 8;

const REQUIRED: &str = "This field is required.";

/// Title and body submitted when writing or editing a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    pub title: String,
    pub text: String,
}

impl PostDraft {
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
        }
    }

    /// Trim the fields and check them against the post constraints.
    pub fn validated(self) -> Result<Self, DomainError> {
        let title = self.title.trim().to_string();
        let text = self.text.trim().to_string();

        let mut errors = FieldErrors::new();
        check_char_field(&mut errors, "title", &title, TITLE_MAX_LEN);
        check_text_field(&mut errors, "text", &text);
        errors.into_result()?;

        Ok(Self { title, text })
    }
}

/// Name and body submitted when commenting on a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub author: String,
    pub text: String,
}

impl NewComment {
    pub fn new(author: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            text: text.into(),
        }
    }

    /// Trim the fields and check them against the comment constraints.
    pub fn validated(self) -> Result<Self, DomainError> {
        let author = self.author.trim().to_string();
        let text = self.text.trim().to_string();

        let mut errors = FieldErrors::new();
        check_char_field(&mut errors, "author", &author, COMMENT_AUTHOR_MAX_LEN);
        check_text_field(&mut errors, "text", &text);
        errors.into_result()?;

        Ok(Self { author, text })
    }
}

/// Username and password submitted to sign up or sign in.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Checks for signing in: both fields present. The password is kept as typed.
    pub fn validated(self) -> Result<Self, DomainError> {
        let username = self.username.trim().to_string();

        let mut errors = FieldErrors::new();
        check_char_field(&mut errors, "username", &username, USERNAME_MAX_LEN);
        check_text_field(&mut errors, "password", &self.password);
        errors.into_result()?;

        Ok(Self {
            username,
            password: self.password,
        })
    }

    /// Checks for signing up: a well-formed username and a long enough password.
    pub fn validated_for_signup(self) -> Result<Self, DomainError> {
        let username = self.username.trim().to_string();

        let mut errors = FieldErrors::new();
        check_char_field(&mut errors, "username", &username, USERNAME_MAX_LEN);
        if !username
            .chars()
            .all(|c| c.is_alphanumeric() || "@.+-_".contains(c))
        {
            errors.push(
                "username",
                "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.",
            );
        }
        let len = self.password.chars().count();
        if len == 0 {
            errors.push("password", REQUIRED);
        } else if len < PASSWORD_MIN_LEN {
            errors.push(
                "password",
                format!("This password is too short. It must contain at least {PASSWORD_MIN_LEN} characters."),
            );
        }
        errors.into_result()?;

        Ok(Self {
            username,
            password: self.password,
        })
    }
}

fn check_char_field(
    errors: &mut FieldErrors,
    field: &'static str,
    value: &str,
    max_len: usize,
) {
    let len = value.chars().count();
    if len == 0 {
        errors.push(field, REQUIRED);
    } else if len > max_len {
        errors.push(
            field,
            format!("Ensure this value has at most {max_len} characters (it has {len})."),
        );
    }
}

fn check_text_field(errors: &mut FieldErrors, field: &'static str, value: &str) {
    if value.is_empty() {
        errors.push(field, REQUIRED);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_errors(err: DomainError) -> FieldErrors {
        match err {
            DomainError::Validation(errors) => errors,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_post_draft_trims_fields() {
        let draft = PostDraft::new("  Hello ", "World\n").validated().unwrap();

        assert_eq!(draft.title, "Hello");
        assert_eq!(draft.text, "World");
    }

    #[test]
    fn test_post_draft_requires_title_and_text() {
        let errors = field_errors(PostDraft::new("   ", "").validated().unwrap_err());

        assert_eq!(errors.for_field("title"), vec![REQUIRED]);
        assert_eq!(errors.for_field("text"), vec![REQUIRED]);
    }

    #[test]
    fn test_post_title_length_limit() {
        let at_limit = "a".repeat(TITLE_MAX_LEN);
        assert!(PostDraft::new(at_limit, "body").validated().is_ok());

        let too_long = "é".repeat(TITLE_MAX_LEN + 1);
        let errors = field_errors(PostDraft::new(too_long, "body").validated().unwrap_err());
        assert_eq!(errors.for_field("title").len(), 1);
        assert!(errors.for_field("text").is_empty());
    }

    #[test]
    fn test_comment_requires_author_and_text() {
        let errors = field_errors(NewComment::new("", " ").validated().unwrap_err());

        assert_eq!(errors.for_field("author"), vec![REQUIRED]);
        assert_eq!(errors.for_field("text"), vec![REQUIRED]);
    }

    #[test]
    fn test_comment_accepts_any_author_name() {
        let comment = NewComment::new("Alice", "Nice post").validated().unwrap();

        assert_eq!(comment.author, "Alice");
        assert_eq!(comment.text, "Nice post");
    }

    #[test]
    fn test_signup_rejects_short_password_and_bad_username() {
        let errors = field_errors(
            Credentials::new("no spaces", "short")
                .validated_for_signup()
                .unwrap_err(),
        );

        assert_eq!(errors.for_field("username").len(), 1);
        assert_eq!(errors.for_field("password").len(), 1);
    }

    #[test]
    fn test_signin_only_requires_presence() {
        let creds = Credentials::new(" editor ", "x").validated().unwrap();
        assert_eq!(creds.username, "editor");

        let errors = field_errors(Credentials::new("editor", "").validated().unwrap_err());
        assert_eq!(errors.for_field("password"), vec![REQUIRED]);
    }

    #[test]
    fn test_credentials_debug_hides_password() {
        let debug = format!("{:?}", Credentials::new("editor", "hunter22"));

        assert!(debug.contains("editor"));
        assert!(!debug.contains("hunter22"));
    }
}
