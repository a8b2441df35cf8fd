//! Domain entities - the core business objects.

mod comment;
mod forms;
mod post;
mod user;

pub use comment::Comment;
pub use forms::{
    COMMENT_AUTHOR_MAX_LEN, Credentials, NewComment, PASSWORD_MIN_LEN, PostDraft, TITLE_MAX_LEN,
};
pub use post::Post;
pub use user::{USERNAME_MAX_LEN, User};
