//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod clock;
mod repository;

pub use auth::{AuthError, PasswordService, Principal, TokenClaims, TokenService};
pub use clock::{Clock, FixedClock, SystemClock};
pub use repository::{BaseRepository, CommentRepository, PostRepository, UserRepository};
