//! Use cases - the operations the web layer drives.

mod account;
mod blog;
mod guard;

pub use account::AccountService;
pub use blog::{BlogService, PostWithComments};
pub use guard::require_authenticated;
