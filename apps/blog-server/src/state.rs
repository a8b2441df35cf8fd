//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::ports::{
    Clock, CommentRepository, PasswordService, PostRepository, UserRepository,
};
use quill_core::{AccountService, BlogService};
use quill_infra::database::{DatabaseConfig, InMemoryStore};

#[cfg(feature = "postgres")]
use quill_infra::database::{
    DatabaseConnections, PostgresCommentRepository, PostgresPostRepository,
    PostgresUserRepository,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub blog: BlogService,
    pub accounts: AccountService,
    #[cfg(feature = "postgres")]
    pub db: Option<Arc<DatabaseConnections>>,
}

struct Repositories {
    users: Arc<dyn UserRepository>,
    posts: Arc<dyn PostRepository>,
    comments: Arc<dyn CommentRepository>,
}

impl Repositories {
    fn in_memory() -> Self {
        let store = InMemoryStore::new();
        Self {
            users: Arc::new(store.users()),
            posts: Arc::new(store.posts()),
            comments: Arc::new(store.comments()),
        }
    }

    #[cfg(feature = "postgres")]
    fn postgres(connections: &DatabaseConnections) -> Self {
        Self {
            users: Arc::new(PostgresUserRepository::new(connections.main.clone())),
            posts: Arc::new(PostgresPostRepository::new(connections.main.clone())),
            comments: Arc::new(PostgresCommentRepository::new(connections.main.clone())),
        }
    }
}

impl AppState {
    /// Build the application state, on PostgreSQL when a database is
    /// configured and reachable, in memory otherwise.
    pub async fn new(
        db_config: Option<&DatabaseConfig>,
        passwords: Arc<dyn PasswordService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        #[cfg(feature = "postgres")]
        let (db, repos) = {
            if let Some(config) = db_config {
                match DatabaseConnections::init(config).await {
                    Ok(connections) => {
                        let repos = Repositories::postgres(&connections);
                        (Some(Arc::new(connections)), repos)
                    }
                    Err(e) => {
                        tracing::error!(
                            "Failed to connect to database: {}. Using in-memory store.",
                            e
                        );
                        (None, Repositories::in_memory())
                    }
                }
            } else {
                tracing::warn!("DATABASE_URL not set. Running with the in-memory store.");
                (None, Repositories::in_memory())
            }
        };

        #[cfg(not(feature = "postgres"))]
        let repos = {
            if db_config.is_some() {
                tracing::warn!("Built without postgres feature - ignoring DATABASE_URL");
            }
            tracing::info!("Running with the in-memory store");
            Repositories::in_memory()
        };

        #[cfg_attr(not(feature = "postgres"), allow(unused_mut))]
        let mut state = Self::assemble(repos, passwords, clock);
        #[cfg(feature = "postgres")]
        {
            state.db = db;
        }
        tracing::info!("Application state initialized");
        state
    }

    /// State over a fresh in-memory store.
    #[cfg(test)]
    pub fn in_memory(passwords: Arc<dyn PasswordService>, clock: Arc<dyn Clock>) -> Self {
        Self::assemble(Repositories::in_memory(), passwords, clock)
    }

    fn assemble(
        repos: Repositories,
        passwords: Arc<dyn PasswordService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            blog: BlogService::new(repos.posts, repos.comments, clock.clone()),
            accounts: AccountService::new(repos.users, passwords, clock),
            #[cfg(feature = "postgres")]
            db: None,
        }
    }
}
