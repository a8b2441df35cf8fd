#[cfg(feature = "postgres")]
use std::time::Duration;

#[cfg(feature = "postgres")]
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DbConn, DbErr, EntityName, EntityTrait, Schema,
};

#[cfg(feature = "postgres")]
use super::entity::{comment, post, user};

/// Configuration for the blog database.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Pooled connection to the blog database.
#[cfg(feature = "postgres")]
pub struct DatabaseConnections {
    pub main: DbConn,
}

#[cfg(feature = "postgres")]
impl DatabaseConnections {
    /// Connect the pool and make sure the tables exist.
    pub async fn init(config: &DatabaseConfig) -> Result<Self, DbErr> {
        tracing::info!("Initializing database connection...");

        let opts = ConnectOptions::new(&config.url)
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .sqlx_logging(true)
            .to_owned();

        let main = Database::connect(opts).await?;
        tracing::info!(
            "Database connected (pool: {})",
            config.max_connections
        );

        let connections = Self { main };
        connections.ensure_schema().await?;
        Ok(connections)
    }

    /// Create any missing table straight from the entity definitions.
    ///
    /// Parents come before children so the cascading foreign keys resolve.
    pub async fn ensure_schema(&self) -> Result<(), DbErr> {
        self.create_table(user::Entity).await?;
        self.create_table(post::Entity).await?;
        self.create_table(comment::Entity).await?;
        Ok(())
    }

    async fn create_table<E>(&self, entity: E) -> Result<(), DbErr>
    where
        E: EntityTrait,
    {
        let backend = self.main.get_database_backend();
        let schema = Schema::new(backend);
        let mut statement = schema.create_table_from_entity(entity);
        statement.if_not_exists();

        self.main.execute(backend.build(&statement)).await?;
        tracing::debug!(table = entity.table_name(), "Table ready");
        Ok(())
    }
}
