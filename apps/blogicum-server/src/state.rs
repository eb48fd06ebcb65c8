//! Application state - shared across all handlers.

use std::sync::Arc;

use blogicum_core::Paginator;
use blogicum_core::ports::{
    CategoryRepository, CommentRepository, LocationRepository, PasswordService, PostRepository,
    TokenService, UserRepository,
};
use blogicum_infra::database::DatabaseConnections;
use blogicum_infra::{Argon2PasswordService, InMemoryContentStore, JwtTokenService};

#[cfg(feature = "postgres")]
use blogicum_infra::database::{
    PostgresCategoryRepository, PostgresCommentRepository, PostgresLocationRepository,
    PostgresPostRepository, PostgresUserRepository,
};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub locations: Arc<dyn LocationRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub tokens: Arc<dyn TokenService>,
    pub passwords: Arc<dyn PasswordService>,
    pub paginator: Paginator,
    pub db: Option<Arc<DatabaseConnections>>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(config.jwt.clone()));
        let paginator = Paginator::new(config.posts_per_page);

        #[cfg(feature = "postgres")]
        let connected = Self::connect(config, tokens.clone(), paginator).await;

        #[cfg(not(feature = "postgres"))]
        let connected: Option<Self> = {
            tracing::info!("Running without postgres feature - using in-memory content store");
            None
        };

        if let Some(state) = connected {
            tracing::info!("Application state initialized (postgres)");
            return state;
        }

        let state = Self::in_memory(&InMemoryContentStore::new(), tokens, paginator);
        tracing::info!("Application state initialized (in-memory)");
        state
    }

    #[cfg(feature = "postgres")]
    async fn connect(
        config: &AppConfig,
        tokens: Arc<dyn TokenService>,
        paginator: Paginator,
    ) -> Option<Self> {
        let Some(db_config) = &config.database else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            return None;
        };
        match DatabaseConnections::init(db_config).await {
            Ok(connections) => Some(Self::postgres(Arc::new(connections), tokens, paginator)),
            Err(e) => {
                tracing::error!(
                    "Failed to connect to database: {}. Using in-memory fallback.",
                    e
                );
                None
            }
        }
    }

    #[cfg(feature = "postgres")]
    fn postgres(
        connections: Arc<DatabaseConnections>,
        tokens: Arc<dyn TokenService>,
        paginator: Paginator,
    ) -> Self {
        let conn = connections.main.clone();
        Self {
            users: Arc::new(PostgresUserRepository::new(conn.clone())),
            categories: Arc::new(PostgresCategoryRepository::new(conn.clone())),
            locations: Arc::new(PostgresLocationRepository::new(conn.clone())),
            posts: Arc::new(PostgresPostRepository::new(conn.clone())),
            comments: Arc::new(PostgresCommentRepository::new(conn)),
            tokens,
            passwords: Arc::new(Argon2PasswordService::new()),
            paginator,
            db: Some(connections),
        }
    }

    /// State backed by an in-memory content store.
    pub fn in_memory(
        store: &InMemoryContentStore,
        tokens: Arc<dyn TokenService>,
        paginator: Paginator,
    ) -> Self {
        Self {
            users: Arc::new(store.users()),
            categories: Arc::new(store.categories()),
            locations: Arc::new(store.locations()),
            posts: Arc::new(store.posts()),
            comments: Arc::new(store.comments()),
            tokens,
            passwords: Arc::new(Argon2PasswordService::new()),
            paginator,
            db: None,
        }
    }
}
