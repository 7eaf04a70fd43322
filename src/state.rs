use std::sync::Arc;

use warden_config::{CorsConfig, DatabaseConfig, SecurityConfig};
use warden_core::{AppError, PasswordEncoder};
use warden_db::{InMemoryUserRepository, PgUserRepository, UserRepository, init_db_pool};

use crate::modules::users::service::{RepositoryUserDetailsService, UserService};
use crate::security::{
    DelegatingUserDetailsService, InMemoryUserDetailsManager, SecurityFilterChain,
    UserDetailsService, provisioned_users,
};

#[derive(Clone)]
pub struct AppState {
    pub user_service: UserService,
    pub user_details_service: Arc<dyn UserDetailsService>,
    pub password_encoder: PasswordEncoder,
    /// Hash checked when a username is unknown, at the same cost as real ones.
    pub unknown_user_hash: Arc<str>,
    pub filter_chain: Arc<SecurityFilterChain>,
    pub security_config: SecurityConfig,
    pub cors_config: CorsConfig,
}

impl AppState {
    /// Wires the provisioned accounts in front of `repository` and uses the
    /// standard filter chain.
    pub fn new(
        repository: Arc<dyn UserRepository>,
        security_config: SecurityConfig,
        cors_config: CorsConfig,
    ) -> Result<Self, AppError> {
        let password_encoder = PasswordEncoder::new(security_config.password_hash_cost);
        let user_service = UserService::new(repository, password_encoder);
        let unknown_user_hash = password_encoder.encode("userNotFoundPassword")?;

        let in_memory = InMemoryUserDetailsManager::new(provisioned_users(&password_encoder)?);
        let user_details_service = DelegatingUserDetailsService::default()
            .with(Arc::new(in_memory))
            .with(Arc::new(RepositoryUserDetailsService::new(user_service.clone())));

        Ok(Self {
            user_service,
            user_details_service: Arc::new(user_details_service),
            password_encoder,
            unknown_user_hash: Arc::from(unknown_user_hash),
            filter_chain: Arc::new(SecurityFilterChain::standard()),
            security_config,
            cors_config,
        })
    }

    pub fn with_filter_chain(mut self, filter_chain: SecurityFilterChain) -> Self {
        self.filter_chain = Arc::new(filter_chain);
        self
    }
}

pub async fn init_app_state() -> anyhow::Result<AppState> {
    let database_config = DatabaseConfig::from_env();

    let repository: Arc<dyn UserRepository> = match &database_config.url {
        Some(url) => {
            let pool = init_db_pool(url, database_config.max_connections).await?;
            tracing::info!("Using PostgreSQL user repository");
            Arc::new(PgUserRepository::new(pool))
        }
        None => {
            tracing::info!("DATABASE_URL not set, registered users are kept in memory");
            Arc::new(InMemoryUserRepository::new())
        }
    };

    AppState::new(repository, SecurityConfig::from_env(), CorsConfig::from_env())
        .map_err(|e| e.error)
}
