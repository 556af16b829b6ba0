use std::env;
use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, HttpServer};
use dotenv::dotenv;
use log::{info, warn};
use secrecy::ExposeSecret;

use chirpy_api::{create_app, AppState};
use chirpy_core::domain::entities::User;
use chirpy_core::repositories::{
    InMemoryRefreshTokenStore, InMemoryUserDirectory, RefreshTokenStore, UserDirectory,
};
use chirpy_core::services::{AccessTokenCodec, SessionConfig, SessionManager};
use chirpy_infra::database::{DatabasePool, MySqlRefreshTokenStore, MySqlUserDirectory};
use chirpy_shared::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    let config = AppConfig::from_env().map_err(anyhow::Error::msg)?;

    env_logger::init_from_env(env_logger::Env::new().default_filter_or(config.logging.level.as_str()));

    info!("Starting Chirpy API in {} environment", config.environment);
    if config.auth.jwt.is_using_default_secret() {
        warn!("JWT_SECRET not set; using the development signing secret");
    }

    let codec = AccessTokenCodec::new(config.auth.jwt.secret.expose_secret().as_bytes());
    let session_config = SessionConfig::default()
        .with_store_timeout(Duration::from_secs(config.auth.store_timeout_secs))
        .with_password_cost(config.auth.password.cost);
    let refresh_ttl = chrono::Duration::days(config.auth.jwt.refresh_token_expiry_days);

    match config.database.clone() {
        Some(database) => {
            let pool = DatabasePool::new(&database).await?;
            pool.run_migrations().await?;
            info!("Database ready: {}", pool.get_statistics());

            let users = Arc::new(MySqlUserDirectory::new(pool.get_pool().clone()));
            let tokens = Arc::new(
                MySqlRefreshTokenStore::new(pool.get_pool().clone()).with_ttl(refresh_ttl),
            );
            let result =
                serve(config, SessionManager::new(users, tokens, codec, session_config)).await;
            pool.close().await;
            result
        }
        None => {
            warn!("DATABASE_URL not set; sessions are kept in memory and lost on restart");

            let users = InMemoryUserDirectory::new();
            let tokens = Arc::new(InMemoryRefreshTokenStore::with_ttl(refresh_ttl));
            let sessions = SessionManager::new(Arc::new(users.clone()), tokens, codec, session_config);
            seed_dev_user(&users, &sessions).await?;

            serve(config, sessions).await
        }
    }
}

/// Insert the `DEV_USER_EMAIL` / `DEV_USER_PASSWORD` account into the in-memory directory
async fn seed_dev_user<T: RefreshTokenStore>(
    users: &InMemoryUserDirectory,
    sessions: &SessionManager<InMemoryUserDirectory, T>,
) -> anyhow::Result<()> {
    let (Ok(email), Ok(password)) = (env::var("DEV_USER_EMAIL"), env::var("DEV_USER_PASSWORD"))
    else {
        return Ok(());
    };

    let hashed = sessions.hash_password(&password).await?;
    let user = users.insert(User::new(email, hashed)).await?;
    info!("Seeded development user {}", user.id);
    Ok(())
}

async fn serve<U, T>(config: AppConfig, sessions: SessionManager<U, T>) -> anyhow::Result<()>
where
    U: UserDirectory + 'static,
    T: RefreshTokenStore + 'static,
{
    let state = web::Data::new(AppState::new(sessions, config.environment));
    let cors = config.cors.clone();
    let json_limit = config.server.max_payload_size;
    let bind_address = config.server.bind_address();

    info!("Server will bind to: {}", bind_address);

    let mut server = HttpServer::new(move || create_app(state.clone(), &cors, json_limit));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.bind(&bind_address)?.run().await?;
    Ok(())
}
