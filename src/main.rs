use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use recall_engine::{
    build_app,
    config::Config,
    data::repositories::DieselFlashcardCatalog,
    db,
    features::review::{ReviewService, ReviewSettings},
    features::session::InMemorySessionStore,
    workers, AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env().context("Invalid configuration")?;

    let pool = db::create_pool(&config.database_url).context("Failed to create DB pool")?;
    {
        let mut conn = pool.get().context("Failed to get DB connection")?;
        let applied = db::run_migrations(&mut conn).context("Failed to run migrations")?;
        log::info!("Database ready ({} migrations applied)", applied);
    }

    let service = ReviewService::new(
        pool.clone(),
        Arc::new(DieselFlashcardCatalog::new(pool)),
        Arc::new(InMemorySessionStore::new()),
        ReviewSettings {
            default_session_limit: config.default_session_limit,
            max_session_limit: config.max_session_limit,
            struggling: config.struggling.clone(),
        },
    );
    let state = AppState::new(service, config.admin_user_ids.clone());

    workers::spawn_session_cleanup(
        state.service.clone(),
        config.session_ttl,
        config.cleanup_interval,
    );

    let app = build_app(state);

    let addr = config.bind_addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    log::info!("Server running on http://{}", addr);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
