use anyhow::Context as _;
use chrono::Duration;
use sea_orm::Database;
use tracing::info;

use roster_accounts::config::AccountsConfig;
use roster_accounts::router::build_router;
use roster_accounts::state::AppState;
use roster_auth_types::session::SessionSecret;
use roster_core::config::Config;
use roster_core::tracing::init_tracing;
use roster_domain::messages::MessageCatalog;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing("info,sqlx=warn");

    let config = AccountsConfig::from_env().context("load accounts config")?;

    let db = Database::connect(&config.database_url)
        .await
        .context("connect to database")?;

    let state = AppState {
        db,
        session_secret: SessionSecret::new(config.session_secret),
        cookie_domain: config.cookie_domain,
        catalog: MessageCatalog::new(config.accounts_locale),
        confirmation_ttl: Duration::hours(config.confirmation_ttl_hours),
        reset_password_ttl: Duration::hours(config.reset_password_ttl_hours),
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.accounts_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("bind {addr}"))?;

    info!("accounts service listening on {addr}");
    axum::serve(listener, router).await.context("server error")?;
    Ok(())
}
