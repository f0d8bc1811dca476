use anyhow::Context as _;
use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use tracing::info;

use windowshop_core::config::Config;
use windowshop_core::tracing::init_tracing;
use windowshop_storefront::config::StorefrontConfig;
use windowshop_storefront::domain::repository::Store;
use windowshop_storefront::infra::db::DbStore;
use windowshop_storefront::infra::memory::MemoryStore;
use windowshop_storefront::router::build_router;
use windowshop_storefront::state::AppState;
use windowshop_storefront::usecase::backup::SeedFromFileUseCase;
use windowshop_storefront_migration::Migrator;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing("info");

    let config = StorefrontConfig::from_env().context("load configuration")?;

    if config.uses_memory_store() {
        info!("using in-memory store");
        serve(MemoryStore::new(), config).await
    } else {
        let db = Database::connect(&config.database_url)
            .await
            .context("connect to database")?;
        Migrator::up(&db, None).await.context("run migrations")?;
        serve(DbStore { db }, config).await
    }
}

async fn serve<S: Store>(store: S, config: StorefrontConfig) -> anyhow::Result<()> {
    if let Some(path) = &config.seed_data_path {
        let seeder = SeedFromFileUseCase {
            repo: store.clone(),
        };
        seeder.execute(path).await.context("seed store")?;
    }

    let state = AppState {
        store,
        jwt_secret: config.jwt_secret,
        token_minutes: config.access_token_minutes,
        cookie_secure: config.cookie_secure,
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("bind {addr}"))?;

    info!("storefront listening on {addr}");
    axum::serve(listener, router).await.context("server error")?;
    Ok(())
}
