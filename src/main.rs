use anyhow::Context;

use users_app::api::{self, AppState};
use users_app::config::Config;
use users_app::server::Server;
use users_app::{telemetry, Database};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    telemetry::init();

    let config = Config::from_env().context("invalid configuration")?;

    let database = Database::init(&config.database).context("invalid database configuration")?;
    database
        .create_all()
        .await
        .context("failed to prepare the database schema")?;

    let router = api::build_router(AppState::new(database.clone()));
    let served = Server::new(config.server).run(router).await;

    database.close().await;
    served
}
