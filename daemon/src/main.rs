//! Verigate daemon
//!
//! Connects to MySQL, applies migrations, wires the verification services
//! and keeps the reaper ticking until ctrl-c.

mod logging;

use anyhow::Context;
use tokio::sync::watch;
use tracing::{info, warn};

use vg_infra::database::DatabasePool;
use vg_infra::services::VerificationServices;
use vg_infra::sync::{log_changes, QueueChangeNotifier};
use vg_shared::AppConfig;

/// Pending subject changes held for the downstream consumer
const CHANGE_QUEUE_CAPACITY: usize = 256;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    logging::init_logging(&config.logging)?;

    info!(
        environment = %config.environment,
        provider = %config.email.provider,
        "Starting Verigate"
    );

    let pool = DatabasePool::new(config.database.clone())
        .await
        .context("failed to connect to database")?;
    pool.run_migrations()
        .await
        .context("failed to run migrations")?;
    info!("{}", pool.get_statistics());

    let (notifier, changes) = QueueChangeNotifier::channel(CHANGE_QUEUE_CAPACITY);
    let consumer = tokio::spawn(log_changes(changes));

    let services = VerificationServices::from_pool(pool.get_pool().clone(), &config, notifier);

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let reaper = tokio::spawn(services.reaper.clone().run_until(shutdown_rx));

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for ctrl-c")?;
    info!("Shutdown signal received");

    if shutdown_tx.send(true).is_err() {
        warn!("Reaper already stopped");
    }
    if let Err(e) = reaper.await {
        warn!("Reaper task ended abnormally: {}", e);
    }

    // Dropping the services closes the change queue so the consumer drains and exits
    drop(services);
    if let Err(e) = consumer.await {
        warn!("Change consumer ended abnormally: {}", e);
    }

    pool.close().await;
    info!("Verigate stopped");
    Ok(())
}
