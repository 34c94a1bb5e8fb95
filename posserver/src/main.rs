use pos_axum::start_server;
use pos_core::ports::Application as _;
use pos_sqlite::Db;
use posserver::{AppConfig, Cli, feed::HttpFeed, impls::ServerApp};
use time::OffsetDateTime;
use tokio::select;
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // By convention, we leverage `tracing` to instrument and log various
    // operations throughout this project.
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::import()?;

    // Create config with proper layering of CLI args
    let AppConfig {
        server,
        database,
        feed,
        clock,
        schedule,
    } = AppConfig::load(&cli)?;

    let app = ServerApp {
        db: Db::open(&database).await?,
        feed: HttpFeed::new(&feed)?,
        offset: clock.offset()?,
        policy: feed.policy,
    };

    // A failed initial refresh is not fatal; the previous data (if any) stays.
    if cli.refresh {
        if let Err(err) = app.refresh().await {
            tracing::warn!(err = err.to_string(), "initial refresh failed");
        }
    }

    let refresher = app.clone();

    // We always run the server task.
    let server_task = tokio::spawn(async move { start_server(server, app).await });

    // However, we may or may not also run a scheduled refresh task
    if schedule.every.is_some() {
        let refresh_task = tokio::spawn(async move {
            let f = async move |_: OffsetDateTime| match refresher.refresh().await {
                Ok(_) => Ok::<(), anyhow::Error>(()),
                Err(err) => {
                    // Keep the schedule alive; the next tick retries.
                    tracing::error!(err = err.to_string(), "scheduled refresh failed");
                    Ok(())
                }
            };
            schedule.schedule(f).await
        });

        select! {
            r = server_task => r??,
            r = refresh_task => r??,
        }
    } else {
        // Otherwise, we just run the server task to completion
        server_task.await??;
    }

    Ok(())
}
