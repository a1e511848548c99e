use anyhow::Result;
use meetup_export::ExportConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "meetup_export=info,meetup_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ExportConfig::from_env()?;
    meetup_export::run(&config)?;
    Ok(())
}
