//! Badge Fetch Client
//!
//! Fetches a visitor badge from a running server, reports its size and
//! optionally saves it to disk.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "badge-fetch", version, about = "Fetch a visitor badge")]
struct Cli {
    #[arg(long, default_value = "http://localhost:5000")]
    server_url: String,

    /// Profile the badge counts visitors for
    subject: String,

    #[arg(value_enum, default_value_t = PeriodArg::LastMonth)]
    period: PeriodArg,

    /// Write the PNG here
    #[arg(long, short)]
    output: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PeriodArg {
    #[value(name = "last_month")]
    LastMonth,
    #[value(name = "last_week")]
    LastWeek,
}

impl PeriodArg {
    fn as_path(self) -> &'static str {
        match self {
            PeriodArg::LastMonth => "last_month",
            PeriodArg::LastWeek => "last_week",
        }
    }
}

fn badge_url(server_url: &str, subject: &str, period: PeriodArg) -> String {
    format!(
        "{}/{}/{}",
        server_url.trim_end_matches('/'),
        subject,
        period.as_path()
    )
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "badge_fetch=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let url = badge_url(&cli.server_url, &cli.subject, cli.period);

    let response = reqwest::get(&url)
        .await
        .with_context(|| format!("request to {url} failed"))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        anyhow::bail!("badge request failed with status {status}: {body}");
    }

    let bytes = response.bytes().await.context("reading badge body")?;
    let badge = image::load_from_memory_with_format(&bytes, image::ImageFormat::Png)
        .context("server did not return a PNG")?;

    tracing::info!(
        subject = %cli.subject,
        period = cli.period.as_path(),
        width = badge.width(),
        height = badge.height(),
        "Fetched badge"
    );

    if let Some(path) = cli.output {
        tokio::fs::write(&path, &bytes)
            .await
            .with_context(|| format!("writing {}", path.display()))?;
        tracing::info!(path = %path.display(), "Badge saved");
    }

    Ok(())
}
