// File: crates/btcchart/src/main.rs
// Summary: CLI entry point: serve the webhook, post once, or render offline.

mod db;
mod event;
mod render;
mod server;
mod upload;

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use timechart::{RenderOptions, TimeTicker};

#[derive(Parser, Debug)]
#[clap(version, about = "Posts BTC/JPY price charts as signed Nostr replies", long_about = None)]
struct Opts {
    /// Postgres connection string for the price log.
    #[clap(long, env = "DATABASE_URL")]
    dsn: Option<String>,
    /// Bot secret key (nsec bech32 or hex).
    #[clap(long, env = "NOSTR_NSEC", hide_env_values = true)]
    nsec: Option<String>,
    /// Media host accepting multipart uploads.
    #[clap(
        long,
        env = "UPLOAD_URL",
        default_value = "https://nostr.build/api/upload/ios.php"
    )]
    upload_url: String,
    /// Chart time zone, whole hours east of UTC.
    #[clap(long, env = "CHART_UTC_OFFSET_HOURS", default_value_t = 9)]
    utc_offset_hours: i32,
    /// How many quote rows to plot, newest first.
    #[clap(long, env = "CHART_ROWS", default_value_t = 180)]
    rows: i64,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the HTTP webhook.
    Serve {
        /// Listen port.
        #[clap(long, env = "PORT", default_value_t = 8080)]
        port: u16,
    },
    /// Render, upload, and print one signed event of the given kind.
    Post {
        #[clap(long, default_value_t = 1)]
        kind: u64,
    },
    /// Render a chart PNG locally, from the database or a CSV file.
    Render {
        /// CSV input with timestamp,price columns instead of the database.
        #[clap(long)]
        csv: Option<PathBuf>,
        #[clap(long, default_value = "output.png")]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();
    let opts = Opts::parse();

    let ticker = TimeTicker::from_utc_offset_hours(opts.utc_offset_hours)
        .context("chart UTC offset out of range")?;

    match &opts.command {
        Command::Serve { port } => serve(&opts, ticker, *port).await,
        Command::Post { kind } => post(&opts, ticker, *kind).await,
        Command::Render { csv, out } => render_once(&opts, ticker, csv.as_deref(), out).await,
    }
}

async fn serve(opts: &Opts, ticker: TimeTicker, port: u16) -> Result<()> {
    let state = server::AppState {
        store: db::PriceStore::connect(require_dsn(opts)?).await?,
        uploader: upload::Uploader::new(&opts.upload_url),
        keys: event::keys_from_secret(require_nsec(opts)?)?,
        ticker,
        rows: opts.rows,
    };
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    server::run(addr, state).await
}

async fn post(opts: &Opts, ticker: TimeTicker, kind: u64) -> Result<()> {
    let keys = event::keys_from_secret(require_nsec(opts)?)?;
    let samples = db_samples(opts).await?;
    let chart = render::price_chart(&samples, ticker)?;
    let png = chart.render_to_png_bytes(&RenderOptions::default())?;
    let url = upload::Uploader::new(&opts.upload_url).upload(png).await?;
    let ev = event::plain(&keys, nostr::Kind::from(kind), url)?;
    println!("{}", serde_json::to_string(&ev)?);
    Ok(())
}

async fn render_once(
    opts: &Opts,
    ticker: TimeTicker,
    csv: Option<&std::path::Path>,
    out: &std::path::Path,
) -> Result<()> {
    let samples = match csv {
        Some(path) => render::load_price_csv(path)?,
        None => db_samples(opts).await?,
    };
    let chart = render::price_chart(&samples, ticker)?;
    chart.render_to_png(&RenderOptions::default(), out)?;
    info!("wrote {}", out.display());
    Ok(())
}

async fn db_samples(opts: &Opts) -> Result<Vec<(i64, f64)>> {
    let store = db::PriceStore::connect(require_dsn(opts)?).await?;
    let rows = store.recent(opts.rows).await?;
    Ok(render::samples_from_rows(&rows))
}

fn require_dsn(opts: &Opts) -> Result<&str> {
    opts.dsn.as_deref().context("DATABASE_URL is not set")
}

fn require_nsec(opts: &Opts) -> Result<&str> {
    opts.nsec.as_deref().context("NOSTR_NSEC is not set")
}
