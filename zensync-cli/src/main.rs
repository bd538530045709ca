//! Zensync — publish authored HTML + YAML article pairs to a Zendesk
//! Help Center section.
//!
//! # Usage
//!
//! ```text
//! zensync --source <dir> [--source <dir> ...] \
//!         --host <host> [--scheme https] [--port <port>] \
//!         --email <email> --api-token <token> \
//!         --section-id <id> --user-segment-id <id> --permission-group-id <id> \
//!         [--locale en-us] [--notify-subscribers true|false] \
//!         [--comments-disabled true|false]
//! ```
//!
//! A missing mandatory identifier aborts before any request. Individual
//! article failures are reported but never fail the run as a whole.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use zensync_client::HttpRemote;
use zensync_core::{attributes, ConnectionInfo, PublishSettings};
use zensync_engine::{ArticleOutcome, RunReport, SyncEngine};

#[derive(Parser, Debug)]
#[command(
    name = "zensync",
    version,
    about = "Synchronize local HTML + YAML article pairs to a Zendesk Help Center section",
    long_about = None,
)]
struct Cli {
    /// Directory containing `.html` files with `.yml` sidecars (repeatable).
    #[arg(long = "source", value_name = "DIR", required = true)]
    sources: Vec<PathBuf>,

    #[arg(long, default_value = "https")]
    scheme: String,

    /// Help Center host, e.g. `example.zendesk.com`.
    #[arg(long)]
    host: String,

    #[arg(long)]
    port: Option<u16>,

    /// Account email for API token authentication.
    #[arg(long)]
    email: String,

    #[arg(long)]
    api_token: String,

    #[arg(long, default_value = "en-us")]
    locale: String,

    /// User segment attached to every published article (mandatory).
    #[arg(long)]
    user_segment_id: Option<i64>,

    /// Permission group attached to every published article (mandatory).
    #[arg(long)]
    permission_group_id: Option<i64>,

    /// Section the articles are published under (mandatory).
    #[arg(long)]
    section_id: Option<i64>,

    /// Whether section subscribers are notified on create (default: true).
    #[arg(long)]
    notify_subscribers: Option<bool>,

    /// Default for articles whose sidecar does not set `comments_disabled`.
    #[arg(long)]
    comments_disabled: Option<bool>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();

    // Mandatory identifiers are validated before any network activity.
    let settings = PublishSettings::from_options(
        Some(cli.locale),
        cli.user_segment_id,
        cli.permission_group_id,
        cli.section_id,
        cli.notify_subscribers,
        cli.comments_disabled,
    )?;
    let connection = ConnectionInfo::new(cli.scheme, cli.host, cli.port, cli.email, cli.api_token);

    let articles = attributes::load(&cli.sources);
    let client = HttpRemote::new(&connection);
    let report = SyncEngine::new(&client, &settings).run(&articles);
    print_report(&report);

    // Per-article failures are surfaced above but never fail the batch.
    Ok(())
}

fn print_report(report: &RunReport) {
    println!(
        "✓ publish finished ({} created, {} updated, {} skipped, {} failed)",
        report.created, report.updated, report.skipped, report.failed
    );
    for outcome in &report.outcomes {
        match outcome {
            ArticleOutcome::Created { id, slug } => println!("  +  {slug} (id {id})"),
            ArticleOutcome::Updated { id, slug } => println!("  ✎  {slug} (id {id})"),
            ArticleOutcome::Skipped { id, slug } => println!("  ·  {slug} (id {id})"),
            ArticleOutcome::Failed { slug, kind } => println!("  ✗  {slug} — {kind}"),
        }
    }
}
