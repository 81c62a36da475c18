mod config;
mod provider;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use recast_core::UploadConstraints;
use recast_core::format_file_size;
use recast_tui::App;
use recast_tui::AppOutcome;
use recast_tui::GenerateRequest;
use recast_tui::RecastTui;
use url::Url;

use crate::config::ConfigStore;
use crate::config::Settings;
use crate::provider::HttpSessionProvider;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Turn an audio file or transcript into platform-ready posts"
)]
struct Cli {
    /// Base URL of the identity provider. Omit (here and in the config) to
    /// run without sign-in.
    #[arg(long, env = "RECAST_AUTH_URL")]
    auth_url: Option<Url>,

    /// Maximum upload size in megabytes; overrides the config value.
    #[arg(long)]
    max_upload_mb: Option<u64>,

    /// Path to the config file (defaults to ~/.recast/config.toml).
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let store = match cli.config {
        Some(path) => ConfigStore::new(path),
        None => ConfigStore::new_default().context("locate config")?,
    };
    let settings = match store.settings() {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("warning: could not read config: {err}");
            Settings::default()
        }
    };

    let mut constraints = settings.constraints;
    if let Some(limit_mb) = cli.max_upload_mb {
        constraints = UploadConstraints {
            max_size_bytes: UploadConstraints::mb_to_bytes(limit_mb),
            ..constraints
        };
    }

    let provider = cli
        .auth_url
        .or(settings.auth_url)
        .map(HttpSessionProvider::new);

    let mut app = App::new(provider, constraints, settings.catalog)
        .with_last_email(settings.last_email);

    let outcome = {
        let mut tui = RecastTui::new()?;
        app.run(&mut tui).await?
        // Dropping the TUI restores the terminal before we print anything.
    };

    if let Some(email) = app.session_email()
        && let Err(err) = store.set_last_email(email)
    {
        eprintln!("warning: failed to persist config: {err}");
    }

    if let AppOutcome::Generate(request) = outcome {
        print_generate_summary(&request);
    }

    Ok(())
}

fn print_generate_summary(request: &GenerateRequest) {
    println!("Generating posts from:");
    if let Some(file) = request.draft.file() {
        println!("  {} ({})", file.name, format_file_size(file.size_bytes));
    } else if let Some(text) = request.draft.text() {
        println!(
            "  pasted transcript ({} characters)",
            text.trim().chars().count()
        );
    }
    for (platform, quantity) in &request.selections {
        println!("  {platform}: {quantity} post(s)");
    }
}
