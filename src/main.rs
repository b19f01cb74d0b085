use std::path::PathBuf;
use std::sync::mpsc::channel;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::Parser;
use iocraft::prelude::*;

use shipdeck::app::{App, HostNotice};
use shipdeck::color::ColorDepth;
use shipdeck::config::loader;
use shipdeck::deploy::{DeployProps, DeployViewModel};
use shipdeck::engine::{Engine, EngineDispatcher, Event, Request, StubEngine};
use shipdeck::store::{CommitStore, JobOutputStore};
use shipdeck::theme::{Background, ResolvedTheme};

#[derive(Parser)]
#[command(name = "shipdeck", version, about = "Deploy dashboard TUI")]
struct Cli {
    /// Commit to deploy, as `owner/repo@sha`.
    target: String,

    /// App to deploy to. Falls back to `defaults.app` from the config.
    #[arg(short, long)]
    app: Option<String>,

    /// Branch name recorded with the deploy. Falls back to `defaults.branch`.
    #[arg(short, long)]
    branch: Option<String>,

    /// Path to config file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable debug logging to debug.log.
    #[arg(long)]
    debug: bool,
}

/// Split `owner/repo@sha` into its three parts.
fn parse_target(target: &str) -> Result<(String, String, String)> {
    let (repo_part, sha) = target
        .rsplit_once('@')
        .with_context(|| format!("expected owner/repo@sha, got {target:?}"))?;
    let (owner, repo) = repo_part
        .split_once('/')
        .with_context(|| format!("expected owner/repo@sha, got {target:?}"))?;
    if owner.is_empty() || repo.is_empty() || sha.is_empty() {
        anyhow::bail!("expected owner/repo@sha, got {target:?}");
    }
    Ok((owner.to_owned(), repo.to_owned(), sha.to_owned()))
}

fn main() -> Result<()> {
    // Install a panic hook that writes to a file, since the fullscreen TUI
    // swallows stderr.
    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::force_capture();
        let msg = format!("{info}\n\n{backtrace}");
        let _ = std::fs::write("panic.log", &msg);
        eprintln!("{msg}");
    }));

    let cli = Cli::parse();

    // Set up tracing.
    if cli.debug {
        let file = std::fs::File::create("debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(file)
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
    }

    // Load config.
    let config = loader::load_config(cli.config.as_deref())?;

    let (owner_login, repo_name, sha) = parse_target(&cli.target)?;
    let app_id = cli
        .app
        .or_else(|| config.defaults.app.clone())
        .context("no app given: pass --app or set defaults.app in the config")?;
    let branch_name = cli.branch.unwrap_or_else(|| config.defaults.branch.clone());

    // Detect terminal capabilities.
    let color_depth = ColorDepth::detect();
    let background = Background::detect();
    let theme = ResolvedTheme::resolve(&config.theme, background);

    // Shared stores: the engine writes, the deploy view reads and listens.
    let commits = Arc::new(CommitStore::new());
    let job_outputs = Arc::new(JobOutputStore::new());

    // Start the backend engine in a dedicated OS thread (owns its own Tokio
    // runtime). Dropping `engine_handle` at the end of `main` closes the
    // sender channel, signalling the engine to shut down.
    let engine_handle =
        StubEngine::with_fixture(Arc::clone(&commits), Arc::clone(&job_outputs)).start();

    let (event_tx, event_rx) = channel::<Event>();
    let (notice_tx, notice_rx) = channel::<HostNotice>();

    let dispatcher = Arc::new(EngineDispatcher {
        handle: engine_handle.clone(),
        reply_tx: event_tx,
    });
    let change_tx = notice_tx.clone();
    let hide_tx = notice_tx;

    let view_model = Arc::new(Mutex::new(DeployViewModel::new(
        DeployProps {
            app_id,
            owner_login: owner_login.clone(),
            repo_name: repo_name.clone(),
            sha: sha.clone(),
            branch_name,
            job: None,
            error_msg: None,
        },
        Arc::clone(&commits),
        Arc::clone(&job_outputs),
        dispatcher,
        Arc::new(move || {
            let _ = change_tx.send(HostNotice::StoreChanged);
        }),
        Arc::new(move || {
            let _ = hide_tx.send(HostNotice::Hide);
        }),
    )));

    // Resolve the commit once; the result lands in the commit store and
    // reaches the view through its listener.
    engine_handle.send(Request::FetchCommit {
        owner_login,
        repo_name,
        sha,
    });

    tracing::info!("shipdeck starting");

    let events = Arc::new(Mutex::new(event_rx));
    let notices = Arc::new(Mutex::new(notice_rx));

    // Enter fullscreen TUI (iocraft uses smol internally).
    smol::block_on(
        element! {
            App(
                view_model: &view_model,
                events: &events,
                notices: &notices,
                theme: &theme,
                color_depth,
            )
        }
        .fullscreen(),
    )?;

    engine_handle.send(Request::Shutdown);
    Ok(())
}
