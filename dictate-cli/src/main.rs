mod host;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use dictate_core::config::DictateConfig;
use dictate_core::types::TriggerOutcome;
use dictate_platform::terminal::{PromptBuffer, TerminalNotifier};
use dictate_runtime::config_store::{ConfigStore, apply_env_overrides};
use dictate_runtime::defaults::default_config_path;
use dictate_runtime::runtime_engine::{build_machine_from_config, build_service};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::host::{HostCommand, command_listing};

#[derive(Debug, Parser)]
#[command(
    name = "dictate",
    version,
    about = "Toggle voice dictation against a local speech-to-text service"
)]
struct Cli {
    /// Config file (defaults to <config dir>/dictate/config.json when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the service base URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Do not attach branch/modified-file context to the stop request
    #[arg(long, global = true)]
    no_context: bool,

    /// Directory whose git state is used as context (defaults to the current directory)
    #[arg(long, global = true)]
    project_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Interactive host: type `/dictate` to start and stop recording
    Run,
    /// Probe the service once
    Health,
    /// Print the newest history entry
    Latest,
    /// Write the effective configuration to the config file
    InitConfig {
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let cfg = load_config(&cli)?;

    match cli.command.unwrap_or(Command::Run) {
        Command::Run => {
            let project_dir = match cli.project_dir {
                Some(dir) => dir,
                None => std::env::current_dir().context("resolve current directory")?,
            };
            run_host(&cfg, project_dir).await
        }
        Command::Health => {
            let service = build_service(&cfg)?;
            let status = service.client().check_health().await?;
            println!("{}: {}", service.client().base_url(), status.status);
            Ok(())
        }
        Command::Latest => {
            let service = build_service(&cfg)?;
            match service.client().latest_entry().await? {
                Some(entry) => {
                    println!("#{} raw: {}", entry.id, entry.raw_text);
                    if let Some(refined) = entry.refined() {
                        println!("#{} refined: {}", entry.id, refined);
                    }
                }
                None => println!("no history"),
            }
            Ok(())
        }
        Command::InitConfig { force } => {
            let path = cli
                .config
                .or_else(default_config_path)
                .context("no config directory on this platform; pass --config")?;
            if path.exists() && !force {
                anyhow::bail!("{} already exists (use --force)", path.display());
            }
            ConfigStore::at_path(&path).save(&cfg)?;
            println!("wrote {}", path.display());
            Ok(())
        }
    }
}

/// Defaults, then the config file, then `DICTATE_*` variables, then flags.
fn load_config(cli: &Cli) -> anyhow::Result<DictateConfig> {
    let mut cfg = match (&cli.config, default_config_path()) {
        // An explicit path must exist.
        (Some(path), _) => ConfigStore::at_path(path).load()?,
        (None, Some(path)) => ConfigStore::at_path(path).load_or_default()?,
        (None, None) => DictateConfig::default(),
    };

    apply_env_overrides(&mut cfg, |k| std::env::var(k).ok())?;
    if let Some(url) = &cli.base_url {
        cfg.base_url = url.clone();
    }
    if cli.no_context {
        cfg.include_context = false;
    }

    cfg.validate().context("invalid configuration")?;
    Ok(cfg)
}

async fn run_host(cfg: &DictateConfig, project_dir: PathBuf) -> anyhow::Result<()> {
    let prompt = Arc::new(PromptBuffer::new());
    let mut machine = build_machine_from_config(
        cfg,
        Arc::new(TerminalNotifier),
        prompt.clone(),
        Some(project_dir),
    )?;

    let registered = vec![machine.command().clone()];
    log::info!(
        "registered /{} ({}), service at {}",
        registered[0].name,
        registered[0].template,
        cfg.base_url
    );
    eprintln!("{}", command_listing(&registered));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("read stdin")? {
        if line.trim().is_empty() {
            continue;
        }

        if machine.on_command(&line).await == TriggerOutcome::Handled {
            continue;
        }

        match HostCommand::parse(&line) {
            HostCommand::ShowPrompt => println!("{}", prompt.contents()),
            HostCommand::SendPrompt => println!("{}", prompt.take()),
            HostCommand::Status => println!("{}", machine.state().label()),
            HostCommand::Commands => eprintln!("{}", command_listing(&registered)),
            HostCommand::Quit => break,
            HostCommand::Unknown(other) => eprintln!("unknown command: {other}"),
        }
    }

    if machine.is_recording() {
        log::warn!("exiting while the service is still recording; stop it from the service UI");
    }
    Ok(())
}
