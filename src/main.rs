use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use newsverdict_rs::analytics::{LogStats, ReportFormat};
use newsverdict_rs::audit::AuditLog;
use newsverdict_rs::config::Settings;
use newsverdict_rs::server::{run_server, AppState};
use newsverdict_rs::Verifier;

#[derive(Parser)]
#[command(name = "newsverdict", version, about = "Trust verdicts for news text")]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
    /// TOML settings file
    #[arg(long, global = true, env = "NEWSVERDICT_CONFIG")]
    config: Option<PathBuf>,
    /// Directory with tfidf_vectorizer.json and fake_news_model.json
    #[arg(long, global = true, env = "NEWSVERDICT_MODEL_DIR")]
    model_dir: Option<PathBuf>,
    /// Prediction log appended to on every check
    #[arg(long, global = true, env = "NEWSVERDICT_AUDIT_LOG")]
    audit_log: Option<PathBuf>,
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Cmd {
    /// Run the HTTP front end
    Serve {
        #[arg(long, default_value = "0.0.0.0")]
        host: String,
        #[arg(long, env = "PORT", default_value_t = 5000)]
        port: u16,
    },
    /// Verify one text and print the result as JSON
    Check {
        #[arg(long, conflicts_with = "input_file")]
        text: Option<String>,
        #[arg(long)]
        input_file: Option<PathBuf>,
    },
    /// Summarize the prediction log
    Report {
        #[arg(long, value_enum, default_value_t = ReportFormat::Json)]
        format: ReportFormat,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "newsverdict_rs=debug" } else { "newsverdict_rs=info" };
    let filter = EnvFilter::try_from_env("NEWSVERDICT_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry().with(fmt::layer().with_writer(std::io::stderr)).with(filter).init();
}

fn settings(cli: &Cli) -> Result<Settings> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(dir) = &cli.model_dir {
        settings.model_dir = dir.clone();
    }
    if let Some(path) = &cli.audit_log {
        settings.audit_log = path.clone();
    }
    Ok(settings)
}

async fn open_audit(settings: &Settings) -> Result<Arc<AuditLog>> {
    let log = AuditLog::open(&settings.audit_log)
        .await
        .with_context(|| format!("opening audit log {}", settings.audit_log.display()))?;
    Ok(Arc::new(log))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let settings = settings(&cli)?;

    match cli.cmd {
        Cmd::Serve { host, port } => {
            let state = AppState {
                verifier: Arc::new(Verifier::from_settings(&settings)?),
                audit: open_audit(&settings).await?,
            };
            run_server(state, &format!("{host}:{port}")).await?;
        }
        Cmd::Check { text, input_file } => {
            let text = match (text, input_file) {
                (Some(text), _) => text,
                (None, Some(path)) => tokio::fs::read_to_string(&path)
                    .await
                    .with_context(|| format!("reading {}", path.display()))?,
                (None, None) => bail!("pass --text or --input-file"),
            };
            let verifier = Verifier::from_settings(&settings)?;
            let audit = open_audit(&settings).await?;
            let result = verifier.verify(&text).await;
            audit.record(result.verdict, &text).await;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Cmd::Report { format } => {
            let stats = LogStats::from_path(&settings.audit_log)
                .await
                .with_context(|| format!("reading {}", settings.audit_log.display()))?;
            println!("{}", stats.render(format)?);
        }
    }
    Ok(())
}
