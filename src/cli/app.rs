//! CLI definitions and entry point

use std::io::Write as _;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use colored::Colorize;

use super::commands::{self, Context};
use spida_webhook::config::WebhookConfig;
use spida_webhook::http::ReqwestTransport;
use spida_webhook::logging::{LogLevel, Logger};
use spida_webhook::output::OutputMode;

/// spida-webhook - relay webhook results back to a SPIDAmin project
#[derive(Parser, Debug)]
#[command(
    name = "spida-webhook",
    version,
    about = "Relay webhook results back to a SPIDAmin project",
    long_about = "Reads the webhook payload (JSON) from stdin and updates the project on the\n\
                  SPIDAmin server named by the payload's minServer and apiToken.\n\n\
                  The project id defaults to payload.part.id; pass --project-id to target\n\
                  another project."
)]
pub struct Cli {
    /// Log level: none, error, info, debug (scriptParam.logLevel in the payload wins)
    #[arg(long, global = true)]
    pub log_level: Option<LogLevel>,

    /// Config file (default: $SPIDA_WEBHOOK_CONFIG or ~/.config/spida-webhook/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output in JSON format (machine-readable)
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Project selection shared by every project command
#[derive(Args, Debug, Clone, Copy)]
pub struct ProjectArg {
    /// Project id (default: payload.part.id)
    #[arg(long)]
    pub project_id: Option<u64>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Set the project's status
    Status {
        /// New status (workflow event name)
        status: String,

        #[command(flatten)]
        project: ProjectArg,
    },

    /// Add a message to the project's log
    LogMessage {
        /// What triggered the message
        #[arg(long)]
        trigger: String,

        /// Message text
        #[arg(short, long)]
        message: String,

        /// Record the triggering action as failed
        #[arg(long)]
        failed: bool,

        #[command(flatten)]
        project: ProjectArg,
    },

    /// Attach project codes
    Codes {
        /// Code values
        #[arg(required = true)]
        values: Vec<String>,

        #[command(flatten)]
        project: ProjectArg,
    },

    /// Replace a data form on the project
    Form {
        /// Form title
        #[arg(short, long)]
        title: String,

        /// Field as label=value (repeatable)
        #[arg(short, long = "field", value_parser = parse_field)]
        fields: Vec<(String, String)>,

        #[command(flatten)]
        project: ProjectArg,
    },

    /// Fetch the project from the server
    Fetch {
        /// Include project details
        #[arg(long)]
        details: bool,

        #[command(flatten)]
        project: ProjectArg,
    },

    /// Print the value of a field on a data form
    FormValue {
        /// Form title
        #[arg(long)]
        form: String,

        /// Field label
        #[arg(long)]
        field: String,

        /// Fetch the project from the server instead of reading payload.part
        #[arg(long)]
        fetch: bool,

        #[command(flatten)]
        project: ProjectArg,
    },

    /// Show version
    Version,
}

/// Parse a `label=value` pair
fn parse_field(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .ok_or_else(|| format!("Invalid field: {s}. Use: label=value"))
}

/// Install the stderr log writer
///
/// Records are already gated by [`Logger`]; the filter only keeps other
/// crates quiet unless `RUST_LOG` asks for them.
fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("spida_webhook=debug"))
        .format(|buf, record| {
            let tag = match record.level() {
                log::Level::Error => "ERROR".red().bold(),
                log::Level::Warn => "WARN".yellow(),
                log::Level::Info => "INFO".green(),
                log::Level::Debug | log::Level::Trace => "DEBUG".dimmed(),
            };
            writeln!(buf, "[{tag}] {}", record.args())
        })
        .init();
}

fn print_version(output_mode: OutputMode) {
    if output_mode == OutputMode::Json {
        println!(
            "{}",
            serde_json::json!({
                "version": env!("CARGO_PKG_VERSION")
            })
        );
    } else {
        println!("spida-webhook v{}", env!("CARGO_PKG_VERSION"));
    }
}

/// Run the CLI
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    let command = match cli.command {
        Some(Command::Version) => {
            print_version(output_mode);
            return Ok(());
        },
        None => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": env!("CARGO_PKG_VERSION"),
                        "hint": "Use --help for usage"
                    })
                );
            } else {
                print_version(output_mode);
                println!("\nRun 'spida-webhook --help' for usage");
            }
            return Ok(());
        },
        Some(command) => command,
    };

    let config = WebhookConfig::load(cli.config.as_deref())?;
    init_logging();

    let mut logger = Logger::new(config.effective_log_level(cli.log_level));
    let payload = spida_webhook::read_stdin_payload(&mut logger).await?;
    let transport = ReqwestTransport::new();

    let ctx = Context {
        payload: &payload,
        config: &config,
        transport: &transport,
        logger: &logger,
        output_mode,
    };

    match command {
        Command::Status { status, project } => commands::status(&ctx, project, &status).await,
        Command::LogMessage {
            trigger,
            message,
            failed,
            project,
        } => commands::log_message(&ctx, project, &trigger, &message, !failed).await,
        Command::Codes { values, project } => commands::codes(&ctx, project, values).await,
        Command::Form {
            title,
            fields,
            project,
        } => commands::form(&ctx, project, &title, fields).await,
        Command::Fetch { details, project } => commands::fetch(&ctx, project, details).await,
        Command::FormValue {
            form,
            field,
            fetch,
            project,
        } => commands::form_value(&ctx, project, &form, &field, fetch).await,
        Command::Version => Ok(()),
    }
}
