use crate::demo::{run_demo, run_report, run_score, DemoArgs, ReportArgs, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use sam_health::config::AppConfig;
use sam_health::error::AppError;
use sam_health::telemetry;

#[derive(Parser, Debug)]
#[command(
    name = "SAM Health Check",
    about = "Score software asset management KPIs and render the SAM health report",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score calculator input and print the dashboard
    Score(ScoreArgs),
    /// Render the PDF report, optionally running the lead flow
    Report(ReportArgs),
    /// Walk through a sample calculator session
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    if let Command::Serve(args) = command {
        return server::run(args).await;
    }

    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    // content and lead adapters block on HTTP
    tokio::task::spawn_blocking(move || match command {
        Command::Score(args) => run_score(args),
        Command::Report(args) => run_report(args, &config.sam),
        Command::Demo(args) => run_demo(args, &config.sam),
        Command::Serve(_) => Ok(()),
    })
    .await?
}
