use crate::demo::{run_classify, run_demo, run_questions, ClassifyArgs, DemoArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use persona_discovery::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Personality Discovery",
    about = "Run the Personality Discovery questionnaire service or classify answers from the command line",
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
    /// Print the questionnaire
    Questions,
    /// Classify one answer sheet or a CSV batch of sheets
    Classify(ClassifyArgs),
    /// Run an end-to-end demo: register, submit, classify, notify
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

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Questions => run_questions(),
        Command::Classify(args) => run_classify(args),
        Command::Demo(args) => run_demo(args),
    }
}
