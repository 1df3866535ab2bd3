use crate::demo::{
    run_capital, run_demo, run_estimate, run_max_offer, run_project, run_score, CapitalArgs,
    DemoArgs, EstimateArgs, MaxOfferArgs, ProjectArgs, ScoreArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use dealscope::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Deal Underwriting Service",
    about = "Underwrite rental acquisitions and rehab budgets from the command line",
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
    /// Project cash flow, equity, and returns for a deal
    Underwrite {
        #[command(subcommand)]
        command: UnderwriteCommand,
    },
    /// Score condition assessments and price rehab budgets
    Rehab {
        #[command(subcommand)]
        command: RehabCommand,
    },
    /// Run an end-to-end walkthrough on a sample duplex
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum UnderwriteCommand {
    /// Underwrite a deal described by a JSON inputs file
    Project(ProjectArgs),
    /// Solve for the highest offer that still meets a target DSCR
    MaxOffer(MaxOfferArgs),
}

#[derive(Subcommand, Debug)]
enum RehabCommand {
    /// Score a structured condition assessment into a budget tier
    Score(ScoreArgs),
    /// Price a rehab tier for a building
    Estimate(EstimateArgs),
    /// Break down the capital a bridge-financed rehab consumes
    Capital(CapitalArgs),
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
        Command::Underwrite {
            command: UnderwriteCommand::Project(args),
        } => run_project(args),
        Command::Underwrite {
            command: UnderwriteCommand::MaxOffer(args),
        } => run_max_offer(args),
        Command::Rehab {
            command: RehabCommand::Score(args),
        } => run_score(args),
        Command::Rehab {
            command: RehabCommand::Estimate(args),
        } => run_estimate(args),
        Command::Rehab {
            command: RehabCommand::Capital(args),
        } => run_capital(args),
        Command::Demo(args) => run_demo(args),
    }
}
