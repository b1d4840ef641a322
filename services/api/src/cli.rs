use crate::demo::{run_catalog, run_demo, run_evaluate, CatalogArgs, DemoArgs, EvaluateArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use impact_badges::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Impact Badges",
    about = "Evaluate and serve researcher impact badges from the command line",
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
    /// Print the badge legend in catalog order
    Catalog(CatalogArgs),
    /// Evaluate a researcher aggregate read from a JSON file
    Evaluate(EvaluateArgs),
    /// Evaluate a built-in sample researcher and print the awarded badges
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
        Command::Catalog(args) => run_catalog(args),
        Command::Evaluate(args) => run_evaluate(args),
        Command::Demo(args) => run_demo(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluate_requires_person_file() {
        let parsed = Cli::try_parse_from(["impact-badges", "evaluate"]);
        assert!(parsed.is_err());

        let cli = Cli::try_parse_from([
            "impact-badges",
            "evaluate",
            "--person",
            "researcher.json",
            "--today",
            "2026-01-31",
        ])
        .expect("arguments parse");
        match cli.command {
            Some(Command::Evaluate(args)) => {
                assert_eq!(args.person.to_str(), Some("researcher.json"));
                assert!(args.reference_scores.is_none());
                assert!(args.today.is_some());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["impact-badges"]).expect("arguments parse");
        assert!(cli.command.is_none());
    }
}
