use crate::demo::{run_demo, run_recommend, DemoArgs, RecommendArgs};
use crate::server;
use build_advisor::error::AppError;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "Build Advisor",
    about = "Rank hero items for a play-style intent from the command line or over HTTP",
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
    /// Rank the items of a catalog export for an intent
    Recommend(RecommendArgs),
    /// Run the built-in catalog through every intent scenario
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
        Command::Recommend(args) => run_recommend(args),
        Command::Demo(args) => run_demo(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use build_advisor::engine::IntentKey;

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["build-advisor-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn recommend_parses_intent_and_lists() {
        let cli = Cli::try_parse_from([
            "build-advisor-api",
            "recommend",
            "--catalog",
            "items.csv",
            "--intent",
            "burst=1,tank=0.5",
            "--owned",
            "item_a,item_b",
            "--limit",
            "3",
            "--json",
        ])
        .expect("parses");

        let Some(Command::Recommend(args)) = cli.command else {
            panic!("expected recommend command");
        };
        assert_eq!(args.intent.raw(IntentKey::Burst), Some(1.0));
        assert_eq!(args.intent.raw(IntentKey::Tank), Some(0.5));
        assert_eq!(args.owned, vec!["item_a".to_string(), "item_b".to_string()]);
        assert_eq!(args.limit, Some(3));
        assert!(args.json);
        assert_eq!(args.hero, "cli_hero");
    }

    #[test]
    fn recommend_rejects_unknown_intent_keys() {
        let result = Cli::try_parse_from([
            "build-advisor-api",
            "recommend",
            "--catalog",
            "items.csv",
            "--intent",
            "farm=1",
        ]);
        assert!(result.is_err());
    }
}
