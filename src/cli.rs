use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser, Debug)]
#[command(name = "project-sync")]
#[command(about = "Keep a GitHub Projects board in sync with an organization's issues", version)]
#[command(after_help = "EXAMPLES:
    project-sync add-recent               Add recently active issues/PRs to the project
    project-sync pain-scores              Recompute the User Pain Score field
    project-sync fields                   List the project's fields
    project-sync rate-limit               Show remaining GraphQL rate limit")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Organization login (overrides GH_ORGANIZATION_NAME and config)
    #[arg(long, global = true)]
    pub org: Option<String>,

    /// Project number (overrides GH_PROJECT_NUMBER and config)
    #[arg(long, global = true)]
    pub project: Option<u32>,

    /// Output as JSON for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress success messages
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Show debug logs and detailed error information
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add recently updated open issues and pull requests to the project
    #[command(after_help = "EXAMPLES:
    project-sync add-recent
    project-sync add-recent --days 30 --exclude-author app/renovate
    project-sync add-recent --dry-run")]
    AddRecent(AddRecentArgs),
    /// Compute pain scores from Type, Priority and Likelihood and write them back
    #[command(after_help = "EXAMPLES:
    project-sync pain-scores
    project-sync pain-scores --dry-run --json")]
    PainScores(PainScoresArgs),
    /// List project fields and their options
    #[command(after_help = "EXAMPLES:
    project-sync fields
    project-sync fields --org nextstrain --project 7 --json")]
    Fields,
    /// Show remaining GraphQL rate-limit points
    RateLimit,
    /// Generate shell completions
    #[command(after_help = "EXAMPLES:
    project-sync completions bash > ~/.bash_completion.d/project-sync
    project-sync completions zsh > ~/.zfunc/_project-sync")]
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
    /// Initialize configuration file interactively
    Init,
}

#[derive(Args, Debug, Clone)]
pub struct AddRecentArgs {
    /// Only include issues updated within this many days (default: 14)
    #[arg(long)]
    pub days: Option<u32>,

    /// Exclude issues authored by this login (repeatable; replaces the configured list)
    #[arg(long = "exclude-author", value_name = "LOGIN")]
    pub exclude_authors: Vec<String>,

    /// List matching issues without adding them
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args, Debug, Clone)]
pub struct PainScoresArgs {
    /// Print computed scores without writing them
    #[arg(long)]
    pub dry_run: bool,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_add_recent_args() {
        let cli = Cli::try_parse_from([
            "project-sync",
            "add-recent",
            "--days",
            "30",
            "--exclude-author",
            "a",
            "--exclude-author",
            "b",
            "--org",
            "nextstrain",
            "--project",
            "7",
        ])
        .unwrap();

        assert_eq!(cli.org.as_deref(), Some("nextstrain"));
        assert_eq!(cli.project, Some(7));
        match cli.command {
            Commands::AddRecent(args) => {
                assert_eq!(args.days, Some(30));
                assert_eq!(args.exclude_authors, vec!["a", "b"]);
                assert!(!args.dry_run);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["project-sync", "pain-scores", "--dry-run", "--json", "-q"])
            .unwrap();
        assert!(cli.json);
        assert!(cli.quiet);
        assert!(matches!(
            cli.command,
            Commands::PainScores(PainScoresArgs { dry_run: true })
        ));
    }

    #[test]
    fn test_project_must_be_numeric() {
        assert!(Cli::try_parse_from(["project-sync", "fields", "--project", "abc"]).is_err());
    }
}
