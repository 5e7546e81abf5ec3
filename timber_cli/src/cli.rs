use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "timber - size timber beams, dowel joints and carpentry joints from JSON or TOML requests.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search the lightest beam cross-section that passes every check.
    CrossSection(RequestArgs),
    /// Search the dowel diameter with the highest capacity.
    Dowel(RequestArgs),
    /// Check one beam section against a slab building frame.
    Verify(RequestArgs),
    /// Report the design loads of a slab building.
    Loads(RequestArgs),
    /// Proportion a column tenon joint.
    Tenon(RequestArgs),
    /// Proportion a tie beam gooseneck joint.
    Gooseneck(RequestArgs),
    /// Proportion a column scarf joint.
    Scarf(RequestArgs),
    /// Run a request file carrying its own "type" tag.
    Run(RunArgs),
}

/// Arguments shared by the calculation subcommands.
#[derive(Args, Debug)]
pub struct RequestArgs {
    /// Request bundles as JSON, or TOML when the extension is `.toml`.
    /// Every field is optional; without a file all defaults apply.
    #[arg(short, long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Pretty-print the JSON result.
    #[arg(long)]
    pub pretty: bool,
}

/// Arguments for the `run` subcommand.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Tagged request file (JSON, or TOML when the extension is `.toml`).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Pretty-print the JSON result.
    #[arg(long)]
    pub pretty: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_subcommand_with_global_flags() {
        let cli = Cli::try_parse_from([
            "timber",
            "dowel",
            "--input",
            "joint.toml",
            "--pretty",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Dowel(args) => {
                assert_eq!(args.input, Some(PathBuf::from("joint.toml")));
                assert!(args.pretty);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["timber", "loads", "-q", "-v"]).is_err());
    }

    #[test]
    fn run_requires_input() {
        assert!(Cli::try_parse_from(["timber", "run"]).is_err());
    }
}
