use crate::cli::Commands;
use crate::error::Result;
use crate::request;
use timber_core::calculations::{CalculationOutput, CalculationRequest};
use tracing::info;

/// Build the calculation request a subcommand stands for.
///
/// Returns the request and whether the result should be pretty-printed.
pub fn request_for(command: &Commands) -> Result<(CalculationRequest, bool)> {
    let (request, pretty) = match command {
        Commands::CrossSection(args) => (
            CalculationRequest::CrossSection(request::load(args.input.as_deref())?),
            args.pretty,
        ),
        Commands::Dowel(args) => (
            CalculationRequest::Dowel(request::load(args.input.as_deref())?),
            args.pretty,
        ),
        Commands::Verify(args) => (
            CalculationRequest::Verify(request::load(args.input.as_deref())?),
            args.pretty,
        ),
        Commands::Loads(args) => (
            CalculationRequest::Loads(request::load(args.input.as_deref())?),
            args.pretty,
        ),
        Commands::Tenon(args) => (
            CalculationRequest::TenonJoint(request::load(args.input.as_deref())?),
            args.pretty,
        ),
        Commands::Gooseneck(args) => (
            CalculationRequest::GooseneckJoint(request::load(args.input.as_deref())?),
            args.pretty,
        ),
        Commands::Scarf(args) => (
            CalculationRequest::ScarfJoint(request::load(args.input.as_deref())?),
            args.pretty,
        ),
        Commands::Run(args) => (request::parse(&args.input)?, args.pretty),
    };
    Ok((request, pretty))
}

pub fn render(output: &CalculationOutput, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(output)?
    } else {
        serde_json::to_string(output)?
    };
    Ok(json)
}

/// Execute a subcommand and return the JSON to print.
pub fn run(command: &Commands) -> Result<String> {
    let (request, pretty) = request_for(command)?;
    info!("Dispatching to '{}' calculation.", request.calc_type());
    let output = request.execute()?;
    render(&output, pretty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{RequestArgs, RunArgs};
    use crate::error::CliError;
    use std::io::Write;

    fn defaults() -> RequestArgs {
        RequestArgs {
            input: None,
            pretty: false,
        }
    }

    #[test]
    fn verify_defaults_prints_true() {
        assert_eq!(run(&Commands::Verify(defaults())).unwrap(), "true");
    }

    #[test]
    fn infeasible_dowel_prints_null() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(br#"{"cross_section": {"column_w": 10, "column_h": 10}}"#)
            .unwrap();
        let args = RequestArgs {
            input: Some(file.path().to_path_buf()),
            pretty: false,
        };
        assert_eq!(run(&Commands::Dowel(args)).unwrap(), "null");
    }

    #[test]
    fn pretty_output_spans_lines() {
        let args = RequestArgs {
            input: None,
            pretty: true,
        };
        let json = run(&Commands::Tenon(args)).unwrap();
        assert!(json.lines().count() > 1);
        assert!(json.contains("\"ttl_clm = 42.33\""));
    }

    #[test]
    fn run_dispatches_on_type_tag() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(br#"{"type": "GooseneckJoint", "footprint": {"height": 3}}"#)
            .unwrap();
        let args = RunArgs {
            input: file.path().to_path_buf(),
            pretty: false,
        };
        let value: serde_json::Value = serde_json::from_str(&run(&Commands::Run(args)).unwrap()).unwrap();
        assert_eq!(value["jc5"]["value"], 60.0);
    }

    #[test]
    fn core_errors_surface_as_cli_errors() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(b"[footprint]\ncolumn_number = 2\n").unwrap();
        let args = RequestArgs {
            input: Some(file.path().to_path_buf()),
            pretty: false,
        };
        assert!(matches!(run(&Commands::Verify(args)), Err(CliError::Core(_))));
    }
}
