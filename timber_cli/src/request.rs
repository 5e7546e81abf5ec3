//! Request file loading.
//!
//! `.toml` files are read as TOML; `.json` files and files without an
//! extension as JSON.

use crate::error::{CliError, Result};
use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::debug;

enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> Result<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        None => Ok(Format::Json),
        Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Format::Json),
        Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(Format::Toml),
        Some(ext) => Err(CliError::Argument(format!(
            "Unsupported request file extension '.{ext}' (expected .json or .toml)"
        ))),
    }
}

/// Parse a request file into `T`.
pub fn parse<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let format = format_of(path)?;
    let content = std::fs::read_to_string(path)?;
    debug!(path = %path.display(), bytes = content.len(), "Read request file");
    match format {
        Format::Json => serde_json::from_str(&content).map_err(|source| CliError::Json {
            path: path.to_path_buf(),
            source,
        }),
        Format::Toml => toml::from_str(&content).map_err(|source| CliError::Toml {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Parse the request bundles, or fall back to all defaults without a file.
pub fn load<T: DeserializeOwned + Default>(path: Option<&Path>) -> Result<T> {
    match path {
        Some(path) => parse(path),
        None => Ok(T::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use timber_core::calculations::{CalculationRequest, DowelInput, VerifyInput};

    fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_json_bundles() {
        let file = write_temp(
            ".json",
            r#"{"cross_section": {"column_h": 100, "column_w": 112.5}}"#,
        );
        let input: DowelInput = load(Some(file.path())).unwrap();
        assert_eq!(input.cross_section.column_h, Some(100.0));
        assert_eq!(input.cross_section.column_w, Some(112.5));
        assert_eq!(input.cross_section.tie_beam_h, None);
    }

    #[test]
    fn loads_toml_bundles() {
        let file = write_temp(
            ".toml",
            "[cross_section]\nbeam_w = 0.04\nbeam_h = 0.06\n\n[footprint]\ncolumn_number = 8\n",
        );
        let input: VerifyInput = load(Some(file.path())).unwrap();
        assert_eq!(input.cross_section.beam_w, Some(0.04));
        assert_eq!(input.footprint.column_number, Some(8.0));
    }

    #[test]
    fn parses_tagged_toml_request() {
        let file = write_temp(".toml", "type = \"ScarfJoint\"\n\n[cross_section]\ncolumn_h = 150\n");
        let request: CalculationRequest = parse(file.path()).unwrap();
        assert_eq!(request.calc_type(), "ScarfJoint");
    }

    #[test]
    fn missing_file_means_defaults() {
        let input: VerifyInput = load(None).unwrap();
        assert_eq!(input, VerifyInput::default());
    }

    #[test]
    fn malformed_json_reports_path() {
        let file = write_temp(".json", "{not json");
        let err = parse::<DowelInput>(file.path()).unwrap_err();
        assert!(matches!(err, CliError::Json { .. }));
        assert!(err.to_string().contains(&file.path().display().to_string()));
    }

    #[test]
    fn unknown_extension_rejected() {
        let file = write_temp(".yaml", "material: {}");
        assert!(matches!(
            parse::<DowelInput>(file.path()),
            Err(CliError::Argument(_))
        ));
    }

    #[test]
    fn nonexistent_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        assert!(matches!(parse::<DowelInput>(&path), Err(CliError::Io(_))));
    }
}
