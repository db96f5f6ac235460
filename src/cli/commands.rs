//! CLI command implementations
//!
//! Every command that touches data bootstraps a fresh in-process catalog:
//! provision tables and bucket, load the configured seed file, then act.

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::app::App;
use crate::config::AppConfig;
use crate::http_server::HttpServer;
use crate::logging::init_tracing;
use crate::planner::{ExplainPlan, QueryPlanner};

use super::args::{Command, CriteriaArgs};
use super::errors::{CliError, CliResult};
use super::io::write_response;

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve { config, port } => serve(config.as_deref(), port),
        Command::Search { config, criteria } => search(config.as_deref(), &criteria),
        Command::Explain { criteria, text } => explain(&criteria, text),
    }
}

/// Load the config file if given, defaults otherwise, and start logging
fn load_config(path: Option<&Path>) -> CliResult<AppConfig> {
    let config = match path {
        Some(p) => AppConfig::load(p)?,
        None => AppConfig::default(),
    };
    init_tracing(config.log_json);
    if let Some(p) = path {
        info!(config = %p.display(), "configuration loaded");
    }
    Ok(config)
}

/// Bootstrap the catalog and serve HTTP until interrupted
pub fn serve(config_path: Option<&Path>, port: Option<u16>) -> CliResult<()> {
    let mut config = load_config(config_path)?;
    if let Some(port) = port {
        config.http.port = port;
    }

    let app = Arc::new(App::bootstrap(config)?);
    let server = HttpServer::new(app);

    // Start the async runtime and run the server
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server error: {}", e)))
    })
}

/// One-shot search printed as JSON
pub fn search(config_path: Option<&Path>, criteria: &CriteriaArgs) -> CliResult<()> {
    let config = load_config(config_path)?;
    let app = App::bootstrap(config)?;

    let results = app.search.search(&criteria.to_criteria());
    write_response(&results)
}

/// Explain a search; needs no configuration or data
pub fn explain(criteria: &CriteriaArgs, text: bool) -> CliResult<()> {
    init_tracing(false);

    let explain = match QueryPlanner::new().plan(&criteria.to_criteria()) {
        Ok(plan) => ExplainPlan::from_plan(&plan),
        Err(e) => ExplainPlan::from_error(&e),
    };

    if text {
        print!("{}", explain);
        Ok(())
    } else {
        write_response(&explain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_search_with_seed() {
        let mut seed = tempfile::NamedTempFile::new().unwrap();
        write!(
            seed,
            r#"{{"songs":[{{"title":"Hurt","artist":"Johnny Cash","year":"2002","album":"American IV"}}]}}"#
        )
        .unwrap();

        let mut config = tempfile::NamedTempFile::new().unwrap();
        write!(config, r#"{{"seed_file":{:?}}}"#, seed.path()).unwrap();

        let criteria = CriteriaArgs {
            artist: Some("Johnny Cash".into()),
            ..CriteriaArgs::default()
        };
        search(Some(config.path()), &criteria).unwrap();
    }

    #[test]
    fn test_search_missing_config() {
        let err = search(Some(Path::new("/nonexistent/musicat.json")), &CriteriaArgs::default()).unwrap_err();
        assert_eq!(err.code().code(), "MUSICAT_CLI_CONFIG_ERROR");
    }

    #[test]
    fn test_explain_rejected_is_not_an_error() {
        explain(&CriteriaArgs::default(), true).unwrap();
        explain(
            &CriteriaArgs {
                year: Some("abc".into()),
                ..CriteriaArgs::default()
            },
            false,
        )
        .unwrap();
    }
}
