//! Wiring from parsed commands to the library handlers.

use std::io;

use camino::Utf8Path;
use prwatch::config::SourceConfig;
use prwatch::local::{ProcessGitRunner, SourceFetcher, SshCredentials};
use prwatch::resource::{CheckRequest, InRequest, OutRequest};
use prwatch::{
    BuildEnvironment, CheckHandler, InHandler, OctocrabGateway, OutHandler, ResourceConfig,
    ResourceError,
};

use super::Command;
use super::output::write_response;

/// Reads the configuration from stdin and runs `command`.
///
/// # Errors
///
/// Returns the first configuration, GitHub, git, or I/O failure.
pub async fn run(command: &Command) -> Result<(), ResourceError> {
    let config = ResourceConfig::from_reader(io::stdin().lock())?;
    let environment = BuildEnvironment::from_env();

    match command {
        Command::Check => run_check(&config, &environment).await,
        Command::In { destination } => run_in(&config, destination.as_deref()).await,
        Command::Out { sources } => run_out(&config, &environment, sources.as_deref()).await,
    }
}

async fn run_check(
    config: &ResourceConfig,
    environment: &BuildEnvironment,
) -> Result<(), ResourceError> {
    let request = CheckRequest::from_config(config, environment)?;
    let gateway = connect(&config.source)?;
    let versions = CheckHandler::new(&gateway).run(&request).await?;
    write_response(&versions)
}

async fn run_in(
    config: &ResourceConfig,
    destination: Option<&Utf8Path>,
) -> Result<(), ResourceError> {
    let request = InRequest::from_config(config, destination)?;
    let gateway = connect(&config.source)?;
    let ssh = SshCredentials::for_current_user(config.source.host()?)?;
    let fetcher = SourceFetcher::new(ProcessGitRunner::default(), ssh);
    let response = InHandler::new(&gateway, &fetcher).run(&request).await?;
    write_response(&response)
}

async fn run_out(
    config: &ResourceConfig,
    environment: &BuildEnvironment,
    sources: Option<&Utf8Path>,
) -> Result<(), ResourceError> {
    let request = OutRequest::from_config(config, environment, sources)?;
    let gateway = connect(&config.source)?;
    let response = OutHandler::new(&gateway).run(&request).await?;
    write_response(&response)
}

fn connect(source: &SourceConfig) -> Result<OctocrabGateway, ResourceError> {
    let token = source.require_token()?;
    let api_base = source.api_base()?;
    OctocrabGateway::for_token(&token, &api_base)
}
