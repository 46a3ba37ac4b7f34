mod cli;

use crate::cli::Cli;
use anyhow::{Context, Result};
use bp_core::config::serde::read_configuration_file;
use bp_core::instrumentation::init_instrumentation;
use bp_gateway::http::filters::block_paths::BlockPathsFilterHandler;
use clap::Parser;
use http::header::HOST;
use http::{HeaderValue, Request};
use std::process::ExitCode;

fn main() -> Result<ExitCode> {
    init_instrumentation();

    let args = Cli::parse();

    let config_file_path = args.config_file_path();
    let config = read_configuration_file(&config_file_path).with_context(|| {
        format!(
            "Failed to read configuration from {}",
            config_file_path.display()
        )
    })?;

    let handler = BlockPathsFilterHandler::new(args.name().clone(), &config)
        .context("Failed to create block paths filter")?;

    let mut request = Request::builder().uri(args.path().as_str());
    if let Some(host) = args.host() {
        request = request.header(HOST, HeaderValue::try_from(host.as_str())?);
    }
    for (name, value) in args.headers() {
        request = request.header(name.clone(), value.clone());
    }
    let request = request.body(()).context("Failed to build request")?;

    let evaluation = handler.evaluate(&request);

    println!("path: {}", evaluation.path());
    println!("decision: {}", evaluation.decision());
    if let Some(pattern) = evaluation.matched_pattern() {
        println!("matched pattern: {pattern}");
    }
    if !evaluation.client_addrs().is_empty() {
        println!("client addresses: {}", evaluation.client_addrs());
    }
    for error in evaluation.client_addrs().errors() {
        println!("ignored address: {error}");
    }

    if evaluation.is_blocked() {
        println!("status: {}", handler.status_code());
        Ok(ExitCode::FAILURE)
    } else {
        println!("status: passed to next handler");
        Ok(ExitCode::SUCCESS)
    }
}
