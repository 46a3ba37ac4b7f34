use clap::Parser;
use getset::{CloneGetters, Getters};
use http::{HeaderName, HeaderValue};
use std::path::PathBuf;

#[derive(Parser, Debug, Getters, Clone, CloneGetters)]
#[command(name = "bp-gateway")]
#[command(
    about = "Checks a request against a block paths configuration",
    long_about = None
)]
pub struct Cli {
    #[getset(get_clone = "pub")]
    #[arg(
        default_value = "/etc/block-paths/config.yaml",
        env = "BLOCK_PATHS_CONFIG_FILE_PATH",
        long = "config-file-path"
    )]
    config_file_path: PathBuf,

    #[getset(get = "pub")]
    #[arg(default_value = "block-paths", env = "BLOCK_PATHS_NAME", long = "name")]
    name: String,

    #[getset(get = "pub")]
    #[arg(long = "path")]
    path: String,

    #[getset(get = "pub")]
    #[arg(long = "host")]
    host: Option<String>,

    #[getset(get = "pub")]
    #[arg(long = "header", value_parser = parse_header)]
    headers: Vec<(HeaderName, HeaderValue)>,
}

fn parse_header(s: &str) -> Result<(HeaderName, HeaderValue), String> {
    let (name, value) = s
        .split_once(':')
        .ok_or_else(|| format!("expected NAME:VALUE, got {s:?}"))?;
    let name = HeaderName::try_from(name.trim()).map_err(|e| e.to_string())?;
    let value = HeaderValue::try_from(value.trim()).map_err(|e| e.to_string())?;
    Ok((name, value))
}
