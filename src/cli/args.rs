use crate::core::types::FormFormat;
use clap::Args;
use std::path::PathBuf;

/// Options shared by every command that reads the configuration.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Configuration file (default: ./nfparams.toml)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Parameter schema to use instead of the configured or derived one
    #[arg(long, value_name = "FILE")]
    pub schema: Option<PathBuf>,

    /// User whose home and Nextflow directories are used (default: $USER)
    #[arg(long, value_name = "NAME")]
    pub user: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct FormArgs {
    #[command(flatten)]
    pub common: ConfigArgs,

    /// Output format: html markup or the json field tree (default: html)
    #[arg(long, default_value = "html", value_name = "FORMAT")]
    pub format: FormFormat,
}

#[derive(Args, Debug, Clone)]
pub struct ResolveArgs {
    #[command(flatten)]
    pub common: ConfigArgs,

    /// Submitted value; repeat a name to submit it several times
    #[arg(long = "param", value_name = "NAME=VALUE", value_parser = parse_param)]
    pub params: Vec<(String, String)>,

    /// Directory the params file is written to (default: runtime params dir)
    #[arg(long, value_name = "DIR")]
    pub params_dir: Option<PathBuf>,

    /// Also print the launch command line
    #[arg(long)]
    pub print_command: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    #[command(flatten)]
    pub common: ConfigArgs,

    /// Address to listen on (default: server.bind, 127.0.0.1:8085)
    #[arg(long, value_name = "ADDR")]
    pub bind: Option<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct LaunchCommandArgs {
    /// Print the environment handed to the launcher as NAME=VALUE lines instead
    #[arg(long)]
    pub env: bool,
}

/// Split `NAME=VALUE` at the first `=`; the value may be empty.
pub fn parse_param(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected NAME=VALUE, got '{}'", raw)),
    }
}
