pub mod args;
pub mod commands;

pub use args::{ConfigArgs, FormArgs, LaunchCommandArgs, ResolveArgs, ServeArgs};
use clap::{Parser, Subcommand};
use std::path::Path;

const HELP_TEMPLATE: &str = "\
{name} {version}\n\
{about-with-newline}\n\
USAGE:\n    {usage}\n\
\nOPTIONS:\n{options}\n\
COMMANDS:\n{subcommands}\n";

#[derive(Parser)]
#[command(name = "nfparams")]
#[command(version = crate::VERSION)]
#[command(about = "Nextflow parameter forms: render schemas, resolve submissions, build launch commands")]
#[command(help_template = HELP_TEMPLATE)]
#[command(
    after_long_help = "Typical flow: render the form, resolve a submission into a params file, then launch the workflow with it."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    #[command(
        about = "Render the parameter form",
        long_about = "Form walks the parameter schema and prints one card per definition group, as HTML markup or as a JSON field tree.",
        after_help = "Example:\n    nfparams form --schema nextflow_schema.json --format json"
    )]
    Form(FormArgs),
    #[command(
        about = "Resolve submitted values into a params file",
        long_about = "Resolve casts submitted values, fills schema defaults, checks file parameters, validates the result and writes a content-addressed params file.",
        after_help = "Example:\n    nfparams resolve --param input='/data/*.fq' --param skip_qc=true --print-command"
    )]
    Resolve(ResolveArgs),
    #[command(
        about = "Serve the parameter form over HTTP",
        long_about = "Serve answers GET / with the form page and resolves POSTed submissions into params files.",
        after_help = "Example:\n    nfparams serve --bind 127.0.0.1:8085"
    )]
    Serve(ServeArgs),
    #[command(
        about = "Print the launch command from NXF_USER_* variables",
        long_about = "Launch-command reads NXF_USER_WORKFLOW, NXF_USER_REVISION, NXF_USER_PARAMS, NXF_USER_ENDPOINT and NXF_USER_PROFILE and prints the nextflow command line, one argument per line.",
        after_help = "Example:\n    NXF_USER_WORKFLOW=nf-core/rnaseq nfparams launch-command"
    )]
    LaunchCommand(LaunchCommandArgs),
}

impl Command {
    /// Configuration file named on the command line, if any.
    pub fn config_path(&self) -> Option<&Path> {
        match self {
            Command::Form(args) => args.common.config.as_deref(),
            Command::Resolve(args) => args.common.config.as_deref(),
            Command::Serve(args) => args.common.config.as_deref(),
            Command::LaunchCommand(_) => None,
        }
    }
}

pub async fn run(args: Args) -> crate::Result<()> {
    match args.command {
        Command::Form(form_args) => commands::form(form_args).await,
        Command::Resolve(resolve_args) => commands::resolve(resolve_args).await,
        Command::Serve(serve_args) => commands::serve(serve_args).await,
        Command::LaunchCommand(launch_args) => commands::launch_command(launch_args).await,
    }
}
