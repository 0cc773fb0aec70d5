use clap::Parser;
use nfparams::cli::{self, Args};
use nfparams::logging;

#[tokio::main]
async fn main() -> nfparams::Result<()> {
    let args = Args::parse();
    let _guard = logging::init(&args.command)?;
    cli::run(args).await
}
