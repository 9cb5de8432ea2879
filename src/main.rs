use clap::Parser;
use log::{info, warn, LevelFilter};
use snafu::ErrorCompat;

mod args;
mod ipa;

fn main() {
    let args = args::Args::parse();

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    // RUST_LOG still takes precedence.
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    info!("args: {:?}", args);

    if let Err(e) = ipa::run_ipa(&args) {
        warn!("Error occured {:?}", e);
        eprintln!("An error occured: {}", e);
        if let Some(bt) = ErrorCompat::backtrace(&e) {
            eprintln!("trace: {}", bt);
        }
        std::process::exit(1);
    }
}
