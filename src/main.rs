use clap::Parser;
use inkpost::{build_site, Args};
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    match build_site(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Build failed: {e}");
            ExitCode::FAILURE
        }
    }
}
