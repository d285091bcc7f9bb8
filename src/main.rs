mod cli;
mod config;
mod error;
mod output;
mod travis;

use std::process;

use cli::Cli;
use env_logger::Env;
use log::{error, info};

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    output::print_banner();

    let cli = Cli::parse_or_exit();
    info!("Starting cigate - Travis CI build gate");

    // Every path leaves through an explicit exit code: 0 only for a passed
    // build, 1 for a failed build and for every fatal error.
    let code = match cli.execute().await {
        Ok(outcome) => outcome.exit_code(),
        Err(e) => {
            error!("{e:#}");
            1
        }
    };

    process::exit(code);
}
