use bomup_core::logging;

mod cli;

use crate::cli::{CliCommand, Reported};

#[tokio::main]
async fn main() {
    logging::init_logging();

    // Parse CLI and dispatch.
    if let Err(err) = CliCommand::run_from_args().await {
        if err.downcast_ref::<Reported>().is_none() {
            eprintln!("bomup error: {:#}", err);
        }
        std::process::exit(1);
    }
}
