// src/bin/init-test-env.rs

use clap::Parser;
use server_devtools::cli::BootstrapArgs;
use server_devtools::errors::{write_report, DevtoolsError};
use server_devtools::{logging, run_bootstrap};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(err) = run_main().await {
        let _ = write_report(&err, "init-test-env", &mut std::io::stderr().lock());
        std::process::exit(err.exit_code());
    }
}

async fn run_main() -> Result<(), DevtoolsError> {
    let args = BootstrapArgs::parse();
    logging::init_logging(args.log_level)?;
    run_bootstrap(args).await
}
