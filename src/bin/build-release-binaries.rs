// src/bin/build-release-binaries.rs

use clap::Parser;
use server_devtools::cli::ExtractArgs;
use server_devtools::errors::{write_report, DevtoolsError};
use server_devtools::{logging, run_extract};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(err) = run_main().await {
        let _ = write_report(&err, "build-release-binaries", &mut std::io::stderr().lock());
        std::process::exit(err.exit_code());
    }
}

async fn run_main() -> Result<(), DevtoolsError> {
    let args = ExtractArgs::parse();
    logging::init_logging(args.log_level)?;
    run_extract(args).await?;
    println!("Done");
    Ok(())
}
