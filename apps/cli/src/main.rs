//! # foodies
//!
//! Entry point. The setup lives in the library so it can be tested.

use clap::Parser;
use foodies_cli::{init_tracing, run, Cli};

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(output) => println!("{}", output),
        Err(e) => {
            tracing::debug!(code = e.code.as_str(), "Command failed");
            eprintln!("error: {}", e);
            std::process::exit(e.code.exit_code());
        }
    }
}
