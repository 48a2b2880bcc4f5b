use colored::Colorize;
use s3sender::cli::{run, start};
use std::process::exit;

#[tokio::main]
async fn main() {
    let invocation = match start() {
        Ok(invocation) => invocation,
        Err(e) => {
            eprintln!("{} {e:#}", "Error:".red());
            exit(1);
        }
    };

    if let Err(e) = run(invocation).await {
        eprintln!("{} {e:#}", "Error:".red());
        exit(1);
    }
}
