use clap::Parser;

use imgbox::{
    cli::Cli,
    constants::EXIT_FAILURE,
    runtime::Orchestrator,
    utils::init_logger,
};

#[tokio::main]
async fn main() {
    // Parse CLI arguments; usage errors exit with code 2
    let cli = Cli::parse();

    init_logger(cli.log_level());

    let orchestrator = match Orchestrator::new(cli) {
        Ok(orchestrator) => orchestrator,
        Err(e) => {
            eprintln!("{:#}", e);
            std::process::exit(EXIT_FAILURE);
        }
    };

    let exit_code = orchestrator.run().await;
    std::process::exit(exit_code);
}
