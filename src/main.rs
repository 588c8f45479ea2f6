use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use git_bump::classifier::ConventionalClassifier;
use git_bump::cli::{Cli, Command, Workflow};
use git_bump::config::{self, Config};
use git_bump::git::Git2Port;
use git_bump::store::CargoManifestStore;
use git_bump::ui;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match config::load_config(cli.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    if let Err(e) = run(cli.command, config) {
        ui::display_error(&e.to_string());
        std::process::exit(1);
    }

    Ok(())
}

fn run(command: Command, config: Config) -> Result<()> {
    let git = Git2Port::new();
    let store = CargoManifestStore::new();
    let classifier = ConventionalClassifier::new(config.classifier.clone())?;
    let workflow = Workflow::new(&git, &store, &classifier);

    match command {
        Command::Determine(args) => {
            let request = args.to_request(&config);
            let determination = workflow.determine_increment(&request)?;
            ui::display_determination(&determination, &request.branch_name);
        }
        Command::Increment(args) => {
            let request = args.to_request(&config);
            ui::display_status(&format!(
                "Determining increment for branch '{}'",
                request.branch_name
            ));
            let result = workflow.publish_with_determined_increment(&request)?;
            ui::display_determination(&result.determination, &request.branch_name);
            ui::display_outcome(&result.outcome);
        }
        Command::IncrementBy { increment, publish } => {
            let request = publish.to_request(&config);
            ui::display_status(&format!("Publishing '{}' increment", increment));
            let outcome = workflow.publish_with_increment(increment, &request)?;
            ui::display_outcome(&outcome);
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose {
        "git_bump=debug"
    } else {
        "git_bump=info"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
