mod cli;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};

fn main() {
    let args = Cli::parse();

    init_tracing(args.verbose);

    let result = match &args.command {
        Commands::Init => cli::commands::init::execute(&args.dir),
        Commands::Record {
            entity_class,
            entity_id,
            log_type,
            message,
        } => cli::commands::record::execute(
            &args.dir,
            entity_class,
            entity_id,
            (*log_type).into(),
            message,
        ),
        Commands::Log {
            document,
            user,
            limit,
            offset,
            sort,
            asc,
            json,
        } => cli::commands::log::execute(
            &args.dir,
            cli::commands::log::LogOptions {
                document: document.clone(),
                user: user.clone(),
                limit: *limit,
                offset: *offset,
                sort: *sort,
                asc: *asc,
                json: *json,
            },
        ),
    };

    if let Err(e) = result {
        cli::output::error(&format!("Error: {e}"));
        std::process::exit(1);
    }
}

/// Log to stderr. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "docs_audit=debug"
    } else {
        "docs_audit=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(std::io::stderr)
        .init();
}
