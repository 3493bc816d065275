use clap::Parser;
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use std::error::Error;
use std::io;
use subnet_calc::cli::{run, run_lines, Cli};

const DEFAULT_LOG_CONFIG: &str = "log4rs.yml";

/// Use the log4rs file when present, otherwise warnings to stderr.
fn init_logging() -> Result<(), Box<dyn Error>> {
    let path = std::env::var("SUBNET_CALC_LOG_CONFIG").unwrap_or_else(|_| DEFAULT_LOG_CONFIG.to_string());
    if log4rs::init_file(&path, Default::default()).is_ok() {
        return Ok(());
    }

    let stderr = ConsoleAppender::builder().target(Target::Stderr).build();
    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(LevelFilter::Warn))?;
    log4rs::init_config(config)?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    dotenv::dotenv().ok();
    init_logging()?;
    log::info!("#Start main()");

    let cli = Cli::parse();
    let mut stdout = io::stdout().lock();
    let code = if cli.stdin {
        if cli.no_color || cli.json {
            colored::control::set_override(false);
        }
        run_lines(io::stdin().lock(), &mut stdout)
    } else {
        run(&cli, &mut stdout)
    };

    std::process::exit(code);
}
