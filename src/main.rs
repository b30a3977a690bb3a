use clap::Parser;
use ttr::app::{handle_fatal_error, init_logging, AppConfig};
use ttr::cli::{execute, load_config, Cli};

fn main() {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => handle_fatal_error(e, cli.verbose),
    };

    let app_config =
        AppConfig::new(cli.verbose).with_log_level(cli.log_level.clone().or(config.log_level.clone()));
    init_logging(&app_config);

    if let Err(e) = execute(&cli, config) {
        handle_fatal_error(e, cli.verbose);
    }
}
