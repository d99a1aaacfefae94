mod app;
mod config;
mod error;
mod options;
mod style;
mod term;
mod toml_parser;
mod util;

use app::App;
use error::AppError;
use llmswitch_lib::CredentialSet;
use options::Options;
use config::Config;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

fn setup_logging(verbose: bool) -> Result<(), AppError> {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|err| AppError::Error(format!("Failed to set up logging: {err}")))
}

fn run_app() -> Result<(), AppError> {
    let options = Options::load(std::env::args())?;
    let config: Config = options.try_into()?;

    setup_logging(config.verbose)?;

    App::new(config, CredentialSet::from_env())?.run()
}

fn main() {
    if let Err(e) = run_app() {
        eprintln!("ERROR: {e}");
        std::process::exit(1);
    }
}
