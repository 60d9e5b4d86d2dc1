// Entrypoint for the CLI application.
// - Keeps `main` small: set up logging, load the config, build the client
//   and hand it to the UI loop.
// - With no config file or no device token yet, the user is walked through
//   device registration first.

use anyhow::Context;
use rmcloud_cli::{
    api::RemoteDocumentClient,
    config::Config,
    error::ConfigError,
    logging,
    ui::{first_run, main_menu},
};

fn main() -> anyhow::Result<()> {
    logging::init();

    // `$RMCLOUD_CONFIG` or `<config dir>/rmcloud/config.toml`.
    let config_path = Config::default_path();
    let mut config = if config_path.exists() {
        Config::load(&config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?
    } else {
        Config::default()
    };

    if let Err(ConfigError::MissingKey(_)) = config.credentials() {
        first_run(&mut config, &config_path)?;
    }
    let api = RemoteDocumentClient::new(&config).context("Failed to build API client")?;

    // Blocks until the user chooses "Exit".
    main_menu(api, config, &config_path)?;
    Ok(())
}
