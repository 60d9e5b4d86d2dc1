// UI layer: a simple interactive menu using `dialoguer`.
// Every flow is synchronous: prompt, call the client, print the outcome.
// Errors from the service are shown and the menu carries on; nothing is
// retried automatically.

use crate::api::{DocumentRecord, RemoteDocumentClient, COLLECTION_TYPE};
use crate::config::Config;
use anyhow::Result;
use dialoguer::{Confirm, Input, Select};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main interactive menu. Runs a select loop until the user picks "Exit".
///
/// A newly registered device token is printed and kept in `config`; the
/// file at `config_path` is only written when the user agrees.
pub fn main_menu(
    mut api: RemoteDocumentClient,
    mut config: Config,
    config_path: &Path,
) -> Result<()> {
    loop {
        let items = vec![
            "Register device",
            "Refresh session",
            "List items",
            "Download item",
            "Exit",
        ];
        let selection = Select::new().items(&items).default(2).interact()?;
        match selection {
            0 => {
                let code = prompt_code()?;
                let spinner = spinner("Registering device...");
                let result = api.register_device(&code);
                spinner.finish_and_clear();
                match result {
                    Ok(token) => {
                        // The pairing code is spent; show the token so it is never lost.
                        println!("{}", accept_device_token(&mut config, &token));
                        offer_to_save(&config, config_path, "device token", true)?;
                    }
                    Err(e) => println!("Register failed: {}", e),
                }
            }
            1 => {
                let spinner = spinner("Requesting new session token...");
                let result = api.refresh_session();
                spinner.finish_and_clear();
                match result {
                    Ok(token) => {
                        // The running client switches to the new token at once;
                        // persisting it is the user's call.
                        api.set_session_token(&token);
                        println!("Session refreshed.");
                        let mut updated = config.clone();
                        updated.store_session_token(&token);
                        if offer_to_save(&updated, config_path, "session token", false)? {
                            config = updated;
                        }
                    }
                    Err(e) => println!("Refresh failed: {}", e),
                }
            }
            2 => {
                let spinner = spinner("Listing items...");
                let result = api.list_items();
                spinner.finish_and_clear();
                match result {
                    Ok(records) => print_listing(&records),
                    Err(e) => println!("Listing failed: {}", e),
                }
            }
            3 => {
                let id: String = Input::new().with_prompt("Document ID").interact_text()?;
                let spinner = spinner("Downloading...");
                let result = api.download_item(id.trim());
                spinner.finish_and_clear();
                match result {
                    Ok(record) => show_record(&record)?,
                    Err(e) => println!("Download failed: {}", e),
                }
            }
            4 => break,
            _ => {}
        }
    }
    Ok(())
}

/// First-time setup: no device token is configured, so register one
/// before the client can be built.
pub fn first_run(config: &mut Config, config_path: &Path) -> Result<()> {
    println!("No device token configured. Get a one-time code from the reMarkable web app.");
    let code = prompt_code()?;
    let spinner = spinner("Registering device...");
    let result = RemoteDocumentClient::register_new_device(&config.endpoints, &code);
    spinner.finish_and_clear();
    let token = result?;
    config.store_device_token(&token);
    if Confirm::new()
        .with_prompt(format!("Save device token to {}?", config_path.display()))
        .default(true)
        .interact()?
    {
        config.save(config_path)?;
    }
    Ok(())
}

fn prompt_code() -> Result<String> {
    let code: String = Input::new().with_prompt("One-time code").interact_text()?;
    Ok(code.trim().to_string())
}

fn spinner(message: &'static str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Keep a freshly issued device token in the in-memory config and return
/// the line that shows it to the user.
fn accept_device_token(config: &mut Config, token: &str) -> String {
    config.store_device_token(token);
    format!("Device registered. Device token: {}", token.trim())
}

/// Ask before writing the config back to disk. Returns whether it was saved.
fn offer_to_save(
    config: &Config,
    config_path: &Path,
    what: &str,
    default: bool,
) -> Result<bool> {
    let save = Confirm::new()
        .with_prompt(format!("Save {} to {}?", what, config_path.display()))
        .default(default)
        .interact()?;
    if save {
        config.save(config_path)?;
        println!("Saved.");
    }
    Ok(save)
}

fn print_listing(records: &[DocumentRecord]) {
    if records.is_empty() {
        println!("No items.");
        return;
    }
    for record in records {
        println!("{}", listing_line(record));
    }
}

/// One line per record: kind marker, ID, visible name.
fn listing_line(record: &DocumentRecord) -> String {
    let field = |key: &str| record.get(key).and_then(|v| v.as_str()).unwrap_or("?");
    let marker = if field("Type") == COLLECTION_TYPE { "d" } else { "-" };
    // "VissibleName" is the service's spelling.
    format!("{} {:<36} {}", marker, field("ID"), field("VissibleName"))
}

fn show_record(record: &DocumentRecord) -> Result<()> {
    let pretty = serde_json::to_string_pretty(record)?;
    println!("{}", pretty);
    if Confirm::new()
        .with_prompt("Write this record to a file?")
        .default(false)
        .interact()?
    {
        let path: String = Input::new().with_prompt("Output path").interact_text()?;
        std::fs::write(PathBuf::from(path.trim()), pretty)?;
        println!("Written.");
    }
    Ok(())
}
