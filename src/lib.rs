// Library root
// -----------
// This crate exposes the reMarkable cloud client as a library. The binary
// (`main.rs`) wires these modules into an interactive CLI.
//
// Module responsibilities:
// - `api`: the blocking HTTP client for the auth and document-storage
//   services (register device, refresh session, list, download).
// - `config`: loads credentials and endpoints from a TOML file.
// - `error`: the error kinds surfaced by the client.
// - `logging`: tracing subscriber setup for the binary.
// - `ui`: terminal menu flows that delegate to `api`.
pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod ui;

pub use api::{DocumentRecord, RemoteDocumentClient};
pub use config::{Config, Credentials};
pub use error::{ClientError, ConfigError};
