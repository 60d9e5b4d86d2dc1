// Error kinds returned by the client. Callers can tell "the service
// rejected the request" (`Api`) apart from "the service was unreachable"
// (`Transport`) and from a broken local setup (`Config`).

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by `RemoteDocumentClient` operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The service answered with a status other than 200. `message` is the
    /// raw response body, untouched.
    #[error("HTTPError {}: {message}", status_label(.status_code))]
    Api {
        message: String,
        status_code: Option<u16>,
    },

    /// No usable response was received (DNS, refused connection, TLS,
    /// timeout, or the body could not be read).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A 200 response whose body was not the expected JSON.
    #[error("could not decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl ClientError {
    /// HTTP status of an `Api` error, `None` for every other kind.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ClientError::Api { status_code, .. } => *status_code,
            _ => None,
        }
    }
}

fn status_label(code: &Option<u16>) -> String {
    match code {
        Some(code) => code.to_string(),
        None => "None".to_string(),
    }
}

/// Problems with the configuration file, detected before any request.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("missing key '{0}' in [tokens]\n  hint: register a device first and store its token as bearer_token")]
    MissingKey(&'static str),

    #[error("cannot serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}
