// API client module: a small blocking HTTP client for the reMarkable auth
// and document-storage services. Every call follows the same shape: build
// the request, send it, accept only 200, and turn anything else into a
// `ClientError::Api` carrying the raw body.

use crate::config::{Config, Credentials, EndpointConfig};
use crate::error::ClientError;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::AUTHORIZATION;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

pub const AUTH_API: &str = "https://my.remarkable.com";
pub const SERVICE_DISCOVERY_API: &str =
    "https://service-manager-production-dot-remarkable-production.appspot.com";
pub const STORAGE_API: &str =
    "https://document-storage-production-dot-remarkable-production.appspot.com";

/// `Type` value of a folder record.
pub const COLLECTION_TYPE: &str = "CollectionType";
/// `Type` value of a document record.
pub const DOCUMENT_TYPE: &str = "DocumentType";

/// Fixed device identification sent when registering.
pub const DEVICE_DESC: &str = "desktop-windows";
pub const DEVICE_ID: &str = "123456";

const REGISTER_PATH: &str = "/token/json/2/device/new";
const REFRESH_PATH: &str = "/token/json/2/user/new";
const DOCS_PATH: &str = "/document-storage/json/2/docs";

/// A document's metadata exactly as the service returns it. The client
/// does not model or validate its fields.
pub type DocumentRecord = serde_json::Map<String, serde_json::Value>;

/// Body of the device registration request.
#[derive(Serialize, Debug)]
struct RegisterRequest<'a> {
    code: &'a str,
    #[serde(rename = "deviceDesc")]
    device_desc: &'a str,
    #[serde(rename = "deviceID")]
    device_id: &'a str,
}

/// Body of the download request. `withBlob` is a string on the wire.
#[derive(Serialize, Debug)]
struct DownloadRequest<'a> {
    query: DownloadQuery<'a>,
}

#[derive(Serialize, Debug)]
struct DownloadQuery<'a> {
    doc: &'a str,
    #[serde(rename = "withBlob")]
    with_blob: &'a str,
}

/// Client holding the reqwest blocking client, the two base URLs and the
/// credentials captured at construction.
#[derive(Clone)]
pub struct RemoteDocumentClient {
    client: Client,
    auth_api: String,
    storage_api: String,
    credentials: Credentials,
}

impl RemoteDocumentClient {
    /// Build a client from configuration. Fails with a config error when
    /// `bearer_token` is absent, before any request is made.
    pub fn new(config: &Config) -> Result<Self, ClientError> {
        let credentials = config.credentials()?;
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            auth_api: trim_base(&config.endpoints.auth_api),
            storage_api: trim_base(&config.endpoints.storage_api),
            credentials,
        })
    }

    /// Replace the session token used for document operations.
    pub fn set_session_token(&mut self, token: &str) {
        self.credentials.session_token = Some(token.trim().to_string());
    }

    pub fn with_session_token(mut self, token: &str) -> Self {
        self.set_session_token(token);
        self
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Exchange a one-time pairing code for a device token. The code is
    /// passed through unvalidated and the request is unauthenticated.
    pub fn register_device(&self, code: &str) -> Result<String, ClientError> {
        post_registration(&self.client, &self.auth_api, code)
    }

    /// Register without a configured token, for first-time setup when
    /// `new` cannot succeed yet.
    pub fn register_new_device(
        endpoints: &EndpointConfig,
        code: &str,
    ) -> Result<String, ClientError> {
        let client = Client::builder().build()?;
        post_registration(&client, &trim_base(&endpoints.auth_api), code)
    }

    /// Exchange the device token for a session token. The result is
    /// returned to the caller; nothing is written back to configuration.
    pub fn refresh_session(&self) -> Result<String, ClientError> {
        let url = format!("{}{}", self.auth_api, REFRESH_PATH);
        info!("Requesting new token");
        debug!(%url, "POST");
        let req = self.client.post(&url);
        let res = authorize(req, &self.credentials.device_token).send()?;
        expect_ok(res)
    }

    pub fn list_items(&self) -> Result<Vec<DocumentRecord>, ClientError> {
        let url = format!("{}{}", self.storage_api, DOCS_PATH);
        info!("Listing all items");
        debug!(%url, "GET");
        let res = authorize(self.client.get(&url), self.document_token()).send()?;
        decode(expect_ok(res)?)
    }

    /// Fetch one document's metadata with its blob link. The query travels
    /// in the body of a GET, which the service requires.
    pub fn download_item(&self, document_id: &str) -> Result<DocumentRecord, ClientError> {
        let url = format!("{}{}", self.storage_api, DOCS_PATH);
        let body = serde_json::to_string(&DownloadRequest {
            query: DownloadQuery {
                doc: document_id,
                with_blob: "true",
            },
        })?;
        info!(document_id, "Downloading item");
        debug!(%url, "GET");
        let req = self.client.get(&url).body(body);
        let res = authorize(req, self.document_token()).send()?;
        decode(expect_ok(res)?)
    }

    fn document_token(&self) -> &str {
        self.credentials
            .session_token
            .as_deref()
            .unwrap_or(&self.credentials.device_token)
    }
}

fn post_registration(client: &Client, auth_api: &str, code: &str) -> Result<String, ClientError> {
    let url = format!("{}{}", auth_api, REGISTER_PATH);
    let body = serde_json::to_string(&RegisterRequest {
        code,
        device_desc: DEVICE_DESC,
        device_id: DEVICE_ID,
    })?;
    info!("Registering new device");
    debug!(%url, "POST");
    let res = client.post(&url).body(body).send()?;
    expect_ok(res)
}

/// Attach `Authorization: Bearer <token>`. Built fresh for every request.
fn authorize(req: RequestBuilder, token: &str) -> RequestBuilder {
    debug!("attaching bearer authorization header");
    req.header(AUTHORIZATION, format!("Bearer {}", token))
}

/// Return the raw body of a 200 response, or an `Api` error with the
/// status and the untouched body for anything else.
fn expect_ok(res: Response) -> Result<String, ClientError> {
    let status = res.status();
    let text = res.text()?;
    if status == StatusCode::OK {
        return Ok(text);
    }
    debug!(status = status.as_u16(), "request rejected");
    Err(ClientError::Api {
        message: text,
        status_code: Some(status.as_u16()),
    })
}

fn decode<T: DeserializeOwned>(body: String) -> Result<T, ClientError> {
    Ok(serde_json::from_str(&body)?)
}

fn trim_base(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}
