use anyhow::{Result, anyhow};
use async_trait::async_trait;
use fleet_shared::{
    application::{Application, CreateApplicationBody},
    device::{DeviceNoteBody, DeviceType},
};
use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

use crate::{config::Config, error::CliError, retry_async};

const READ_ATTEMPTS: u32 = 3;
const RETRY_DELAY_SECS: u64 = 1;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Everything the commands need from the platform.
///
/// Implemented over HTTP by [`PlatformClient`]; tests substitute in-memory fakes.
#[async_trait]
pub trait Platform: Send + Sync {
    async fn has_application(&self, name: &str) -> Result<bool>;
    async fn create_application(&self, name: &str, device_type: &str) -> Result<Application>;
    async fn list_applications(&self) -> Result<Vec<Application>>;
    async fn get_application(&self, name: &str) -> Result<Application>;
    async fn restart_application(&self, name: &str) -> Result<()>;
    async fn remove_application(&self, name: &str) -> Result<()>;
    async fn set_device_note(&self, uuid: &str, note: &str) -> Result<()>;
    async fn supported_device_types(&self) -> Result<Vec<DeviceType>>;
}

pub struct PlatformClient {
    api_url: Url,
    token: String,
    client: Client,
}

impl PlatformClient {
    pub fn new(api_url: &str, token: &str, trust_invalid_server_cert: bool) -> Result<Self> {
        let api_url =
            Url::parse(api_url).map_err(|e| anyhow!("Invalid api url '{}': {}", api_url, e))?;
        if api_url.cannot_be_a_base() {
            return Err(anyhow!("Invalid api url '{}'", api_url));
        }
        Ok(Self {
            api_url,
            token: token.to_string(),
            client: get_client(trust_invalid_server_cert)?,
        })
    }

    pub fn from_config(config: &Config, token: &str) -> Result<Self> {
        Self::new(&config.api_url, token, config.trust_invalid_server_cert)
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.api_url.clone();
        // checked in new(): a base url always has path segments
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// GET with retries on transport failures. Status is left to the caller.
    async fn get(&self, url: Url) -> Result<Response> {
        debug!("GET {}", url);
        let res = retry_async!(
            READ_ATTEMPTS,
            RETRY_DELAY_SECS,
            self.client.get(url.clone()).bearer_auth(&self.token).send()
        )
        .map_err(CliError::Transport)?;
        Ok(res)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let res = check_status(self.get(url).await?).await?;
        Ok(res.json().await.map_err(CliError::Transport)?)
    }
}

#[async_trait]
impl Platform for PlatformClient {
    async fn has_application(&self, name: &str) -> Result<bool> {
        let res = self.get(self.endpoint(&["application", name])).await?;
        if res.status() == StatusCode::NOT_FOUND {
            return Ok(false);
        }
        check_status(res).await?;
        Ok(true)
    }

    async fn create_application(&self, name: &str, device_type: &str) -> Result<Application> {
        let url = self.endpoint(&["application"]);
        debug!("POST {}", url);
        let body = CreateApplicationBody {
            app_name: name.to_string(),
            device_type: device_type.to_string(),
        };
        let res = self
            .client
            .post(url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await
            .map_err(CliError::Transport)?;
        let res = check_status(res).await?;
        Ok(res.json().await.map_err(CliError::Transport)?)
    }

    async fn list_applications(&self) -> Result<Vec<Application>> {
        self.get_json(self.endpoint(&["application"])).await
    }

    async fn get_application(&self, name: &str) -> Result<Application> {
        let res = self.get(self.endpoint(&["application", name])).await?;
        if res.status() == StatusCode::NOT_FOUND {
            return Err(CliError::ApplicationNotFound(name.to_string()).into());
        }
        let res = check_status(res).await?;
        Ok(res.json().await.map_err(CliError::Transport)?)
    }

    async fn restart_application(&self, name: &str) -> Result<()> {
        let url = self.endpoint(&["application", name, "restart"]);
        debug!("POST {}", url);
        let res = self
            .client
            .post(url)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(CliError::Transport)?;
        check_status(res).await?;
        Ok(())
    }

    async fn remove_application(&self, name: &str) -> Result<()> {
        let url = self.endpoint(&["application", name]);
        debug!("DELETE {}", url);
        let res = self
            .client
            .delete(url)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(CliError::Transport)?;
        check_status(res).await?;
        Ok(())
    }

    async fn set_device_note(&self, uuid: &str, note: &str) -> Result<()> {
        let url = self.endpoint(&["device", uuid, "note"]);
        debug!("PUT {}", url);
        let res = self
            .client
            .put(url)
            .bearer_auth(&self.token)
            .json(&DeviceNoteBody {
                note: note.to_string(),
            })
            .send()
            .await
            .map_err(CliError::Transport)?;
        check_status(res).await?;
        Ok(())
    }

    async fn supported_device_types(&self) -> Result<Vec<DeviceType>> {
        self.get_json(self.endpoint(&["device-types"])).await
    }
}

async fn check_status(res: Response) -> Result<Response, CliError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    let body = res.text().await.unwrap_or_default();
    let message = match body.trim() {
        "" => status.canonical_reason().unwrap_or("unknown error").to_string(),
        text => text.to_string(),
    };
    warn!("platform returned {}: {}", status, message);
    Err(CliError::Remote {
        status: status.as_u16(),
        message,
    })
}

fn get_client(trust_invalid_server_cert: bool) -> Result<Client> {
    let builder = Client::builder().timeout(REQUEST_TIMEOUT);
    // only meant for local or staging platforms with self-signed certificates
    let builder = if trust_invalid_server_cert {
        warn!("Trusting invalid server certificate");
        builder.danger_accept_invalid_certs(true)
    } else {
        builder
    };
    Ok(builder.build()?)
}
