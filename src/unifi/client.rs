/// HTTP client for the classic UniFi controller API
use anyhow::{anyhow, Result};
use log::debug;
use serde::de::DeserializeOwned;
use serde_json::json;
use url::Url;

use crate::config::ControllerConfig;
use crate::unifi::types::{ApiEnvelope, ApiMeta, ClientRecord, DeviceRecord, SiteRecord};

pub struct UnifiClient {
    http: reqwest::Client,
    base_url: Url,
    username: String,
    password: String,
}

impl UnifiClient {
    /// Build the HTTP client for a controller.
    ///
    /// The controller issues a session cookie at login, so the client keeps
    /// a cookie store. Certificate verification can be disabled for
    /// controllers running with a self-signed certificate.
    pub fn new(config: &ControllerConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .danger_accept_invalid_certs(config.skip_cert_verify)
            .build()?;

        Ok(UnifiClient {
            http,
            base_url: config.base_url()?,
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    /// Authenticate against the controller and establish the session cookie.
    pub async fn login(&self) -> Result<()> {
        let url = self.endpoint("api/login")?;
        debug!("Logging in to {}", url);

        let envelope: ApiEnvelope<serde_json::Value> = self
            .http
            .post(url)
            .json(&json!({
                "username": self.username,
                "password": self.password,
            }))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        check_meta(&envelope.meta)
    }

    /// List the sites visible to the logged-in user.
    pub async fn list_sites(&self) -> Result<Vec<SiteRecord>> {
        self.get_vec("api/self/sites").await
    }

    /// List the devices managed under one site.
    pub async fn list_devices(&self, site: &str) -> Result<Vec<DeviceRecord>> {
        self.get_vec(&format!("api/s/{}/stat/device", site)).await
    }

    /// List the wireless clients currently associated within one site.
    pub async fn list_clients(&self, site: &str) -> Result<Vec<ClientRecord>> {
        self.get_vec(&format!("api/s/{}/stat/sta", site)).await
    }

    /// Submits a GET request to the controller, returning the deserialized
    /// data array of the response envelope.
    async fn get_vec<T>(&self, path: &str) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        debug!("Fetching {}", url);

        let envelope: ApiEnvelope<T> = self
            .http
            .get(url)
            .header("Content-Type", "application/json")
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        check_meta(&envelope.meta)?;
        Ok(envelope.data)
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }
}

fn check_meta(meta: &ApiMeta) -> Result<()> {
    if meta.rc != "ok" {
        return Err(anyhow!(
            "controller returned rc={}: {}",
            meta.rc,
            meta.msg.as_deref().unwrap_or("no message")
        ));
    }
    Ok(())
}
