use anyhow::{anyhow, Result};
use std::env;
use url::Url;

const DEFAULT_CONTROLLER_PORT: u16 = 8443;
const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org";

#[derive(Debug, Clone)]
pub struct ControllerConfig {
    pub controller_url: String,
    pub controller_port: u16,
    pub username: String,
    pub password: String,
    pub skip_cert_verify: bool,
    pub geocoder_url: String,
}

impl ControllerConfig {
    pub fn new() -> Result<Self> {
        // Load environment variables
        dotenv::dotenv().ok();

        let controller_url = env::var("UNIFI_CONTROLLER_URL")
            .map_err(|_| anyhow!("UNIFI_CONTROLLER_URL environment variable not set"))?;
        let username = env::var("UNIFI_USERNAME")
            .map_err(|_| anyhow!("UNIFI_USERNAME environment variable not set"))?;
        let password = env::var("UNIFI_PASSWORD")
            .map_err(|_| anyhow!("UNIFI_PASSWORD environment variable not set"))?;

        let controller_port = match env::var("UNIFI_CONTROLLER_PORT") {
            Ok(port) => port
                .trim()
                .parse::<u16>()
                .map_err(|_| anyhow!("UNIFI_CONTROLLER_PORT is not a valid port number"))?,
            Err(_) => DEFAULT_CONTROLLER_PORT,
        };

        let skip_cert_verify = env::var("UNIFI_SKIP_CERT_VERIFY")
            .map(|value| parse_flag(&value))
            .unwrap_or(false);

        let geocoder_url =
            env::var("GEOCODER_URL").unwrap_or_else(|_| DEFAULT_GEOCODER_URL.to_string());

        Ok(ControllerConfig {
            controller_url,
            controller_port,
            username,
            password,
            skip_cert_verify,
            geocoder_url,
        })
    }

    /// Controller base URL, with the scheme defaulted to https when the
    /// configured host does not carry one.
    pub fn base_url(&self) -> Result<Url> {
        let raw = if self.controller_url.contains("://") {
            self.controller_url.clone()
        } else {
            format!("https://{}", self.controller_url)
        };

        let mut url = Url::parse(&raw)
            .map_err(|e| anyhow!("invalid controller URL '{}': {}", self.controller_url, e))?;
        url.set_port(Some(self.controller_port)).map_err(|_| {
            anyhow!(
                "controller URL '{}' does not accept a port",
                self.controller_url
            )
        })?;

        Ok(url)
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes"
    )
}
