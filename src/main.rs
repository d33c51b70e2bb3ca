mod config;
mod geocode;
mod models;
mod unifi;
mod utils;

use anyhow::Result;
use log::{error, info, warn};
use time::OffsetDateTime;
use tokio::time::Duration;

use config::ControllerConfig;
use geocode::{enrich_coordinates, Nominatim};
use models::Accesspoints;
use unifi::UnifiClient;
use utils::{assemble_accesspoints, format_datetime};

const GEOCODE_PACING_SECS: u64 = 1;

async fn collect_accesspoints(
    config: &ControllerConfig,
    geocoder: &Nominatim,
) -> Result<Accesspoints> {
    let client = UnifiClient::new(config)?;
    client.login().await?;
    info!("Logged in to controller {}", config.controller_url);

    let mut report = Accesspoints::new();

    // Sites, devices and clients are fetched strictly in order; the report
    // keeps controller-returned (site, device) ordering
    for site in client.list_sites().await? {
        let devices = client.list_devices(&site.name).await?;
        let clients = client.list_clients(&site.name).await?;
        info!(
            "Site {}: {} devices, {} clients",
            site.desc.as_deref().unwrap_or(&site.name),
            devices.len(),
            clients.len()
        );

        let mut accesspoints = assemble_accesspoints(&devices, &clients);
        enrich_coordinates(&mut accesspoints, geocoder).await;
        report.accesspoints.extend(accesspoints);
    }

    Ok(report)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .format_timestamp_secs()
        .init();

    // Load configuration
    let config = match ControllerConfig::new() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e);
        }
    };

    let geocoder = Nominatim::new(
        &config.geocoder_url,
        Duration::from_secs(GEOCODE_PACING_SECS),
    )?;

    let start_time = OffsetDateTime::now_utc();
    info!(
        "Starting collection run at: {}",
        format_datetime(&start_time)
    );

    let report = collect_accesspoints(&config, &geocoder).await?;

    let end_time = OffsetDateTime::now_utc();
    info!(
        "Collection run complete at: {}",
        format_datetime(&end_time)
    );

    // Warning if nothing was collected
    if report.is_empty() {
        warn!("No accesspoints collected during this run!");
    }

    print!("{}", report);

    Ok(())
}
