/// Utility functions for joining and shaping controller data
use time::{format_description, OffsetDateTime};

use crate::models::Accesspoint;
use crate::unifi::types::{ClientRecord, DeviceRecord};

/// Format a timestamp for human-readable logging
///
/// Converts an OffsetDateTime to DD.MM.YYYY - HH:MM:SS format
/// Falls back to default string representation if formatting fails.
pub fn format_datetime(dt: &OffsetDateTime) -> String {
    let format = format_description::parse("[day].[month].[year] - [hour]:[minute]:[second]")
        .expect("Failed to create format description");
    dt.format(&format).unwrap_or_else(|_| dt.to_string())
}

/// Count the clients associated with one access point
///
/// A client belongs to an access point when its recorded ap_mac equals the
/// access point's hardware address exactly. Records missing either side of
/// the comparison never match; in particular a device without a mac counts
/// zero clients even when clients are missing their ap_mac as well.
///
/// # Arguments
/// * `ap_mac` - Hardware address of the access point, when known
/// * `clients` - Client list of the site the access point belongs to
///
/// # Returns
/// Number of matching clients
pub fn client_count_for_ap(ap_mac: Option<&str>, clients: &[ClientRecord]) -> u32 {
    let ap_mac = match ap_mac {
        Some(mac) => mac,
        None => return 0,
    };

    clients
        .iter()
        .filter(|client| client.ap_mac.as_deref() == Some(ap_mac))
        .count() as u32
}

/// Turn one site's device and client lists into report entries
///
/// Devices without a name are skipped entirely. Every produced entry carries
/// the client count joined from the site's client list and default (0.0, 0.0)
/// coordinates; geocoding fills the coordinates in afterwards. Device order
/// is preserved.
///
/// # Arguments
/// * `devices` - Devices as returned by the controller for one site
/// * `clients` - Clients as returned by the controller for the same site
///
/// # Returns
/// Report entries in device order
pub fn assemble_accesspoints(
    devices: &[DeviceRecord],
    clients: &[ClientRecord],
) -> Vec<Accesspoint> {
    let mut accesspoints = Vec::new();

    for device in devices {
        // Devices without a name are not reported
        let name = match &device.name {
            Some(name) => name.clone(),
            None => continue,
        };

        accesspoints.push(Accesspoint {
            name,
            mac: device.mac.clone(),
            snmp_location: device.snmp_location.clone(),
            client_count: client_count_for_ap(device.mac.as_deref(), clients),
            latitude: 0.0,
            longitude: 0.0,
        });
    }

    accesspoints
}

/// Parse a coordinate that may arrive as a JSON string or number
///
/// The geocoding service reports latitude and longitude as strings, but
/// numeric values are accepted too. Anything else is treated as malformed.
pub fn coordinate_value(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::String(text) => text.trim().parse::<f64>().ok(),
        serde_json::Value::Number(number) => number.as_f64(),
        _ => None,
    }
}
