use serde::Deserialize;

/// Response envelope wrapped around every controller API payload.
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    pub meta: ApiMeta,
    pub data: Vec<T>,
}

#[derive(Debug, Deserialize)]
pub struct ApiMeta {
    pub rc: String,
    pub msg: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SiteRecord {
    pub name: String,
    pub desc: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeviceRecord {
    pub name: Option<String>,
    pub mac: Option<String>,
    pub snmp_location: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClientRecord {
    pub ap_mac: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_deserializes_sites() {
        let json = r#"{
            "meta": {"rc": "ok"},
            "data": [
                {"_id": "abc123", "name": "default", "desc": "Default", "role": "admin"},
                {"_id": "def456", "name": "branch"}
            ]
        }"#;

        let envelope: ApiEnvelope<SiteRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.meta.rc, "ok");
        assert_eq!(envelope.data.len(), 2);
        assert_eq!(envelope.data[0].name, "default");
        assert_eq!(envelope.data[0].desc.as_deref(), Some("Default"));
        assert_eq!(envelope.data[1].desc, None);
    }

    #[test]
    fn test_envelope_carries_error_message() {
        let json = r#"{"meta": {"rc": "error", "msg": "api.err.LoginRequired"}, "data": []}"#;

        let envelope: ApiEnvelope<SiteRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.meta.rc, "error");
        assert_eq!(envelope.meta.msg.as_deref(), Some("api.err.LoginRequired"));
    }

    #[test]
    fn test_device_record_defaults_missing_fields() {
        let json = r#"{"mac": "aa:bb:cc:dd:ee:ff", "model": "U7PG2", "adopted": true}"#;

        let device: DeviceRecord = serde_json::from_str(json).unwrap();
        assert_eq!(device.name, None);
        assert_eq!(device.mac.as_deref(), Some("aa:bb:cc:dd:ee:ff"));
        assert_eq!(device.snmp_location, None);
    }

    #[test]
    fn test_client_record_defaults_missing_ap_mac() {
        let json = r#"{"hostname": "laptop", "ip": "10.0.0.2"}"#;

        let client: ClientRecord = serde_json::from_str(json).unwrap();
        assert_eq!(client.ap_mac, None);
    }
}
