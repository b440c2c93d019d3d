use serde::{Deserialize, Serialize};

/// Status fields queried from the daemon for every torrent.
///
/// Field names match the Deluge status keys verbatim so the JSON-RPC
/// result maps straight onto this struct.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TorrentStatus {
    pub name: String,
    /// Lifecycle state as reported by the daemon ("Queued", "Seeding", ...)
    pub state: String,
    pub is_finished: bool,
    /// Total time spent seeding, in seconds
    pub seeding_time: i64,
    /// Payload rates in bytes per second
    pub download_payload_rate: i64,
    pub upload_payload_rate: i64,
    pub progress: f64,
    pub ratio: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_from_daemon_status() {
        let json = r#"{
            "name": "debian-12.5.0-arm64-netinst.iso",
            "state": "Seeding",
            "is_finished": true,
            "seeding_time": 4221,
            "download_payload_rate": 0,
            "upload_payload_rate": 15360,
            "progress": 100.0,
            "ratio": 0.42
        }"#;

        let status: TorrentStatus = serde_json::from_str(json).expect("Failed to deserialize");

        assert_eq!(status.name, "debian-12.5.0-arm64-netinst.iso");
        assert_eq!(status.state, "Seeding");
        assert!(status.is_finished);
        assert_eq!(status.seeding_time, 4221);
        assert_eq!(status.download_payload_rate, 0);
        assert_eq!(status.upload_payload_rate, 15360);
        assert_eq!(status.progress, 100.0);
        assert_eq!(status.ratio, 0.42);
    }

    #[test]
    fn test_extra_daemon_fields_are_ignored() {
        // The daemon is free to send keys we never asked for.
        let json = r#"{
            "name": "ubuntu-24.04-live-server-arm64.iso",
            "state": "Downloading",
            "is_finished": false,
            "seeding_time": 0,
            "download_payload_rate": 1048576,
            "upload_payload_rate": 2048,
            "progress": 63.7,
            "ratio": 0.1,
            "num_peers": 12,
            "tracker_host": "tracker.example.org"
        }"#;

        let status: TorrentStatus = serde_json::from_str(json).expect("Failed to deserialize");

        assert_eq!(status.state, "Downloading");
        assert_eq!(status.download_payload_rate, 1_048_576);
    }
}
