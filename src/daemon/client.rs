//! JSON-RPC client for the Deluge web endpoint.
//!
//! The web endpoint speaks JSON-RPC over HTTP and tracks authentication
//! with a session cookie, so the HTTP client keeps a cookie store.

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use crate::core::error::DaemonError;
use crate::models::torrent::TorrentStatus;

/// Status keys requested for every torrent.
const TORRENT_FIELDS: [&str; 8] = [
    "name",
    "is_finished",
    "progress",
    "ratio",
    "seeding_time",
    "state",
    "download_payload_rate",
    "upload_payload_rate",
];

#[derive(Debug, Serialize)]
struct RpcRequest<P: Serialize> {
    method: &'static str,
    params: P,
    id: u64,
}

#[derive(Debug, Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
struct RpcError {
    message: String,
    code: i64,
}

/// Client for the daemon's web JSON endpoint
pub struct DelugeClient {
    http: reqwest::Client,
    endpoint: String,
    password: String,
    request_id: AtomicU64,
}

impl DelugeClient {
    pub fn new(endpoint: String, password: String) -> Result<Self, DaemonError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .cookie_store(true)
            .build()?;

        Ok(Self {
            http,
            endpoint,
            password,
            request_id: AtomicU64::new(0),
        })
    }

    async fn call<P, T>(&self, method: &'static str, params: P) -> Result<T, DaemonError>
    where
        P: Serialize,
        T: DeserializeOwned,
    {
        let id = self.request_id.fetch_add(1, Ordering::Relaxed);

        let response = self
            .http
            .post(&self.endpoint)
            .json(&RpcRequest { method, params, id })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(DaemonError::HttpStatus(response.status()));
        }

        let body: RpcResponse<T> = response.json().await?;

        if let Some(error) = body.error {
            return Err(DaemonError::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        body.result.ok_or(DaemonError::MissingResult { method })
    }

    /// Authenticate against the web endpoint; the session cookie lands in
    /// the HTTP client's store.
    pub async fn login(&self) -> Result<(), DaemonError> {
        let accepted: bool = self.call("auth.login", json!([self.password])).await?;

        if !accepted {
            return Err(DaemonError::AuthRejected);
        }

        debug!("Authenticated against the daemon web endpoint");
        Ok(())
    }

    /// Whether the web endpoint currently holds a daemon connection.
    pub async fn connected(&self) -> Result<bool, DaemonError> {
        self.call("web.connected", json!([])).await
    }

    /// Fetch the status fields for every torrent, keyed by hash.
    pub async fn torrent_list(&self) -> Result<HashMap<String, TorrentStatus>, DaemonError> {
        self.call("core.get_torrents_status", json!([{}, TORRENT_FIELDS]))
            .await
    }

    /// Remove one torrent, keeping its downloaded data on disk.
    pub async fn remove_torrent(&self, hash: &str) -> Result<(), DaemonError> {
        let _removed: bool = self.call("core.remove_torrent", json!([hash, false])).await?;
        Ok(())
    }
}

/// Dump the raw torrent list for offline inspection.
pub fn dump_torrents(path: &Path, torrents: &HashMap<String, TorrentStatus>) -> Result<()> {
    let json =
        serde_json::to_string_pretty(torrents).context("Failed to serialize torrent list")?;

    std::fs::write(path, json).context(format!("Failed to write {}", path.display()))?;

    Ok(())
}
