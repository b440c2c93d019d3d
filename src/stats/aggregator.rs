//! Bucket classification and throughput aggregation over the raw torrent list.

use std::collections::HashMap;

use crate::models::torrent::TorrentStatus;

/// Compact summary of the torrent list for the stats page.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TorrentSummary {
    pub queued: usize,
    pub seeding: usize,
    pub downloading: usize,
    pub upload_speed_bps: i64,
    pub download_speed_bps: i64,
}

/// Classify every torrent into exactly one bucket and sum the payload rates.
///
/// A torrent reported as "queued" (any case) counts as queued even when the
/// daemon also marks it finished; otherwise finished torrents count as
/// seeding and the rest as downloading. Rates are summed across all
/// torrents regardless of bucket.
pub fn summarize<'a, I>(torrents: I) -> TorrentSummary
where
    I: IntoIterator<Item = &'a TorrentStatus>,
{
    let mut summary = TorrentSummary::default();

    for torrent in torrents {
        if torrent.state.eq_ignore_ascii_case("queued") {
            summary.queued += 1;
        } else if torrent.is_finished {
            summary.seeding += 1;
        } else {
            summary.downloading += 1;
        }

        summary.upload_speed_bps += torrent.upload_payload_rate;
        summary.download_speed_bps += torrent.download_payload_rate;
    }

    summary
}

/// Hashes of torrents that satisfy the removal policy: seeding time strictly
/// over the threshold, or ratio at or above the target.
pub fn select_retirable<'a>(
    torrents: &'a HashMap<String, TorrentStatus>,
    seed_time_secs: i64,
    ratio: f64,
) -> Vec<&'a str> {
    torrents
        .iter()
        .filter(|(_, t)| t.seeding_time > seed_time_secs || t.ratio >= ratio)
        .map(|(hash, _)| hash.as_str())
        .collect()
}
