//! Text layout for the two display pages.
//!
//! Pure string builders so the page content stays testable without a
//! framebuffer attached.

use crate::stats::aggregator::TorrentSummary;
use crate::system::probe::SystemSnapshot;

const SECONDS_PER_DAY: u64 = 86_400;

/// Lines for the general system page.
pub fn general_lines(snapshot: &SystemSnapshot) -> Vec<String> {
    vec![
        "       GENERAL:".to_string(),
        String::new(),
        format!("IP: {}", snapshot.ip),
        format!("Cpu: {:.1}%", snapshot.cpu_percent),
        format!("Mem: {:.1}%", snapshot.mem_percent),
        format!("Temp: {:.1}°C", snapshot.temp_celsius),
        format!("Up: {}", format_uptime(snapshot.uptime_secs)),
    ]
}

/// Lines for the torrent stats page.
pub fn torrent_lines(summary: &TorrentSummary) -> Vec<String> {
    vec![
        "       DELUGE:".to_string(),
        String::new(),
        format!(
            "Up({}): {:.2}kBps",
            summary.seeding,
            summary.upload_speed_bps as f64 / 1024.0
        ),
        format!(
            "Down({}): {:.2}kBps",
            summary.downloading,
            summary.download_speed_bps as f64 / 1024.0
        ),
    ]
}

/// `<days>days, <HH:MM:SS>`, with zero days for uptimes under a day.
pub fn format_uptime(uptime_secs: u64) -> String {
    let days = uptime_secs / SECONDS_PER_DAY;
    let rest = uptime_secs % SECONDS_PER_DAY;

    format!(
        "{}days, {:02}:{:02}:{:02}",
        days,
        rest / 3600,
        (rest % 3600) / 60,
        rest % 60
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{IpAddr, Ipv4Addr};

    fn snapshot() -> SystemSnapshot {
        SystemSnapshot {
            ip: IpAddr::V4(Ipv4Addr::new(192, 168, 1, 17)),
            cpu_percent: 8.7,
            mem_percent: 41.25,
            temp_celsius: 52.06,
            uptime_secs: 2 * SECONDS_PER_DAY + 3 * 3600 + 4 * 60 + 5,
        }
    }

    #[test]
    fn test_general_page_layout() {
        let lines = general_lines(&snapshot());

        assert_eq!(
            lines,
            vec![
                "       GENERAL:".to_string(),
                String::new(),
                "IP: 192.168.1.17".to_string(),
                "Cpu: 8.7%".to_string(),
                "Mem: 41.2%".to_string(),
                "Temp: 52.1°C".to_string(),
                "Up: 2days, 03:04:05".to_string(),
            ]
        );
    }

    #[test]
    fn test_torrent_page_layout() {
        let summary = TorrentSummary {
            queued: 2,
            seeding: 3,
            downloading: 1,
            upload_speed_bps: 15_360,
            download_speed_bps: 524_288,
        };

        let lines = torrent_lines(&summary);

        assert_eq!(
            lines,
            vec![
                "       DELUGE:".to_string(),
                String::new(),
                "Up(3): 15.00kBps".to_string(),
                "Down(1): 512.00kBps".to_string(),
            ]
        );
    }

    #[test]
    fn test_torrent_page_idle() {
        let lines = torrent_lines(&TorrentSummary::default());

        assert_eq!(lines[2], "Up(0): 0.00kBps");
        assert_eq!(lines[3], "Down(0): 0.00kBps");
    }

    #[test]
    fn test_uptime_over_a_day() {
        assert_eq!(format_uptime(90_061), "1days, 01:01:01");
    }

    #[test]
    fn test_uptime_under_a_day_has_zero_days() {
        assert_eq!(format_uptime(3_725), "0days, 01:02:05");
    }

    #[test]
    fn test_uptime_at_boot() {
        assert_eq!(format_uptime(0), "0days, 00:00:00");
    }

    #[test]
    fn test_uptime_day_boundary() {
        assert_eq!(format_uptime(SECONDS_PER_DAY - 1), "0days, 23:59:59");
        assert_eq!(format_uptime(SECONDS_PER_DAY), "1days, 00:00:00");
    }
}
