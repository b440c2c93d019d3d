//! Local system metrics for the general page.

use std::net::{IpAddr, UdpSocket};

use anyhow::{Context, Result};
use sysinfo::{Components, System};

use crate::utils::time::current_timestamp;

/// One reading of everything the general page shows.
#[derive(Debug, Clone)]
pub struct SystemSnapshot {
    pub ip: IpAddr,
    pub cpu_percent: f32,
    pub mem_percent: f64,
    pub temp_celsius: f32,
    pub uptime_secs: u64,
}

pub struct SystemProbe {
    sys: System,
    components: Components,
    boot_time: u64,
}

impl SystemProbe {
    pub fn new() -> Self {
        let mut sys = System::new_all();
        sys.refresh_all();

        Self {
            sys,
            components: Components::new_with_refreshed_list(),
            boot_time: System::boot_time(),
        }
    }

    /// Refresh the underlying sources and read out one snapshot.
    pub fn snapshot(&mut self) -> Result<SystemSnapshot> {
        self.sys.refresh_cpu_usage();
        self.sys.refresh_memory();
        self.components.refresh(true);

        let mem_percent = if self.sys.total_memory() > 0 {
            self.sys.used_memory() as f64 / self.sys.total_memory() as f64 * 100.0
        } else {
            0.0
        };

        let temp_celsius = self
            .cpu_temperature()
            .context("No readable CPU thermal sensor")?;
        let ip = primary_ip().context("Failed to determine primary IP address")?;

        Ok(SystemSnapshot {
            ip,
            cpu_percent: self.sys.global_cpu_usage(),
            mem_percent,
            temp_celsius,
            uptime_secs: self.uptime_secs(),
        })
    }

    /// On the Pi the sensor is labelled "cpu_thermal temp1"; other boards
    /// differ, so fall back to the first component that reports anything.
    fn cpu_temperature(&self) -> Option<f32> {
        self.components
            .iter()
            .find(|c| c.label().to_ascii_lowercase().contains("cpu"))
            .and_then(|c| c.temperature())
            .or_else(|| self.components.iter().find_map(|c| c.temperature()))
    }

    fn uptime_secs(&self) -> u64 {
        (current_timestamp() as u64).saturating_sub(self.boot_time)
    }
}

impl Default for SystemProbe {
    fn default() -> Self {
        Self::new()
    }
}

/// Primary address of the default-route interface.
///
/// Connecting a UDP socket sends no packets; it only asks the kernel which
/// local address would be used for that destination.
pub fn primary_ip() -> std::io::Result<IpAddr> {
    let socket = UdpSocket::bind("0.0.0.0:0")?;
    socket.connect("8.8.8.8:53")?;
    Ok(socket.local_addr()?.ip())
}
