// Centralized error handling for the dashboard

use linux_embedded_hal::i2cdev::linux::LinuxI2CError;
use thiserror::Error;

/// Errors from the Deluge web JSON endpoint
#[derive(Error, Debug)]
pub enum DaemonError {
    #[error("Request to daemon failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Daemon returned HTTP status {0}")]
    HttpStatus(reqwest::StatusCode),

    #[error("Daemon rejected the web UI password")]
    AuthRejected,

    #[error("Daemon RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("Daemon returned no result for {method}")]
    MissingResult { method: &'static str },
}

/// Errors from the SH1106 OLED path
#[derive(Error, Debug)]
pub enum DisplayError {
    #[error("Failed to open I2C bus {bus}: {source}")]
    Bus {
        bus: String,
        #[source]
        source: LinuxI2CError,
    },

    #[error("Display initialization failed: {0}")]
    Init(String),

    #[error("Drawing to the framebuffer failed: {0}")]
    Draw(String),

    #[error("Flushing the framebuffer failed: {0}")]
    Flush(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rpc_error_message() {
        let err = DaemonError::Rpc {
            code: 1,
            message: "Not authenticated".to_string(),
        };
        assert_eq!(err.to_string(), "Daemon RPC error 1: Not authenticated");
    }

    #[test]
    fn test_missing_result_message() {
        let err = DaemonError::MissingResult {
            method: "web.connected",
        };
        assert_eq!(err.to_string(), "Daemon returned no result for web.connected");
    }

    #[test]
    fn test_display_error_messages() {
        let err = DisplayError::Init("CommError".to_string());
        assert_eq!(err.to_string(), "Display initialization failed: CommError");

        let err = DisplayError::Flush("CommError".to_string());
        assert_eq!(err.to_string(), "Flushing the framebuffer failed: CommError");
    }
}
