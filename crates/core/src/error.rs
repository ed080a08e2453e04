//! Error types for the driftfield core.

use thiserror::Error;

/// Errors produced by simulation operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Canvas or grid dimensions were too small to hold a single cell.
    #[error("invalid dimensions: canvas {width}x{height} with cell size {cell_size} yields an empty grid")]
    InvalidDimensions {
        width: f64,
        height: f64,
        cell_size: f64,
    },

    /// A configuration value could not be repaired by clamping.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A palette name was not recognized.
    #[error("unknown palette: {0}")]
    UnknownPalette(String),

    /// An I/O error while writing a snapshot.
    #[error("i/o error: {0}")]
    Io(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_dimensions_displays_offending_values() {
        let err = EngineError::InvalidDimensions {
            width: 10.0,
            height: 5.0,
            cell_size: 20.0,
        };
        let msg = format!("{err}");
        assert!(msg.contains("10"), "missing width in: {msg}");
        assert!(msg.contains("20"), "missing cell size in: {msg}");
    }

    #[test]
    fn unknown_palette_includes_name() {
        let err = EngineError::UnknownPalette("sepia".into());
        let msg = format!("{err}");
        assert!(msg.contains("sepia"), "missing palette name in: {msg}");
    }

    #[test]
    fn invalid_config_includes_message() {
        let err = EngineError::InvalidConfig("negative stroke width".into());
        assert!(format!("{err}").contains("negative stroke width"));
    }

    #[test]
    fn engine_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<EngineError>();
    }

    #[test]
    fn engine_error_implements_std_error() {
        fn assert_std_error<T: std::error::Error>() {}
        assert_std_error::<EngineError>();
    }
}
