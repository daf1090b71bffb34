//! CSI camera capture through a GStreamer pipeline.
//!
//! The frame loop in [`viewer`] is backend independent. The OpenCV backend
//! lives behind the `camera` feature so the default build needs no OpenCV.

use thiserror::Error;

pub mod pipeline;
pub mod viewer;

#[cfg(feature = "camera")]
pub mod opencv;

pub use pipeline::{CaptureSettings, FlipMethod, FlipMethodError};
pub use viewer::{run_viewer, FrameDisplay, FrameSource, ViewerExit, ViewerStats};

#[derive(Debug, Error)]
pub enum CameraError {
    #[error("failed to open camera")]
    OpenFailed,
    #[cfg(feature = "camera")]
    #[error("opencv error")]
    OpenCv(#[from] ::opencv::Error),
}
