use std::path::PathBuf;

use thiserror::Error;

use crate::shared::frame::Frame;

#[derive(Error, Debug)]
pub enum CameraError {
    #[error("camera access denied: {0}")]
    AccessDenied(String),
    #[error("camera produced no frames: {0}")]
    NoFrames(PathBuf),
    #[error("failed to decode frame {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Negotiated stream properties, known once the camera is open.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StreamInfo {
    pub width: u32,
    pub height: u32,
}

/// Domain interface for the live video feed.
///
/// Acquired once per session; frames carry increasing indices.
pub trait Camera: Send {
    fn open(&mut self) -> Result<StreamInfo, CameraError>;

    /// Next frame, or `None` once the stream has ended. Callers treat
    /// `None` as final and stop polling.
    fn next_frame(&mut self) -> Option<Frame>;
}
