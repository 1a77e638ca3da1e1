use thiserror::Error;

use crate::camera::domain::camera::CameraError;
use crate::capture::domain::photo_slot::PhotoSlot;
use crate::capture::still_compositor::CompositeError;

/// Failures the booth reports to the person using it.
#[derive(Error, Debug)]
pub enum BoothError {
    #[error("cannot access the camera: {0}")]
    CameraAccess(#[from] CameraError),
    #[error("no photo available in {0}")]
    NoPhotoAvailable(PhotoSlot),
    #[error("printing is unavailable until a photo has been taken")]
    PrintLocked,
    #[error("filter index must be 0-3, got {0}")]
    UnknownFilter(usize),
    #[error("no camera frame to capture")]
    NoFrame,
    #[error(transparent)]
    Composite(#[from] CompositeError),
    #[error("failed to render print preview: {0}")]
    Preview(#[source] image::ImageError),
}
