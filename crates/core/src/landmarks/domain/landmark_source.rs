use crate::landmarks::domain::landmark_set::DetectedFace;
use crate::shared::frame::Frame;

/// Domain interface for the face-landmark model.
///
/// Implementations may be stateful (e.g., replaying recorded output),
/// hence `&mut self`. Callers check `is_ready` before calling `detect`.
pub trait LandmarkSource: Send {
    fn is_ready(&self) -> bool;

    fn detect(&mut self, frame: &Frame) -> Result<Vec<DetectedFace>, Box<dyn std::error::Error>>;
}
