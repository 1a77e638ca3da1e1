use crate::landmarks::domain::landmark_set::DetectedFace;
use crate::landmarks::domain::landmark_source::LandmarkSource;
use crate::shared::frame::Frame;

/// Stand-in used when the landmark model failed to load.
///
/// Never ready, so the overlay stays empty for the whole session.
pub struct UnavailableLandmarkSource;

impl LandmarkSource for UnavailableLandmarkSource {
    fn is_ready(&self) -> bool {
        false
    }

    fn detect(&mut self, _frame: &Frame) -> Result<Vec<DetectedFace>, Box<dyn std::error::Error>> {
        Err("landmark model is not loaded".into())
    }
}
