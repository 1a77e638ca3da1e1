use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::landmarks::domain::landmark_set::DetectedFace;
use crate::landmarks::domain::landmark_source::LandmarkSource;
use crate::shared::frame::Frame;

#[derive(Error, Debug)]
pub enum LandmarkScriptError {
    #[error("failed to read landmark script {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid landmark script {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Replays recorded detector output, one entry per camera frame.
///
/// The script is a JSON array; element `i` holds the faces detected in
/// frame `i`. Frame indices past the end wrap around so a short
/// recording can follow a looping camera.
pub struct ScriptedLandmarkSource {
    script: Vec<Vec<DetectedFace>>,
}

impl ScriptedLandmarkSource {
    pub fn new(script: Vec<Vec<DetectedFace>>) -> Self {
        Self { script }
    }

    pub fn from_path(path: &Path) -> Result<Self, LandmarkScriptError> {
        let json = fs::read_to_string(path).map_err(|source| LandmarkScriptError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let script = serde_json::from_str(&json).map_err(|source| LandmarkScriptError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(script))
    }

    pub fn len(&self) -> usize {
        self.script.len()
    }

    pub fn is_empty(&self) -> bool {
        self.script.is_empty()
    }
}

impl LandmarkSource for ScriptedLandmarkSource {
    fn is_ready(&self) -> bool {
        true
    }

    fn detect(&mut self, frame: &Frame) -> Result<Vec<DetectedFace>, Box<dyn std::error::Error>> {
        if self.script.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self.script[frame.index() % self.script.len()].clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::domain::landmark_set::LandmarkSet;
    use crate::shared::point::Point;
    use std::io::Write;

    fn frame(index: usize) -> Frame {
        Frame::new(vec![0; 3], 1, 1, 3, index)
    }

    fn face_at(x: f64) -> DetectedFace {
        DetectedFace::with_mesh(LandmarkSet::new(vec![Point::new(x, 0.0)]))
    }

    #[test]
    fn test_replays_by_frame_index() {
        let mut source = ScriptedLandmarkSource::new(vec![vec![face_at(1.0)], vec![]]);
        assert_eq!(source.detect(&frame(0)).unwrap(), vec![face_at(1.0)]);
        assert!(source.detect(&frame(1)).unwrap().is_empty());
    }

    #[test]
    fn test_wraps_past_end() {
        let mut source = ScriptedLandmarkSource::new(vec![vec![face_at(1.0)], vec![face_at(2.0)]]);
        assert_eq!(source.detect(&frame(3)).unwrap(), vec![face_at(2.0)]);
    }

    #[test]
    fn test_empty_script_detects_nothing() {
        let mut source = ScriptedLandmarkSource::new(Vec::new());
        assert!(source.is_ready());
        assert!(source.detect(&frame(0)).unwrap().is_empty());
    }

    #[test]
    fn test_from_path_parses_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[[{{"mesh":[{{"x":5.0,"y":6.0}}]}}, {{}}], []]"#).unwrap();

        let mut source = ScriptedLandmarkSource::from_path(file.path()).unwrap();
        assert_eq!(source.len(), 2);
        let faces = source.detect(&frame(0)).unwrap();
        assert_eq!(faces.len(), 2);
        assert!(faces[0].mesh.is_some());
        assert!(faces[1].mesh.is_none());
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = ScriptedLandmarkSource::from_path(Path::new("/nonexistent/landmarks.json"))
            .err()
            .unwrap();
        assert!(matches!(err, LandmarkScriptError::Read { .. }));
    }

    #[test]
    fn test_from_path_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let err = ScriptedLandmarkSource::from_path(file.path()).err().unwrap();
        assert!(matches!(err, LandmarkScriptError::Parse { .. }));
    }
}
