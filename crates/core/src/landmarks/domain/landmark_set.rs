use serde::{Deserialize, Serialize};

use crate::shared::point::Point;

/// Ordered face-mesh landmarks for one detected face in one frame.
///
/// Indices carry fixed semantic meaning defined by the detector topology.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LandmarkSet {
    points: Vec<Point>,
}

impl LandmarkSet {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Point> {
        self.points.get(index).copied()
    }

    /// Mean of the points at `indices`; `None` if any index is missing.
    pub fn centroid(&self, indices: &[usize]) -> Option<Point> {
        let picked: Option<Vec<Point>> = indices.iter().map(|&i| self.get(i)).collect();
        Point::mean(&picked?)
    }

    /// Uniformly scales every point about the origin.
    pub fn scaled(&self, k: f64) -> LandmarkSet {
        LandmarkSet::new(self.points.iter().map(|p| p.scaled(k)).collect())
    }
}

/// One entry of detector output. `mesh` is `None` when the detector
/// reported a face without landmark data.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectedFace {
    #[serde(default)]
    pub mesh: Option<LandmarkSet>,
}

impl DetectedFace {
    pub fn with_mesh(mesh: LandmarkSet) -> Self {
        Self { mesh: Some(mesh) }
    }

    pub fn without_mesh() -> Self {
        Self { mesh: None }
    }
}
