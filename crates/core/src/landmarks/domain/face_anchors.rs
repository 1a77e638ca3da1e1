//! Named anchor points derived from the 468-point face mesh.
//!
//! Eye centers average the full eye contour so they stay stable while
//! blinking; every other anchor reads a single landmark.

use crate::landmarks::domain::landmark_set::LandmarkSet;
use crate::shared::constants::FACE_MESH_POINT_COUNT;
use crate::shared::point::Point;

pub const LEFT_EYE_CONTOUR: [usize; 16] = [
    33, 7, 163, 144, 145, 153, 154, 155, 133, 173, 157, 158, 159, 160, 161, 246,
];
pub const RIGHT_EYE_CONTOUR: [usize; 16] = [
    362, 382, 381, 380, 374, 373, 390, 249, 263, 466, 388, 387, 386, 385, 384, 398,
];

const NOSE_TIP: usize = 1;
const NOSE_BRIDGE: usize = 6;
const NOSE_BASE: usize = 2;
const UPPER_LIP: usize = 13;
const LOWER_LIP: usize = 14;
const LEFT_MOUTH: usize = 61;
const RIGHT_MOUTH: usize = 291;
const LEFT_CHEEK: usize = 116;
const RIGHT_CHEEK: usize = 345;
const FOREHEAD: usize = 10;
const CHIN: usize = 152;
const LEFT_JAW: usize = 172;
const RIGHT_JAW: usize = 397;
const LEFT_EYEBROW: usize = 70;
const RIGHT_EYEBROW: usize = 300;

#[derive(Clone, Debug, PartialEq)]
pub struct FaceAnchors {
    pub left_eye: Point,
    pub right_eye: Point,
    pub nose_tip: Point,
    pub nose_bridge: Point,
    pub nose_base: Point,
    pub upper_lip: Point,
    pub lower_lip: Point,
    pub left_mouth: Point,
    pub right_mouth: Point,
    pub left_cheek: Point,
    pub right_cheek: Point,
    pub forehead: Point,
    pub chin: Point,
    pub left_jaw: Point,
    pub right_jaw: Point,
    pub left_eyebrow: Point,
    pub right_eyebrow: Point,
}

impl FaceAnchors {
    /// Derives anchors from a full face mesh.
    ///
    /// Returns `None` for sets shorter than the mesh topology; such sets
    /// come from a different model and their indices mean nothing here.
    pub fn from_landmarks(landmarks: &LandmarkSet) -> Option<Self> {
        if landmarks.len() < FACE_MESH_POINT_COUNT {
            return None;
        }
        let at = |i: usize| landmarks.get(i);
        Some(Self {
            left_eye: landmarks.centroid(&LEFT_EYE_CONTOUR)?,
            right_eye: landmarks.centroid(&RIGHT_EYE_CONTOUR)?,
            nose_tip: at(NOSE_TIP)?,
            nose_bridge: at(NOSE_BRIDGE)?,
            nose_base: at(NOSE_BASE)?,
            upper_lip: at(UPPER_LIP)?,
            lower_lip: at(LOWER_LIP)?,
            left_mouth: at(LEFT_MOUTH)?,
            right_mouth: at(RIGHT_MOUTH)?,
            left_cheek: at(LEFT_CHEEK)?,
            right_cheek: at(RIGHT_CHEEK)?,
            forehead: at(FOREHEAD)?,
            chin: at(CHIN)?,
            left_jaw: at(LEFT_JAW)?,
            right_jaw: at(RIGHT_JAW)?,
            left_eyebrow: at(LEFT_EYEBROW)?,
            right_eyebrow: at(RIGHT_EYEBROW)?,
        })
    }

    /// Horizontal distance between eye centers; the unit every filter
    /// size is expressed in.
    pub fn eye_distance(&self) -> f64 {
        (self.right_eye.x - self.left_eye.x).abs()
    }

    pub fn eye_midpoint(&self) -> Point {
        self.left_eye.midpoint(&self.right_eye)
    }
}
