//! Landmark-anchored geometry for the four decoration styles.
//!
//! Every length is a multiple of the inter-eye distance `d`, so a
//! decoration keeps its proportions as the subject moves closer to or
//! further from the camera. Ratios are calibrated against a reference
//! face with `d = 120px`.

use crate::landmarks::domain::face_anchors::FaceAnchors;
use crate::landmarks::domain::landmark_set::DetectedFace;
use crate::overlay::domain::filter_variant::FilterVariant;
use crate::overlay::domain::primitive::{DrawPrimitive, GradientStop, Paint, Stroke};
use crate::shared::color::Color;
use crate::shared::point::Point;

const HAT_WIDTH_RATIO: f64 = 1.2;
const HAT_ASPECT: f64 = 1.3;
/// Fraction of hat height the base sits above the forehead anchor.
const HAT_LIFT: f64 = 0.3;
const HAT_STROKE_RATIO: f64 = 3.0 / 144.0;
const POM_POM_RATIO: f64 = 0.15;
const POM_POM_STROKE_RATIO: f64 = 2.0 / 144.0;
const HAT_DOT_SPACING_PX: f64 = 40.0;
const HAT_DOT_RADIUS_RATIO: f64 = 0.03;
const HAT_DOT_STEP_RATIO: f64 = 0.08;

const BLUSH_RATIO: f64 = 0.15;
const BLUSH_SQUASH: f64 = 0.7;
const BLUSH_COLOR: Color = Color::rgb(255, 182, 193);
const HIGHLIGHT_COLOR: Color = Color::rgba(255, 255, 255, 0.3);

const CROWN_MARGIN_RATIO: f64 = 60.0 / 120.0;
const CROWN_LIFT_RATIO: f64 = 80.0 / 120.0;
const CROWN_BAND_RATIO: f64 = 40.0 / 120.0;
const CROWN_POINT_RATIO: f64 = 40.0 / 120.0;
const CROWN_CENTER_POINT_RATIO: f64 = 60.0 / 120.0;
const CROWN_POINTS: usize = 5;
const CROWN_GEM_SPACING_RATIO: f64 = 40.0 / 120.0;
const CROWN_GEM_RADIUS_RATIO: f64 = 8.0 / 120.0;
const GOLD: Color = Color::hex(0xffd700);

const MASK_MARGIN_RATIO: f64 = 100.0 / 120.0;
const MASK_HALF_HEIGHT_RATIO: f64 = 30.0 / 120.0;
const MASK_BORDER_RATIO: f64 = 4.0 / 120.0;
const EYE_HOLE_RX_RATIO: f64 = 25.0 / 120.0;
const EYE_HOLE_RY_RATIO: f64 = 20.0 / 120.0;

/// Primitives for one detector entry. Entries without a usable mesh
/// produce nothing.
pub fn primitives_for_face(face: &DetectedFace, variant: FilterVariant) -> Vec<DrawPrimitive> {
    face.mesh
        .as_ref()
        .and_then(FaceAnchors::from_landmarks)
        .map(|anchors| build_primitives(&anchors, variant))
        .unwrap_or_default()
}

pub fn build_primitives(anchors: &FaceAnchors, variant: FilterVariant) -> Vec<DrawPrimitive> {
    match variant {
        FilterVariant::PartyHat => PartyHat::from_anchors(anchors).primitives(),
        FilterVariant::Blush => Blush::from_anchors(anchors).primitives(),
        FilterVariant::Crown => Crown::from_anchors(anchors).primitives(),
        FilterVariant::Mask => Mask::from_anchors(anchors).primitives(),
    }
}

/// Cone hat standing on the forehead.
#[derive(Debug, Clone, PartialEq)]
pub struct PartyHat {
    pub apex: Point,
    pub base_left: Point,
    pub base_right: Point,
    pub width: f64,
    pub height: f64,
    pub pom_pom_radius: f64,
    pub dots: Vec<Point>,
    pub dot_radius: f64,
}

impl PartyHat {
    pub fn from_anchors(anchors: &FaceAnchors) -> Self {
        let width = anchors.eye_distance() * HAT_WIDTH_RATIO;
        let height = width * HAT_ASPECT;
        let cx = anchors.forehead.x;
        let base_y = anchors.forehead.y - height * HAT_LIFT;

        let dot_count = (width / HAT_DOT_SPACING_PX).floor() as usize;
        let dots = (0..dot_count)
            .map(|i| {
                let i = i as f64;
                Point::new(
                    cx - width / 3.0 + i * width / dot_count as f64 * 0.6,
                    base_y - height * 0.3 + i * height * HAT_DOT_STEP_RATIO,
                )
            })
            .collect();

        Self {
            apex: Point::new(cx, base_y - height),
            base_left: Point::new(cx - width / 2.0, base_y),
            base_right: Point::new(cx + width / 2.0, base_y),
            width,
            height,
            pom_pom_radius: width * POM_POM_RATIO,
            dots,
            dot_radius: width * HAT_DOT_RADIUS_RATIO,
        }
    }

    pub fn primitives(&self) -> Vec<DrawPrimitive> {
        let base_center = self.base_left.midpoint(&self.base_right);
        let cone = DrawPrimitive::Polygon {
            points: vec![self.apex, self.base_left, self.base_right],
            fill: Some(Paint::Linear {
                start: self.apex,
                end: base_center,
                stops: vec![
                    GradientStop::new(0.0, Color::hex(0xff6b6b)),
                    GradientStop::new(1.0, Color::hex(0xe74c3c)),
                ],
            }),
            stroke: Some(Stroke {
                color: Color::hex(0xc0392b),
                width: self.width * HAT_STROKE_RATIO,
            }),
        };
        let pom_pom = DrawPrimitive::circle(self.apex, self.pom_pom_radius, Paint::Solid(Color::WHITE))
            .with_stroke(Stroke {
                color: Color::hex(0xecf0f1),
                width: self.width * POM_POM_STROKE_RATIO,
            });

        let mut out = vec![cone, pom_pom];
        out.extend(
            self.dots
                .iter()
                .map(|&p| DrawPrimitive::circle(p, self.dot_radius, Paint::Solid(Color::WHITE))),
        );
        out
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CheekBlush {
    pub center: Point,
    pub highlight_center: Point,
}

/// Soft pink patches on both cheeks.
#[derive(Debug, Clone, PartialEq)]
pub struct Blush {
    pub radius: f64,
    pub left: CheekBlush,
    pub right: CheekBlush,
}

impl Blush {
    pub fn from_anchors(anchors: &FaceAnchors) -> Self {
        let radius = anchors.eye_distance() * BLUSH_RATIO;
        Self {
            radius,
            left: CheekBlush::new(anchors.left_cheek, anchors.right_cheek, radius),
            right: CheekBlush::new(anchors.right_cheek, anchors.left_cheek, radius),
        }
    }

    pub fn highlight_radii(&self) -> (f64, f64) {
        (self.radius * 0.3, self.radius * 0.2)
    }

    pub fn primitives(&self) -> Vec<DrawPrimitive> {
        let (hx, hy) = self.highlight_radii();
        let mut out = Vec::with_capacity(4);
        for cheek in [&self.left, &self.right] {
            out.push(DrawPrimitive::Ellipse {
                center: cheek.center,
                rx: self.radius,
                ry: self.radius * BLUSH_SQUASH,
                fill: Some(Paint::Radial {
                    center: cheek.center,
                    radius: self.radius,
                    stops: vec![
                        GradientStop::new(0.0, BLUSH_COLOR.with_alpha(0.8)),
                        GradientStop::new(0.7, BLUSH_COLOR.with_alpha(0.4)),
                        GradientStop::new(1.0, BLUSH_COLOR.with_alpha(0.0)),
                    ],
                }),
                stroke: None,
            });
        }
        for cheek in [&self.left, &self.right] {
            out.push(DrawPrimitive::Ellipse {
                center: cheek.highlight_center,
                rx: hx,
                ry: hy,
                fill: Some(Paint::Solid(HIGHLIGHT_COLOR)),
                stroke: None,
            });
        }
        out
    }
}

impl CheekBlush {
    /// Highlight sits up and toward the other cheek.
    fn new(center: Point, other_cheek: Point, radius: f64) -> Self {
        let inward = if other_cheek.x > center.x { 1.0 } else { -1.0 };
        Self {
            center,
            highlight_center: center.offset(inward * radius * 0.3, -radius * 0.2),
        }
    }
}

/// Gold band with five points and three gems, above the forehead.
#[derive(Debug, Clone, PartialEq)]
pub struct Crown {
    pub band_origin: Point,
    pub band_width: f64,
    pub band_height: f64,
    pub points: Vec<[Point; 3]>,
    pub gems: Vec<Point>,
    pub gem_radius: f64,
}

impl Crown {
    pub fn from_anchors(anchors: &FaceAnchors) -> Self {
        let d = anchors.eye_distance();
        let band_width = d + d * CROWN_MARGIN_RATIO;
        let band_height = d * CROWN_BAND_RATIO;
        let cx = anchors.forehead.x;
        let top = anchors.forehead.y - d * CROWN_LIFT_RATIO;
        let left = cx - band_width / 2.0;
        let step = band_width / CROWN_POINTS as f64;

        let points = (0..CROWN_POINTS)
            .map(|i| {
                let x = left + step * i as f64;
                let height = if i == CROWN_POINTS / 2 {
                    d * CROWN_CENTER_POINT_RATIO
                } else {
                    d * CROWN_POINT_RATIO
                };
                [
                    Point::new(x, top),
                    Point::new(x + step / 2.0, top - height),
                    Point::new(x + step, top),
                ]
            })
            .collect();

        let gems = (0..3)
            .map(|i| {
                Point::new(
                    cx + (i as f64 - 1.0) * d * CROWN_GEM_SPACING_RATIO,
                    top + band_height * 0.6,
                )
            })
            .collect();

        Self {
            band_origin: Point::new(left, top),
            band_width,
            band_height,
            points,
            gems,
            gem_radius: d * CROWN_GEM_RADIUS_RATIO,
        }
    }

    pub fn primitives(&self) -> Vec<DrawPrimitive> {
        let mut out = vec![DrawPrimitive::Rect {
            origin: self.band_origin,
            width: self.band_width,
            height: self.band_height,
            fill: Paint::Solid(GOLD),
        }];
        out.extend(self.points.iter().map(|tri| DrawPrimitive::Polygon {
            points: tri.to_vec(),
            fill: Some(Paint::Solid(GOLD)),
            stroke: None,
        }));
        out.extend(
            self.gems
                .iter()
                .map(|&g| DrawPrimitive::circle(g, self.gem_radius, Paint::Solid(Color::hex(0xff0000)))),
        );
        out
    }
}

/// Masquerade mask across both eyes.
#[derive(Debug, Clone, PartialEq)]
pub struct Mask {
    pub center: Point,
    pub rx: f64,
    pub ry: f64,
    pub border_width: f64,
    pub eye_holes: [Point; 2],
    pub hole_rx: f64,
    pub hole_ry: f64,
}

impl Mask {
    pub fn from_anchors(anchors: &FaceAnchors) -> Self {
        let d = anchors.eye_distance();
        Self {
            center: anchors.eye_midpoint(),
            rx: (d + d * MASK_MARGIN_RATIO) / 2.0,
            ry: d * MASK_HALF_HEIGHT_RATIO,
            border_width: d * MASK_BORDER_RATIO,
            eye_holes: [anchors.left_eye, anchors.right_eye],
            hole_rx: d * EYE_HOLE_RX_RATIO,
            hole_ry: d * EYE_HOLE_RY_RATIO,
        }
    }

    pub fn primitives(&self) -> Vec<DrawPrimitive> {
        let mut out = vec![DrawPrimitive::Ellipse {
            center: self.center,
            rx: self.rx,
            ry: self.ry,
            fill: Some(Paint::Solid(Color::BLACK)),
            stroke: Some(Stroke {
                color: GOLD,
                width: self.border_width,
            }),
        }];
        out.extend(self.eye_holes.iter().map(|&eye| DrawPrimitive::Ellipse {
            center: eye,
            rx: self.hole_rx,
            ry: self.hole_ry,
            fill: Some(Paint::Solid(Color::WHITE)),
            stroke: None,
        }));
        out
    }
}
