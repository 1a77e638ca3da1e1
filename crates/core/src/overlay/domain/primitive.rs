use crate::shared::color::Color;
use crate::shared::point::Point;

#[derive(Debug, Clone, PartialEq)]
pub struct GradientStop {
    pub offset: f64,
    pub color: Color,
}

impl GradientStop {
    pub const fn new(offset: f64, color: Color) -> Self {
        Self { offset, color }
    }
}

/// How the interior of a shape is colored.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Color),
    /// Colors interpolate along the `start → end` axis.
    Linear {
        start: Point,
        end: Point,
        stops: Vec<GradientStop>,
    },
    /// Colors interpolate by distance from `center`, reaching the last stop
    /// at `radius`.
    Radial {
        center: Point,
        radius: f64,
        stops: Vec<GradientStop>,
    },
}

impl Paint {
    /// Color at `p`. Stops must be sorted by offset.
    pub fn color_at(&self, p: Point) -> Color {
        match self {
            Paint::Solid(c) => *c,
            Paint::Linear { start, end, stops } => {
                let ax = end.x - start.x;
                let ay = end.y - start.y;
                let len_sq = ax * ax + ay * ay;
                let t = if len_sq > 0.0 {
                    ((p.x - start.x) * ax + (p.y - start.y) * ay) / len_sq
                } else {
                    0.0
                };
                sample_stops(stops, t)
            }
            Paint::Radial {
                center,
                radius,
                stops,
            } => {
                let t = if *radius > 0.0 {
                    center.distance(&p) / radius
                } else {
                    1.0
                };
                sample_stops(stops, t)
            }
        }
    }
}

fn sample_stops(stops: &[GradientStop], t: f64) -> Color {
    let (first, last) = match (stops.first(), stops.last()) {
        (Some(f), Some(l)) => (f, l),
        _ => return Color::TRANSPARENT,
    };
    if t <= first.offset {
        return first.color;
    }
    if t >= last.offset {
        return last.color;
    }
    for pair in stops.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        if t <= b.offset {
            let span = b.offset - a.offset;
            let local = if span > 0.0 { (t - a.offset) / span } else { 1.0 };
            return a.color.lerp(b.color, local);
        }
    }
    last.color
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
}

/// A single drawing instruction for the overlay surface.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawPrimitive {
    /// Closed polygon; filled with the even-odd rule.
    Polygon {
        points: Vec<Point>,
        fill: Option<Paint>,
        stroke: Option<Stroke>,
    },
    /// Axis-aligned ellipse. A circle has `rx == ry`.
    Ellipse {
        center: Point,
        rx: f64,
        ry: f64,
        fill: Option<Paint>,
        stroke: Option<Stroke>,
    },
    Rect {
        origin: Point,
        width: f64,
        height: f64,
        fill: Paint,
    },
}

impl DrawPrimitive {
    pub fn circle(center: Point, radius: f64, fill: Paint) -> Self {
        DrawPrimitive::Ellipse {
            center,
            rx: radius,
            ry: radius,
            fill: Some(fill),
            stroke: None,
        }
    }

    pub fn with_stroke(self, stroke: Stroke) -> Self {
        match self {
            DrawPrimitive::Polygon { points, fill, .. } => DrawPrimitive::Polygon {
                points,
                fill,
                stroke: Some(stroke),
            },
            DrawPrimitive::Ellipse {
                center,
                rx,
                ry,
                fill,
                ..
            } => DrawPrimitive::Ellipse {
                center,
                rx,
                ry,
                fill,
                stroke: Some(stroke),
            },
            rect @ DrawPrimitive::Rect { .. } => rect,
        }
    }

    /// Axis-aligned bounds `(min_x, min_y, max_x, max_y)` including stroke.
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        match self {
            DrawPrimitive::Polygon { points, stroke, .. } => {
                let pad = stroke.as_ref().map_or(0.0, |s| s.width / 2.0);
                let mut b = (f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY);
                for p in points {
                    b.0 = b.0.min(p.x);
                    b.1 = b.1.min(p.y);
                    b.2 = b.2.max(p.x);
                    b.3 = b.3.max(p.y);
                }
                (b.0 - pad, b.1 - pad, b.2 + pad, b.3 + pad)
            }
            DrawPrimitive::Ellipse {
                center,
                rx,
                ry,
                stroke,
                ..
            } => {
                let pad = stroke.as_ref().map_or(0.0, |s| s.width / 2.0);
                (
                    center.x - rx - pad,
                    center.y - ry - pad,
                    center.x + rx + pad,
                    center.y + ry + pad,
                )
            }
            DrawPrimitive::Rect {
                origin,
                width,
                height,
                ..
            } => (origin.x, origin.y, origin.x + width, origin.y + height),
        }
    }
}
