use crate::overlay::domain::primitive::{DrawPrimitive, Paint, Stroke};
use crate::overlay::domain::primitive_renderer::PrimitiveRenderer;
use crate::shared::color::Color;
use crate::shared::frame::{Frame, RGBA_CHANNELS};
use crate::shared::point::Point;

/// Scanline CPU rasterizer for overlay primitives.
///
/// Samples each pixel at its center and blends with source-over onto a
/// straight-alpha RGBA surface. Only the bounding box of each primitive,
/// clipped to the surface, is visited.
pub struct CpuRasterizer;

impl CpuRasterizer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CpuRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl PrimitiveRenderer for CpuRasterizer {
    fn render(
        &self,
        surface: &mut Frame,
        primitives: &[DrawPrimitive],
    ) -> Result<(), Box<dyn std::error::Error>> {
        if surface.channels() != RGBA_CHANNELS {
            return Err(format!(
                "overlay surface must be RGBA, got {} channels",
                surface.channels()
            )
            .into());
        }

        let mut canvas = Canvas {
            width: surface.width() as usize,
            height: surface.height() as usize,
            data: surface.data_mut(),
        };
        for primitive in primitives {
            canvas.draw(primitive);
        }
        Ok(())
    }
}

struct Canvas<'a> {
    width: usize,
    height: usize,
    data: &'a mut [u8],
}

impl Canvas<'_> {
    fn draw(&mut self, primitive: &DrawPrimitive) {
        match primitive {
            DrawPrimitive::Polygon {
                points,
                fill,
                stroke,
            } => {
                if points.len() < 2 {
                    return;
                }
                if let Some(paint) = fill {
                    self.fill_where(primitive.bounds(), paint, |p| inside_polygon(points, p));
                }
                if let Some(stroke) = stroke.as_ref().filter(|s| s.width > 0.0) {
                    let half = stroke.width / 2.0;
                    self.stroke_where(primitive.bounds(), stroke, |p| {
                        polygon_edge_distance(points, p) <= half
                    });
                }
            }
            DrawPrimitive::Ellipse {
                center,
                rx,
                ry,
                fill,
                stroke,
            } => {
                if *rx <= 0.0 || *ry <= 0.0 {
                    return;
                }
                if let Some(paint) = fill {
                    self.fill_where(primitive.bounds(), paint, |p| {
                        ellipse_distance(*center, *rx, *ry, p) <= 1.0
                    });
                }
                if let Some(stroke) = stroke.as_ref().filter(|s| s.width > 0.0) {
                    let half = stroke.width / 2.0;
                    let outer = (*rx + half, *ry + half);
                    let inner = ((*rx - half).max(0.0), (*ry - half).max(0.0));
                    self.stroke_where(primitive.bounds(), stroke, |p| {
                        let in_outer = ellipse_distance(*center, outer.0, outer.1, p) <= 1.0;
                        let in_inner = inner.0 > 0.0
                            && inner.1 > 0.0
                            && ellipse_distance(*center, inner.0, inner.1, p) < 1.0;
                        in_outer && !in_inner
                    });
                }
            }
            DrawPrimitive::Rect {
                origin,
                width,
                height,
                fill,
            } => {
                if *width <= 0.0 || *height <= 0.0 {
                    return;
                }
                let (x0, y0) = (origin.x, origin.y);
                let (x1, y1) = (x0 + width, y0 + height);
                self.fill_where(primitive.bounds(), fill, |p| {
                    p.x >= x0 && p.x < x1 && p.y >= y0 && p.y < y1
                });
            }
        }
    }

    fn fill_where(
        &mut self,
        bounds: (f64, f64, f64, f64),
        paint: &Paint,
        inside: impl Fn(Point) -> bool,
    ) {
        self.visit(bounds, |canvas, offset, p| {
            if inside(p) {
                canvas.blend(offset, paint.color_at(p));
            }
        });
    }

    fn stroke_where(
        &mut self,
        bounds: (f64, f64, f64, f64),
        stroke: &Stroke,
        on_stroke: impl Fn(Point) -> bool,
    ) {
        self.visit(bounds, |canvas, offset, p| {
            if on_stroke(p) {
                canvas.blend(offset, stroke.color);
            }
        });
    }

    /// Calls `f` for every pixel whose center lies in `bounds`.
    fn visit(&mut self, bounds: (f64, f64, f64, f64), mut f: impl FnMut(&mut Self, usize, Point)) {
        let (min_x, min_y, max_x, max_y) = bounds;
        if !(min_x.is_finite() && min_y.is_finite() && max_x.is_finite() && max_y.is_finite()) {
            return;
        }
        let x_start = clamp_index(min_x.floor(), self.width);
        let x_end = clamp_index(max_x.ceil(), self.width);
        let y_start = clamp_index(min_y.floor(), self.height);
        let y_end = clamp_index(max_y.ceil(), self.height);

        for row in y_start..y_end {
            for col in x_start..x_end {
                let p = Point::new(col as f64 + 0.5, row as f64 + 0.5);
                let offset = (row * self.width + col) * RGBA_CHANNELS as usize;
                f(self, offset, p);
            }
        }
    }

    /// Source-over onto a straight-alpha pixel.
    fn blend(&mut self, offset: usize, src: Color) {
        let sa = src.a.clamp(0.0, 1.0);
        if sa <= 0.0 {
            return;
        }
        let px = &mut self.data[offset..offset + RGBA_CHANNELS as usize];
        let da = px[3] as f64 / 255.0;
        let out_a = sa + da * (1.0 - sa);
        let mix = |s: u8, d: u8| {
            ((s as f64 * sa + d as f64 * da * (1.0 - sa)) / out_a)
                .round()
                .clamp(0.0, 255.0) as u8
        };
        px[0] = mix(src.r, px[0]);
        px[1] = mix(src.g, px[1]);
        px[2] = mix(src.b, px[2]);
        px[3] = (out_a * 255.0).round() as u8;
    }
}

fn clamp_index(v: f64, limit: usize) -> usize {
    if v <= 0.0 {
        0
    } else {
        (v as usize).min(limit)
    }
}

/// Normalized ellipse equation value; `<= 1.0` is inside.
fn ellipse_distance(center: Point, rx: f64, ry: f64, p: Point) -> f64 {
    let dx = p.x - center.x;
    let dy = p.y - center.y;
    dx * dx / (rx * rx) + dy * dy / (ry * ry)
}

/// Even-odd rule via horizontal ray casting.
fn inside_polygon(points: &[Point], p: Point) -> bool {
    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let (a, b) = (points[i], points[j]);
        if (a.y > p.y) != (b.y > p.y) {
            let x_cross = (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x;
            if p.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Distance from `p` to the nearest edge of the closed polygon.
fn polygon_edge_distance(points: &[Point], p: Point) -> f64 {
    let n = points.len();
    (0..n)
        .map(|i| segment_distance(points[i], points[(i + 1) % n], p))
        .fold(f64::INFINITY, f64::min)
}

fn segment_distance(a: Point, b: Point, p: Point) -> f64 {
    let abx = b.x - a.x;
    let aby = b.y - a.y;
    let len_sq = abx * abx + aby * aby;
    if len_sq == 0.0 {
        return a.distance(&p);
    }
    let t = (((p.x - a.x) * abx + (p.y - a.y) * aby) / len_sq).clamp(0.0, 1.0);
    Point::new(a.x + abx * t, a.y + aby * t).distance(&p)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::domain::primitive::GradientStop;

    fn pixel(frame: &Frame, x: usize, y: usize) -> [u8; 4] {
        let i = (y * frame.width() as usize + x) * 4;
        let d = frame.data();
        [d[i], d[i + 1], d[i + 2], d[i + 3]]
    }

    fn solid(c: Color) -> Paint {
        Paint::Solid(c)
    }

    #[test]
    fn test_rejects_rgb_surface() {
        let mut frame = Frame::new(vec![0; 12], 2, 2, 3, 0);
        assert!(CpuRasterizer::new().render(&mut frame, &[]).is_err());
    }

    #[test]
    fn test_no_primitives_leaves_surface_transparent() {
        let mut frame = Frame::transparent(10, 10);
        CpuRasterizer::new().render(&mut frame, &[]).unwrap();
        assert!(frame.data().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_circle_fills_center_not_corner() {
        let mut frame = Frame::transparent(20, 20);
        let circle = DrawPrimitive::circle(Point::new(10.0, 10.0), 6.0, solid(Color::rgb(255, 0, 0)));
        CpuRasterizer::new().render(&mut frame, &[circle]).unwrap();
        assert_eq!(pixel(&frame, 10, 10), [255, 0, 0, 255]);
        assert_eq!(pixel(&frame, 0, 0), [0, 0, 0, 0]);
        assert_eq!(pixel(&frame, 19, 19), [0, 0, 0, 0]);
    }

    #[test]
    fn test_triangle_fill() {
        let mut frame = Frame::transparent(20, 20);
        let tri = DrawPrimitive::Polygon {
            points: vec![
                Point::new(10.0, 0.0),
                Point::new(0.0, 20.0),
                Point::new(20.0, 20.0),
            ],
            fill: Some(solid(Color::rgb(0, 255, 0))),
            stroke: None,
        };
        CpuRasterizer::new().render(&mut frame, &[tri]).unwrap();
        assert_eq!(pixel(&frame, 10, 15), [0, 255, 0, 255]);
        // top corners are outside the cone
        assert_eq!(pixel(&frame, 1, 1)[3], 0);
        assert_eq!(pixel(&frame, 18, 1)[3], 0);
    }

    #[test]
    fn test_polygon_stroke_without_fill() {
        let mut frame = Frame::transparent(30, 30);
        let square = DrawPrimitive::Polygon {
            points: vec![
                Point::new(5.0, 5.0),
                Point::new(25.0, 5.0),
                Point::new(25.0, 25.0),
                Point::new(5.0, 25.0),
            ],
            fill: None,
            stroke: Some(Stroke {
                color: Color::BLACK,
                width: 2.0,
            }),
        };
        CpuRasterizer::new().render(&mut frame, &[square]).unwrap();
        assert_eq!(pixel(&frame, 15, 5)[3], 255);
        assert_eq!(pixel(&frame, 15, 15)[3], 0);
    }

    #[test]
    fn test_ellipse_stroke_ring() {
        let mut frame = Frame::transparent(40, 40);
        let ring = DrawPrimitive::Ellipse {
            center: Point::new(20.0, 20.0),
            rx: 10.0,
            ry: 10.0,
            fill: None,
            stroke: Some(Stroke {
                color: Color::rgb(255, 215, 0),
                width: 4.0,
            }),
        };
        CpuRasterizer::new().render(&mut frame, &[ring]).unwrap();
        assert_eq!(pixel(&frame, 29, 20), [255, 215, 0, 255]);
        assert_eq!(pixel(&frame, 20, 20)[3], 0);
    }

    #[test]
    fn test_rect_fill_is_clipped_to_surface() {
        let mut frame = Frame::transparent(10, 10);
        let rect = DrawPrimitive::Rect {
            origin: Point::new(-5.0, -5.0),
            width: 10.0,
            height: 10.0,
            fill: solid(Color::WHITE),
        };
        CpuRasterizer::new().render(&mut frame, &[rect]).unwrap();
        assert_eq!(pixel(&frame, 0, 0), [255, 255, 255, 255]);
        assert_eq!(pixel(&frame, 4, 4), [255, 255, 255, 255]);
        assert_eq!(pixel(&frame, 5, 5)[3], 0);
    }

    #[test]
    fn test_offscreen_primitive_is_noop() {
        let mut frame = Frame::transparent(10, 10);
        let circle = DrawPrimitive::circle(Point::new(-50.0, -50.0), 5.0, solid(Color::WHITE));
        CpuRasterizer::new().render(&mut frame, &[circle]).unwrap();
        assert!(frame.data().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_zero_radius_draws_nothing() {
        let mut frame = Frame::transparent(10, 10);
        let dot = DrawPrimitive::circle(Point::new(5.0, 5.0), 0.0, solid(Color::WHITE));
        CpuRasterizer::new().render(&mut frame, &[dot]).unwrap();
        assert!(frame.data().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_translucent_over_opaque_blends() {
        let mut frame = Frame::transparent(4, 4);
        let base = DrawPrimitive::Rect {
            origin: Point::new(0.0, 0.0),
            width: 4.0,
            height: 4.0,
            fill: solid(Color::BLACK),
        };
        let veil = DrawPrimitive::Rect {
            origin: Point::new(0.0, 0.0),
            width: 4.0,
            height: 4.0,
            fill: solid(Color::rgba(255, 255, 255, 0.5)),
        };
        CpuRasterizer::new().render(&mut frame, &[base, veil]).unwrap();
        let px = pixel(&frame, 1, 1);
        assert_eq!(px[3], 255);
        assert!((127..=128).contains(&px[0]));
    }

    #[test]
    fn test_translucent_over_transparent_keeps_color() {
        let mut frame = Frame::transparent(4, 4);
        let veil = DrawPrimitive::Rect {
            origin: Point::new(0.0, 0.0),
            width: 4.0,
            height: 4.0,
            fill: solid(Color::rgba(255, 182, 193, 0.4)),
        };
        CpuRasterizer::new().render(&mut frame, &[veil]).unwrap();
        assert_eq!(pixel(&frame, 0, 0), [255, 182, 193, 102]);
    }

    #[test]
    fn test_radial_gradient_alpha_falls_off() {
        let mut frame = Frame::transparent(41, 41);
        let center = Point::new(20.5, 20.5);
        let blob = DrawPrimitive::Ellipse {
            center,
            rx: 20.0,
            ry: 20.0,
            fill: Some(Paint::Radial {
                center,
                radius: 20.0,
                stops: vec![
                    GradientStop::new(0.0, Color::rgba(255, 182, 193, 0.8)),
                    GradientStop::new(1.0, Color::rgba(255, 182, 193, 0.0)),
                ],
            }),
            stroke: None,
        };
        CpuRasterizer::new().render(&mut frame, &[blob]).unwrap();
        let center_a = pixel(&frame, 20, 20)[3];
        let mid_a = pixel(&frame, 30, 20)[3];
        let edge_a = pixel(&frame, 39, 20)[3];
        assert_eq!(center_a, 204);
        assert!(mid_a < center_a);
        assert!(edge_a < mid_a);
    }
}
