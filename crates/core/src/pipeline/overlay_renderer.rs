use crate::landmarks::domain::landmark_set::DetectedFace;
use crate::overlay::domain::filter_geometry::primitives_for_face;
use crate::overlay::domain::filter_variant::FilterVariant;
use crate::overlay::domain::primitive_renderer::PrimitiveRenderer;
use crate::shared::frame::Frame;

/// Owns the transparent overlay surface and redraws it once per
/// detection cycle.
///
/// The surface always matches the dimensions of the last video frame,
/// so overlay pixel `(x, y)` lines up with video pixel `(x, y)`.
pub struct OverlayRenderer {
    renderer: Box<dyn PrimitiveRenderer>,
    surface: Frame,
}

impl OverlayRenderer {
    pub fn new(renderer: Box<dyn PrimitiveRenderer>) -> Self {
        Self {
            renderer,
            surface: Frame::transparent(0, 0),
        }
    }

    pub fn surface(&self) -> &Frame {
        &self.surface
    }

    /// Clears the surface and draws `filter` over each face, in detector
    /// order. Returns how many faces were decorated.
    pub fn render_cycle(
        &mut self,
        video: &Frame,
        faces: &[DetectedFace],
        filter: FilterVariant,
    ) -> Result<usize, Box<dyn std::error::Error>> {
        self.fit_to(video);

        let mut decorated = 0;
        for face in faces {
            let primitives = primitives_for_face(face, filter);
            if primitives.is_empty() {
                continue;
            }
            self.renderer.render(&mut self.surface, &primitives)?;
            decorated += 1;
        }
        Ok(decorated)
    }

    fn fit_to(&mut self, video: &Frame) {
        if (self.surface.width(), self.surface.height()) == (video.width(), video.height()) {
            self.surface.clear();
        } else {
            self.surface = Frame::transparent(video.width(), video.height());
        }
    }
}
