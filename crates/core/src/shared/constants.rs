use std::time::Duration;

/// Output resolution of every captured still (portrait).
pub const CAPTURE_WIDTH: u32 = 1080;
pub const CAPTURE_HEIGHT: u32 = 1920;

/// Number of points in the face-mesh landmark topology.
pub const FACE_MESH_POINT_COUNT: usize = 468;

/// Physical print surface, in millimetres.
pub const PRINT_WIDTH_MM: f64 = 54.0;
pub const PRINT_HEIGHT_MM: f64 = 86.0;
pub const DEFAULT_PRINT_DPI: u32 = 300;

pub const MIN_PRINT_QUANTITY: u32 = 1;
pub const MAX_PRINT_QUANTITY: u32 = 10;

/// Numeral shown first; the countdown runs down to 1.
pub const COUNTDOWN_START: u8 = 3;
pub const COUNTDOWN_STEP: Duration = Duration::from_millis(1000);
/// Offset of the early capture into the final numeral's dwell.
pub const EARLY_CAPTURE_OFFSET: Duration = Duration::from_millis(500);

/// Wait between rendering the print preview and invoking the printer.
pub const DEFAULT_PRINT_SETTLE: Duration = Duration::from_millis(1000);

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"];
