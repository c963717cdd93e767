//! Shared numeric constants for the canvas crate.

// ── Scene ───────────────────────────────────────────────────────

/// Logical scene width; token positions are expressed in these units.
pub const SCENE_WIDTH: f64 = 1920.0;

/// Logical scene height. Together with [`SCENE_WIDTH`] this fixes a 16:9 canvas.
pub const SCENE_HEIGHT: f64 = 1080.0;

/// Logical size value that marks a token as the scene background.
pub const BACKGROUND_SIZE: i64 = -1;

// ── Tokens ──────────────────────────────────────────────────────

/// Size applied by create requests and the secondary-button reset.
pub const DEFAULT_TOKEN_SIZE: i64 = 100;

/// Smallest size a resize drag may produce.
pub const MIN_TOKEN_SIZE: i64 = 20;

/// Largest size a resize drag may produce.
pub const MAX_TOKEN_SIZE: i64 = 1000;

/// Resize reference distance as a fraction of the primary token's size.
///
/// At 0.5 the pointer sitting on the token's edge means "no change".
pub const RESIZE_REFERENCE_FRACTION: f64 = 0.5;

/// Rotation step for the keyboard rotate shortcuts, in degrees.
pub const ROTATE_STEP_DEG: f64 = 15.0;

// ── Viewport ────────────────────────────────────────────────────

/// Multiplicative zoom change per wheel tick.
pub const ZOOM_STEP: f64 = 1.05;

/// Zoom floor.
pub const MIN_ZOOM: f64 = 0.5;

// ── Animation ───────────────────────────────────────────────────

/// Frames a spawn or despawn fade takes from one end of the ramp to the other.
pub const FADE_FRAMES: u32 = 10;

// ── Rendering ───────────────────────────────────────────────────

/// Shadow blur radius used for selection glow, in scene units.
pub const GLOW_BLUR: f64 = 24.0;

/// Fill used for the box-select preview rectangle.
pub const SELECTION_BOX_FILL: &str = "rgba(80, 140, 255, 0.25)";
