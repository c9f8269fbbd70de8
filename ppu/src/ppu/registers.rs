use crate::render::color::Color;

use super::window::WindowRange;

/// Screen-global state consulted by every pixel evaluation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Registers {
    /// Color the main screen holds before any layer writes the pixel.
    pub mainscreen_color: Color,

    /// Color the sub screen holds before any layer writes the pixel.
    pub subscreen_color: Color,

    /// Seed of the per-pixel color-math flag, used when no layer claims the
    /// pixel on the main screen.
    pub cmath_default: bool,

    /// Window A span in screen-x, inclusive on both ends.
    pub window_1: WindowRange,

    /// Window B span in screen-x, inclusive on both ends.
    pub window_2: WindowRange,
}
