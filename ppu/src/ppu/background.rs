use super::window::WindowControl;

/// Selects one of the two background layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BgLayer {
    Bg0,
    Bg1,
}

/// Control state for one scrolling background layer.
///
/// The pixel plane itself lives in [`Memory`](super::memory::Memory); this is
/// only the per-layer state the compositor consults. Scroll offsets are
/// signed and wrap modulo the plane size.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Background {
    pub scroll_x: i16,
    pub scroll_y: i16,
    pub enabled: bool,
    pub main_screen: bool,
    pub sub_screen: bool,
    pub cmath_enable: bool,
    pub main_window: WindowControl,
    pub sub_window: WindowControl,
}
