//! Window masking.
//!
//! Two global screen-x ranges (window A and window B) are shared by every
//! layer and sprite. Each layer combines its membership in the two ranges
//! with a 2-bit logic code, then a pair of draw flags decides whether the
//! layer shows inside the combined region, outside it, both, or neither.

/// Combination applied to the two window memberships before the in/out gate.
///
/// The wire encoding is 2 bits: 0 = XNOR, 1 = XOR, 2 = AND, 3 = OR.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum WindowLogic {
    /// In both windows or in neither.
    #[default]
    Xnor,
    /// In exactly one window.
    Xor,
    /// In both windows.
    And,
    /// In at least one window.
    Or,
}

impl From<u8> for WindowLogic {
    fn from(value: u8) -> Self {
        // Wider values truncate to the 2-bit field.
        match value & 0b11 {
            0 => Self::Xnor,
            1 => Self::Xor,
            2 => Self::And,
            3 => Self::Or,
            _ => unreachable!(),
        }
    }
}

impl WindowLogic {
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Xnor => 0,
            Self::Xor => 1,
            Self::And => 2,
            Self::Or => 3,
        }
    }
}

/// Inclusive screen-x span of one of the two global windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowRange {
    pub left: u8,
    pub right: u8,
}

impl WindowRange {
    #[must_use]
    pub const fn new(left: u8, right: u8) -> Self {
        Self { left, right }
    }

    /// Both bounds are inclusive; `left > right` yields an empty window.
    #[must_use]
    pub const fn contains(self, x: u8) -> bool {
        x >= self.left && x <= self.right
    }
}

impl Default for WindowRange {
    /// An unconfigured window spans the whole screen width.
    fn default() -> Self {
        Self::new(0, 255)
    }
}

/// One layer's window gate for one screen (main or sub): which side of the
/// combined window region the layer draws on.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WindowControl {
    pub draw_in: bool,
    pub draw_out: bool,
    pub logic: WindowLogic,
}

impl WindowControl {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            draw_in: false,
            draw_out: false,
            logic: WindowLogic::Xnor,
        }
    }

    /// Gate that draws everywhere, regardless of window configuration.
    #[must_use]
    pub const fn everywhere() -> Self {
        Self {
            draw_in: true,
            draw_out: true,
            logic: WindowLogic::Xnor,
        }
    }

    /// Evaluates the gate given the pixel's membership in window A and B.
    ///
    /// The logic result is computed on real booleans, so logic 0 (XNOR) can
    /// never leak a promoted-integer bit pattern into the draw decision.
    #[must_use]
    pub fn gate(self, in_a: bool, in_b: bool) -> bool {
        let combined = match self.logic {
            WindowLogic::Xnor => in_a == in_b,
            WindowLogic::Xor => in_a != in_b,
            WindowLogic::And => in_a && in_b,
            WindowLogic::Or => in_a || in_b,
        };

        (combined && self.draw_in) || (!combined && self.draw_out)
    }

    /// True when no window evaluation can ever let the layer draw.
    #[must_use]
    pub const fn is_always_hidden(self) -> bool {
        !self.draw_in && !self.draw_out
    }
}
