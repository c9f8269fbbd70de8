//! Color math - the blending stage between the composited main and sub
//! screens.
//!
//! After the layer pass each pixel holds a main color, a sub color and a
//! per-pixel math flag (set by the last layer that claimed the main screen).
//! This unit optionally scales the two colors, adds or subtracts the sub
//! screen into the main screen per channel, and applies the global fade. The
//! operations run in a fixed order; the unit does not enforce exclusivity
//! between nominally exclusive flags, it just applies whatever is set:
//!
//! 1. double main, 2. halve main, 3. double sub, 4. halve sub,
//! 5. add sub to main (saturating at the channel max),
//! 6. subtract sub from main (saturating at zero),
//! 7. fade: `channel * fade / 256`.

use crate::render::color::{BLUE_MAX, Color, GREEN_MAX, RED_MAX};

/// Global color-math state.
///
/// `fade` is a linear brightness scale: 255 is (almost) full brightness, 0 is
/// black. Doubling is masked to the channel width like the hardware shift it
/// models; add and subtract saturate.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ColorMath {
    pub enable: bool,
    pub half_main: bool,
    pub double_main: bool,
    pub half_sub: bool,
    pub double_sub: bool,
    pub add: bool,
    pub subtract: bool,
    pub fade_enable: bool,
    pub fade: u8,
}

impl ColorMath {
    /// Produces the final pixel from the composited main/sub pair.
    ///
    /// `pixel_flag` is the per-pixel math flag left by the layer pass; math
    /// only runs when both it and the global enable are set. With math and
    /// fade both off, the main color passes through untouched.
    #[must_use]
    pub fn apply(&self, main: Color, sub: Color, pixel_flag: bool) -> Color {
        let use_cmath = self.enable && pixel_flag;
        if !use_cmath && !self.fade_enable {
            return main;
        }

        let mut red = main.red();
        let mut green = main.green();
        let mut blue = main.blue();

        if use_cmath {
            let mut sub_red = sub.red();
            let mut sub_green = sub.green();
            let mut sub_blue = sub.blue();

            if self.double_main {
                red = (red << 1) & RED_MAX;
                green = (green << 1) & GREEN_MAX;
                blue = (blue << 1) & BLUE_MAX;
            }
            if self.half_main {
                red >>= 1;
                green >>= 1;
                blue >>= 1;
            }
            if self.double_sub {
                sub_red = (sub_red << 1) & RED_MAX;
                sub_green = (sub_green << 1) & GREEN_MAX;
                sub_blue = (sub_blue << 1) & BLUE_MAX;
            }
            if self.half_sub {
                sub_red >>= 1;
                sub_green >>= 1;
                sub_blue >>= 1;
            }
            if self.add {
                red = (red + sub_red).min(RED_MAX);
                green = (green + sub_green).min(GREEN_MAX);
                blue = (blue + sub_blue).min(BLUE_MAX);
            }
            if self.subtract {
                red = red.saturating_sub(sub_red);
                green = green.saturating_sub(sub_green);
                blue = blue.saturating_sub(sub_blue);
            }
        }

        if self.fade_enable {
            red = ((u16::from(red) * u16::from(self.fade)) >> 8) as u8 & RED_MAX;
            green = ((u16::from(green) * u16::from(self.fade)) >> 8) as u8 & GREEN_MAX;
            blue = ((u16::from(blue) * u16::from(self.fade)) >> 8) as u8 & BLUE_MAX;
        }

        Color::from_rgb(red, green, blue)
    }
}
