// Packed flag layout follows the device's OAM word:
// bit 0 enabled, 1 flip-x, 2 flip-y, 3 main screen, 4 sub screen,
// 5 color math, 6 priority, 7 double size, 8-11 main window (in, out, logic),
// 12-15 sub window (in, out, logic).

use crate::bitwise::Bits;

use super::window::{WindowControl, WindowLogic};

/// Number of entries in the object table.
pub const OAM_SIZE: usize = 256;

/// Draw-order class of a sprite. Low-priority sprites are drawn between the
/// two background layers, high-priority sprites above both.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    #[default]
    Low,
    High,
}

impl From<bool> for Priority {
    fn from(value: bool) -> Self {
        if value { Self::High } else { Self::Low }
    }
}

/// One object-table entry.
///
/// `width` and `height` describe the source rectangle in the sprite sheet;
/// the on-screen footprint doubles in both axes under `double_size`. Position
/// is signed so sprites can hang off any screen edge. The caller keeps
/// `graphics_x + width` inside the sheet; out-of-range reads wrap around the
/// sheet's power-of-two size rather than being checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sprite {
    pub x: i16,
    pub y: i16,
    pub width: u8,
    pub height: u8,
    pub graphics_x: u8,
    pub graphics_y: u8,

    pub enabled: bool,
    pub flip_x: bool,
    pub flip_y: bool,
    pub main_screen: bool,
    pub sub_screen: bool,
    pub cmath_enable: bool,
    pub priority: Priority,
    pub double_size: bool,
    pub main_window: WindowControl,
    pub sub_window: WindowControl,
}

impl Sprite {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            x: 0,
            y: 0,
            width: 8,
            height: 8,
            graphics_x: 0,
            graphics_y: 0,
            enabled: false,
            flip_x: false,
            flip_y: false,
            main_screen: false,
            sub_screen: false,
            cmath_enable: false,
            priority: Priority::Low,
            double_size: false,
            main_window: WindowControl::new(),
            sub_window: WindowControl::new(),
        }
    }

    /// On-screen width in pixels.
    #[must_use]
    pub const fn effective_width(&self) -> u16 {
        if self.double_size {
            (self.width as u16) << 1
        } else {
            self.width as u16
        }
    }

    /// On-screen height in pixels.
    #[must_use]
    pub const fn effective_height(&self) -> u16 {
        if self.double_size {
            (self.height as u16) << 1
        } else {
            self.height as u16
        }
    }

    /// Packs the flag fields into the 16-bit wire word.
    #[must_use]
    pub fn flags(&self) -> u16 {
        let mut flags = 0_u16;
        flags.set_bit(0, self.enabled);
        flags.set_bit(1, self.flip_x);
        flags.set_bit(2, self.flip_y);
        flags.set_bit(3, self.main_screen);
        flags.set_bit(4, self.sub_screen);
        flags.set_bit(5, self.cmath_enable);
        flags.set_bit(6, matches!(self.priority, Priority::High));
        flags.set_bit(7, self.double_size);
        flags.set_bit(8, self.main_window.draw_in);
        flags.set_bit(9, self.main_window.draw_out);
        flags.set_bits(10..=11, u16::from(self.main_window.logic.code()));
        flags.set_bit(12, self.sub_window.draw_in);
        flags.set_bit(13, self.sub_window.draw_out);
        flags.set_bits(14..=15, u16::from(self.sub_window.logic.code()));

        flags
    }

    /// Replaces the flag fields from the 16-bit wire word. Position, size and
    /// graphics origin are untouched.
    pub fn set_flags(&mut self, flags: u16) {
        self.enabled = flags.get_bit(0);
        self.flip_x = flags.get_bit(1);
        self.flip_y = flags.get_bit(2);
        self.main_screen = flags.get_bit(3);
        self.sub_screen = flags.get_bit(4);
        self.cmath_enable = flags.get_bit(5);
        self.priority = Priority::from(flags.get_bit(6));
        self.double_size = flags.get_bit(7);
        self.main_window = WindowControl {
            draw_in: flags.get_bit(8),
            draw_out: flags.get_bit(9),
            logic: WindowLogic::from(flags.get_bits(10..=11) as u8),
        };
        self.sub_window = WindowControl {
            draw_in: flags.get_bit(12),
            draw_out: flags.get_bit(13),
            logic: WindowLogic::from(flags.get_bits(14..=15) as u8),
        };
    }
}

impl Default for Sprite {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn default_sprite_is_disabled_8x8() {
        let sprite = Sprite::default();
        assert!(!sprite.enabled);
        assert_eq!(sprite.width, 8);
        assert_eq!(sprite.height, 8);
        assert_eq!(sprite.flags(), 0);
    }

    #[test]
    fn effective_size_doubles() {
        let mut sprite = Sprite {
            width: 32,
            height: 16,
            ..Sprite::default()
        };
        assert_eq!(sprite.effective_width(), 32);
        assert_eq!(sprite.effective_height(), 16);

        sprite.double_size = true;
        assert_eq!(sprite.effective_width(), 64);
        assert_eq!(sprite.effective_height(), 32);
    }

    #[test]
    fn flags_known_pattern() {
        let sprite = Sprite {
            enabled: true,
            main_screen: true,
            cmath_enable: true,
            priority: Priority::High,
            main_window: WindowControl {
                draw_in: true,
                draw_out: false,
                logic: WindowLogic::Or,
            },
            ..Sprite::default()
        };

        // bits: 0 enabled, 3 main, 5 cmath, 6 priority, 8 main-in,
        // 10-11 main logic = 0b11.
        assert_eq!(sprite.flags(), 0b0000_1101_0110_1001);
    }

    #[test]
    fn flags_round_trip() {
        let original = Sprite {
            x: -12,
            y: 300,
            width: 64,
            height: 32,
            graphics_x: 128,
            graphics_y: 7,
            enabled: true,
            flip_x: true,
            flip_y: false,
            main_screen: true,
            sub_screen: true,
            cmath_enable: false,
            priority: Priority::High,
            double_size: true,
            main_window: WindowControl {
                draw_in: true,
                draw_out: true,
                logic: WindowLogic::Xor,
            },
            sub_window: WindowControl {
                draw_in: false,
                draw_out: true,
                logic: WindowLogic::And,
            },
        };

        let mut decoded = Sprite {
            x: original.x,
            y: original.y,
            width: original.width,
            height: original.height,
            graphics_x: original.graphics_x,
            graphics_y: original.graphics_y,
            ..Sprite::default()
        };
        decoded.set_flags(original.flags());

        assert_eq!(decoded, original);
    }

    #[test]
    fn set_flags_leaves_geometry_alone() {
        let mut sprite = Sprite {
            x: 77,
            y: -3,
            width: 16,
            height: 24,
            graphics_x: 40,
            graphics_y: 50,
            ..Sprite::default()
        };

        sprite.set_flags(0xFFFF);

        assert_eq!(sprite.x, 77);
        assert_eq!(sprite.y, -3);
        assert_eq!(sprite.width, 16);
        assert_eq!(sprite.height, 24);
        assert_eq!(sprite.graphics_x, 40);
        assert_eq!(sprite.graphics_y, 50);
        assert!(sprite.enabled);
        assert_eq!(sprite.priority, Priority::High);
        assert_eq!(sprite.sub_window.logic, WindowLogic::Or);
    }
}
