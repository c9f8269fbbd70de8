//! Per-scanline sprite selection and sprite pixel sampling.
//!
//! Scanning all 256 OAM entries for every pixel would dominate the frame
//! budget, so visibility is resolved once per scanline: the binner walks the
//! OAM in index order and collects the sprites that intersect the row into
//! two bounded caches, one per priority class. The 240 pixel evaluations of
//! the row then only touch the cached entries.

use vecfixed::VecFixed;

use super::memory::Memory;
use super::oam::{OAM_SIZE, Priority, Sprite};

/// Cache capacity per priority class per scanline. With both classes full
/// that is a 32 visible sprites/scanline ceiling; further OAM entries are
/// dropped for the row, lowest index wins.
pub const SPRITE_CACHE: usize = 16;

/// OAM indices of the sprites visible on the current scanline, ascending.
pub type SpriteCache = VecFixed<SPRITE_CACHE, u8>;

/// The two per-scanline caches, rebuilt at the start of every row.
#[derive(Default)]
pub struct SpriteCaches {
    pub low: SpriteCache,
    pub high: SpriteCache,
}

impl SpriteCaches {
    pub fn rebuild(&mut self, oam: &[Sprite; OAM_SIZE], y: u8) {
        self.low.clear();
        self.high.clear();

        let mut dropped: u32 = 0;
        for (index, sprite) in oam.iter().enumerate() {
            if !sprite.enabled {
                continue;
            }

            // A sprite whose window gates can never pass on either screen is
            // invisible everywhere; don't waste a cache slot on it.
            let main_visible = sprite.main_screen && !sprite.main_window.is_always_hidden();
            let sub_visible = sprite.sub_screen && !sprite.sub_window.is_always_hidden();
            if !main_visible && !sub_visible {
                continue;
            }

            let top = i32::from(sprite.y);
            let bottom = top + i32::from(sprite.effective_height());
            if i32::from(y) < top || i32::from(y) >= bottom {
                continue;
            }

            let cache = match sprite.priority {
                Priority::Low => &mut self.low,
                Priority::High => &mut self.high,
            };
            if !cache.push(index as u8) {
                dropped += 1;
            }

            if self.low.is_full() && self.high.is_full() {
                break;
            }
        }

        if dropped > 0 {
            logger::log(format!(
                "scanline {y}: sprite cache full, {dropped} OAM entries dropped"
            ));
        }
    }
}

/// Samples the sheet pixel a sprite shows at screen `(x, y)`, or 0
/// (transparent) when the pixel falls outside the sprite horizontally.
///
/// The caller guarantees `y` intersects the sprite's rows (the binner already
/// checked); X and Y flips mirror independently within the sprite's effective
/// extent, and double-size sprites map each 2×2 screen block onto one sheet
/// pixel by halving the offsets after the flips.
pub(super) fn sample(sprite: &Sprite, memory: &Memory, x: u8, y: u8) -> u16 {
    let width = i32::from(sprite.effective_width());
    let mut offset_x = i32::from(x) - i32::from(sprite.x);
    if offset_x < 0 || offset_x >= width {
        return 0;
    }
    if sprite.flip_x {
        offset_x = width - offset_x - 1;
    }

    let mut offset_y = i32::from(y) - i32::from(sprite.y);
    if sprite.flip_y {
        offset_y = i32::from(sprite.effective_height()) - offset_y - 1;
    }

    if sprite.double_size {
        offset_x >>= 1;
        offset_y >>= 1;
    }

    memory.sheet_pixel(
        (i32::from(sprite.graphics_x) + offset_x) as usize,
        (i32::from(sprite.graphics_y) + offset_y) as usize,
    )
}
