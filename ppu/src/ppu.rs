//! The picture processing unit - composites two scrolling background layers
//! and up to 256 sprites into a 240×240 RGB565 frame.
//!
//! # Pipeline
//!
//! One [`Ppu::render`] call walks the screen row-major. Each scanline first
//! rebuilds the two sprite caches from the OAM, then every pixel runs the
//! fixed compositing order, last writer wins:
//!
//! ```text
//! seed main/sub from the default screen colors
//!        │
//!        ▼
//! 1. background 0      ──┐
//! 2. low-priority cache  │  each step may overwrite the main color (and the
//! 3. background 1        │  color-math flag) and/or the sub color when its
//! 4. high-priority cache │  window gate passes on a non-transparent pixel
//!        │             ──┘
//!        ▼
//! color math (scale / add / subtract / fade)
//!        │
//!        ▼
//! frame buffer pixel
//! ```
//!
//! There is no blending between steps; color math at the end is the only
//! place two colors combine.
//!
//! # Concurrency
//!
//! Fully synchronous: `render` borrows the unit mutably and returns only when
//! the frame is complete, so state mutation can never overlap a render pass.
//! Embedders that stage updates from another context should keep a second
//! `Ppu`-shaped state and swap it in between frames.

use crate::render::color::Color;
use crate::render::frame::FrameBuffer;
use crate::render::{FRAME_HEIGHT, FRAME_WIDTH};

use self::background::{Background, BgLayer};
use self::cmath::ColorMath;
use self::memory::Memory;
use self::oam::{OAM_SIZE, Sprite};
use self::registers::Registers;
use self::sprites::SpriteCaches;

pub mod background;
pub mod cmath;
pub mod memory;
pub mod oam;
pub mod registers;
pub mod sprites;
pub mod window;

/// The composited main/sub pair for one pixel, threaded through the layer
/// pass and consumed by color math.
#[derive(Clone, Copy)]
struct PixelState {
    main: Color,
    sub: Color,
    cmath: bool,
}

pub struct Ppu {
    pub registers: Registers,
    pub bg0: Background,
    pub bg1: Background,
    pub cmath: ColorMath,
    pub memory: Memory,

    oam: Box<[Sprite; OAM_SIZE]>,
    caches: SpriteCaches,
    frame: FrameBuffer,
}

impl Default for Ppu {
    fn default() -> Self {
        Self::new()
    }
}

impl Ppu {
    #[must_use]
    pub fn new() -> Self {
        Self {
            registers: Registers::default(),
            bg0: Background::default(),
            bg1: Background::default(),
            cmath: ColorMath::default(),
            memory: Memory::default(),
            oam: Box::new([Sprite::new(); OAM_SIZE]),
            caches: SpriteCaches::default(),
            frame: FrameBuffer::new(),
        }
    }

    /// Whole-struct replace of one OAM entry. The index is masked to the
    /// table size, not range-checked.
    pub fn set_sprite(&mut self, index: usize, sprite: Sprite) {
        self.oam[index & (OAM_SIZE - 1)] = sprite;
    }

    /// Reads back one OAM entry; the index is masked like in
    /// [`set_sprite`](Self::set_sprite).
    #[must_use]
    pub fn sprite(&self, index: usize) -> Sprite {
        self.oam[index & (OAM_SIZE - 1)]
    }

    /// Writes a rectangle of pixels into a background plane. See
    /// [`Memory::blit_background`].
    pub fn blit_background(
        &mut self,
        layer: BgLayer,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
        pixels: &[u16],
    ) {
        self.memory
            .blit_background(layer, x, y, width, height, pixels);
    }

    /// Writes a rectangle of pixels into the sprite sheet. See
    /// [`Memory::blit_sprite_sheet`].
    pub fn blit_sprite_sheet(
        &mut self,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
        pixels: &[u16],
    ) {
        self.memory.blit_sprite_sheet(x, y, width, height, pixels);
    }

    /// Renders one complete frame and returns it.
    ///
    /// This is a total function of the unit's state: every combination of
    /// field values produces a frame, nothing panics, nothing is rejected.
    pub fn render(&mut self) -> &FrameBuffer {
        for y in 0..FRAME_HEIGHT {
            let y = y as u8;
            self.caches.rebuild(&self.oam, y);

            for x in 0..FRAME_WIDTH {
                let color = self.compose_pixel(x as u8, y);
                self.frame.set_pixel(x, usize::from(y), color);
            }
        }

        &self.frame
    }

    /// The last frame produced by [`render`](Self::render).
    #[must_use]
    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    fn compose_pixel(&self, x: u8, y: u8) -> Color {
        let mut state = PixelState {
            main: self.registers.mainscreen_color,
            sub: self.registers.subscreen_color,
            cmath: self.registers.cmath_default,
        };

        let in_a = self.registers.window_1.contains(x);
        let in_b = self.registers.window_2.contains(x);

        self.apply_background(BgLayer::Bg0, x, y, in_a, in_b, &mut state);
        for &index in &self.caches.low {
            self.apply_sprite(index, x, y, in_a, in_b, &mut state);
        }
        self.apply_background(BgLayer::Bg1, x, y, in_a, in_b, &mut state);
        for &index in &self.caches.high {
            self.apply_sprite(index, x, y, in_a, in_b, &mut state);
        }

        self.cmath.apply(state.main, state.sub, state.cmath)
    }

    fn apply_background(
        &self,
        layer: BgLayer,
        x: u8,
        y: u8,
        in_a: bool,
        in_b: bool,
        state: &mut PixelState,
    ) {
        let bg = match layer {
            BgLayer::Bg0 => &self.bg0,
            BgLayer::Bg1 => &self.bg1,
        };
        if !bg.enabled {
            return;
        }

        // Negative scrolled offsets wrap through the cast; bg_pixel masks to
        // the plane size.
        let map_x = (i32::from(x) + i32::from(bg.scroll_x)) as usize;
        let map_y = (i32::from(y) + i32::from(bg.scroll_y)) as usize;
        let pixel = self.memory.bg_pixel(layer, map_x, map_y);
        if pixel == 0 {
            return;
        }

        if bg.main_screen && bg.main_window.gate(in_a, in_b) {
            state.main = Color::new(pixel);
            state.cmath = bg.cmath_enable;
        }
        if bg.sub_screen && bg.sub_window.gate(in_a, in_b) {
            state.sub = Color::new(pixel);
        }
    }

    fn apply_sprite(
        &self,
        index: u8,
        x: u8,
        y: u8,
        in_a: bool,
        in_b: bool,
        state: &mut PixelState,
    ) {
        let sprite = &self.oam[usize::from(index)];
        let pixel = sprites::sample(sprite, &self.memory, x, y);
        if pixel == 0 {
            return;
        }

        if sprite.main_screen && sprite.main_window.gate(in_a, in_b) {
            state.main = Color::new(pixel);
            state.cmath = sprite.cmath_enable;
        }
        if sprite.sub_screen && sprite.sub_window.gate(in_a, in_b) {
            state.sub = Color::new(pixel);
        }
    }
}
