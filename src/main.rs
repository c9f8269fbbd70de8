use std::env;

use ppu::Ppu;
use ppu::ppu::background::{Background, BgLayer};
use ppu::ppu::oam::{Priority, Sprite};
use ppu::ppu::window::{WindowControl, WindowLogic, WindowRange};
use ppu::render::color::Color;
use ppu::render::frame::{ByteOrder, DisplaySink, FileSink};
use tracing::info;
use tracing_subscriber::EnvFilter;

const FRAMES: usize = 120;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("satsuma v0.1.0");

    let output = env::args()
        .nth(1)
        .unwrap_or_else(|| "satsuma-frames.raw".to_string());

    let mut sink = match FileSink::create(&output) {
        Ok(sink) => sink,
        Err(e) => {
            println!("cannot open {output}: {e}");
            std::process::exit(1)
        }
    };

    let mut ppu = Ppu::new();
    build_scene(&mut ppu);

    info!("rendering {FRAMES} frames to {output}");
    for frame_index in 0..FRAMES {
        animate(&mut ppu, frame_index);

        let frame = ppu.render();
        if let Err(e) = sink.push_frame(&frame.to_bytes(ByteOrder::BigEndian)) {
            println!("display sink failed: {e}");
            std::process::exit(2)
        }
    }
    info!("done");
}

/// Checkerboard on BG0, a sub-screen wash on BG1 gated to the middle of the
/// screen, and a row of sprites exercising flips, double size and priority.
fn build_scene(ppu: &mut Ppu) {
    let dark = Color::from_rgb(4, 8, 4).0;
    let light = Color::from_rgb(8, 16, 8).0;
    let mut tile = Vec::with_capacity(64 * 64);
    for y in 0..64 {
        for x in 0..64 {
            let checker = (x / 8 + y / 8) % 2 == 0;
            tile.push(if checker { dark } else { light });
        }
    }
    for tile_y in 0..8 {
        for tile_x in 0..8 {
            ppu.blit_background(BgLayer::Bg0, tile_x * 64, tile_y * 64, 64, 64, &tile);
        }
    }
    ppu.bg0 = Background {
        enabled: true,
        main_screen: true,
        main_window: WindowControl::everywhere(),
        ..Background::default()
    };

    // BG1 writes a flat wash to the sub screen, only inside window A; with
    // additive math on, sprites brighten where the wash is present.
    let wash = vec![Color::from_rgb(6, 12, 14).0; 512 * 16];
    for strip in 0..32 {
        ppu.blit_background(BgLayer::Bg1, 0, strip * 16, 512, 16, &wash);
    }
    ppu.bg1 = Background {
        enabled: true,
        sub_screen: true,
        sub_window: WindowControl {
            draw_in: true,
            draw_out: false,
            logic: WindowLogic::Or,
        },
        ..Background::default()
    };
    ppu.registers.window_1 = WindowRange::new(60, 180);

    // A 16×16 diamond in the sprite sheet.
    let mut diamond = Vec::with_capacity(16 * 16);
    for y in 0..16_i32 {
        for x in 0..16_i32 {
            let inside = (x - 8).abs() + (y - 8).abs() <= 7;
            diamond.push(if inside { Color::from_rgb(31, 40, 8).0 } else { 0 });
        }
    }
    ppu.blit_sprite_sheet(0, 0, 16, 16, &diamond);

    for index in 0..8 {
        let sprite = Sprite {
            x: 20 + (index as i16) * 26,
            y: 40,
            width: 16,
            height: 16,
            enabled: true,
            main_screen: true,
            main_window: WindowControl::everywhere(),
            flip_x: index % 2 == 1,
            flip_y: index % 4 >= 2,
            cmath_enable: true,
            priority: if index >= 4 { Priority::High } else { Priority::Low },
            double_size: index == 7,
            ..Sprite::default()
        };
        ppu.set_sprite(index, sprite);
    }

    ppu.cmath.enable = true;
    ppu.cmath.add = true;
    ppu.cmath.fade_enable = true;
}

fn animate(ppu: &mut Ppu, frame_index: usize) {
    ppu.bg0.scroll_x = frame_index as i16;
    ppu.bg0.scroll_y = (frame_index / 2) as i16;

    // Triangle-wave fade, full cycle over 64 frames.
    let phase = (frame_index % 64) as u16;
    let level = if phase < 32 { phase * 8 } else { (63 - phase) * 8 };
    ppu.cmath.fade = level.min(255) as u8;
}
