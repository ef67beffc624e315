use std::collections::HashMap;

use log::warn;
use raylib::prelude::*;

use crate::core::canvas::TextureIndex;

/// Immutable CPU pixmap, sampled per pixel.
#[derive(Clone)]
struct Pixmap {
    w: u32,
    h: u32,
    px: Vec<Color>,
}

impl Pixmap {
    fn new(w: u32, h: u32, px: Vec<Color>) -> Self {
        Self { w, h, px }
    }

    #[inline]
    fn sample(&self, x: u32, y: u32) -> Color {
        let xi = (x % self.w) as usize;
        let yi = (y % self.h) as usize;
        self.px[(yi * self.w as usize) + xi]
    }
}

pub struct TextureManager {
    maps: HashMap<TextureIndex, Pixmap>,
}

impl TextureManager {
    const SIZE: u32 = 64;

    /// Loads `assets/*.png`, with a procedural stand-in for anything missing.
    pub fn load() -> Self {
        let candidates: &[(&str, TextureIndex)] = &[
            ("assets/wall.png", TextureIndex::Wall),
            ("assets/enemy.png", TextureIndex::Enemy),
            ("assets/exit.png", TextureIndex::Exit),
        ];

        let mut tm = Self { maps: HashMap::new() };
        for &(path, key) in candidates {
            if let Ok(img) = Image::load_image(path) {
                let w = img.width().max(1) as u32;
                let h = img.height().max(1) as u32;
                let data = img.get_image_data().to_vec();
                tm.maps.insert(key, Pixmap::new(w, h, data));
            } else {
                warn!("{path} not found, using a procedural {key:?} texture");
            }
        }
        tm.fill_missing();
        tm
    }

    /// Only the procedural textures.
    pub fn procedural() -> Self {
        let mut tm = Self { maps: HashMap::new() };
        tm.fill_missing();
        tm
    }

    fn fill_missing(&mut self) {
        for key in [TextureIndex::Wall, TextureIndex::Enemy, TextureIndex::Exit] {
            self.maps.entry(key).or_insert_with(|| match key {
                TextureIndex::Wall => Self::make_checker_pixmap(Self::SIZE, Self::SIZE, Color::new(40, 140, 220, 255)),
                TextureIndex::Enemy => Self::make_enemy_flat(Self::SIZE, Self::SIZE, Color::new(255, 120, 120, 255)),
                TextureIndex::Exit => Self::make_checker_pixmap(Self::SIZE, Self::SIZE, Color::new(30, 160, 30, 255)),
            });
        }
    }

    fn make_checker_pixmap(w: u32, h: u32, base: Color) -> Pixmap {
        let mut px = vec![base; (w * h) as usize];
        let cell = 8u32;
        for y in 0..h {
            for x in 0..w {
                if ((x / cell) + (y / cell)) % 2 == 0 {
                    let i = (y * w + x) as usize;
                    px[i] = Self::mix(px[i], Color::WHITE, 24);
                }
            }
        }
        Pixmap::new(w, h, px)
    }

    /// Opaque ellipse on a transparent background.
    fn make_enemy_flat(w: u32, h: u32, body: Color) -> Pixmap {
        let mut px = vec![Color::new(0, 0, 0, 0); (w * h) as usize];
        let cx = (w as f32) * 0.5;
        let cy = (h as f32) * 0.6;
        let rx = (w as f32) * 0.23;
        let ry = (h as f32) * 0.35;
        for y in 0..h {
            for x in 0..w {
                let nx = (x as f32 - cx) / rx;
                let ny = (y as f32 - cy) / ry;
                if nx * nx + ny * ny <= 1.0 {
                    px[(y * w + x) as usize] = Color::new(body.r, body.g, body.b, 255);
                }
            }
        }
        Pixmap::new(w, h, px)
    }

    #[inline]
    fn mix(a: Color, b: Color, t: u8) -> Color {
        let ta = t as u16;
        let na = 255u16 - ta;
        let mixc = |x: u8, y: u8| -> u8 { (((x as u16) * na + (y as u16) * ta) / 255) as u8 };
        Color::new(mixc(a.r, b.r), mixc(a.g, b.g), mixc(a.b, b.b), mixc(a.a, b.a))
    }

    /// Sample per pixel, wrapping around; white if the texture is missing.
    pub fn get_pixel_color(&self, key: TextureIndex, tx: u32, ty: u32) -> Color {
        self.maps.get(&key).map_or(Color::WHITE, |pm| pm.sample(tx, ty))
    }

    pub fn image_size(&self, key: TextureIndex) -> Option<(u32, u32)> {
        self.maps.get(&key).map(|p| (p.w, p.h))
    }

    pub fn transparent_pixel(&self, key: TextureIndex, tx: u32, ty: u32) -> bool {
        self.get_pixel_color(key, tx, ty).a < 128
    }
}
