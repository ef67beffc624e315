use log::warn;
use raylib::core::texture::RaylibTexture2D;
use raylib::prelude::*;

const CEIL_TOP: Color = Color::new(10, 12, 18, 255);
const CEIL_MID: Color = Color::new(20, 24, 32, 255);
const FLOOR_FAR: Color = Color::new(26, 28, 30, 255);
const FLOOR_NEAR: Color = Color::new(56, 58, 62, 255);

fn uploaded<E: std::fmt::Display>(result: Result<(), E>) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            warn!("screen texture upload failed: {e}");
            false
        }
    }
}

#[inline]
fn lerp_color(a: Color, b: Color, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    let f = |x: u8, y: u8| -> u8 { ((x as f32) * (1.0 - t) + (y as f32) * t) as u8 };
    Color::new(f(a.r, b.r), f(a.g, b.g), f(a.b, b.b), 255)
}

/// CPU side screen, uploaded to a texture once per frame.
pub struct Framebuffer {
    pub color_buffer: Vec<Color>,
    pub width: u32,
    pub height: u32,
    pub background_color: Color,
    pub current_color: Color,
}

impl Framebuffer {
    pub fn new(width: u32, height: u32) -> Self {
        let size = (width * height) as usize;
        let bg = Color::BLACK;
        Self {
            color_buffer: vec![bg; size],
            width,
            height,
            background_color: bg,
            current_color: Color::WHITE,
        }
    }

    #[inline]
    pub fn clear(&mut self) {
        self.color_buffer.fill(self.background_color);
    }

    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32) {
        if x < self.width && y < self.height {
            self.color_buffer[(y * self.width + x) as usize] = self.current_color;
        }
    }

    #[inline]
    pub fn set_pixel_color(&mut self, x: u32, y: u32, color: Color) {
        if x < self.width && y < self.height {
            self.color_buffer[(y * self.width + x) as usize] = color;
        }
    }

    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Color {
        if x < self.width && y < self.height {
            return self.color_buffer[(y * self.width + x) as usize];
        }
        self.background_color
    }

    #[inline]
    pub fn set_current_color(&mut self, c: Color) {
        self.current_color = c;
    }

    /// Gradient ceiling on the upper half, gradient floor on the lower one.
    pub fn paint_ceiling_and_floor(&mut self) {
        let half = self.height / 2;
        for y in 0..self.height {
            let color = if y < half {
                lerp_color(CEIL_TOP, CEIL_MID, y as f32 / half.max(1) as f32)
            } else {
                lerp_color(FLOOR_FAR, FLOOR_NEAR, (y - half) as f32 / (self.height - half).max(1) as f32)
            };
            let row = (y * self.width) as usize;
            self.color_buffer[row..row + self.width as usize].fill(color);
        }
    }

    /// Small cross in the middle of the screen.
    pub fn draw_crosshair(&mut self, color: Color) {
        let (cx, cy) = (self.width / 2, self.height / 2);
        self.set_current_color(color);
        for d in 2..=6u32 {
            self.set_pixel(cx + d, cy);
            self.set_pixel(cx.wrapping_sub(d), cy);
            self.set_pixel(cx, cy + d);
            self.set_pixel(cx, cy.wrapping_sub(d));
        }
    }

    /// RGBA8 bytes, row major.
    pub fn to_rgba(&self) -> Vec<u8> {
        self.color_buffer.iter().flat_map(|c| [c.r, c.g, c.b, c.a]).collect()
    }

    /// False if raylib refused the pixels; the failure is logged.
    pub fn upload_to_texture(&self, tex: &mut Texture2D) -> bool {
        uploaded(tex.update_texture(&self.to_rgba()))
    }
}
