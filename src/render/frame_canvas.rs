//! [`Canvas`] over the CPU framebuffer.
use crate::core::canvas::{Canvas, TextureIndex};
use crate::render::framebuffer::Framebuffer;
use crate::render::textures::TextureManager;

pub struct FrameCanvas<'a> {
    framebuffer: &'a mut Framebuffer,
    textures: &'a TextureManager,
    /// World units covered by one wall texture width.
    cell_size: f32,
    /// Same, for sprite textures.
    sprite_size: f32,
}

impl<'a> FrameCanvas<'a> {
    pub fn new(framebuffer: &'a mut Framebuffer, textures: &'a TextureManager, cell_size: f32, sprite_size: f32) -> Self {
        Self { framebuffer, textures, cell_size, sprite_size }
    }

    fn texture_size(&self, texture: TextureIndex) -> (u32, u32) {
        self.textures.image_size(texture).unwrap_or((64, 64))
    }

    fn world_size(&self, texture: TextureIndex) -> f32 {
        match texture {
            TextureIndex::Wall => self.cell_size,
            TextureIndex::Enemy | TextureIndex::Exit => self.sprite_size,
        }
    }

    fn texel(&self, world: u16, texture_width: u32, texture: TextureIndex) -> u32 {
        (f32::from(world) * texture_width as f32 / self.world_size(texture)) as u32
    }
}

impl Canvas for FrameCanvas<'_> {
    fn draw_slice(&mut self, column: u16, top_row: i32, height: u16, texture_offset: u16, texture: TextureIndex) {
        let x = u32::from(column);
        if x >= self.framebuffer.width || height == 0 {
            return;
        }

        let (tw, th) = self.texture_size(texture);
        let tx = self.texel(texture_offset, tw, texture).min(tw - 1);

        let first = top_row.max(0);
        let last = (top_row + i32::from(height)).min(self.framebuffer.height as i32);
        for y in first..last {
            let ty = ((y - top_row) as u32 * th) / u32::from(height);
            let color = self.textures.get_pixel_color(texture, tx, ty.min(th - 1));
            if color.a < 8 {
                continue;
            }
            self.framebuffer.set_pixel_color(x, y as u32, color);
        }
    }

    fn transparent_pixel(&self, x: u8, y: u8, texture: TextureIndex) -> bool {
        let (tw, th) = self.texture_size(texture);
        let tx = self.texel(u16::from(x), tw, texture).min(tw - 1);
        let ty = self.texel(u16::from(y), th, texture).min(th - 1);
        self.textures.transparent_pixel(texture, tx, ty)
    }
}
