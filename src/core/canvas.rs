//! The drawing sink seen by the renderer.
use crate::core::sprite::SpriteKind;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextureIndex {
    Wall,
    Enemy,
    Exit,
}

impl From<SpriteKind> for TextureIndex {
    fn from(kind: SpriteKind) -> Self {
        match kind {
            SpriteKind::Enemy => TextureIndex::Enemy,
            SpriteKind::Exit => TextureIndex::Exit,
        }
    }
}

/// Hides the graphics backend, so the scan can run against a mock.
pub trait Canvas {
    /// Copy column `texture_offset` of `texture` into screen column `column`,
    /// scaled to `height` pixels from `top_row` down. `top_row` can be
    /// negative when the object is very close.
    fn draw_slice(&mut self, column: u16, top_row: i32, height: u16, texture_offset: u16, texture: TextureIndex);

    /// True when the texture pixel's alpha is below 128.
    fn transparent_pixel(&self, x: u8, y: u8, texture: TextureIndex) -> bool;
}
