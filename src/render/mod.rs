//! Rendering: the column scan and the raylib-backed drawing sink.
//!
//! - `projection`: projection plane and per-column scan
//! - `hud`: on-screen text
//! - `framebuffer`: CPU framebuffer
//! - `textures`: pixmaps with procedural fallbacks
//! - `frame_canvas`: `Canvas` over framebuffer + textures

pub mod frame_canvas;
pub mod framebuffer;
pub mod hud;
pub mod projection;
pub mod textures;
