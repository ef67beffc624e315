//! A grid ray-casting shooter.
//!
//! The world is a grid of wall cells plus billboard sprites. Every frame one
//! ray per screen column is cast against the walls and, through a KdTree,
//! against the sprites; the slices land on a [`core::canvas::Canvas`].

pub mod audio;
pub mod config;
pub mod core;
pub mod error;
pub mod render;

pub use config::GameConfig;
pub use error::{RayngeError, Result};
