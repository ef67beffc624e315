//! Game geometry and state: grid, rays, sprites, the sprite index, player
//! and level loading, plus the drawing sink they report to.

pub mod canvas;
pub mod grid;
pub mod kd_tree;
pub mod objects;
pub mod player;
pub mod ray;
pub mod sprite;
pub mod world;
