//! All the sprites of a level.
//!
//! Enemies sit behind a [`KdTree`]. Exits are few and get a plain scan.
use std::cmp::Ordering;

use log::{debug, info};

use crate::core::kd_tree::KdTree;
use crate::core::ray::{distance, Ray, RayHit};
use crate::core::sprite::Sprite;
use crate::error::{RayngeError, Result};

/// Which sprite kinds a query looks at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpriteFilter {
    All,
    Enemies,
}

/// A sprite seen by a ray.
#[derive(Clone, Copy, Debug)]
pub struct SpriteHit<'a> {
    pub sprite: &'a Sprite,
    pub hit: RayHit,
}

#[derive(Debug)]
pub struct Objects {
    enemies: Vec<Sprite>,
    exits: Vec<Sprite>,
    index: KdTree,
}

impl Objects {
    pub fn new(enemies: Vec<Sprite>, exits: Vec<Sprite>, max_depth: u8, small_enough: u8) -> Result<Self> {
        let index = KdTree::build(&enemies, max_depth, small_enough)?;
        info!("{} enemies, {} exits", enemies.len(), exits.len());
        Ok(Self { enemies, exits, index })
    }

    pub fn enemies(&self) -> &[Sprite] {
        &self.enemies
    }

    pub fn exits(&self) -> &[Sprite] {
        &self.exits
    }

    pub fn active_enemies(&self) -> usize {
        self.enemies.iter().filter(|s| s.active).count()
    }

    /// Active sprites hit before `cutoff`, farthest first.
    pub fn intersections(&self, ray: &Ray, cutoff: f32, filter: SpriteFilter) -> Vec<SpriteHit<'_>> {
        let candidates = self.index.intersect(ray, cutoff);
        let enemies = candidates.iter().map(|&i| &self.enemies[usize::from(i)]);

        let mut hits = Vec::new();
        collect_visible(enemies, ray, cutoff, &mut hits);
        if filter == SpriteFilter::All {
            collect_visible(&self.exits, ray, cutoff, &mut hits);
        }

        hits.sort_by(|a, b| b.hit.distance.partial_cmp(&a.hit.distance).unwrap_or(Ordering::Equal));
        hits
    }

    /// Switch off an enemy. Exits can't be deactivated.
    pub fn deactivate(&mut self, id: u8) -> Result<()> {
        let enemy = self
            .enemies
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(RayngeError::UnknownSprite(id))?;
        enemy.active = false;
        debug!("enemy {id} down");
        Ok(())
    }

    /// Straight line distance to the nearest exit, infinite without exits.
    pub fn distance_to_closest_exit(&self, x: f32, z: f32) -> f32 {
        self.exits
            .iter()
            .map(|e| distance(e.x, e.z, x, z))
            .fold(f32::INFINITY, f32::min)
    }
}

fn collect_visible<'a>(
    sprites: impl IntoIterator<Item = &'a Sprite>,
    ray: &Ray,
    cutoff: f32,
    hits: &mut Vec<SpriteHit<'a>>,
) {
    for sprite in sprites {
        if !sprite.active {
            continue;
        }
        let hit = sprite.intersection(ray);
        if hit.is_hit() && hit.distance < cutoff {
            hits.push(SpriteHit { sprite, hit });
        }
    }
}
