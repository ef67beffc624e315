//! Binary space partition over a fixed set of sprites.
//!
//! Each internal node cuts its sprites in two along X or Z. A sprite crossing
//! the cut goes to both halves. Queries walk the tree along a ray and only
//! return sprites sitting in the regions the ray actually goes through, up to
//! a cutoff distance.
use log::debug;

use crate::core::ray::Ray;
use crate::core::sprite::Sprite;
use crate::error::{RayngeError, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Partition {
    OnX,
    OnZ,
}

/// Children are indices into the tree arena.
#[derive(Clone, Debug, PartialEq)]
pub enum KdNode {
    Leaf {
        /// Indices into the sprite slice the tree was built from.
        content: Vec<u8>,
    },
    Internal {
        partition: Partition,
        split_point: f32,
        low: usize,
        high: usize,
    },
}

#[derive(Clone, Debug)]
pub struct KdTree {
    nodes: Vec<KdNode>,
}

impl KdTree {
    const ROOT: usize = 0;
    const MAX_SPRITES: usize = u8::MAX as usize;

    /// Build a tree over `sprites`.
    ///
    /// Splitting stops after `max_depth` levels, or when a node holds no more
    /// than `small_enough` sprites.
    pub fn build(sprites: &[Sprite], max_depth: u8, small_enough: u8) -> Result<Self> {
        if max_depth == 0 {
            return Err(RayngeError::ZeroDepth);
        }
        if sprites.len() > Self::MAX_SPRITES {
            return Err(RayngeError::TooManySprites(sprites.len()));
        }

        let all = (0..sprites.len()).map(|i| i as u8).collect();
        let mut tree = Self { nodes: Vec::new() };
        tree.split(sprites, all, max_depth - 1, small_enough);

        debug!(
            "KdTree: {} sprites, {} nodes, {} leaves",
            sprites.len(),
            tree.nodes.len(),
            tree.nodes.iter().filter(|n| matches!(n, KdNode::Leaf { .. })).count()
        );
        Ok(tree)
    }

    pub fn root(&self) -> &KdNode {
        &self.nodes[Self::ROOT]
    }

    pub fn node(&self, index: usize) -> &KdNode {
        &self.nodes[index]
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Indices of the sprites the ray may hit before `cutoff`, sorted and
    /// without duplicates. Candidates still need an actual intersection test.
    pub fn intersect(&self, ray: &Ray, cutoff: f32) -> Vec<u8> {
        let mut found = Vec::new();
        self.collect(Self::ROOT, ray, cutoff, &mut found);
        found.sort_unstable();
        found.dedup();
        found
    }

    fn split(&mut self, sprites: &[Sprite], content: Vec<u8>, depth: u8, small_enough: u8) -> usize {
        let index = self.nodes.len();
        if depth == 0 || content.len() <= usize::from(small_enough) {
            self.nodes.push(KdNode::Leaf { content });
            return index;
        }

        let (partition, split_point) = largest_extent(sprites, &content);

        let mut low_content = Vec::new();
        let mut high_content = Vec::new();
        for &i in &content {
            let sprite = &sprites[usize::from(i)];
            let position = match partition {
                Partition::OnX => sprite.x,
                Partition::OnZ => sprite.z,
            };
            if position - sprite.half_size() <= split_point {
                low_content.push(i);
            }
            if position + sprite.half_size() >= split_point {
                high_content.push(i);
            }
        }

        // Placeholder until both children have their slots.
        self.nodes.push(KdNode::Leaf { content: Vec::new() });
        let low = self.split(sprites, low_content, depth - 1, small_enough);
        let high = self.split(sprites, high_content, depth - 1, small_enough);
        self.nodes[index] = KdNode::Internal { partition, split_point, low, high };
        index
    }

    fn collect(&self, index: usize, ray: &Ray, cutoff: f32, found: &mut Vec<u8>) {
        let (partition, split_point, low, high) = match &self.nodes[index] {
            KdNode::Leaf { content } => {
                found.extend_from_slice(content);
                return;
            }
            KdNode::Internal { partition, split_point, low, high } => (*partition, *split_point, *low, *high),
        };

        let (origin, toward_high) = match partition {
            Partition::OnX => (ray.x, ray.facing_right()),
            Partition::OnZ => (ray.z, ray.facing_up()),
        };

        if origin == split_point {
            self.collect(low, ray, cutoff, found);
            self.collect(high, ray, cutoff, found);
            return;
        }

        let (near, far, toward_far) = if origin < split_point {
            (low, high, toward_high)
        } else {
            (high, low, !toward_high)
        };

        self.collect(near, ray, cutoff, found);
        if toward_far {
            if let Some((crossing, remaining)) = cross_split(ray, partition, split_point, cutoff) {
                self.collect(far, &crossing, remaining, found);
            }
        }
    }
}

/// The axis with the largest extent and its midpoint. Ties go to Z.
fn largest_extent(sprites: &[Sprite], content: &[u8]) -> (Partition, f32) {
    let mut min_x = f32::INFINITY;
    let mut max_x = f32::NEG_INFINITY;
    let mut min_z = f32::INFINITY;
    let mut max_z = f32::NEG_INFINITY;

    for &i in content {
        let s = &sprites[usize::from(i)];
        let half = s.half_size();
        min_x = min_x.min(s.x - half);
        max_x = max_x.max(s.x + half);
        min_z = min_z.min(s.z - half);
        max_z = max_z.max(s.z + half);
    }

    if max_x - min_x > max_z - min_z {
        (Partition::OnX, (min_x + max_x) / 2.0)
    } else {
        (Partition::OnZ, (min_z + max_z) / 2.0)
    }
}

/// The ray restarted where it crosses the split line, with what is left of
/// the cutoff. `None` when the crossing is beyond the cutoff.
fn cross_split(ray: &Ray, partition: Partition, split_point: f32, cutoff: f32) -> Option<(Ray, f32)> {
    let tangent = ray.abs_tangent();
    let (from_split, lateral) = match partition {
        Partition::OnX => {
            let d = (ray.x - split_point).abs();
            (d, d * tangent)
        }
        Partition::OnZ => {
            let d = (ray.z - split_point).abs();
            (d, d / tangent)
        }
    };

    let crossing = from_split.hypot(lateral);
    if crossing >= cutoff {
        return None;
    }

    let moved = match partition {
        Partition::OnX => {
            let z = if ray.facing_up() { ray.z + lateral } else { ray.z - lateral };
            ray.moved_to(split_point, z)
        }
        Partition::OnZ => {
            let x = if ray.facing_right() { ray.x + lateral } else { ray.x - lateral };
            ray.moved_to(x, split_point)
        }
    };
    Some((moved, cutoff - crossing))
}
