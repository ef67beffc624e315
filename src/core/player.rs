use log::debug;

use crate::config::GameConfig;
use crate::core::grid::Grid;
use crate::core::objects::{Objects, SpriteFilter};
use crate::core::ray::{normalize_0_2pi, Ray};
use crate::error::Result;
use crate::core::canvas::{Canvas, TextureIndex};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShotOutcome {
    NoAmmo,
    Missed,
    Hit(u8),
}

/// Position and heading in world units. Orientation 0 looks toward +X.
#[derive(Clone, Debug)]
pub struct Player {
    pub x: f32,
    pub z: f32,
    pub orientation: f32, // [0, 2π)
    pub bullets_left: u8,
    pub kills: u8,
    advance_speed: f32,
    turn_speed: f32,
    wall_clearance: f32,
}

impl Player {
    pub fn new(x: f32, z: f32, orientation: f32, bullets_left: u8, config: &GameConfig) -> Self {
        Self {
            x,
            z,
            orientation: normalize_0_2pi(orientation),
            bullets_left,
            kills: 0,
            advance_speed: config.advance_speed,
            turn_speed: config.turn_speed,
            wall_clearance: config.wall_clearance,
        }
    }

    /// Step forward (`axis > 0`) or back. Returns false if a wall is in the way.
    pub fn advance(&mut self, axis: f32, grid: &Grid) -> bool {
        let step = self.advance_speed * axis;
        let x = self.x + self.orientation.cos() * step;
        let z = self.z + self.orientation.sin() * step;

        if grid.cell_of(x, z).is_none() || grid.close_to_walls(x, z, self.wall_clearance) {
            return false;
        }
        self.x = x;
        self.z = z;
        true
    }

    /// Counterclockwise for positive `axis`.
    pub fn turn(&mut self, axis: f32) {
        self.orientation = normalize_0_2pi(self.orientation + self.turn_speed * axis);
    }

    /// Fire straight ahead at the closest enemy in front of the walls.
    ///
    /// A hit only counts on an opaque pixel of the enemy texture, at half
    /// height.
    pub fn shoot(&mut self, grid: &Grid, objects: &mut Objects, canvas: &impl Canvas) -> Result<ShotOutcome> {
        if self.bullets_left == 0 {
            return Ok(ShotOutcome::NoAmmo);
        }
        self.bullets_left -= 1;

        let ray = Ray::new(self.x, self.z, self.orientation);
        let wall = grid.cast_ray(&ray);
        let cutoff = if wall.is_hit() { wall.distance } else { f32::INFINITY };

        let target = objects
            .intersections(&ray, cutoff, SpriteFilter::Enemies)
            .last()
            .map(|h| (h.sprite.id, h.hit.offset, h.sprite.half_size()));

        let Some((id, offset, half_size)) = target else {
            debug!("shot missed, {} bullets left", self.bullets_left);
            return Ok(ShotOutcome::Missed);
        };

        if canvas.transparent_pixel(offset as u8, half_size as u8, TextureIndex::Enemy) {
            debug!("shot went through enemy {id}");
            return Ok(ShotOutcome::Missed);
        }

        objects.deactivate(id)?;
        self.kills = self.kills.saturating_add(1);
        debug!("enemy {id} hit, {} kills", self.kills);
        Ok(ShotOutcome::Hit(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sprite::{Sprite, SpriteKind};
    use std::f32::consts::PI;

    /// Opaque everywhere except the leftmost `hole` columns.
    struct Target {
        hole: u8,
    }

    impl Canvas for Target {
        fn draw_slice(&mut self, _: u16, _: i32, _: u16, _: u16, _: TextureIndex) {}

        fn transparent_pixel(&self, x: u8, _: u8, _: TextureIndex) -> bool {
            x < self.hole
        }
    }

    fn room() -> Grid {
        // 5x3, walls all around.
        let mut g = Grid::new(5, 3, 64.0);
        for x in 0..5 {
            g.build_wall(x, 0).unwrap();
            g.build_wall(x, 2).unwrap();
        }
        g.build_wall(0, 1).unwrap();
        g.build_wall(4, 1).unwrap();
        g
    }

    fn player(x: f32, z: f32, orientation: f32, bullets: u8) -> Player {
        Player::new(x, z, orientation, bullets, &GameConfig::default())
    }

    fn one_enemy(x: f32) -> Objects {
        let enemies = vec![Sprite::new(x, 96.0, 64.0, 5, SpriteKind::Enemy)];
        Objects::new(enemies, Vec::new(), 10, 2).unwrap()
    }

    #[test]
    fn advance_moves_along_orientation() {
        let g = room();
        let mut p = player(96.0, 96.0, 0.0, 0);
        assert!(p.advance(1.0, &g));
        assert!((p.x - 101.0).abs() < 1e-4);
        assert!((p.z - 96.0).abs() < 1e-4);

        assert!(p.advance(-2.0, &g));
        assert!((p.x - 91.0).abs() < 1e-4);
    }

    #[test]
    fn advance_stops_near_walls() {
        let g = room();
        let mut p = player(67.0, 96.0, PI, 0);
        assert!(!p.advance(1.0, &g));
        assert!((p.x - 67.0).abs() < 1e-4);
    }

    #[test]
    fn turn_wraps_around() {
        let mut p = player(96.0, 96.0, 0.0, 0);
        p.turn(-1.0);
        assert!(p.orientation > 6.0 && p.orientation < 2.0 * PI);
        p.turn(1.0);
        assert!(p.orientation < 1e-4 || p.orientation > 2.0 * PI - 1e-4);
    }

    #[test]
    fn shoot_without_ammo() {
        let g = room();
        let mut o = one_enemy(200.0);
        let mut p = player(96.0, 96.0, 0.0, 0);
        assert_eq!(p.shoot(&g, &mut o, &Target { hole: 0 }).unwrap(), ShotOutcome::NoAmmo);
        assert_eq!(o.active_enemies(), 1);
    }

    #[test]
    fn shoot_hits_enemy_in_sight() {
        let g = room();
        let mut o = one_enemy(200.0);
        let mut p = player(96.0, 96.0, 0.0, 3);

        assert_eq!(p.shoot(&g, &mut o, &Target { hole: 0 }).unwrap(), ShotOutcome::Hit(5));
        assert_eq!(p.bullets_left, 2);
        assert_eq!(p.kills, 1);
        assert_eq!(o.active_enemies(), 0);

        // Nothing left to hit.
        assert_eq!(p.shoot(&g, &mut o, &Target { hole: 0 }).unwrap(), ShotOutcome::Missed);
        assert_eq!(p.bullets_left, 1);
    }

    #[test]
    fn shoot_through_transparent_pixel() {
        let g = room();
        let mut o = one_enemy(200.0);
        let mut p = player(96.0, 96.0, 0.0, 1);

        // Center of the sprite is column 32.
        assert_eq!(p.shoot(&g, &mut o, &Target { hole: 40 }).unwrap(), ShotOutcome::Missed);
        assert_eq!(p.bullets_left, 0);
        assert_eq!(o.active_enemies(), 1);
    }

    #[test]
    fn walls_shield_enemies() {
        let mut g = room();
        g.build_wall(2, 1).unwrap();
        let mut o = one_enemy(224.0);
        let mut p = player(96.0, 96.0, 0.0, 1);

        assert_eq!(p.shoot(&g, &mut o, &Target { hole: 0 }).unwrap(), ShotOutcome::Missed);
        assert_eq!(o.active_enemies(), 1);
    }
}
