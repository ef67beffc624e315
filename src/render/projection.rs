//! The projection plane: one ray per screen column.
use crate::config::GameConfig;
use crate::core::grid::Grid;
use crate::core::objects::{Objects, SpriteFilter};
use crate::core::player::Player;
use crate::core::ray::{normalize_0_2pi, Ray};
use crate::core::canvas::{Canvas, TextureIndex};

/// A slice as it lands on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SliceProjection {
    pub height: u16,
    /// May be negative, or beyond the last row.
    pub top_row: i32,
}

#[derive(Clone, Debug)]
pub struct ProjectionPlane {
    pub columns: u16,
    pub x_center: u16,
    pub y_center: u16,
    pub fov_radians: f32,
    pub distance_to_pov: f32,
    pub scan_step_radians: f32,
}

impl ProjectionPlane {
    /// ```text
    ///   -----+----+  plane
    ///        |   /
    ///        |  /
    ///        | /
    ///        |/   half the FOV
    ///        +
    ///   point of view
    /// ```
    pub fn new(columns: u16, rows: u16, fov_degrees: f32) -> Self {
        let fov_radians = fov_degrees.to_radians();
        let half_width = f32::from(columns) / 2.0;
        Self {
            columns,
            x_center: columns / 2,
            y_center: rows / 2,
            fov_radians,
            distance_to_pov: half_width / (fov_radians / 2.0).tan(),
            scan_step_radians: fov_radians / f32::from(columns),
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.screen_width, config.screen_height, config.fov_degrees)
    }

    pub fn project_slice(&self, distance: f32, world_size: f32) -> SliceProjection {
        // `as` saturates, and a zero distance gives u16::MAX
        let height = (world_size / distance * self.distance_to_pov) as u16;
        SliceProjection { height, top_row: i32::from(self.y_center) - i32::from(height / 2) }
    }

    /// Angle of the ray for screen column `column`, leftmost column first.
    pub fn column_angle(&self, orientation: f32, column: u16) -> f32 {
        normalize_0_2pi(orientation - self.fov_radians / 2.0 + f32::from(column) * self.scan_step_radians)
    }

    /// Draw walls and sprites seen by `player`, column by column.
    ///
    /// In each column the wall goes first, then the sprites in front of it
    /// from the farthest to the nearest.
    pub fn project_objects(&self, grid: &Grid, objects: &Objects, player: &Player, canvas: &mut impl Canvas) {
        for column in 0..self.columns {
            let alpha = self.column_angle(player.orientation, column);
            let ray = Ray::new(player.x, player.z, alpha);
            // Fisheye correction.
            let perpendicular = (player.orientation - alpha).cos();

            let wall = grid.cast_ray(&ray);
            let cutoff = if wall.is_hit() { wall.distance } else { f32::INFINITY };

            if wall.is_hit() {
                let slice = self.project_slice(wall.distance * perpendicular, grid.cell_size);
                canvas.draw_slice(column, slice.top_row, slice.height, wall.offset as u16, TextureIndex::Wall);
            }

            for seen in objects.intersections(&ray, cutoff, SpriteFilter::All) {
                let slice = self.project_slice(seen.hit.distance * perpendicular, seen.sprite.size);
                canvas.draw_slice(
                    column,
                    slice.top_row,
                    slice.height,
                    seen.hit.offset as u16,
                    seen.sprite.kind.into(),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sprite::{Sprite, SpriteKind};

    #[derive(Debug, Default)]
    struct MockCanvas {
        calls: Vec<(u16, i32, u16, u16, TextureIndex)>,
    }

    impl Canvas for MockCanvas {
        fn draw_slice(&mut self, column: u16, top_row: i32, height: u16, texture_offset: u16, texture: TextureIndex) {
            self.calls.push((column, top_row, height, texture_offset, texture));
        }

        fn transparent_pixel(&self, _: u8, _: u8, _: TextureIndex) -> bool {
            false
        }
    }

    fn no_objects() -> Objects {
        Objects::new(Vec::new(), Vec::new(), 10, 2).unwrap()
    }

    fn player(x: f32, z: f32, orientation: f32) -> Player {
        Player::new(x, z, orientation, 0, &GameConfig::default())
    }

    #[test]
    fn creation() {
        let p = ProjectionPlane::new(320, 200, 60.0);

        assert_eq!(p.columns, 320);
        assert_eq!(p.x_center, 160);
        assert_eq!(p.y_center, 100);
        assert!((p.distance_to_pov - 277.128).abs() < 1e-2);
        assert!((p.scan_step_radians - 0.003_272_492_4).abs() < 1e-7);
    }

    #[test]
    fn project_slice() {
        let p = ProjectionPlane::new(320, 200, 60.0);
        assert_eq!(p.project_slice(277.0, 64.0), SliceProjection { height: 64, top_row: 68 });
    }

    #[test]
    fn project_slice_up_close_starts_above_the_screen() {
        let p = ProjectionPlane::new(320, 200, 60.0);
        let slice = p.project_slice(1.0, 64.0);
        assert!(slice.top_row < 0);
        assert_eq!(p.project_slice(0.0, 64.0).height, u16::MAX);
    }

    #[test]
    fn column_angles_sweep_the_fov() {
        let p = ProjectionPlane::new(320, 200, 60.0);
        let first = p.column_angle(1.0, 0);
        let center = p.column_angle(1.0, 160);
        assert!((first - (1.0 - 30f32.to_radians())).abs() < 1e-5);
        assert!((center - 1.0).abs() < 1e-5);
        // Wraps below zero.
        assert!(p.column_angle(0.0, 0) > 5.0);
    }

    #[test]
    fn no_walls_no_calls() {
        let plane = ProjectionPlane::new(320, 200, 60.0);
        let grid = Grid::new(10, 10, 64.0);
        let mut canvas = MockCanvas::default();

        plane.project_objects(&grid, &no_objects(), &player(32.0, 32.0, 0.5), &mut canvas);

        assert!(canvas.calls.is_empty());
    }

    #[test]
    fn wall_up_close_takes_the_whole_view() {
        let plane = ProjectionPlane::new(2, 200, 1.0);
        let mut grid = Grid::new(2, 1, 64.0);
        grid.build_wall(1, 0).unwrap();
        let mut canvas = MockCanvas::default();

        // One unit in front of the wall.
        plane.project_objects(&grid, &no_objects(), &player(63.0, 32.0, 0.0), &mut canvas);

        assert_eq!(canvas.calls.len(), 2);
        let (column, top_row, height, _, texture) = canvas.calls[0];
        assert_eq!(column, 0);
        assert_eq!(texture, TextureIndex::Wall);
        assert!(height > 7000);
        assert!(top_row < 0);
    }

    #[test]
    fn fisheye_correction_flattens_walls() {
        // Facing a long straight wall, every column is the same height.
        let plane = ProjectionPlane::new(64, 200, 60.0);
        let mut grid = Grid::new(20, 20, 64.0);
        for x in 0..20 {
            grid.build_wall(x, 19).unwrap();
        }
        let mut canvas = MockCanvas::default();

        plane.project_objects(&grid, &no_objects(), &player(640.0, 640.0, std::f32::consts::FRAC_PI_2), &mut canvas);

        assert_eq!(canvas.calls.len(), 64);
        let heights: Vec<u16> = canvas.calls.iter().map(|c| c.2).collect();
        let (min, max) = (heights.iter().min().unwrap(), heights.iter().max().unwrap());
        assert!(max - min <= 1, "{heights:?}");
    }

    /// Single column looking straight along +X.
    fn narrow_plane() -> (ProjectionPlane, f32) {
        (ProjectionPlane::new(1, 200, 1.0), 0.5f32.to_radians())
    }

    #[test]
    fn sprites_drawn_after_wall_farthest_first() {
        let (plane, straight) = narrow_plane();
        let mut grid = Grid::new(10, 1, 64.0);
        grid.build_wall(9, 0).unwrap();
        let enemies = vec![
            Sprite::new(160.0, 32.0, 64.0, 0, SpriteKind::Enemy),
            Sprite::new(400.0, 32.0, 64.0, 1, SpriteKind::Enemy),
        ];
        let exits = vec![Sprite::new(300.0, 32.0, 64.0, 2, SpriteKind::Exit)];
        let objects = Objects::new(enemies, exits, 10, 2).unwrap();
        let mut canvas = MockCanvas::default();

        plane.project_objects(&grid, &objects, &player(32.0, 32.0, straight), &mut canvas);

        let textures: Vec<TextureIndex> = canvas.calls.iter().map(|c| c.4).collect();
        assert_eq!(
            textures,
            vec![TextureIndex::Wall, TextureIndex::Enemy, TextureIndex::Exit, TextureIndex::Enemy]
        );
        let heights: Vec<u16> = canvas.calls.iter().map(|c| c.2).collect();
        assert!(heights.windows(2).all(|w| w[0] < w[1]), "{heights:?}");
    }

    #[test]
    fn sprites_behind_the_wall_are_hidden() {
        let (plane, straight) = narrow_plane();
        let mut grid = Grid::new(10, 1, 64.0);
        grid.build_wall(3, 0).unwrap();
        let enemies = vec![Sprite::new(400.0, 32.0, 64.0, 0, SpriteKind::Enemy)];
        let objects = Objects::new(enemies, Vec::new(), 10, 2).unwrap();
        let mut canvas = MockCanvas::default();

        plane.project_objects(&grid, &objects, &player(32.0, 32.0, straight), &mut canvas);

        assert_eq!(canvas.calls.len(), 1);
        assert_eq!(canvas.calls[0].4, TextureIndex::Wall);
    }
}
