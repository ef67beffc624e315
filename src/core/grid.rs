//! Wall grid and the DDA wall caster.
//!
//! The grid lies on the floor plane and covers X and Z. Every cell is either
//! empty or a wall. Since ray casting is all about finding walls, the caster
//! for a single ray lives here too.
use std::collections::HashSet;

use crate::core::ray::{distance, Ray, RayHit};
use crate::error::{RayngeError, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridCoordinate {
    pub x: u8,
    pub z: u8,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldCoordinate {
    pub x: f32,
    pub z: f32,
}

#[derive(Clone, Debug)]
pub struct Grid {
    pub x_size: u8,
    pub z_size: u8,
    pub cell_size: f32,
    walls: HashSet<GridCoordinate>,
    max_x: f32,
    max_z: f32,
}

impl Grid {
    pub fn new(x_size: u8, z_size: u8, cell_size: f32) -> Self {
        Self {
            x_size,
            z_size,
            cell_size,
            walls: HashSet::new(),
            max_x: f32::from(x_size) * cell_size,
            max_z: f32::from(z_size) * cell_size,
        }
    }

    pub fn build_wall(&mut self, x: u8, z: u8) -> Result<()> {
        if x >= self.x_size || z >= self.z_size {
            return Err(RayngeError::CellOutOfRange { x: x.into(), z: z.into() });
        }
        self.walls.insert(GridCoordinate { x, z });
        Ok(())
    }

    #[inline]
    pub fn wall_at(&self, x: u8, z: u8) -> bool {
        self.walls.contains(&GridCoordinate { x, z })
    }

    pub fn wall_count(&self) -> usize {
        self.walls.len()
    }

    /// `None` when the point is outside the grid.
    pub fn cell_of(&self, x: f32, z: f32) -> Option<GridCoordinate> {
        if !(0.0..self.max_x).contains(&x) || !(0.0..self.max_z).contains(&z) {
            return None;
        }
        Some(GridCoordinate {
            x: (x / self.cell_size).floor() as u8,
            z: (z / self.cell_size).floor() as u8,
        })
    }

    pub fn center_of(&self, x: u8, z: u8) -> WorldCoordinate {
        debug_assert!(x < self.x_size && z < self.z_size);
        let half_cell = self.cell_size / 2.0;
        WorldCoordinate {
            x: f32::from(x) * self.cell_size + half_cell,
            z: f32::from(z) * self.cell_size + half_cell,
        }
    }

    /// True if the point is inside a wall, or within `minimum_distance` of the
    /// border shared with a wall in one of the 8 surrounding cells.
    pub fn close_to_walls(&self, x: f32, z: f32, minimum_distance: f32) -> bool {
        let Some(cell) = self.cell_of(x, z) else {
            return false;
        };
        if self.wall_at(cell.x, cell.z) {
            return true;
        }

        let left = f32::from(cell.x) * self.cell_size;
        let right = left + self.cell_size;
        let bottom = f32::from(cell.z) * self.cell_size;
        let top = bottom + self.cell_size;

        let in_left = (x - left).abs() < minimum_distance;
        let in_right = (x - right).abs() < minimum_distance;
        let in_bottom = (z - bottom).abs() < minimum_distance;
        let in_top = (z - top).abs() < minimum_distance;

        let wall = |dx: i16, dz: i16| self.wall_at_offset(cell, dx, dz);

        (in_left && wall(-1, 0))
            || (in_right && wall(1, 0))
            || (in_bottom && wall(0, -1))
            || (in_top && wall(0, 1))
            || (in_left && in_bottom && wall(-1, -1))
            || (in_left && in_top && wall(-1, 1))
            || (in_right && in_bottom && wall(1, -1))
            || (in_right && in_top && wall(1, 1))
    }

    fn wall_at_offset(&self, cell: GridCoordinate, dx: i16, dz: i16) -> bool {
        let x = i16::from(cell.x) + dx;
        let z = i16::from(cell.z) + dz;
        match (u8::try_from(x), u8::try_from(z)) {
            (Ok(x), Ok(z)) => self.wall_at(x, z),
            _ => false,
        }
    }

    /// Nearest wall along the ray.
    ///
    /// Two marches run independently: one across horizontal grid lines, one
    /// across vertical grid lines. The closer hit wins; on an exact tie the
    /// horizontal-line hit is kept.
    pub fn cast_ray(&self, ray: &Ray) -> RayHit {
        let Some(start) = self.cell_of(ray.x, ray.z) else {
            return RayHit::none();
        };
        let tangent = ray.abs_tangent();

        closest_hit(self.cast_ray_horizontal(ray, start, tangent), self.cast_ray_vertical(ray, start, tangent))
    }

    fn cast_ray_horizontal(&self, ray: &Ray, start: GridCoordinate, tangent: f32) -> RayHit {
        let up = ray.facing_up();
        let right = ray.facing_right();

        // Row entered at the first crossing; tracked as an index, not derived
        // from the crossing point, which sits exactly on the shared edge.
        let (first_z, row) = if up {
            ((f32::from(start.z) + 1.0) * self.cell_size, i32::from(start.z) + 1)
        } else {
            (f32::from(start.z) * self.cell_size, i32::from(start.z) - 1)
        };
        let travel = (ray.z - first_z).abs() / tangent;
        let first_x = if right { ray.x + travel } else { ray.x - travel };

        let march = March {
            x: first_x,
            z: first_z,
            step_x: if right { self.cell_size / tangent } else { -self.cell_size / tangent },
            step_z: if up { self.cell_size } else { -self.cell_size },
            line: row,
            step_line: if up { 1 } else { -1 },
        };
        match self.walk_along_ray(march, Lines::Horizontal) {
            Some((x, z)) => self.wall_hit(ray, x, z, x),
            None => RayHit::none(),
        }
    }

    fn cast_ray_vertical(&self, ray: &Ray, start: GridCoordinate, tangent: f32) -> RayHit {
        let up = ray.facing_up();
        let right = ray.facing_right();

        let (first_x, column) = if right {
            ((f32::from(start.x) + 1.0) * self.cell_size, i32::from(start.x) + 1)
        } else {
            (f32::from(start.x) * self.cell_size, i32::from(start.x) - 1)
        };
        let rise = (ray.x - first_x).abs() * tangent;
        let first_z = if up { ray.z + rise } else { ray.z - rise };

        let march = March {
            x: first_x,
            z: first_z,
            step_x: if right { self.cell_size } else { -self.cell_size },
            step_z: if up { self.cell_size * tangent } else { -self.cell_size * tangent },
            line: column,
            step_line: if right { 1 } else { -1 },
        };
        match self.walk_along_ray(march, Lines::Vertical) {
            Some((x, z)) => self.wall_hit(ray, x, z, z),
            None => RayHit::none(),
        }
    }

    /// Steps from grid line to grid line until a wall or the grid border.
    fn walk_along_ray(&self, mut march: March, lines: Lines) -> Option<(f32, f32)> {
        loop {
            let cell = match lines {
                Lines::Horizontal => GridCoordinate {
                    x: self.index_along(march.x, self.x_size)?,
                    z: in_range(march.line, self.z_size)?,
                },
                Lines::Vertical => GridCoordinate {
                    x: in_range(march.line, self.x_size)?,
                    z: self.index_along(march.z, self.z_size)?,
                },
            };
            if self.wall_at(cell.x, cell.z) {
                return Some((march.x, march.z));
            }
            march.x += march.step_x;
            march.z += march.step_z;
            march.line += march.step_line;
        }
    }

    /// Cell index of a world coordinate along one axis.
    fn index_along(&self, coordinate: f32, size: u8) -> Option<u8> {
        let index = (coordinate / self.cell_size).floor();
        (index >= 0.0 && index < f32::from(size)).then_some(index as u8)
    }

    fn wall_hit(&self, ray: &Ray, x: f32, z: f32, texture_axis: f32) -> RayHit {
        RayHit {
            x,
            z,
            distance: distance(x, z, ray.x, ray.z),
            offset: texture_axis.rem_euclid(self.cell_size),
            hit_object_id: None,
        }
    }
}

#[derive(Clone, Copy)]
enum Lines {
    Horizontal,
    Vertical,
}

/// Walk state of one march. `line` is the index of the row (or column) the
/// current crossing enters.
#[derive(Clone, Copy)]
struct March {
    x: f32,
    z: f32,
    step_x: f32,
    step_z: f32,
    line: i32,
    step_line: i32,
}

fn in_range(index: i32, size: u8) -> Option<u8> {
    u8::try_from(index).ok().filter(|&i| i < size)
}

/// The nearer of the two march results. Ties go to `horizontal`.
fn closest_hit(horizontal: RayHit, vertical: RayHit) -> RayHit {
    match (horizontal.is_hit(), vertical.is_hit()) {
        (false, _) => vertical,
        (true, false) => horizontal,
        (true, true) if vertical.distance < horizontal.distance => vertical,
        (true, true) => horizontal,
    }
}
