//! Level loading.
//!
//! A level is plain text:
//!
//! ```text
//! x 5
//! z 3
//! #####
//! #P.E#
//! ###X#
//! player_start_orientation_rad 0.0
//! player_ammo 8
//! ```
//!
//! `#` is a wall, `.` empty floor, `E` an enemy, `X` an exit and `P` the
//! player start. Rows shorter than `x` are padded with floor. Row `0` is the
//! first one in the file.
use std::path::Path;
use std::str::{FromStr, Lines};

use log::info;

use crate::config::GameConfig;
use crate::core::grid::Grid;
use crate::core::objects::Objects;
use crate::core::player::Player;
use crate::core::sprite::{Sprite, SpriteKind};
use crate::error::{RayngeError, Result};

#[derive(Debug)]
pub struct World {
    pub grid: Grid,
    pub player: Player,
    pub objects: Objects,
}

impl World {
    pub fn load(text: &str, config: &GameConfig) -> Result<Self> {
        if text.trim().is_empty() {
            return Err(RayngeError::EmptyLevel);
        }

        let mut lines = text.lines();
        let x_size: u8 = header(&mut lines, "x")?;
        let z_size: u8 = header(&mut lines, "z")?;

        let mut grid = Grid::new(x_size, z_size, config.cell_size);
        let mut enemies = Vec::new();
        let mut exits = Vec::new();
        let mut player_start = None;
        let mut next_id: usize = 0;

        for z in 0..usize::from(z_size) {
            let row = lines
                .next()
                .ok_or(RayngeError::MissingRows { expected: z_size.into(), found: z })?
                .trim_end_matches('\r');
            if row.chars().count() > usize::from(x_size) {
                return Err(RayngeError::RowTooLong { z });
            }

            for (x, cell) in row.chars().enumerate() {
                // Both fit in u8, checked against the header above.
                let (cx, cz) = (x as u8, z as u8);
                let kind = match cell {
                    '#' => {
                        grid.build_wall(cx, cz)?;
                        continue;
                    }
                    '.' => continue,
                    'P' => {
                        if player_start.is_some() {
                            return Err(RayngeError::MultiplePlayers);
                        }
                        player_start = Some(grid.center_of(cx, cz));
                        continue;
                    }
                    'E' => SpriteKind::Enemy,
                    'X' => SpriteKind::Exit,
                    _ => return Err(RayngeError::InvalidCell { cell, x, z }),
                };

                let id = u8::try_from(next_id).map_err(|_| RayngeError::TooManySprites(next_id + 1))?;
                next_id += 1;
                let center = grid.center_of(cx, cz);
                let sprite = Sprite::new(center.x, center.z, config.sprite_size, id, kind);
                match kind {
                    SpriteKind::Enemy => enemies.push(sprite),
                    SpriteKind::Exit => exits.push(sprite),
                }
            }
        }

        let start = player_start.ok_or(RayngeError::NoPlayer)?;

        let mut footer = lines.flat_map(str::split_whitespace);
        let orientation: f32 = token(&mut footer, "player_start_orientation_rad")?;
        let ammo: u8 = token(&mut footer, "player_ammo")?;

        let player = Player::new(start.x, start.z, orientation, ammo, config);
        let objects = Objects::new(enemies, exits, config.kd_max_depth, config.kd_small_enough)?;

        Ok(Self { grid, player, objects })
    }

    pub fn load_file(path: impl AsRef<Path>, config: &GameConfig) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| RayngeError::Io { path: path.to_path_buf(), source })?;
        let world = Self::load(&text, config)?;
        info!(
            "Loaded {}: {}x{} cells, {} walls",
            path.display(),
            world.grid.x_size,
            world.grid.z_size,
            world.grid.wall_count()
        );
        Ok(world)
    }

    /// The player stands in the same cell as an exit.
    pub fn endgame(&self) -> bool {
        let Some(here) = self.grid.cell_of(self.player.x, self.player.z) else {
            return false;
        };
        self.objects
            .exits()
            .iter()
            .any(|exit| self.grid.cell_of(exit.x, exit.z) == Some(here))
    }
}

fn header<T: FromStr>(lines: &mut Lines<'_>, expected: &'static str) -> Result<T> {
    let line = lines.by_ref().find(|l| !l.trim().is_empty()).unwrap_or_default();
    token(&mut line.split_whitespace(), expected)
}

fn token<'a, T: FromStr>(words: &mut impl Iterator<Item = &'a str>, expected: &'static str) -> Result<T> {
    let name = words.next().unwrap_or_default();
    if name != expected {
        return Err(RayngeError::MissingToken { expected, found: name.to_string() });
    }
    let value = words.next().unwrap_or_default();
    value
        .parse()
        .map_err(|_| RayngeError::InvalidNumber { token: expected, value: value.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEVEL: &str = "x 5
z 4
#####
#P.E#
#E..#
###X#
player_start_orientation_rad 1.5
player_ammo 8
";

    fn load(text: &str) -> Result<World> {
        World::load(text, &GameConfig::default())
    }

    #[test]
    fn loads_a_level() {
        let world = load(LEVEL).unwrap();

        assert_eq!(world.grid.x_size, 5);
        assert_eq!(world.grid.z_size, 4);
        assert!(world.grid.wall_at(0, 0));
        assert!(!world.grid.wall_at(2, 1));
        assert!(world.grid.wall_at(2, 3));

        assert!((world.player.x - 96.0).abs() < 1e-4);
        assert!((world.player.z - 96.0).abs() < 1e-4);
        assert!((world.player.orientation - 1.5).abs() < 1e-4);
        assert_eq!(world.player.bullets_left, 8);
        assert_eq!(world.player.kills, 0);

        let enemies = world.objects.enemies();
        assert_eq!(enemies.len(), 2);
        assert_eq!(enemies[0].id, 0);
        assert_eq!(enemies[1].id, 1);
        assert!((enemies[1].x - 96.0).abs() < 1e-4 && (enemies[1].z - 160.0).abs() < 1e-4);

        let exits = world.objects.exits();
        assert_eq!(exits.len(), 1);
        assert_eq!(exits[0].id, 2);
        assert!((exits[0].x - 224.0).abs() < 1e-4);
    }

    #[test]
    fn windows_line_endings() {
        let world = load(&LEVEL.replace('\n', "\r\n")).unwrap();
        assert_eq!(world.objects.enemies().len(), 2);
    }

    #[test]
    fn short_rows_are_floor() {
        let world = load("x 4\nz 1\nP\nplayer_start_orientation_rad 0\nplayer_ammo 0\n").unwrap();
        assert!(!world.grid.wall_at(3, 0));
    }

    #[test]
    fn empty_level() {
        assert!(matches!(load(""), Err(RayngeError::EmptyLevel)));
        assert!(matches!(load("  \n"), Err(RayngeError::EmptyLevel)));
    }

    #[test]
    fn wrong_header() {
        let err = load("y 5\nz 4\n").unwrap_err();
        assert!(matches!(err, RayngeError::MissingToken { expected: "x", ref found } if found == "y"));
    }

    #[test]
    fn header_out_of_range() {
        let err = load("x 300\nz 4\n").unwrap_err();
        assert!(matches!(err, RayngeError::InvalidNumber { token: "x", ref value } if value == "300"));
    }

    #[test]
    fn invalid_cell() {
        let err = load("x 3\nz 1\nP?.\n").unwrap_err();
        assert_eq!(err.to_string(), "Invalid char [?] at 1, 0");
    }

    #[test]
    fn row_too_long() {
        assert!(matches!(load("x 2\nz 1\nP..\n"), Err(RayngeError::RowTooLong { z: 0 })));
    }

    #[test]
    fn missing_rows() {
        assert!(matches!(
            load("x 2\nz 3\nP.\n"),
            Err(RayngeError::MissingRows { expected: 3, found: 1 })
        ));
    }

    #[test]
    fn two_players() {
        assert!(matches!(load("x 2\nz 1\nPP\n"), Err(RayngeError::MultiplePlayers)));
    }

    #[test]
    fn no_player() {
        assert!(matches!(
            load("x 2\nz 1\n..\nplayer_start_orientation_rad 0\nplayer_ammo 1\n"),
            Err(RayngeError::NoPlayer)
        ));
    }

    #[test]
    fn missing_footer() {
        let err = load("x 2\nz 1\nP.\nplayer_ammo 3\n").unwrap_err();
        assert!(matches!(err, RayngeError::MissingToken { expected: "player_start_orientation_rad", .. }));
    }

    #[test]
    fn footer_on_one_line() {
        let world = load("x 2\nz 1\nP.\nplayer_start_orientation_rad 0 player_ammo 3").unwrap();
        assert_eq!(world.player.bullets_left, 3);
    }

    #[test]
    fn endgame_on_exit_cell() {
        let mut world = load(LEVEL).unwrap();
        assert!(!world.endgame());

        world.player.x = 224.0;
        world.player.z = 200.0;
        assert!(world.endgame());
    }

    #[test]
    fn missing_file() {
        let err = World::load_file("does/not/exist.txt", &GameConfig::default()).unwrap_err();
        assert!(matches!(err, RayngeError::Io { .. }));
    }
}
