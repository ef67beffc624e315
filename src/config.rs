//! Game configuration.
//!
//! Centralizes screen, projection, world and movement parameters so the
//! front end and the loader read them from one place.

/// Tunables for the whole game. `Default` gives the stock settings.
#[derive(Clone, Debug)]
pub struct GameConfig {
    // Screen
    /// Window width in pixels; also the number of scan columns.
    pub screen_width: u16,
    /// Window height in pixels.
    pub screen_height: u16,
    /// Horizontal field of view in degrees.
    pub fov_degrees: f32,

    // World
    /// World units per grid cell.
    pub cell_size: f32,
    /// Diameter of every sprite, in world units.
    pub sprite_size: f32,
    /// Level loaded when no path is given on the command line.
    pub level_path: String,

    // Sprite index
    /// Max depth of the enemy KdTree.
    pub kd_max_depth: u8,
    /// Nodes with this many sprites or fewer are not split.
    pub kd_small_enough: u8,

    // Player
    /// Distance units per advance step.
    pub advance_speed: f32,
    /// Radians per turn step.
    pub turn_speed: f32,
    /// Minimum distance kept from walls.
    pub wall_clearance: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: 640,
            screen_height: 480,
            fov_degrees: 60.0,

            cell_size: 64.0,
            sprite_size: 64.0,
            level_path: "levels/level1.txt".to_string(),

            kd_max_depth: 10,
            kd_small_enough: 2,

            advance_speed: 5.0,
            turn_speed: 0.025,
            wall_clearance: 2.0,
        }
    }
}

impl GameConfig {
    /// Set the window size.
    #[must_use]
    pub fn with_screen(mut self, width: u16, height: u16) -> Self {
        self.screen_width = width;
        self.screen_height = height;
        self
    }

    /// Set the field of view, in degrees.
    #[must_use]
    pub fn with_fov(mut self, degrees: f32) -> Self {
        self.fov_degrees = degrees;
        self
    }

    /// Set the level file.
    #[must_use]
    pub fn with_level_path(mut self, path: impl Into<String>) -> Self {
        self.level_path = path.into();
        self
    }

    /// Set the KdTree build parameters.
    #[must_use]
    pub fn with_kd_tree(mut self, max_depth: u8, small_enough: u8) -> Self {
        self.kd_max_depth = max_depth;
        self.kd_small_enough = small_enough;
        self
    }
}
