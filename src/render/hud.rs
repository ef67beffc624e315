//! Heads-up display text.
use crate::core::player::Player;

/// A line of text ready to be drawn by the front end.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HudText {
    pub text: String,
    pub column: i32,
    pub row: i32,
    /// Font size in pixels.
    pub size: i32,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Hud;

impl Hud {
    pub fn display(&self, player: &Player) -> HudText {
        HudText {
            text: format!("AMMO:{:02}  TARGETS:{:03}", player.bullets_left, player.kills),
            column: 10,
            row: 10,
            size: 16,
        }
    }

    pub fn alert_pause(&self) -> HudText {
        HudText { text: "PAUSED".to_string(), column: 50, row: 200, size: 96 }
    }

    pub fn alert_endgame(&self) -> HudText {
        HudText { text: "ESCAPED!".to_string(), column: 10, row: 200, size: 80 }
    }
}
