//! Background music that speeds up as the player gets closer to an exit.
use log::debug;

use crate::core::objects::Objects;
use crate::core::player::Player;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundIndex {
    GunShot,
    MusicCalm,
    MusicSlow,
    MusicMid,
    MusicFast,
}

/// Whatever plays sounds. Music segments queue up, effects play at once.
pub trait Loudspeaker {
    /// True while queued music remains.
    fn still_playing(&self) -> bool;

    fn play_this_next(&mut self, segment: SoundIndex);

    fn play_effect(&mut self, sound: SoundIndex);
}

#[derive(Clone, Debug, Default)]
pub struct BackgroundMusic {
    current: Option<SoundIndex>,
}

impl BackgroundMusic {
    /// Score for the given distance to the closest exit.
    pub fn select_score(distance_to_exit: f32, cell_size: f32) -> SoundIndex {
        let cells = distance_to_exit / cell_size;
        if cells > 12.0 {
            SoundIndex::MusicCalm
        } else if cells > 8.0 {
            SoundIndex::MusicSlow
        } else if cells > 4.0 {
            SoundIndex::MusicMid
        } else {
            SoundIndex::MusicFast
        }
    }

    /// Queue one more segment once the speaker runs dry.
    pub fn play_more_music(
        &mut self,
        speaker: &mut impl Loudspeaker,
        objects: &Objects,
        player: &Player,
        cell_size: f32,
    ) -> Option<SoundIndex> {
        if speaker.still_playing() {
            return None;
        }

        let score = Self::select_score(objects.distance_to_closest_exit(player.x, player.z), cell_size);
        if self.current != Some(score) {
            debug!("music now {score:?}");
            self.current = Some(score);
        }
        speaker.play_this_next(score);
        Some(score)
    }
}
