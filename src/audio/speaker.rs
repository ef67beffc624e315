use std::collections::HashMap;
use std::io::{BufReader, Cursor};
use std::sync::Arc;

use log::warn;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};

use crate::audio::music::{Loudspeaker, SoundIndex};

fn load_bytes(path: &str) -> Option<Vec<u8>> {
    std::fs::read(path).ok()
}

fn load_bytes_any(paths: &[&str]) -> Option<Vec<u8>> {
    paths.iter().find_map(|p| load_bytes(p))
}

fn candidates(sound: SoundIndex) -> &'static [&'static str] {
    match sound {
        SoundIndex::GunShot => &["assets/gunshot.wav", "assets/sounds/gunshot.wav", "assets/sounds/shot.ogg"],
        SoundIndex::MusicCalm => &["assets/music_calm.wav", "assets/sounds/music_calm.ogg"],
        SoundIndex::MusicSlow => &["assets/music_slow.wav", "assets/sounds/music_slow.ogg"],
        SoundIndex::MusicMid => &["assets/music_mid.wav", "assets/sounds/music_mid.ogg"],
        SoundIndex::MusicFast => &["assets/music_fast.wav", "assets/sounds/music_fast.ogg"],
    }
}

/// Plays music segments back to back on one sink, effects on their own.
pub struct RodioSpeaker {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    music_sink: Sink,
    sounds: HashMap<SoundIndex, Arc<Vec<u8>>>,
    music_volume: f32,
    effect_volume: f32,
}

impl RodioSpeaker {
    /// `None` when there is no audio device.
    pub fn new() -> Option<Self> {
        let (_stream, handle) = OutputStream::try_default().ok()?;
        let music_sink = Sink::try_new(&handle).ok()?;
        music_sink.set_volume(0.35);
        Some(Self {
            _stream,
            handle,
            music_sink,
            sounds: HashMap::new(),
            music_volume: 0.35,
            effect_volume: 0.8,
        })
    }

    pub fn load_sounds_auto(&mut self) {
        for sound in [
            SoundIndex::GunShot,
            SoundIndex::MusicCalm,
            SoundIndex::MusicSlow,
            SoundIndex::MusicMid,
            SoundIndex::MusicFast,
        ] {
            match load_bytes_any(candidates(sound)) {
                Some(bytes) => {
                    self.sounds.insert(sound, Arc::new(bytes));
                }
                None => warn!("no sound file for {sound:?}"),
            }
        }
    }

    fn decoder(&self, sound: SoundIndex) -> Option<Decoder<BufReader<Cursor<Vec<u8>>>>> {
        let bytes = self.sounds.get(&sound)?;
        Decoder::new(BufReader::new(Cursor::new(bytes.as_ref().clone()))).ok()
    }
}

impl Loudspeaker for RodioSpeaker {
    fn still_playing(&self) -> bool {
        !self.music_sink.empty()
    }

    fn play_this_next(&mut self, segment: SoundIndex) {
        if let Some(dec) = self.decoder(segment) {
            self.music_sink.set_volume(self.music_volume);
            self.music_sink.append(dec);
        }
    }

    fn play_effect(&mut self, sound: SoundIndex) {
        // Detached sink per effect.
        if let Some(dec) = self.decoder(sound) {
            if let Ok(sink) = Sink::try_new(&self.handle) {
                sink.append(dec.amplify(self.effect_volume));
                sink.detach();
            }
        }
    }
}
