//! Fire-and-forget audio requests.
//!
//! The engine never waits on audio. Sinks take `&self` so hosts can route
//! requests to a mixer thread; [`AudioLog`] records them for tests.

use std::sync::Mutex;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SoundEffect {
    Sword,
    Bomb,
    Door,
    Secret,
    Stairs,
    Item,
    Heart,
    Rupee,
    KeyHeart,
    PlayerHurt,
    MonsterHurt,
    MonsterDie,
    PlayerDie,
    Cursor,
    Text,
    Fireball,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Song {
    #[default]
    Overworld,
    Underworld,
    Level9,
    Death,
    Triforce,
    Ending,
    Fanfare,
}

/// Output stream a song plays on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SongStream {
    Main,
    Effect,
}

pub trait AudioSink: Send + Sync {
    fn play_effect(&self, effect: SoundEffect, looped: bool, slot: Option<u8>);

    fn play_song(&self, song: Song, stream: SongStream, looped: bool);

    /// Plays a song on top of the current one, resuming it afterwards.
    fn push_song(&self, song: Song);

    fn pause_all(&self);

    fn unpause_all(&self);

    fn stop_all(&self);

    fn stop_effects(&self);

    /// One-shot effect on the default slot.
    fn effect(&self, effect: SoundEffect) {
        self.play_effect(effect, false, None);
    }
}

/// Sink that drops every request.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play_effect(&self, _effect: SoundEffect, _looped: bool, _slot: Option<u8>) {}
    fn play_song(&self, _song: Song, _stream: SongStream, _looped: bool) {}
    fn push_song(&self, _song: Song) {}
    fn pause_all(&self) {}
    fn unpause_all(&self) {}
    fn stop_all(&self) {}
    fn stop_effects(&self) {}
}

/// One recorded audio request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AudioCue {
    Effect(SoundEffect),
    Song(Song),
    PushSong(Song),
    Pause,
    Unpause,
    StopAll,
    StopEffects,
}

/// Sink that records requests in order.
#[derive(Debug, Default)]
pub struct AudioLog {
    cues: Mutex<Vec<AudioCue>>,
}

impl AudioLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes every cue recorded so far.
    pub fn drain(&self) -> Vec<AudioCue> {
        self.cues
            .lock()
            .map(|mut cues| std::mem::take(&mut *cues))
            .unwrap_or_default()
    }

    pub fn contains(&self, cue: AudioCue) -> bool {
        self.cues
            .lock()
            .map(|cues| cues.contains(&cue))
            .unwrap_or(false)
    }

    fn push(&self, cue: AudioCue) {
        if let Ok(mut cues) = self.cues.lock() {
            cues.push(cue);
        }
    }
}

impl AudioSink for AudioLog {
    fn play_effect(&self, effect: SoundEffect, _looped: bool, _slot: Option<u8>) {
        self.push(AudioCue::Effect(effect));
    }

    fn play_song(&self, song: Song, _stream: SongStream, _looped: bool) {
        self.push(AudioCue::Song(song));
    }

    fn push_song(&self, song: Song) {
        self.push(AudioCue::PushSong(song));
    }

    fn pause_all(&self) {
        self.push(AudioCue::Pause);
    }

    fn unpause_all(&self) {
        self.push(AudioCue::Unpause);
    }

    fn stop_all(&self) {
        self.push(AudioCue::StopAll);
    }

    fn stop_effects(&self) {
        self.push(AudioCue::StopEffects);
    }
}
