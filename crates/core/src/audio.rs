//! Audio module - sound cues and per-level music selection
//!
//! The engine never plays sound itself. [`AudioDirector`] watches drained
//! [`GameEvent`]s and snapshots and tells an [`AudioSink`] what to do: fire a
//! one-shot cue on entering game over, level-up or win, and keep the level's
//! track playing only while the game is in the playing phase.
//!
//! Pausing holds the track where it is. A new level or a restart starts the
//! level's track over from the beginning.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::snapshot::GameSnapshot;
use crate::types::{GameEvent, Phase};

/// Identifier of a music track, resolved to an asset by the sink
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackId(pub String);

impl TrackId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Level → track lookup table
///
/// A level without its own entry keeps the track of the closest lower level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Soundtrack {
    tracks: BTreeMap<u32, TrackId>,
}

impl Soundtrack {
    pub fn new(tracks: impl IntoIterator<Item = (u32, TrackId)>) -> Self {
        Self {
            tracks: tracks.into_iter().collect(),
        }
    }

    /// Track for `level`, falling back to the highest configured level below it
    pub fn track_for(&self, level: u32) -> Option<&TrackId> {
        self.tracks.range(..=level).next_back().map(|(_, track)| track)
    }
}

impl Default for Soundtrack {
    fn default() -> Self {
        Self::new((1..=3).map(|level| (level, TrackId::new(format!("level-{level}-song")))))
    }
}

/// One-shot sound effects tied to phase transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    GameOver,
    LevelUp,
    Won,
}

impl SoundCue {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundCue::GameOver => "game-over-sound",
            SoundCue::LevelUp => "level-up-sound",
            SoundCue::Won => "you-won-sound",
        }
    }

    /// Cue for entering `phase`, if any
    pub fn for_phase(phase: Phase) -> Option<Self> {
        match phase {
            Phase::GameOver => Some(SoundCue::GameOver),
            Phase::LevelingUp => Some(SoundCue::LevelUp),
            Phase::Won => Some(SoundCue::Won),
            Phase::Playing | Phase::Paused => None,
        }
    }
}

/// Playback backend
pub trait AudioSink {
    fn play_cue(&mut self, cue: SoundCue);
    /// Silence `cue` and rewind it
    fn stop_cue(&mut self, cue: SoundCue);
    /// Start `track` from the beginning, replacing whatever plays
    fn play_music(&mut self, track: &TrackId);
    /// Hold the current track at its position
    fn pause_music(&mut self);
    /// Carry on with the held track
    fn resume_music(&mut self);
}

/// Turns engine events into sink calls
#[derive(Debug, Clone)]
pub struct AudioDirector {
    soundtrack: Soundtrack,
    /// Level whose track is loaded
    level: Option<u32>,
    current: Option<TrackId>,
    /// The loaded track was started at least once
    started: bool,
    playing: bool,
}

impl AudioDirector {
    pub fn new(soundtrack: Soundtrack) -> Self {
        Self {
            soundtrack,
            level: None,
            current: None,
            started: false,
            playing: false,
        }
    }

    /// Track loaded for the current level, playing or held
    pub fn current_track(&self) -> Option<&TrackId> {
        self.current.as_ref()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Fire cues for `events`, then bring music in line with `snap`.
    pub fn observe(&mut self, events: &[GameEvent], snap: &GameSnapshot, sink: &mut impl AudioSink) {
        let mut restarted = false;
        for event in events {
            match *event {
                GameEvent::PhaseChanged { from, to } => {
                    if from == Phase::Won {
                        sink.stop_cue(SoundCue::Won);
                    }
                    if let Some(cue) = SoundCue::for_phase(to) {
                        sink.play_cue(cue);
                    }
                }
                GameEvent::Restarted => restarted = true,
                GameEvent::Locked { .. } => {}
            }
        }

        if restarted || self.level != Some(snap.level) {
            self.level = Some(snap.level);
            self.current = self.soundtrack.track_for(snap.level).cloned();
            self.started = false;
        }

        let wanted = if snap.phase.is_playing() {
            self.current.as_ref()
        } else {
            None
        };

        match wanted {
            Some(track) if !self.started => {
                sink.play_music(track);
                self.started = true;
            }
            Some(_) if !self.playing => sink.resume_music(),
            None if self.playing => sink.pause_music(),
            _ => {}
        }
        self.playing = wanted.is_some();
    }
}
