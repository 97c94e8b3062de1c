//! Playback state mirror
//!
//! The audio transport runs on its own timeline. `PlayerMirror` only
//! records what the transport reports through discrete events; it never
//! advances the position by itself, so it cannot drift from real playback.
//! The command helpers compute targets to send to the transport and leave
//! the mirror untouched until the transport confirms with an event.

use crate::human_time::format_clock;
use serde::{Deserialize, Serialize};

/// Volume for a freshly created player
pub const DEFAULT_VOLUME: f64 = 0.7;

/// Distance covered by the skip buttons, in seconds
pub const SKIP_SECONDS: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackState {
    Playing,
    #[default]
    Paused,
}

/// Event emitted by the audio transport
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransportEvent {
    TimeUpdate { current_time: f64 },
    LoadedMetadata { duration: f64 },
    Play,
    Pause,
    Ended,
    VolumeChange { volume: f64, muted: bool },
}

/// User action on the player controls
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum PlayerCommand {
    Seek { position: f64 },
    SkipBack,
    SkipForward,
    SetVolume { volume: f64 },
    ToggleMute,
}

/// What the transport should be told to do for a command
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "apply", rename_all = "snake_case")]
pub enum TransportTarget {
    Seek { position: f64 },
    Volume { volume: f64, muted: bool },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerMirror {
    /// Asset URL handed to the transport
    pub source: Option<String>,
    /// Side filename the source was resolved from
    pub filename: Option<String>,
    pub state: PlaybackState,
    pub current_time: f64,
    pub duration: f64,
    pub volume: f64,
    pub muted: bool,
}

impl Default for PlayerMirror {
    fn default() -> Self {
        Self {
            source: None,
            filename: None,
            state: PlaybackState::Paused,
            current_time: 0.0,
            duration: 0.0,
            volume: DEFAULT_VOLUME,
            muted: false,
        }
    }
}

impl PlayerMirror {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the transport at a new side
    ///
    /// Position, duration and state are reset; volume and mute carry over.
    pub fn load(&mut self, filename: &str, source: String) {
        self.filename = Some(filename.to_string());
        self.source = Some(source);
        self.state = PlaybackState::Paused;
        self.current_time = 0.0;
        self.duration = 0.0;
    }

    pub fn apply(&mut self, event: &TransportEvent) {
        match *event {
            TransportEvent::TimeUpdate { current_time } => {
                self.current_time = non_negative(current_time);
            }
            TransportEvent::LoadedMetadata { duration } => {
                self.duration = non_negative(duration);
            }
            TransportEvent::Play => self.state = PlaybackState::Playing,
            TransportEvent::Pause => self.state = PlaybackState::Paused,
            TransportEvent::Ended => {
                self.state = PlaybackState::Paused;
                self.current_time = self.duration;
            }
            TransportEvent::VolumeChange { volume, muted } => {
                self.volume = clamp_volume(volume);
                self.muted = muted;
            }
        }
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    /// Position as a fraction of duration, 0 when the duration is unknown
    pub fn progress(&self) -> f64 {
        if self.duration > 0.0 {
            (self.current_time / self.duration).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Seek position clamped to `[0, duration]`
    pub fn seek_target(&self, position: f64) -> f64 {
        if !position.is_finite() {
            return self.current_time;
        }
        position.clamp(0.0, self.duration.max(0.0))
    }

    pub fn skip_back_target(&self) -> f64 {
        self.seek_target(self.current_time - SKIP_SECONDS)
    }

    pub fn skip_forward_target(&self) -> f64 {
        self.seek_target(self.current_time + SKIP_SECONDS)
    }

    /// Setting a non-zero volume also unmutes
    pub fn volume_target(&self, volume: f64) -> TransportTarget {
        let volume = clamp_volume(volume);
        TransportTarget::Volume {
            volume,
            muted: if volume > 0.0 { false } else { self.muted },
        }
    }

    pub fn mute_toggle_target(&self) -> TransportTarget {
        TransportTarget::Volume {
            volume: self.volume,
            muted: !self.muted,
        }
    }

    /// Translate a control action into a transport target
    pub fn target(&self, command: &PlayerCommand) -> TransportTarget {
        match *command {
            PlayerCommand::Seek { position } => TransportTarget::Seek {
                position: self.seek_target(position),
            },
            PlayerCommand::SkipBack => TransportTarget::Seek {
                position: self.skip_back_target(),
            },
            PlayerCommand::SkipForward => TransportTarget::Seek {
                position: self.skip_forward_target(),
            },
            PlayerCommand::SetVolume { volume } => self.volume_target(volume),
            PlayerCommand::ToggleMute => self.mute_toggle_target(),
        }
    }

    pub fn view(&self) -> PlayerView {
        PlayerView {
            progress: self.progress(),
            position: format_clock(self.current_time),
            length: format_clock(self.duration),
            mirror: self.clone(),
        }
    }
}

/// Mirror plus the derived values the progress bar shows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerView {
    #[serde(flatten)]
    pub mirror: PlayerMirror,
    pub progress: f64,
    /// `current_time` as `M:SS`
    pub position: String,
    /// `duration` as `M:SS`
    pub length: String,
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

fn clamp_volume(volume: f64) -> f64 {
    if volume.is_finite() {
        volume.clamp(0.0, 1.0)
    } else {
        DEFAULT_VOLUME
    }
}
