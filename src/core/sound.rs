use smallvec::{smallvec, SmallVec};

/// Durable-storage key for the sound preference.
pub const SOUND_ENABLED_KEY: &str = "soundEnabled";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AudioPhase {
    /// Waiting for the first user gesture; browsers refuse playback before it.
    Locked,
    UnlockedMuted,
    UnlockedPlaying,
}

/// Side effects the browser layer carries out for the sound state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AudioCommand {
    StartAmbient,
    SetAmbientMuted(bool),
    PlayGlitch,
    Persist(bool),
}

pub type AudioCommands = SmallVec<[AudioCommand; 2]>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SoundController {
    phase: AudioPhase,
    enabled: bool,
    ambient_started: bool,
}

impl SoundController {
    pub fn new(enabled: bool) -> Self {
        Self {
            phase: AudioPhase::Locked,
            enabled,
            ambient_started: false,
        }
    }

    pub fn phase(&self) -> AudioPhase {
        self.phase
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// First click/touch anywhere. Later calls do nothing.
    pub fn unlock(&mut self) -> AudioCommands {
        if self.phase != AudioPhase::Locked {
            return SmallVec::new();
        }
        if self.enabled {
            self.phase = AudioPhase::UnlockedPlaying;
            self.start_or_unmute()
        } else {
            self.phase = AudioPhase::UnlockedMuted;
            SmallVec::new()
        }
    }

    /// Sound toggle control. While locked only the flag changes; playback
    /// waits for the unlock.
    pub fn toggle(&mut self) -> AudioCommands {
        self.enabled = !self.enabled;
        let mut out: AudioCommands = smallvec![AudioCommand::Persist(self.enabled)];
        match (self.phase, self.enabled) {
            (AudioPhase::Locked, _) => {}
            (_, true) => {
                self.phase = AudioPhase::UnlockedPlaying;
                out.extend(self.start_or_unmute());
            }
            (_, false) => {
                self.phase = AudioPhase::UnlockedMuted;
                if self.ambient_started {
                    out.push(AudioCommand::SetAmbientMuted(true));
                }
            }
        }
        out
    }

    /// Every pointer-down fires the glitch one-shot while sound is on.
    pub fn pointer_down(&self) -> Option<AudioCommand> {
        self.enabled.then_some(AudioCommand::PlayGlitch)
    }

    fn start_or_unmute(&mut self) -> AudioCommands {
        if self.ambient_started {
            smallvec![AudioCommand::SetAmbientMuted(false)]
        } else {
            self.ambient_started = true;
            smallvec![AudioCommand::StartAmbient]
        }
    }
}

impl Default for SoundController {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Engine-side view of the ambient loop: the last mute command and whether a
/// start is parked until the buffer finishes decoding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AmbientGate {
    muted: bool,
    start_pending: bool,
}

impl AmbientGate {
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Returns whether the loop can start now; otherwise the start waits
    /// for `buffer_ready`.
    pub fn request_start(&mut self, buffer_ready: bool) -> bool {
        self.start_pending = !buffer_ready;
        buffer_ready
    }

    /// Returns whether a parked start should run now that the buffer exists.
    pub fn buffer_ready(&mut self) -> bool {
        std::mem::take(&mut self.start_pending)
    }

    /// Gain for the ambient loop at full `volume`, honouring the last mute.
    pub fn level(&self, volume: f32) -> f32 {
        if self.muted {
            0.0
        } else {
            volume
        }
    }
}

/// Stored preference to flag: only "false" turns sound off.
pub fn parse_stored_flag(stored: Option<&str>) -> bool {
    match stored {
        Some("false") => false,
        Some("true") | None => true,
        Some(other) => {
            log::warn!("[sound] ignoring malformed {} value {:?}", SOUND_ENABLED_KEY, other);
            true
        }
    }
}

pub fn stored_value(enabled: bool) -> &'static str {
    if enabled {
        "true"
    } else {
        "false"
    }
}

pub const ICON_ON: &str = "fa-volume-up";
pub const ICON_OFF: &str = "fa-volume-mute";

/// What the toggle control shows for a given flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ToggleView {
    pub status: &'static str,
    pub icon_add: &'static str,
    pub icon_remove: &'static str,
}

impl ToggleView {
    pub fn for_enabled(enabled: bool) -> Self {
        if enabled {
            Self {
                status: "Sound ON",
                icon_add: ICON_ON,
                icon_remove: ICON_OFF,
            }
        } else {
            Self {
                status: "Sound OFF",
                icon_add: ICON_OFF,
                icon_remove: ICON_ON,
            }
        }
    }
}
