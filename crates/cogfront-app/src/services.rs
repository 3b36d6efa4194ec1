//! Service objects that log what the simulation asks of the outside world.

use log::{debug, info};

use cogfront_core::events::SoundCue;
use cogfront_core::services::{AudioSink, MenuHost};

/// Logs sounds and music changes instead of playing them.
#[derive(Debug, Default)]
pub struct LogAudio {
    pub music_playing: bool,
    pub sounds_played: u64,
}

impl AudioSink for LogAudio {
    fn play_sound(&mut self, cue: SoundCue) {
        self.sounds_played += 1;
        debug!("sound {}", cue.name());
    }

    fn set_music(&mut self, playing: bool) {
        if playing != self.music_playing {
            info!("music {}", if playing { "on" } else { "paused" });
        }
        self.music_playing = playing;
    }
}

/// Logs menu canvases and remembers the last one opened.
#[derive(Debug)]
pub struct LogMenus {
    pub open_menu: Option<String>,
    pub time_scale: f32,
}

impl Default for LogMenus {
    fn default() -> Self {
        Self {
            open_menu: None,
            time_scale: 1.0,
        }
    }
}

impl MenuHost for LogMenus {
    fn open_menu(&mut self, name: &str) {
        info!("menu {name}");
        self.open_menu = Some(name.to_string());
    }

    fn main_menu(&mut self) {
        info!("back to main menu");
        self.open_menu = None;
    }

    fn set_time_scale(&mut self, scale: f32) {
        debug!("time scale {scale}");
        self.time_scale = scale;
    }
}
