//! Collaborator services owned by the application loop.
//!
//! The simulation only emits [`GameEvent`]s. The runner builds one value of
//! each service and routes the drained events to them with [`dispatch`].

use std::collections::BTreeSet;

use crate::events::{GameEvent, SoundCue};

/// Fire-and-forget audio playback.
pub trait AudioSink {
    fn play_sound(&mut self, cue: SoundCue);
    fn set_music(&mut self, playing: bool);
}

/// Menu canvases and scene switches.
pub trait MenuHost {
    fn open_menu(&mut self, name: &str);
    fn main_menu(&mut self);
    fn set_time_scale(&mut self, scale: f32);
}

/// In-memory progress flags.
pub trait ProgressStore {
    fn defeat_boss(&mut self, index: u32);
    fn easter_egg_found(&mut self, scene: &str);
    fn is_boss_defeated(&self, index: u32) -> bool;
    fn has_easter_egg(&self, scene: &str) -> bool;
}

/// Borrowed view of every service, passed to [`dispatch`].
pub struct Services<'a> {
    pub audio: &'a mut dyn AudioSink,
    pub menus: &'a mut dyn MenuHost,
    pub progress: &'a mut dyn ProgressStore,
}

/// Route events to the services. Visual-only events are traced and dropped.
pub fn dispatch(events: &[GameEvent], services: &mut Services<'_>) {
    for event in events {
        match event {
            GameEvent::Sound { cue } => services.audio.play_sound(*cue),
            GameEvent::Music { playing } => services.audio.set_music(*playing),
            GameEvent::OpenMenu { name } => services.menus.open_menu(name),
            GameEvent::MainMenu => services.menus.main_menu(),
            GameEvent::TimeScale { scale } => services.menus.set_time_scale(*scale),
            GameEvent::BossDefeated { index } => services.progress.defeat_boss(*index),
            GameEvent::EasterEggFound { scene } => services.progress.easter_egg_found(scene),
            other => log::trace!("visual event {other:?}"),
        }
    }
}

/// Progress flags kept for the lifetime of the process.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProgress {
    defeated: BTreeSet<u32>,
    easter_eggs: BTreeSet<String>,
}

impl ProgressStore for InMemoryProgress {
    fn defeat_boss(&mut self, index: u32) {
        self.defeated.insert(index);
    }

    fn easter_egg_found(&mut self, scene: &str) {
        self.easter_eggs.insert(scene.to_string());
    }

    fn is_boss_defeated(&self, index: u32) -> bool {
        self.defeated.contains(&index)
    }

    fn has_easter_egg(&self, scene: &str) -> bool {
        self.easter_eggs.contains(scene)
    }
}
