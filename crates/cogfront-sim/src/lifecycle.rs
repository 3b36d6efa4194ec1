//! Scene lifecycle: the intro, the outro, and game over.
//!
//! Each boss scene runs a declarative [`Script`] of [`Cue`]s. Instant cues
//! run back to back within a tick; blocking cues (waits, typing, boss
//! entrance moves, animation waits) suspend the script until a later tick.
//! [`Lifecycle`] swaps in the death script when the boss reports its death
//! and ends the run when the player dies.

use glam::Vec2;
use log::info;

use cogfront_core::config::GameConfig;
use cogfront_core::constants::{EYE_ENTRY_SECS, LETTER_DELAY};
use cogfront_core::enums::{BossKind, DroneState, GamePhase};
use cogfront_core::events::{GameEvent, SoundCue};

use crate::bosses::{drone, eye, Boss};
use crate::scene::Scene;
use crate::sequence::{Step, Tween, Wait};

/// One step of a lifecycle script.
#[derive(Debug, Clone, PartialEq)]
pub enum Cue {
    Wait(f32),
    Sound(SoundCue),
    Music(bool),
    /// Type the boss title one letter at a time.
    TypeTitle,
    /// Block until the boss animator is in this state.
    WaitForAnimation(&'static str),
    /// Fire an animation trigger at the boss.
    Animate(&'static str),
    MoveBossTo { to: Vec2, secs: f32 },
    Conveyors(bool),
    /// Start the music, show the player and accept commands.
    EnableGameplay,
    StartBoss,
    StopBoss,
    SpawnDrones(u32),
    SetDroneState(DroneState),
    /// Explosion relative to the boss.
    Explosion { offset: Vec2, big: bool },
    HideBoss,
    HidePlayer,
    TimeScale(f32),
    OpenMenu(&'static str),
    MainMenu,
    /// Record the boss as defeated.
    DefeatBoss,
    EasterEgg(&'static str),
    Finish(GamePhase),
}

impl Cue {
    fn boom(x: f32, y: f32, big: bool) -> Self {
        Self::Explosion {
            offset: Vec2::new(x, y),
            big,
        }
    }
}

/// A blocking cue in progress.
#[derive(Debug, Clone, PartialEq)]
enum Running {
    Wait(Wait),
    Typing { typed: usize, gap: Wait },
    Animation(&'static str),
    Move { from: Vec2, to: Vec2, tween: Tween },
}

/// A cue list and how far through it the scene is.
#[derive(Debug, Clone, PartialEq)]
pub struct Script {
    name: &'static str,
    cues: Vec<Cue>,
    cursor: usize,
    running: Option<Running>,
}

impl Script {
    pub fn new(name: &'static str, cues: Vec<Cue>) -> Self {
        Self {
            name,
            cues,
            cursor: 0,
            running: None,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_finished(&self) -> bool {
        self.running.is_none() && self.cursor >= self.cues.len()
    }

    /// Advance the script by one tick.
    pub fn tick(&mut self, scene: &mut Scene, boss: &mut Boss, phase: &mut GamePhase) {
        if let Some(running) = self.running.take() {
            match poll(running, scene, boss) {
                Ok(()) => {}
                Err(still) => {
                    self.running = Some(still);
                    return;
                }
            }
        }
        while let Some(cue) = self.cues.get(self.cursor).cloned() {
            self.cursor += 1;
            if let Some(running) = run_cue(cue, scene, boss, phase) {
                self.running = Some(running);
                return;
            }
        }
    }
}

/// Poll a blocking cue. `Err` hands it back while it is still running.
fn poll(running: Running, scene: &mut Scene, boss: &mut Boss) -> Result<(), Running> {
    let dt = scene.dt();
    match running {
        Running::Wait(mut wait) => match wait.tick(dt) {
            Step::Done => Ok(()),
            Step::Pending => Err(Running::Wait(wait)),
        },
        Running::Typing { typed, mut gap } => {
            if gap.tick(dt) == Step::Pending {
                return Err(Running::Typing { typed, gap });
            }
            let title = boss.kind().title();
            if typed >= title.chars().count() {
                return Ok(());
            }
            Err(type_letter(scene, title, typed))
        }
        Running::Animation(state) => {
            if boss.core().animator.is(state) {
                Ok(())
            } else {
                Err(Running::Animation(state))
            }
        }
        Running::Move { from, to, mut tween } => {
            let step = tween.tick(dt);
            boss.core_mut().position = from.lerp(to, tween.progress());
            match step {
                Step::Done => Ok(()),
                Step::Pending => Err(Running::Move { from, to, tween }),
            }
        }
    }
}

/// Show the title through letter `index` and wait before the next one.
fn type_letter(scene: &mut Scene, title: &str, index: usize) -> Running {
    let text: String = title.chars().take(index + 1).collect();
    if title.chars().nth(index).is_some_and(|c| !c.is_whitespace()) {
        scene.sound(SoundCue::BossNameLetter);
    }
    scene.emit(GameEvent::BossTitle { text });
    Running::Typing {
        typed: index + 1,
        gap: Wait::new(LETTER_DELAY),
    }
}

/// Run one cue. Blocking cues return what to poll on later ticks.
fn run_cue(cue: Cue, scene: &mut Scene, boss: &mut Boss, phase: &mut GamePhase) -> Option<Running> {
    match cue {
        Cue::Wait(secs) => return Some(Running::Wait(Wait::new(secs))),
        Cue::TypeTitle => return Some(type_letter(scene, boss.kind().title(), 0)),
        Cue::WaitForAnimation(state) => return Some(Running::Animation(state)),
        Cue::MoveBossTo { to, secs } => {
            return Some(Running::Move {
                from: boss.core().position,
                to,
                tween: Tween::new(secs),
            })
        }
        Cue::Sound(sound) => scene.sound(sound),
        Cue::Music(playing) => scene.emit(GameEvent::Music { playing }),
        Cue::Animate(trigger) => {
            scene.animation(trigger);
            boss.behavior_mut().on_trigger(trigger);
        }
        Cue::Conveyors(running) => scene.set_conveyors(running),
        Cue::EnableGameplay => {
            scene.emit(GameEvent::Music { playing: true });
            scene.player.active = true;
            *phase = GamePhase::Active;
            info!("{:?} scene: gameplay enabled", boss.kind());
        }
        Cue::StartBoss => boss.behavior_mut().start(scene),
        Cue::StopBoss => boss.behavior_mut().stop(scene),
        Cue::SpawnDrones(count) => {
            if let Some(drones) = boss.as_drone_mut() {
                drones.spawn_wave(scene, count);
            }
        }
        Cue::SetDroneState(state) => {
            if let Some(drones) = boss.as_drone_mut() {
                drones.set_state(scene, state);
            }
        }
        Cue::Explosion { offset, big } => scene.explosion(boss.core().position + offset, big),
        Cue::HideBoss => {
            let core = boss.core_mut();
            core.visible = false;
            core.collider = false;
        }
        Cue::HidePlayer => scene.player.active = false,
        Cue::TimeScale(scale) => {
            scene.time_scale = scale;
            scene.emit(GameEvent::TimeScale { scale });
        }
        Cue::OpenMenu(name) => scene.emit(GameEvent::OpenMenu {
            name: name.to_string(),
        }),
        Cue::MainMenu => scene.emit(GameEvent::MainMenu),
        Cue::DefeatBoss => scene.emit(GameEvent::BossDefeated {
            index: boss.kind().progress_index(),
        }),
        Cue::EasterEgg(name) => scene.emit(GameEvent::EasterEggFound {
            scene: name.to_string(),
        }),
        Cue::Finish(end) => {
            *phase = end;
            info!("{:?} scene finished: {end:?}", boss.kind());
        }
    }
    None
}

/// Cues played before the boss fight.
pub fn intro_script(kind: BossKind, config: &GameConfig) -> Script {
    use Cue::*;
    let cues = match kind {
        BossKind::Eye => vec![
            WaitForAnimation(eye::LOOKING_INTRO),
            TypeTitle,
            Wait(1.0),
            MoveBossTo {
                to: config.eye.home,
                secs: EYE_ENTRY_SECS,
            },
            Animate("TextFinished"),
            Conveyors(true),
            EnableGameplay,
            Animate("StartGame"),
            StartBoss,
        ],
        BossKind::Drone => vec![
            WaitForAnimation(drone::STATIC),
            Animate("Signal"),
            Sound(SoundCue::DroneBossSignal),
            Wait(1.75),
            SpawnDrones(config.drone.intro_wave),
            Wait(3.0),
            TypeTitle,
            Wait(1.0),
            Conveyors(true),
            EnableGameplay,
            StartBoss,
        ],
        BossKind::Goat => vec![
            Sound(SoundCue::Static),
            Wait(3.75),
            TypeTitle,
            Wait(1.0),
            Conveyors(true),
            EnableGameplay,
            StartBoss,
        ],
        BossKind::Final => vec![
            Animate("ArmsIntoPlace"),
            Wait(3.0),
            Sound(SoundCue::FinalBossIntro),
            Wait(1.0),
            TypeTitle,
            Wait(1.0),
            Conveyors(true),
            EnableGameplay,
            StartBoss,
        ],
    };
    Script::new("intro", cues)
}

/// Cues played once the boss dies.
pub fn death_script(kind: BossKind, config: &GameConfig) -> Script {
    use Cue::*;
    let cues = match kind {
        BossKind::Eye => vec![
            StopBoss,
            Conveyors(false),
            Animate("BossDefeated"),
            Wait(3.0),
            Animate("BackToCenter"),
            Wait(1.0),
            Cue::boom(0.0, 0.0, true),
            Sound(SoundCue::TurretHit),
            HideBoss,
            Wait(1.5),
            Sound(SoundCue::BossDefeat),
            TimeScale(0.0),
            OpenMenu("YouWinMenuCanvas"),
            DefeatBoss,
            Finish(GamePhase::Won),
        ],
        BossKind::Drone => {
            let mut cues = vec![
                StopBoss,
                Animate("Signal"),
                Sound(SoundCue::DroneBossSignal),
                Wait(1.75),
                SpawnDrones(config.drone.death_wave),
                SetDroneState(DroneState::Protecting),
            ];
            for _ in 0..10 {
                cues.extend([Cue::boom(0.0, 0.0, true), Sound(SoundCue::TurretHit), Wait(0.5)]);
            }
            cues.extend([
                HideBoss,
                SetDroneState(DroneState::Scattering),
                Wait(3.0),
                Sound(SoundCue::BossDefeat),
                TimeScale(0.0),
                OpenMenu("YouWinMenuCanvas"),
                DefeatBoss,
                Finish(GamePhase::Won),
            ]);
            cues
        }
        BossKind::Goat => {
            let mut cues = vec![StopBoss];
            for _ in 0..5 {
                cues.extend([Wait(1.0), Sound(SoundCue::GoatBossDead)]);
            }
            cues.extend([
                Cue::boom(0.0, 0.0, true),
                Sound(SoundCue::TurretHit),
                HideBoss,
                HidePlayer,
                Wait(5.0),
                EasterEgg("BossFourScene"),
                MainMenu,
                Finish(GamePhase::Won),
            ]);
            cues
        }
        BossKind::Final => vec![
            StopBoss,
            Cue::boom(-1.5, 0.0, false),
            Cue::boom(1.5, 0.0, false),
            Animate("SpinArms"),
            Wait(5.0),
            Animate("Tears"),
            Wait(5.0),
            Cue::boom(0.0, 0.0, true),
            Sound(SoundCue::TurretHit),
            HideBoss,
            Wait(2.0),
            Sound(SoundCue::BossDefeat),
            TimeScale(0.0),
            OpenMenu("YouWinFinalMenuCanvas"),
            Finish(GamePhase::Won),
        ],
    };
    Script::new("death", cues)
}

/// Runs the current script and reacts to boss and player death.
#[derive(Debug, Clone)]
pub struct Lifecycle {
    script: Script,
    boss_dead: bool,
    player_dead: bool,
}

impl Lifecycle {
    pub fn new(kind: BossKind, config: &GameConfig) -> Self {
        Self {
            script: intro_script(kind, config),
            boss_dead: false,
            player_dead: false,
        }
    }

    pub fn script(&self) -> &Script {
        &self.script
    }

    pub fn tick(&mut self, scene: &mut Scene, boss: &mut Boss, phase: &mut GamePhase) {
        if boss.core_mut().take_death_notice() {
            self.boss_died(scene, boss);
        }
        if scene.player.is_dead() && !self.player_dead && !self.boss_dead {
            self.player_died(scene, phase);
            return;
        }
        if self.player_dead {
            return;
        }
        self.script.tick(scene, boss, phase);
    }

    fn boss_died(&mut self, scene: &mut Scene, boss: &mut Boss) {
        if self.boss_dead {
            return;
        }
        self.boss_dead = true;
        let kind = boss.kind();
        info!("{kind:?} scene: boss died, playing outro");
        scene.emit(GameEvent::Music { playing: false });
        scene.emit(GameEvent::BossDied { kind });
        self.script = death_script(kind, &scene.config);
    }

    fn player_died(&mut self, scene: &mut Scene, phase: &mut GamePhase) {
        self.player_dead = true;
        info!("player died");
        scene.player.active = false;
        scene.emit(GameEvent::Music { playing: false });
        scene.time_scale = 0.0;
        scene.emit(GameEvent::TimeScale { scale: 0.0 });
        scene.emit(GameEvent::OpenMenu {
            name: "YouDiedMenuCanvas".to_string(),
        });
        scene.emit(GameEvent::PlayerDied);
        *phase = GamePhase::Lost;
    }
}
