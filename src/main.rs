//! Lullaby headless runner
//!
//! Plays the built-in levels (or a JSON level pack given as the first
//! argument) with a simple autopilot pressing keys, and logs how the run went.
//! Rendering, audio and HUD hosts plug in through `lullaby::platform`.

use std::path::Path;

use lullaby::consts::*;
use lullaby::levels::{self, LevelData};
use lullaby::platform::{Action, EventSink, HudSink, KeyboardState, RenderSink};
use lullaby::sim::{GameEvent, GameState, HudSnapshot};
use lullaby::{Game, Settings};

/// Simulated frame length for the headless loop
const FRAME_TIME: f32 = 1.0 / 60.0;
/// Give up after this much simulated time
const MAX_RUN_SECONDS: f32 = 300.0;

/// Logs events instead of playing sounds
#[derive(Default)]
struct LogFrontend {
    frames: u64,
    damage_taken: u32,
    last_hud: Option<HudSnapshot>,
}

impl RenderSink for LogFrontend {
    fn render(&mut self, _state: &GameState) {
        self.frames += 1;
    }
}

impl EventSink for LogFrontend {
    fn on_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::LevelStarted { index } => log::info!("Level {} started", index + 1),
            GameEvent::DamageTaken { health } => {
                self.damage_taken += 1;
                log::debug!("Ouch! health now {health}");
            }
            GameEvent::BossDefeated => log::info!("Boss put to sleep for good"),
            GameEvent::RunCompleted(stats) => log::info!(
                "Run complete: {:.1}s, {}/{} notes, {} shards",
                stats.total_time,
                stats.notes_collected,
                stats.overall_note_goal,
                stats.shards_collected
            ),
            other => log::trace!("{other:?}"),
        }
    }
}

impl HudSink for LogFrontend {
    fn update_hud(&mut self, hud: &HudSnapshot) {
        self.last_hud = Some(hud.clone());
    }
}

/// Keys the autopilot wants held this frame
struct Autopilot {
    jump: bool,
    sleep: bool,
    float: bool,
}

/// Hold right, hop over trouble and pulse anything awake nearby
fn autopilot(state: &GameState) -> Autopilot {
    let player = &state.player;
    let center = player.center();
    let probe_x = player.pos.x + 1.5;

    let threat = state.enemies.iter().any(|e| {
        let d = e.center() - center;
        e.is_harmful() && d.x > -1.0 && d.length_squared() < SLEEP_RADIUS * SLEEP_RADIUS
    });
    let wall_ahead = state.platforms.iter().any(|p| {
        let gap = p.x - (player.pos.x + player.size.x);
        (0.0..0.6).contains(&gap) && p.top() > player.pos.y + 0.1
    });
    let ground_ahead = state.platforms.iter().any(|p| {
        p.x <= probe_x && p.right() >= probe_x && (p.top() - player.pos.y).abs() < 0.05
    });

    Autopilot {
        jump: player.grounded && (wall_ahead || !ground_ahead || threat),
        sleep: threat,
        float: !player.grounded && player.vel.y < 0.0 && !ground_ahead,
    }
}

/// Hold or release the first key bound to `action`
fn press(keys: &mut KeyboardState, action: Action, held: bool) {
    let Some(code) = keys.bindings().codes(action).first().cloned() else {
        return;
    };
    // Release every frame so the next frame's hold is a fresh press
    keys.key_up(&code);
    if held {
        keys.key_down(&code);
    }
}

fn load_levels() -> Result<Vec<LevelData>, Box<dyn std::error::Error>> {
    match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path)?;
            Ok(levels::from_json(&json)?)
        }
        None => Ok(levels::builtin_levels()),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Lullaby (headless) starting...");

    let settings = Settings::load(Path::new("lullaby_settings.json"));
    log::debug!(
        "Audio gains: sfx {:.2}, music {:.2}",
        settings.sfx_gain(),
        settings.music_gain()
    );
    let levels = load_levels()?;
    let mut game = Game::new(levels, KeyboardState::new(settings.keys.clone()))?;
    let mut frontend = LogFrontend::default();

    let mut simulated = 0.0;
    while simulated < MAX_RUN_SECONDS && !game.is_completed() {
        let pilot = autopilot(game.state());
        let keys = game.input_mut();
        press(keys, Action::Right, true);
        press(keys, Action::Jump, pilot.jump);
        press(keys, Action::Sleep, pilot.sleep);
        press(keys, Action::Float, pilot.float);
        game.frame(FRAME_TIME, &mut frontend);
        simulated += FRAME_TIME;
    }

    let stats = game.state().levels.stats();
    if stats.completed {
        log::info!("Autopilot finished all {} levels", stats.levels);
    } else if let Some(hud) = &frontend.last_hud {
        log::info!(
            "Autopilot stopped on level {} ({}) with {}/{} notes after {:.0}s",
            hud.level_number,
            hud.level_name,
            hud.notes,
            hud.note_goal,
            simulated
        );
    }
    log::info!(
        "{} frames rendered, {} hits taken",
        frontend.frames,
        frontend.damage_taken
    );
    Ok(())
}
