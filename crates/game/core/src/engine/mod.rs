//! Mode dispatch and the per-tick pipeline.
//!
//! The [`GameEngine`] is the authoritative stepper for [`GameState`]. Each
//! [`GameEngine::update`] advances exactly one frame: it settles a pending
//! mode transition, dispatches to the active mode's handler through the
//! [`ModeTable`], and applies whatever [`Goto`] the step requested. All state
//! mutation, including the host-facing `goto_*` entry points, flows through
//! the same machine records.

pub mod cheats;
pub mod collision;
pub mod doors;
pub mod economy;
mod errors;
pub mod hook;
pub mod mode;
pub mod modes;
pub mod play;
#[cfg(feature = "serde")]
pub mod replay;
pub mod rooms;

pub use cheats::{Cheat, CheatError};
pub use economy::KillEconomy;
pub use errors::EngineError;
pub use mode::{CleanupHook, GameMode, Goto, Machine, ModeHandler, ModeTable};
#[cfg(feature = "serde")]
pub use replay::{Checkpoint, InputRecording, ReplayError, run_recording, verify_determinism};

use crate::actors;
use crate::env::{Canvas, GameEnv, RoomKind, WorldId};
use crate::state::{
    Actor, ActorId, ActorKind, Direction, GameState, HostRequest, Point, StateSnapshot,
};

/// Palette row used for the player sprite.
const PLAYER_PALETTE: u8 = 4;
/// Palette row used for every other sprite.
const ACTOR_PALETTE: u8 = 5;

/// Frame-driven orchestrator over a borrowed [`GameState`].
///
/// The engine holds no state of its own; hosts may drop and recreate it
/// between frames.
pub struct GameEngine<'a> {
    state: &'a mut GameState,
}

impl<'a> GameEngine<'a> {
    /// Creates a new game engine with the given state.
    pub fn new(state: &'a mut GameState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &GameState {
        &*self.state
    }

    /// Mode as reported to hosts; the internal `Init*` modes are hidden.
    pub fn mode(&self) -> GameMode {
        self.state.machine.mode().public_mode()
    }

    /// Advances one frame.
    ///
    /// Every error is fatal to the session and is logged once before it is
    /// returned.
    pub fn update(&mut self, env: &GameEnv<'_>) -> Result<(), EngineError> {
        self.step(env).map_err(EngineError::logged)
    }

    fn step(&mut self, env: &GameEnv<'_>) -> Result<(), EngineError> {
        let table = ModeTable::standard()?;
        let mode = self.state.machine.mode();
        if mode != self.state.last_mode {
            self.on_transition(env, mode);
        }

        let handler = table.handler(mode)?;
        handler(&mut self.state.machine, &mut self.state.world, env)?;

        if let Some(goto) = self.state.world.take_pending() {
            self.apply(goto);
        }
        self.state.world.advance_frame();
        Ok(())
    }

    /// Runs the outgoing mode's cleanup and, when leaving a playing mode,
    /// persists the room's monster count, including edge spawns still queued.
    fn on_transition(&mut self, env: &GameEnv<'_>, mode: GameMode) {
        let from = self.state.last_mode;
        let world = &mut self.state.world;
        if let Some(cleanup) = world.cleanup.take() {
            cleanup.run(world, env);
        }
        if from.is_playing() && mode != GameMode::WinGame {
            let count = u8::try_from(world.owed_monsters()).unwrap_or(u8::MAX);
            world.room_flags_mut().object_count = Some(count);
            world.player.moving = Direction::empty();
        }
        tracing::debug!(%from, to = %mode, frame = world.frame, "mode change");
        self.state.last_mode = mode;
    }

    fn apply(&mut self, goto: Goto) {
        if goto == Goto::Menu {
            self.state.world.host_requests.push(HostRequest::ReturnToMenu);
        }
        self.state.machine = Machine::enter(goto);
    }

    /// Starts a new game from the overworld entry room.
    pub fn start_game(&mut self) {
        tracing::info!(seed = self.state.game_seed, "starting game");
        self.apply(Goto::restart(WorldId::OVERWORLD));
    }

    pub fn goto_menu(&mut self) {
        self.apply(Goto::Menu);
    }

    pub fn goto_load_level(&mut self, world: WorldId, restart: bool) {
        self.apply(Goto::LoadLevel {
            world,
            restart,
            arrival: None,
        });
    }

    pub fn goto_play(&mut self) {
        self.apply(Goto::Play);
    }

    pub fn goto_death(&mut self) {
        self.apply(Goto::Death);
    }

    /// Asks the current room to open its shutters on the next playing tick.
    pub fn goto_trigger_shutters(&mut self) {
        self.state.world.doors.shutters_requested = true;
    }

    /// Spawns an actor through the factory.
    pub fn add_object(&mut self, kind: ActorKind, position: Point) -> Result<ActorId, EngineError> {
        actors::spawn(&mut self.state.world, kind, position)
    }

    pub fn objects_of(&self, kind: ActorKind) -> impl Iterator<Item = &Actor> {
        self.state.world.actors.of_kind(kind)
    }

    /// Removes every actor of `kind`, returning how many were removed.
    pub fn remove_objects(&mut self, kind: ActorKind) -> usize {
        self.state.world.actors.remove_kind(kind)
    }

    /// Runs a debug command. Failures are also queued as a toast.
    pub fn run_cheat(&mut self, env: &GameEnv<'_>, command: &str) -> Result<(), CheatError> {
        let result = command
            .parse::<Cheat>()
            .and_then(|cheat| cheats::apply(cheat, &mut *self.state, env));
        if let Err(error) = &result {
            self.state.world.toast(error.to_string());
        }
        result
    }

    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot::capture(&self.state.world)
    }

    /// Drains the requests queued for the host since the last call.
    pub fn take_host_requests(&mut self) -> Vec<HostRequest> {
        std::mem::take(&mut self.state.world.host_requests)
    }

    pub fn take_toasts(&mut self) -> Vec<String> {
        std::mem::take(&mut self.state.world.toasts)
    }

    /// Issues the draw calls for the current frame.
    pub fn draw(&self, env: &GameEnv<'_>, canvas: &mut dyn Canvas) -> Result<(), EngineError> {
        let world = &self.state.world;
        match &self.state.machine {
            Machine::Demo | Machine::GameMenu | Machine::Continue(_) | Machine::LoadLevel(_) => {
                return Ok(());
            }
            Machine::Death(death) => {
                modes::death::draw(death, world, canvas);
                return Ok(());
            }
            Machine::Scroll(scroll) => {
                canvas.set_dark_step(world.palette.dark_step);
                modes::scroll::draw(scroll, world, canvas);
                if scroll.state == modes::scroll::ScrollState::Scroll && !scroll.is_settled() {
                    return Ok(());
                }
            }
            Machine::Unfurl(unfurl) => modes::unfurl::draw(unfurl, world, canvas),
            Machine::EndLevel(end) => modes::end_level::draw(end, world, canvas),
            _ => {
                canvas.set_dark_step(world.palette.dark_step);
                canvas.draw_room(world.world_id, world.room_id, 0, 0);
            }
        }

        if !world.is_overworld() && world.room_kind == RoomKind::Normal {
            let room = world.current_room(env)?;
            for dir in Direction::CARDINALS {
                canvas.draw_door(dir, doors::current_door_state(world, room, dir), 0, 0);
            }
        }

        let anim = ((world.frame >> 3) & 1) as u16;
        canvas.draw_sprite(ActorKind::Player, anim, world.player.x(), world.player.y(), PLAYER_PALETTE);
        for actor in world.actors.iter().filter(|actor| !actor.deleted) {
            canvas.draw_sprite(actor.kind, anim, actor.x(), actor.y(), ACTOR_PALETTE);
        }
        Ok(())
    }
}
