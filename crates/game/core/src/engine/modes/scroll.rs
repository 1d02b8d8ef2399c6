//! Room-to-room scroll.

use super::{FADE_TICKS, fade_toward};
use crate::engine::rooms::{self, MazeOutcome, RoomTarget};
use crate::engine::{EngineError, GameMode, Goto, Machine};
use crate::env::{Canvas, GameEnv, RoomId};
use crate::state::{Direction, PaletteState, Point, WorldState};

/// Pixels per tick.
pub const SCROLL_SPEED: i32 = 4;
pub const FAST_SCROLL_SPEED: i32 = 8;
/// Offsets a new room starts at.
pub const SCROLL_WIDTH: i32 = 0x100;
pub const SCROLL_HEIGHT: i32 = 0xB0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollState {
    #[default]
    Start,
    AnimatingColors,
    FadeOut,
    LoadRoom,
    Scroll,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollMachine {
    pub state: ScrollState,
    pub dir: Direction,
    pub timer: u16,
    /// Offset of the incoming room; both reach 0 together.
    pub offset_x: i32,
    pub offset_y: i32,
    pub target: RoomId,
    pub from_room: RoomId,
    fade_needed: bool,
}

impl ScrollMachine {
    pub fn new(dir: Direction) -> Self {
        Self {
            state: ScrollState::Start,
            dir,
            timer: 0,
            offset_x: 0,
            offset_y: 0,
            target: RoomId::default(),
            from_room: RoomId::default(),
            fade_needed: false,
        }
    }

    /// True once the old room is gone and both offsets are 0.
    pub fn is_settled(&self) -> bool {
        self.state == ScrollState::Scroll && self.offset_x == 0 && self.offset_y == 0
    }
}

/// Screen edge the player appears on after scrolling toward `dir`.
pub fn arrival_position(dir: Direction, player: Point) -> Point {
    if dir == Direction::LEFT {
        Point::new(0xF0, player.y)
    } else if dir == Direction::RIGHT {
        Point::new(0, player.y)
    } else if dir == Direction::UP {
        Point::new(player.x, 0xE0)
    } else {
        Point::new(player.x, 0x40)
    }
}

fn approach_zero(value: i32, speed: i32) -> i32 {
    if value > 0 {
        (value - speed).max(0)
    } else {
        (value + speed).min(0)
    }
}

pub fn update(machine: &mut Machine, world: &mut WorldState, env: &GameEnv<'_>) -> Result<(), EngineError> {
    let Machine::Scroll(scroll) = machine else {
        return Err(machine.mismatch(GameMode::Scroll));
    };

    match scroll.state {
        ScrollState::Start => {
            let room = world.current_room(env)?;
            let target = match rooms::advance_maze(world, env, room, scroll.dir) {
                MazeOutcome::Stay => RoomTarget {
                    world: world.world_id,
                    room: world.room_id,
                    arrival: None,
                },
                MazeOutcome::Exit => rooms::resolve_next_room(world, env, scroll.dir)?,
            };

            if target.world != world.world_id {
                world.goto(Goto::LoadLevel {
                    world: target.world,
                    restart: false,
                    arrival: target.arrival,
                });
                return Ok(());
            }

            scroll.target = target.room;
            scroll.from_room = world.room_id;
            scroll.fade_needed =
                world.current_world(env)?.is_dark(target.room) && !world.palette.is_dark();
            scroll.state = if world.palette.color_seq > 0 {
                ScrollState::AnimatingColors
            } else if scroll.fade_needed {
                scroll.timer = FADE_TICKS;
                ScrollState::FadeOut
            } else {
                ScrollState::LoadRoom
            };
        }

        ScrollState::AnimatingColors => {
            if world.frame & 4 != 0 {
                world.palette.color_seq = world.palette.color_seq.saturating_sub(1);
            }
            if world.palette.color_seq == 0 {
                scroll.state = if scroll.fade_needed {
                    scroll.timer = FADE_TICKS;
                    ScrollState::FadeOut
                } else {
                    ScrollState::LoadRoom
                };
            }
        }

        ScrollState::FadeOut => {
            if fade_toward(world, &mut scroll.timer, FADE_TICKS, PaletteState::DARK) {
                scroll.state = ScrollState::LoadRoom;
            }
        }

        ScrollState::LoadRoom => {
            rooms::load_room(world, env, world.world_id, scroll.target)?;
            let (dx, dy) = scroll.dir.delta();
            scroll.offset_x = dx * SCROLL_WIDTH;
            scroll.offset_y = dy * SCROLL_HEIGHT;
            world.player.position = arrival_position(scroll.dir, world.player.position);
            world.player.facing = scroll.dir;
            scroll.state = ScrollState::Scroll;
        }

        ScrollState::Scroll => {
            let speed = if env.config().speed_up {
                FAST_SCROLL_SPEED
            } else {
                SCROLL_SPEED
            };
            scroll.offset_x = approach_zero(scroll.offset_x, speed);
            scroll.offset_y = approach_zero(scroll.offset_y, speed);
            if scroll.offset_x == 0 && scroll.offset_y == 0 {
                world.goto(Goto::Enter(scroll.dir));
            }
        }
    }
    Ok(())
}

/// Draws both rooms while they slide.
pub fn draw(scroll: &ScrollMachine, world: &WorldState, canvas: &mut dyn Canvas) {
    if scroll.state != ScrollState::Scroll {
        canvas.draw_room(world.world_id, world.room_id, 0, 0);
        return;
    }
    let (dx, dy) = scroll.dir.delta();
    canvas.draw_room(
        world.world_id,
        scroll.from_room,
        scroll.offset_x - dx * SCROLL_WIDTH,
        scroll.offset_y - dy * SCROLL_HEIGHT,
    );
    canvas.draw_room(world.world_id, world.room_id, scroll.offset_x, scroll.offset_y);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrival_is_on_the_opposite_edge() {
        let player = Point::new(0x78, 0x90);
        assert_eq!(arrival_position(Direction::LEFT, player), Point::new(0xF0, 0x90));
        assert_eq!(arrival_position(Direction::RIGHT, player), Point::new(0, 0x90));
        assert_eq!(arrival_position(Direction::UP, player), Point::new(0x78, 0xE0));
        assert_eq!(arrival_position(Direction::DOWN, player), Point::new(0x78, 0x40));
    }

    #[test]
    fn horizontal_scroll_takes_64_ticks() {
        let mut offset = -SCROLL_WIDTH;
        let mut ticks = 0;
        while offset != 0 {
            offset = approach_zero(offset, SCROLL_SPEED);
            ticks += 1;
        }
        assert_eq!(ticks, 64);
    }

    #[test]
    fn vertical_scroll_lands_exactly_on_zero() {
        let mut offset = SCROLL_HEIGHT;
        while offset != 0 {
            offset = approach_zero(offset, FAST_SCROLL_SPEED);
            assert!(offset >= 0);
        }
    }
}
