//! Draw-call surface implemented by the rendering backend.
//!
//! Calls are synchronous and only touch the backend's draw buffer.

use super::map::{RoomId, WorldId};
use crate::state::{ActorKind, Direction, DoorState};

pub trait Canvas {
    /// Restricts subsequent draws to a screen rectangle.
    fn set_clip(&mut self, x: i32, y: i32, width: i32, height: i32);

    fn reset_clip(&mut self);

    /// Uploads one color into a palette row.
    fn set_color(&mut self, palette: u8, index: u8, color: u8);

    /// 0 is fully lit, 4 fully dark.
    fn set_dark_step(&mut self, step: u8);

    fn draw_room(&mut self, world: WorldId, room: RoomId, offset_x: i32, offset_y: i32);

    fn draw_door(&mut self, dir: Direction, state: DoorState, offset_x: i32, offset_y: i32);

    fn draw_sprite(&mut self, kind: ActorKind, frame: u16, x: i32, y: i32, palette: u8);

    /// Curtain edges for the unfurl and furl wipes.
    fn draw_curtains(&mut self, left: i32, right: i32);
}

/// One recorded draw call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DrawCall {
    Clip(i32, i32, i32, i32),
    ResetClip,
    Color { palette: u8, index: u8, color: u8 },
    DarkStep(u8),
    Room { world: WorldId, room: RoomId, offset_x: i32, offset_y: i32 },
    Door { dir: Direction, state: DoorState },
    Sprite { kind: ActorKind, x: i32, y: i32 },
    Curtains { left: i32, right: i32 },
}

/// Canvas that keeps every call, for headless runs and tests.
#[derive(Clone, Debug, Default)]
pub struct RecordingCanvas {
    pub calls: Vec<DrawCall>,
}

impl Canvas for RecordingCanvas {
    fn set_clip(&mut self, x: i32, y: i32, width: i32, height: i32) {
        self.calls.push(DrawCall::Clip(x, y, width, height));
    }

    fn reset_clip(&mut self) {
        self.calls.push(DrawCall::ResetClip);
    }

    fn set_color(&mut self, palette: u8, index: u8, color: u8) {
        self.calls.push(DrawCall::Color { palette, index, color });
    }

    fn set_dark_step(&mut self, step: u8) {
        self.calls.push(DrawCall::DarkStep(step));
    }

    fn draw_room(&mut self, world: WorldId, room: RoomId, offset_x: i32, offset_y: i32) {
        self.calls.push(DrawCall::Room {
            world,
            room,
            offset_x,
            offset_y,
        });
    }

    fn draw_door(&mut self, dir: Direction, state: DoorState, _offset_x: i32, _offset_y: i32) {
        self.calls.push(DrawCall::Door { dir, state });
    }

    fn draw_sprite(&mut self, kind: ActorKind, _frame: u16, x: i32, y: i32, _palette: u8) {
        self.calls.push(DrawCall::Sprite { kind, x, y });
    }

    fn draw_curtains(&mut self, left: i32, right: i32) {
        self.calls.push(DrawCall::Curtains { left, right });
    }
}
