//! Falling piece engine: one active piece moving over a playfield of bit rows.

#![no_std]

extern crate alloc;

#[cfg(test)]
extern crate std;

pub mod matrix;
pub use matrix::{Mat, MatBuf};

pub mod shape;
pub use shape::{PieceType, Shape};

pub mod input;
pub use input::{Action, Dir, Rot, Turn};

pub mod piece;
pub use piece::{Fall, Piece};

pub mod rotate;

pub mod control;
pub use control::Response;

pub mod gravity;
pub use gravity::LockDelay;
