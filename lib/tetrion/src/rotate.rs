//! Rotation with floor kicks and wall kicks.
//!
//! There is no kick table. When the rotated shape collides in place, the overlap with the
//! playfield decides the correction: turning out of the point-down state may move the
//! piece up a row (once per row, see [`Piece::floor_reached`]), otherwise an overlap
//! confined to the left or right box column pushes the piece one column the other way.

use crate::input::{Rot, Turn};
use crate::matrix::Mat;
use crate::piece::Piece;
use crate::shape::{Shape, BOTTOM_ROW, BOX_WIDTH, LEFT_COLUMN, RIGHT_COLUMN};

impl Piece {
    /// Rotates the piece, kicking it if needed. Returns `true` if the shape changed; an O
    /// piece never does. On failure the piece is left untouched.
    pub fn try_rotate(&mut self, mat: &Mat, turn: Turn) -> bool {
        let shapes = self.kind.shapes();
        let window = mat.window(self.row, self.col);
        let mut steps = turn as u8;
        let mut kick = true;

        // flat I, S or Z: if the first upright column is blocked, try the other one
        // before giving up, without kicking it
        if shapes[0] == self.shape
            && shapes[2] == self.shape
            && shapes[usize::from(steps)].collides(window)
        {
            steps += 2;
            kick = false;
        }

        let from = self.rot();
        let rotated = shapes[Rot::from(u8::from(from) + steps) as usize];

        if rotated.collides(window) {
            if !kick {
                return false;
            }
            let kicked = (from == Rot::S && self.floor_kick(rotated, window))
                || self.wall_kick(mat, rotated, window);
            if !kicked {
                return false;
            }
        }

        let moved = rotated != self.shape;
        self.shape = rotated;
        moved
    }

    /// Moves the piece up a row if the rotated shape only collides through the bottom of
    /// its box. Never used for I, whose flat state is always found at [`Rot::N`].
    fn floor_kick(&mut self, rotated: Shape, window: u16) -> bool {
        let overlap = rotated.bits() & window;
        // `window << BOX_WIDTH` is the window one row up, minus its top row, which none of
        // the kickable shapes occupy
        if overlap & BOTTOM_ROW != 0
            && !rotated.collides(window << BOX_WIDTH)
            && self.floor_reached >= self.row
        {
            self.floor_reached = self.row;
            self.row += 1;
            return true;
        }
        false
    }

    /// Moves the piece one column away from the side the rotated shape collides on. An
    /// overlap touching anything but one edge column is not kicked.
    fn wall_kick(&mut self, mat: &Mat, rotated: Shape, window: u16) -> bool {
        let overlap = rotated.bits() & window;
        let dx = if overlap & !LEFT_COLUMN == 0 {
            1
        } else if overlap & !RIGHT_COLUMN == 0 {
            -1
        } else {
            return false;
        };

        if mat.collides(rotated, self.row, self.col + dx) {
            return false;
        }
        self.col += dx;
        true
    }
}
