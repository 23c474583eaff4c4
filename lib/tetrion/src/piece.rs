//! The active piece and the operations shared by movement and gravity.

use core::fmt;

use crate::input::{Dir, Rot};
use crate::matrix::Mat;
use crate::shape::{PieceType, Shape, BOX_HEIGHT, BOX_WIDTH};

/// Falling state of a piece.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Fall {
    /// Frames left until the next gravity step. Zero or negative means the piece is
    /// due to fall `1 - countdown` rows on the next update.
    Airborne { countdown: i32 },
    /// Resting on something. The piece is due to lock once either counter runs out.
    /// `move_delay` is re-armed by successful shifts and rotations, `step_delay` only
    /// when gravity lands the piece again. Counters are wider than the [`LockDelay`]
    /// thresholds so a re-armed `move_delay` of threshold + 1 always fits.
    ///
    /// [`LockDelay`]: crate::LockDelay
    Grounded { move_delay: u16, step_delay: u16 },
}

impl Fall {
    /// State right after a lock: not falling, no delay left.
    pub const LOCKED: Fall = Fall::Grounded {
        move_delay: 0,
        step_delay: 0,
    };
}

/// The piece under player control.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Piece {
    pub kind: PieceType,
    /// Always one of `kind.shapes()`.
    pub shape: Shape,
    /// Playfield row of the bottom of the box.
    pub row: i8,
    /// Playfield column (bit) of the left of the box.
    pub col: i8,
    pub fall: Fall,
    /// Row where gravity last moved the piece, or where it was floor kicked from. A
    /// floor kick is only allowed while `floor_reached >= row`.
    pub floor_reached: i8,
}

impl Piece {
    /// New piece in its initial orientation. It starts airborne with a full gravity
    /// period to wait before the first step.
    pub fn new(kind: PieceType, row: i8, col: i8) -> Self {
        Self {
            kind,
            shape: kind.shapes()[0],
            row,
            col,
            fall: Fall::Airborne {
                countdown: i32::MAX,
            },
            floor_reached: row,
        }
    }

    /// Current rotation state, the first catalog index holding this shape.
    ///
    /// # Panics
    ///
    /// Panics if `shape` is not one of the rotation states of `kind`.
    pub fn rot(&self) -> Rot {
        match self.kind.shapes().iter().position(|&s| s == self.shape) {
            Some(i) => Rot::from(i as u8),
            None => panic!("{:?} is not a rotation state of {}", self.shape, self.kind),
        }
    }

    /// True if the piece overlaps anything at its current position.
    pub fn collides(&self, mat: &Mat) -> bool {
        mat.collides(self.shape, self.row, self.col)
    }

    /// Stamps the piece into the playfield, or erases it if it is already there.
    pub fn toggle(&self, mat: &mut Mat) {
        mat.toggle(self.row, self.col, self.shape);
    }

    /// Number of rows the piece can fall before hitting something, at most `max` and at
    /// most `row`.
    pub fn drop_height(&self, mat: &Mat, max: i8) -> i8 {
        let max = max.min(self.row);
        if max <= 0 {
            return 0;
        }

        // slide the window down one row at a time: the old top row falls off the low
        // bits and the next row below enters as the new bottom nibble
        let mut window = mat.window(self.row - 1, self.col);
        let mut h = 0;
        while !self.shape.collides(window) {
            h += 1;
            if h == max {
                break;
            }
            let below = mat.slice(self.row - 1 - h, self.col);
            window = (window >> BOX_WIDTH) | (below << ((BOX_HEIGHT - 1) * BOX_WIDTH));
        }
        h
    }

    /// Moves the piece down by up to `max` rows. Returns the rows moved.
    pub fn drop(&mut self, mat: &Mat, max: i8) -> i8 {
        let h = self.drop_height(mat, max);
        self.row -= h;
        h
    }

    /// Moves the piece one column. Returns `false` and leaves it in place if the new
    /// position collides.
    pub fn try_shift(&mut self, mat: &Mat, dx: Dir) -> bool {
        let col = self.col + dx;
        if mat.collides(self.shape, self.row, col) {
            return false;
        }
        self.col = col;
        true
    }
}

impl fmt::Debug for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Piece")
            .field(&self.kind)
            .field(&self.shape)
            .field(&self.row)
            .field(&self.col)
            .field(&self.fall)
            .finish()
    }
}
