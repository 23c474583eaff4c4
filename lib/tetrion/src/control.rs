//! Player actions.

use crate::gravity::LockDelay;
use crate::input::Action;
use crate::matrix::Mat;
use crate::piece::{Fall, Piece};

/// What an action did to the piece.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Response {
    /// A shift or rotation succeeded.
    pub moved: bool,
    /// Rows descended by a hard or soft drop.
    pub dropped: i8,
    /// The piece is settled and should be stamped into the playfield.
    pub locked: bool,
}

impl Response {
    /// True if the piece moved or dropped, ie. it needs to be drawn again.
    pub fn any(&self) -> bool {
        self.moved || self.dropped != 0
    }
}

impl Piece {
    /// Applies one player action.
    ///
    /// A hard drop always locks the piece, and so does a soft drop that cannot descend.
    /// A successful shift or rotation re-arms the move delay, and if the piece has been
    /// kicked above the row gravity last left it on, it is immediately pulled down a row
    /// again so repeated rotations cannot keep it floating.
    pub fn control(&mut self, mat: &Mat, action: Action, delay: &LockDelay) -> Response {
        let mut res = Response::default();

        match action {
            Action::Rotate(turn) => res.moved = self.try_rotate(mat, turn),
            Action::Shift(dx) => res.moved = self.try_shift(mat, dx),
            Action::HardDrop => {
                res.dropped = self.drop(mat, self.row);
                res.locked = true;
            }
            Action::SoftDrop => {
                res.dropped = self.drop(mat, 1);
                res.locked = res.dropped == 0;
            }
        }

        if res.locked {
            self.fall = Fall::LOCKED;
        }

        if res.moved {
            if let Fall::Grounded { move_delay, .. } = &mut self.fall {
                *move_delay = u16::from(delay.moves) + 1;
            }
            if self.floor_reached < self.row {
                self.drop(mat, 1);
            }
        }

        res
    }
}
