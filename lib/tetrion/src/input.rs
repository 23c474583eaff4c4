use core::fmt;
use core::mem::transmute;
use core::ops;

/// One player action, applied with [`Piece::control`](crate::Piece::control).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Action {
    Shift(Dir),
    Rotate(Turn),
    HardDrop,
    SoftDrop,
}

impl Action {
    pub const LEFT: Action = Action::Shift(Dir::Left);
    pub const RIGHT: Action = Action::Shift(Dir::Right);
    pub const CW: Action = Action::Rotate(Turn::Cw);
    pub const CCW: Action = Action::Rotate(Turn::Ccw);
}

impl From<Dir> for Action {
    fn from(dx: Dir) -> Self {
        Action::Shift(dx)
    }
}

impl From<Turn> for Action {
    fn from(dr: Turn) -> Self {
        Action::Rotate(dr)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Action::Shift(Dir::Left) => "shift_left",
            Action::Shift(Dir::Right) => "shift_right",
            Action::Rotate(Turn::Cw) => "rotate_cw",
            Action::Rotate(Turn::Ccw) => "rotate_ccw",
            Action::HardDrop => "hard_drop",
            Action::SoftDrop => "soft_drop",
        })
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[repr(i8)]
pub enum Dir {
    Left = -1,
    Right = 1,
}

impl ops::Add<Dir> for i8 {
    type Output = i8;
    fn add(self, rhs: Dir) -> i8 {
        self + rhs as i8
    }
}

/// Index into a piece's rotation states.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
#[repr(u8)]
pub enum Rot {
    /// Initial orientation.
    #[default]
    N = 0,
    /// One CW rotation.
    E = 1,
    /// Two rotations in either direction. For J, L and T this is the orientation pointing
    /// down.
    S = 2,
    /// One CCW rotation, or three CW rotations.
    W = 3,
}

impl From<u8> for Rot {
    fn from(v: u8) -> Self {
        // SAFETY: `Rot` is `repr(u8)` with every value in 0..4 assigned.
        unsafe { transmute(v & 3) }
    }
}

impl From<Rot> for u8 {
    fn from(r: Rot) -> Self {
        r as u8
    }
}

/// Rotation request, as a number of clockwise quarter turns.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum Turn {
    Cw = 1,
    Ccw = 3,
}

impl ops::Add<Turn> for Rot {
    type Output = Rot;
    fn add(self, t: Turn) -> Self::Output {
        (self as u8 + t as u8).into()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_rot_arithmetic() {
        assert_eq!(Rot::N + Turn::Cw, Rot::E);
        assert_eq!(Rot::N + Turn::Ccw, Rot::W);
        assert_eq!(Rot::W + Turn::Cw, Rot::N);
        assert_eq!(Rot::S + Turn::Ccw, Rot::E);
        assert_eq!(Rot::from(5), Rot::E);
    }

    #[test]
    fn test_dir_offset() {
        assert_eq!(4i8 + Dir::Left, 3);
        assert_eq!(4i8 + Dir::Right, 5);
        assert_eq!(Action::from(Dir::Left), Action::LEFT);
        assert_eq!(Action::from(Turn::Ccw), Action::CCW);
    }
}
