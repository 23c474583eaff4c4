//! Rotation states of the seven pieces.

use core::fmt;

/// Width of the box every rotation state is drawn in.
pub const BOX_WIDTH: u32 = 4;
/// Height of the box every rotation state is drawn in.
pub const BOX_HEIGHT: u32 = 4;
pub const ROW_MASK: u16 = (1 << BOX_WIDTH) - 1;
/// Bits of the bottom row of a box.
pub const BOTTOM_ROW: u16 = ROW_MASK << ((BOX_HEIGHT - 1) * BOX_WIDTH);
/// Bits of the leftmost column of a box.
pub const LEFT_COLUMN: u16 = 0x1111;
/// Bits of the rightmost column of three-wide pieces.
pub const RIGHT_COLUMN: u16 = 0x4444;

/// Cells of one rotation state, packed into a 4x4 box. The bottom row of the box is the
/// most significant nibble and bit `x` of a nibble is box column `x`, which matches the
/// order [`Mat::window`](crate::Mat::window) reads rows in.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct Shape(u16);

impl Shape {
    /// Draws a shape from four rows, top row first, `#` marking a cell.
    pub const fn from_rows(rows: [&str; BOX_HEIGHT as usize]) -> Self {
        let mut bits = 0;
        let mut y = 0;
        while y < rows.len() {
            let row = rows[y].as_bytes();
            assert!(row.len() == BOX_WIDTH as usize);
            let mut x = 0;
            while x < row.len() {
                if row[x] == b'#' {
                    bits |= 1 << (y * BOX_WIDTH as usize + x);
                }
                x += 1;
            }
            y += 1;
        }
        Self(bits)
    }

    pub const fn bits(self) -> u16 {
        self.0
    }

    /// The same shape one column to the right. Only valid for shapes with an empty
    /// rightmost column.
    pub const fn shifted_right(self) -> Self {
        Self(self.0 << 1)
    }

    /// True if any cell overlaps a set bit of `window`.
    #[inline]
    pub const fn collides(self, window: u16) -> bool {
        self.0 & window != 0
    }

    /// Row bits, bottom row first.
    pub fn rows(self) -> impl Iterator<Item = u16> {
        (0..BOX_HEIGHT)
            .rev()
            .map(move |k| (self.0 >> (k * BOX_WIDTH)) & ROW_MASK)
    }

    /// Occupied cells as `(x, y)` offsets from the bottom-left corner of the box.
    pub fn cells(self) -> impl Iterator<Item = (i8, i8)> {
        self.rows().enumerate().flat_map(|(y, bits)| {
            (0..BOX_WIDTH as i8)
                .filter(move |x| bits & (1 << x) != 0)
                .map(move |x| (x, y as i8))
        })
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        struct DebugRow(u16);
        impl fmt::Debug for DebugRow {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let mut bs = [b'.'; BOX_WIDTH as usize];
                for (x, b) in bs.iter_mut().enumerate() {
                    if self.0 & (1 << x) != 0 {
                        *b = b'x';
                    }
                }
                let s = core::str::from_utf8(&bs).map_err(|_| fmt::Error)?;
                f.write_str(s)
            }
        }

        let rows = (0..BOX_HEIGHT).map(|k| DebugRow((self.0 >> (k * BOX_WIDTH)) & ROW_MASK));
        f.debug_tuple("Shape")
            .field(&format_args!("{:#06x}", self.0))
            .field(&DebugList(rows))
            .finish()
    }
}

struct DebugList<I>(I);

impl<I: Iterator<Item = T> + Clone, T: fmt::Debug> fmt::Debug for DebugList<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.clone()).finish()
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(u8)]
pub enum PieceType {
    I = 0,
    J = 1,
    L = 2,
    O = 3,
    S = 4,
    T = 5,
    Z = 6,
}

impl PieceType {
    pub const ALL: [PieceType; 7] = {
        use PieceType::*;
        [I, J, L, O, S, T, Z]
    };

    /// The four rotation states, indexed by [`Rot`](crate::Rot). Consecutive entries are
    /// a clockwise turn apart.
    pub fn shapes(self) -> &'static [Shape; 4] {
        &SHAPES[self as usize]
    }

    pub fn name(self) -> &'static str {
        NAMES[self as usize]
    }

    pub fn from_letter(c: char) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|pc| pc.name().starts_with(c.to_ascii_uppercase()))
    }
}

impl fmt::Display for PieceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

static NAMES: [&str; 7] = ["I", "J", "L", "O", "S", "T", "Z"];

// Three-wide pieces turn about box cell (1, 1). State 0 lies flat on the bottom row and
// state 2 lies flat on row 2, so turning out of state 2 reaches one row lower than the
// piece occupied before.
//
// I, S and Z only have two looks. States 0 and 2 are equal, and state 3 is state 1 one
// column to the right so both upright columns are reachable.

const I_FLAT: Shape = Shape::from_rows(["....", "....", "....", "####"]);
const I_UPRIGHT: Shape = Shape::from_rows([".#..", ".#..", ".#..", ".#.."]);
const S_FLAT: Shape = Shape::from_rows(["....", "....", ".##.", "##.."]);
const S_UPRIGHT: Shape = Shape::from_rows(["....", "#...", "##..", ".#.."]);
const Z_FLAT: Shape = Shape::from_rows(["....", "....", "##..", ".##."]);
const Z_UPRIGHT: Shape = Shape::from_rows(["....", ".#..", "##..", "#..."]);
const O_SQUARE: Shape = Shape::from_rows(["....", "....", ".##.", ".##."]);

static SHAPES: [[Shape; 4]; 7] = [
    // I
    [
        I_FLAT,
        I_UPRIGHT,
        I_FLAT,
        I_UPRIGHT.shifted_right(),
    ],
    // J
    [
        Shape::from_rows(["....", "....", "#...", "###."]),
        Shape::from_rows(["....", "##..", "#...", "#..."]),
        Shape::from_rows(["....", "###.", "..#.", "...."]),
        Shape::from_rows(["....", "..#.", "..#.", ".##."]),
    ],
    // L
    [
        Shape::from_rows(["....", "....", "..#.", "###."]),
        Shape::from_rows(["....", "#...", "#...", "##.."]),
        Shape::from_rows(["....", "###.", "#...", "...."]),
        Shape::from_rows(["....", ".##.", "..#.", "..#."]),
    ],
    // O
    [O_SQUARE, O_SQUARE, O_SQUARE, O_SQUARE],
    // S
    [
        S_FLAT,
        S_UPRIGHT,
        S_FLAT,
        S_UPRIGHT.shifted_right(),
    ],
    // T
    [
        Shape::from_rows(["....", "....", ".#..", "###."]),
        Shape::from_rows(["....", "#...", "##..", "#..."]),
        Shape::from_rows(["....", "###.", ".#..", "...."]),
        Shape::from_rows(["....", "..#.", ".##.", "..#."]),
    ],
    // Z
    [
        Z_FLAT,
        Z_UPRIGHT,
        Z_FLAT,
        Z_UPRIGHT.shifted_right(),
    ],
];
