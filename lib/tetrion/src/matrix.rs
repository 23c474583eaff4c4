//! Playfield data structure and the box-window operations used for collision tests.

use alloc::vec::Vec;
use core::fmt;
use core::ops::{Deref, DerefMut};

use crate::shape::{Shape, BOX_HEIGHT, BOX_WIDTH, ROW_MASK};

/// Playfield representation. Represented as slice of `u16` per row, with individual bits
/// containing column data. Row 0 is the bottom of the playfield.
#[repr(transparent)]
pub struct Mat([u16]);

/// Number of playable columns.
pub const COLS: i8 = 10;
/// Number of wall bits on each side of the playable columns.
pub const WALL: i8 = 3;
/// Number of empty rows kept above the visible area, so a piece box near the top can
/// always be read.
pub const GUARD_ROWS: i8 = BOX_HEIGHT as i8;
pub const FULL: u16 = !0;
/// A row containing nothing but the side walls.
pub const EMPTY: u16 = !(((1 << COLS) - 1) << WALL);

/// Highest column offset at which a full box window still fits in a row.
const MAX_COL: i8 = (u16::BITS - BOX_WIDTH) as i8;

impl Mat {
    pub const fn new(slice: &[u16]) -> &Mat {
        debug_assert!(slice.len() < i8::MAX as usize);
        // SAFETY: `Mat` is a transparent wrapper around `[u16]`.
        unsafe { &*(slice as *const [u16] as *const Mat) }
    }

    pub fn new_mut(slice: &mut [u16]) -> &mut Mat {
        debug_assert!(slice.len() < i8::MAX as usize);
        // SAFETY: `Mat` is a transparent wrapper around `[u16]`.
        unsafe { &mut *(slice as *mut [u16] as *mut Mat) }
    }

    pub const fn rows(&self) -> &[u16] {
        &self.0
    }

    pub const fn len(&self) -> i8 {
        self.rows().len() as i8
    }

    pub const fn is_empty(&self) -> bool {
        self.rows().is_empty()
    }

    /// Bits of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y` is outside the playfield.
    pub fn get(&self, y: i8) -> u16 {
        self.window_rows(y, 1)[0]
    }

    /// The `BOX_WIDTH` bits of row `y` starting at column `col`, in the low bits.
    pub fn slice(&self, y: i8, col: i8) -> u16 {
        (self.get(y) >> column_shift(col)) & ROW_MASK
    }

    /// Reads the box window with its bottom-left corner at (`row`, `col`). The result
    /// uses the same layout as [`Shape`], so a shape collides at this position iff
    /// `shape.collides(window)`.
    ///
    /// # Panics
    ///
    /// Panics if the box extends past the allocated rows. In debug builds, also panics
    /// if `col` does not leave room for a full box inside the row bits.
    pub fn window(&self, row: i8, col: i8) -> u16 {
        let shift = column_shift(col);
        self.window_rows(row, BOX_HEIGHT as usize)
            .iter()
            .fold(0, |window, &bits| {
                (window << BOX_WIDTH) | ((bits >> shift) & ROW_MASK)
            })
    }

    pub fn collides(&self, shape: Shape, row: i8, col: i8) -> bool {
        shape.collides(self.window(row, col))
    }

    /// XORs `shape` into the rows at (`row`, `col`). Applying the same toggle twice
    /// restores the playfield, so this both stamps and erases a piece.
    ///
    /// # Panics
    ///
    /// Same conditions as [`Mat::window`].
    pub fn toggle(&mut self, row: i8, col: i8, shape: Shape) {
        let shift = column_shift(col);
        let rows = self.window_rows_mut(row, BOX_HEIGHT as usize);
        for (dst, bits) in rows.iter_mut().zip(shape.rows()) {
            *dst ^= bits << shift;
        }
    }

    fn window_rows(&self, row: i8, n: usize) -> &[u16] {
        let len = self.len();
        usize::try_from(row)
            .ok()
            .and_then(|y| self.0.get(y..y + n))
            .unwrap_or_else(|| out_of_bounds(row, len))
    }

    fn window_rows_mut(&mut self, row: i8, n: usize) -> &mut [u16] {
        let len = self.len();
        usize::try_from(row)
            .ok()
            .and_then(|y| self.0.get_mut(y..y + n))
            .unwrap_or_else(|| out_of_bounds(row, len))
    }
}

fn column_shift(col: i8) -> u32 {
    debug_assert!(
        (0..=MAX_COL).contains(&col),
        "column {col} outside the row bits"
    );
    col as u32
}

#[cold]
#[track_caller]
fn out_of_bounds(row: i8, len: i8) -> ! {
    panic!("row {row} is outside the playfield ({len} rows)")
}

impl fmt::Debug for Mat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        struct DebugRow(u16);
        impl fmt::Debug for DebugRow {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let mut bs = [b'.'; u16::BITS as usize];
                for (x, b) in bs.iter_mut().enumerate() {
                    if self.0 & (1 << x) != 0 {
                        *b = b'x';
                    }
                }
                let s = core::str::from_utf8(&bs).map_err(|_| fmt::Error)?;
                f.write_str(s)
            }
        }

        f.debug_list()
            .entries(self.rows().iter().rev().map(|&bits| DebugRow(bits)))
            .finish()
    }
}

/// Owned playfield.
#[derive(Clone, Default)]
pub struct MatBuf(Vec<u16>);

impl MatBuf {
    pub fn new() -> Self {
        Self(Vec::with_capacity(20))
    }

    /// Playfield with a solid floor in row 0, `visible` empty rows between the walls
    /// above it, and guard rows above those.
    pub fn walled(visible: i8) -> Self {
        let height = 1 + visible.max(0) as usize + GUARD_ROWS as usize;
        let mut rows = Vec::with_capacity(height);
        rows.push(FULL);
        rows.resize(height, EMPTY);
        Self(rows)
    }

    fn rows_mut(&mut self) -> &mut Vec<u16> {
        &mut self.0
    }

    /// Sets `bits` in row `y`, growing the playfield with `EMPTY` rows if needed.
    pub fn set(&mut self, y: i8, bits: u16) {
        if let Ok(y) = usize::try_from(y) {
            if self.rows().len() <= y {
                self.rows_mut().resize(y + 1, EMPTY);
            }
            self.rows_mut()[y] |= bits;
        }
    }
}

impl Deref for MatBuf {
    type Target = Mat;
    fn deref(&self) -> &Mat {
        Mat::new(&self.0)
    }
}

impl DerefMut for MatBuf {
    fn deref_mut(&mut self) -> &mut Mat {
        Mat::new_mut(&mut self.0)
    }
}

impl fmt::Debug for MatBuf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        <Mat as fmt::Debug>::fmt(self, f)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shape::PieceType;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    fn random_field(rng: &mut SmallRng) -> MatBuf {
        let mut mat = MatBuf::walled(20);
        for y in 1..mat.len() {
            mat.set(y, rng.gen::<u16>() & !EMPTY);
        }
        mat
    }

    #[test]
    fn test_empty_bits() {
        for x in 0..16 {
            let occ = (EMPTY & (1 << x)) != 0;
            assert_eq!((x, occ), (x, x < WALL || x >= WALL + COLS));
        }
    }

    #[test]
    fn test_walled() {
        let mat = MatBuf::walled(20);
        assert_eq!(mat.len(), 25);
        assert_eq!(mat.get(0), FULL);
        for y in 1..25 {
            assert_eq!(mat.get(y), EMPTY, "row {y}");
        }
    }

    #[test]
    fn test_mat_set() {
        let mut mat = MatBuf::new();
        mat.set(0, 0b1000);
        assert_eq!(mat.get(0), EMPTY | 0b1000);
        mat.set(2, 0b10000);
        assert_eq!(mat.len(), 3);
        assert_eq!(mat.get(1), EMPTY);
        assert_eq!(mat.get(2), EMPTY | 0b10000);
        mat.set(-1, 0b1000);
        assert_eq!(mat.len(), 3);
    }

    #[test]
    fn test_window_layout() {
        let mut mat = MatBuf::walled(20);
        // bottom row of the window lands in the high nibble
        mat.set(5, 0b0001 << 6);
        mat.set(8, 0b1000 << 6);
        assert_eq!(mat.window(5, 6), 0x1008);
        assert_eq!(mat.slice(5, 6), 0b0001);
        // the floor and left wall seen from the corner
        assert_eq!(mat.window(0, 0), 0xf777);
    }

    #[test]
    #[should_panic]
    fn test_window_past_top() {
        let mat = MatBuf::walled(20);
        mat.window(22, 3);
    }

    #[test]
    #[should_panic]
    fn test_window_below_floor() {
        let mat = MatBuf::walled(20);
        mat.window(-1, 3);
    }

    #[test]
    fn test_toggle_self_inverse() {
        let mut rng = SmallRng::seed_from_u64(0x5eed);
        let mut mat = random_field(&mut rng);
        let before = mat.rows().to_vec();
        for &pc in PieceType::ALL.iter() {
            for &shape in pc.shapes() {
                for row in 0..=mat.len() - 4 {
                    for col in 0..=12 {
                        mat.toggle(row, col, shape);
                        mat.toggle(row, col, shape);
                        assert_eq!(mat.rows(), &before[..], "{pc} {shape:?} {row} {col}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_toggle_stamps_shape() {
        let mut mat = MatBuf::walled(20);
        let shape = PieceType::T.shapes()[0];
        assert!(!mat.collides(shape, 1, 6));
        mat.toggle(1, 6, shape);
        assert!(mat.collides(shape, 1, 6));
        assert_eq!(mat.window(1, 6), shape.bits());
        assert_eq!(mat.get(1), EMPTY | (0b0111 << 6));
        assert_eq!(mat.get(2), EMPTY | (0b0010 << 6));
    }
}
