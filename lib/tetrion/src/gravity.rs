//! Gravity and lock delay.

use crate::matrix::Mat;
use crate::piece::{Fall, Piece};

/// Lock delay thresholds, in frames.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct LockDelay {
    /// Frames a grounded piece may sit still before it locks. Re-armed by every
    /// successful shift or rotation.
    pub moves: u8,
    /// Frames a piece may stay grounded in total before it locks, however much it is
    /// moved. Re-armed only when gravity lands it again.
    pub steps: u8,
}

impl Default for LockDelay {
    fn default() -> Self {
        Self {
            moves: 30,
            steps: 90,
        }
    }
}

impl Piece {
    /// Advances the piece by one frame of gravity, where `gravity` is the number of frames
    /// per row. Returns the number of rows descended.
    ///
    /// A grounded piece is probed for support every frame; it starts falling as soon as
    /// the space below is clear, and otherwise its lock delays count down. An airborne
    /// piece counts down to its next step. A step that cannot complete lands the piece
    /// and arms both lock delays.
    pub fn update(&mut self, mat: &Mat, gravity: u16, delay: &LockDelay) -> i8 {
        let gravity = i32::from(gravity);

        let mut countdown = match self.fall {
            Fall::Airborne { countdown } => countdown,
            Fall::Grounded {
                move_delay,
                step_delay,
            } => {
                // prevent floating pieces
                let h = self.drop_height(mat, 1);
                if h == 0 {
                    self.fall = Fall::Grounded {
                        move_delay: move_delay.saturating_sub(1),
                        step_delay: step_delay.saturating_sub(1),
                    };
                    return 0;
                }
                i32::from(h)
            }
        };

        countdown = countdown.min(gravity);
        if countdown > 0 {
            countdown -= 1;
            if countdown > 0 {
                self.fall = Fall::Airborne { countdown };
                return 0;
            }
        }

        // zero drops one row, negative drops several
        let want = i8::try_from(1 - countdown).unwrap_or(i8::MAX);
        let dropped = self.drop(mat, want);

        self.fall = if dropped < want {
            Fall::Grounded {
                move_delay: delay.moves.into(),
                step_delay: delay.steps.into(),
            }
        } else {
            Fall::Airborne { countdown: gravity }
        };

        if dropped != 0 {
            self.floor_reached = self.row;
        }

        dropped
    }

    /// True once the piece is grounded and either lock delay has run out. The caller is
    /// expected to stamp it into the playfield and replace it.
    pub fn lock_due(&self) -> bool {
        match self.fall {
            Fall::Grounded {
                move_delay,
                step_delay,
            } => move_delay == 0 || step_delay == 0,
            Fall::Airborne { .. } => false,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::input::Action;
    use crate::shape::PieceType;
    use crate::test::field;
    use std::vec::Vec;

    const DELAY: LockDelay = LockDelay { moves: 4, steps: 6 };

    #[test]
    fn test_spawn_waits_one_period() {
        let mat = field(&[]);
        let mut pc = Piece::new(PieceType::T, 10, 6);
        let drops = (0..9).map(|_| pc.update(&mat, 3, &DELAY)).collect::<Vec<_>>();
        assert_eq!(drops, [0, 0, 1, 0, 0, 1, 0, 0, 1]);
        assert_eq!(pc.row, 7);
        assert_eq!(pc.floor_reached, 7);
        assert_eq!(pc.fall, Fall::Airborne { countdown: 3 });
    }

    #[test]
    fn test_one_frame_per_row() {
        let mat = field(&[]);
        let mut pc = Piece::new(PieceType::T, 10, 6);
        for row in (1..10).rev() {
            assert_eq!(pc.update(&mat, 1, &DELAY), 1);
            assert_eq!(pc.row, row);
        }
        assert_eq!(pc.fall, Fall::Airborne { countdown: 1 });
        // the step onto the floor falls short and lands the piece
        assert_eq!(pc.update(&mat, 1, &DELAY), 0);
        assert_eq!(
            pc.fall,
            Fall::Grounded {
                move_delay: 4,
                step_delay: 6,
            }
        );
    }

    #[test]
    fn test_lands_exactly_on_short_step() {
        let mat = field(&[]);
        let mut pc = Piece::new(PieceType::O, 2, 6);
        assert_eq!(pc.update(&mat, 2, &DELAY), 0);
        assert_eq!(pc.fall, Fall::Airborne { countdown: 1 });
        assert_eq!(pc.update(&mat, 2, &DELAY), 1);
        assert_eq!(pc.row, 1);
        assert_eq!(pc.fall, Fall::Airborne { countdown: 2 });
        assert_eq!(pc.update(&mat, 2, &DELAY), 0);
        assert!(!pc.lock_due());
        assert_eq!(pc.fall, Fall::Airborne { countdown: 1 });
        // this step is the one that cannot complete
        assert_eq!(pc.update(&mat, 2, &DELAY), 0);
        assert_eq!(
            pc.fall,
            Fall::Grounded {
                move_delay: 4,
                step_delay: 6,
            }
        );
        assert_eq!(pc.floor_reached, 1);
    }

    #[test]
    fn test_lock_delay_counts_down() {
        let mat = field(&[]);
        let mut pc = Piece::new(PieceType::O, 1, 6);
        pc.fall = Fall::Grounded {
            move_delay: 4,
            step_delay: 6,
        };
        for n in (0..4).rev() {
            assert!(!pc.lock_due());
            assert_eq!(pc.update(&mat, 2, &DELAY), 0);
            assert_eq!(
                pc.fall,
                Fall::Grounded {
                    move_delay: n,
                    step_delay: n + 2,
                }
            );
        }
        assert!(pc.lock_due());
        // counters stop at zero
        pc.update(&mat, 2, &DELAY);
        assert_eq!(
            pc.fall,
            Fall::Grounded {
                move_delay: 0,
                step_delay: 1,
            }
        );
    }

    #[test]
    fn test_step_delay_caps_moves() {
        let mat = field(&[]);
        let mut pc = Piece::new(PieceType::O, 1, 6);
        pc.fall = Fall::Grounded {
            move_delay: 4,
            step_delay: 6,
        };
        let mut frames = 0;
        while !pc.lock_due() {
            let dx = if frames % 2 == 0 { Action::LEFT } else { Action::RIGHT };
            assert!(pc.control(&mat, dx, &DELAY).moved);
            pc.update(&mat, 2, &DELAY);
            frames += 1;
        }
        assert_eq!(frames, 6);
    }

    #[test]
    fn test_walk_off_ledge() {
        // O resting on a one-block ledge at columns 4 and 5
        let mat = field(&[(4, 5), (5, 5)]);
        let mut pc = Piece::new(PieceType::O, 6, 6);
        pc.fall = Fall::Grounded {
            move_delay: 4,
            step_delay: 6,
        };
        assert_eq!(pc.update(&mat, 5, &DELAY), 0);
        assert!(matches!(pc.fall, Fall::Grounded { .. }));
        assert!(pc.control(&mat, Action::RIGHT, &DELAY).moved);
        assert!(pc.control(&mat, Action::RIGHT, &DELAY).moved);
        // unsupported: falls on the very next update
        assert_eq!(pc.update(&mat, 5, &DELAY), 1);
        assert_eq!(pc.row, 5);
        assert_eq!(pc.fall, Fall::Airborne { countdown: 5 });
    }

    #[test]
    fn test_negative_countdown_drops_many() {
        let mat = field(&[]);
        let mut pc = Piece::new(PieceType::T, 10, 6);
        pc.fall = Fall::Airborne { countdown: -3 };
        assert_eq!(pc.update(&mat, 20, &DELAY), 4);
        assert_eq!(pc.row, 6);
        assert_eq!(pc.floor_reached, 6);
        assert_eq!(pc.fall, Fall::Airborne { countdown: 20 });

        // more than the space left: lands
        pc.fall = Fall::Airborne { countdown: -20 };
        assert_eq!(pc.update(&mat, 20, &DELAY), 5);
        assert_eq!(pc.row, 1);
        assert_eq!(
            pc.fall,
            Fall::Grounded {
                move_delay: 4,
                step_delay: 6,
            }
        );
    }

    #[test]
    fn test_countdown_clamped_to_gravity() {
        let mat = field(&[]);
        let mut pc = Piece::new(PieceType::T, 10, 6);
        pc.fall = Fall::Airborne { countdown: 50 };
        assert_eq!(pc.update(&mat, 2, &DELAY), 0);
        assert_eq!(pc.fall, Fall::Airborne { countdown: 1 });
        assert_eq!(pc.update(&mat, 2, &DELAY), 1);
    }

    #[test]
    fn test_locked_piece_stays_locked() {
        let mat = field(&[]);
        let mut pc = Piece::new(PieceType::O, 1, 6);
        pc.fall = Fall::LOCKED;
        assert!(pc.lock_due());
        assert_eq!(pc.update(&mat, 2, &DELAY), 0);
        assert_eq!(pc.fall, Fall::LOCKED);
    }
}
