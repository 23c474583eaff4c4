//! One game: a walled playfield, the active piece and the pieces still to come.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::collections::VecDeque;
use tetrion::matrix::{COLS, WALL};
use tetrion::{Action, LockDelay, MatBuf, Piece, PieceType, Response};

use crate::config::{Config, ConfigError};

/// Column of the box of a newly spawned piece, centring the three-wide pieces.
pub const SPAWN_COL: i8 = WALL + COLS / 2 - 2;

/// Source of new pieces. Queued pieces come first, then uniform random draws.
#[derive(Debug, Clone)]
pub struct Supply {
    queue: VecDeque<PieceType>,
    rng: SmallRng,
}

impl Supply {
    pub fn new(seed: u64) -> Self {
        Self {
            queue: VecDeque::new(),
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn with_queue(seed: u64, queue: impl IntoIterator<Item = PieceType>) -> Self {
        Self {
            queue: queue.into_iter().collect(),
            ..Self::new(seed)
        }
    }

    pub fn next_piece(&mut self) -> PieceType {
        match self.queue.pop_front() {
            Some(pc) => pc,
            None => PieceType::ALL[self.rng.gen_range(0..PieceType::ALL.len())],
        }
    }
}

/// What happened during one frame.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    pub response: Response,
    /// Rows descended by gravity.
    pub fell: i8,
    /// The piece was stamped into the playfield and the next one spawned.
    pub settled: bool,
    pub over: bool,
}

#[derive(Debug, Clone)]
pub struct Session {
    config: Config,
    delay: LockDelay,
    field: MatBuf,
    /// `None` once the game is over.
    piece: Option<Piece>,
    supply: Supply,
    frames: u64,
    pieces: u32,
}

impl Session {
    /// Starts a game with the first piece already spawned.
    pub fn new(config: Config, supply: Supply) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut session = Self {
            delay: config.lock_delay(),
            field: MatBuf::walled(config.rows),
            piece: None,
            supply,
            frames: 0,
            pieces: 0,
            config,
        };
        session.spawn();
        Ok(session)
    }

    pub fn field(&self) -> &MatBuf {
        &self.field
    }

    pub fn piece(&self) -> Option<&Piece> {
        self.piece.as_ref()
    }

    pub fn is_over(&self) -> bool {
        self.piece.is_none()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn pieces(&self) -> u32 {
        self.pieces
    }

    /// Runs one frame: the player's action if any, then gravity unless the action locked
    /// the piece. A locked piece is stamped and replaced.
    pub fn frame(&mut self, action: Option<Action>) -> Frame {
        let Some(mut piece) = self.piece else {
            return Frame {
                over: true,
                ..Frame::default()
            };
        };
        self.frames += 1;

        let mut frame = Frame::default();
        if let Some(action) = action {
            frame.response = piece.control(&self.field, action, &self.delay);
        }
        if !frame.response.locked {
            frame.fell = piece.update(&self.field, self.config.gravity, &self.delay);
        }

        trace!(
            "frame {}: {} {:?} fell {}",
            self.frames,
            action.map_or("-".into(), |a| a.to_string()),
            frame.response,
            frame.fell
        );

        if frame.response.locked || piece.lock_due() {
            self.settle(piece);
            frame.settled = true;
        } else {
            self.piece = Some(piece);
        }

        frame.over = self.is_over();
        frame
    }

    /// Runs `frames` frames taking actions from `actions` while it lasts, or fewer if the
    /// game ends first.
    pub fn play<I>(&mut self, actions: I, frames: u64)
    where
        I: IntoIterator<Item = Option<Action>>,
    {
        let mut actions = actions.into_iter();
        for _ in 0..frames {
            if self.frame(actions.next().flatten()).over {
                break;
            }
        }
    }

    fn settle(&mut self, piece: Piece) {
        piece.toggle(&mut self.field);
        self.pieces += 1;
        debug!(
            "settled {} at ({}, {}), {} pieces",
            piece.kind,
            piece.row,
            piece.col - WALL,
            self.pieces
        );
        self.spawn();
    }

    fn spawn(&mut self) {
        let kind = self.supply.next_piece();
        let piece = Piece::new(kind, self.config.rows - 1, SPAWN_COL);
        if piece.collides(&self.field) {
            info!(
                "game over: {kind} blocked at spawn after {} pieces",
                self.pieces
            );
            self.piece = None;
        } else {
            debug!("spawned {kind}");
            self.piece = Some(piece);
        }
    }

    /// Visible rows, top row first. Settled cells are `#`, the active piece `@`.
    pub fn board(&self) -> Vec<String> {
        let cells = self
            .piece
            .iter()
            .flat_map(|pc| {
                pc.shape
                    .cells()
                    .map(move |(x, y)| (pc.col + x - WALL, pc.row + y))
            })
            .collect::<Vec<_>>();

        (1..=self.config.rows)
            .rev()
            .map(|y| {
                let bits = self.field.get(y);
                (0..COLS)
                    .map(|x| {
                        if bits & (1 << (x + WALL)) != 0 {
                            '#'
                        } else if cells.contains(&(x, y)) {
                            '@'
                        } else {
                            '.'
                        }
                    })
                    .collect::<String>()
            })
            .collect()
    }

    pub fn summary(&self) -> Summary {
        Summary {
            frames: self.frames,
            pieces: self.pieces,
            over: self.is_over(),
            board: self.board(),
        }
    }
}

/// End-of-run report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub frames: u64,
    pub pieces: u32,
    pub over: bool,
    pub board: Vec<String>,
}
