//! Scripted input.
//!
//! A script is plain text with one character per frame:
//!
//! | char | action       |
//! |------|--------------|
//! | `.`  | none         |
//! | `<`  | shift left   |
//! | `>`  | shift right  |
//! | `x`  | rotate cw    |
//! | `z`  | rotate ccw   |
//! | `v`  | soft drop    |
//! | `#`  | hard drop    |
//!
//! Whitespace is ignored and `;` starts a comment running to the end of the line. A line
//! starting with `pieces:` lists the pieces to spawn, by letter, before the supply falls
//! back to random draws.

use std::str::FromStr;
use tetrion::{Action, PieceType};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Script {
    pub pieces: Vec<PieceType>,
    /// One entry per frame.
    pub actions: Vec<Option<Action>>,
}

impl Script {
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ScriptError {
    #[error("line {line}: unknown action {found:?}")]
    Action { line: usize, found: char },
    #[error("line {line}: unknown piece {found:?}")]
    Piece { line: usize, found: char },
}

impl FromStr for Script {
    type Err = ScriptError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut script = Script::new();

        for (i, line) in s.lines().enumerate() {
            let line_no = i + 1;
            let line = line.split(';').next().unwrap_or("").trim();

            if let Some(letters) = line.strip_prefix("pieces:") {
                for c in letters.chars().filter(|c| !c.is_whitespace()) {
                    let pc = PieceType::from_letter(c).ok_or(ScriptError::Piece {
                        line: line_no,
                        found: c,
                    })?;
                    script.pieces.push(pc);
                }
                continue;
            }

            for c in line.chars().filter(|c| !c.is_whitespace()) {
                let action = match c {
                    '.' => None,
                    '<' => Some(Action::LEFT),
                    '>' => Some(Action::RIGHT),
                    'x' => Some(Action::CW),
                    'z' => Some(Action::CCW),
                    'v' => Some(Action::SoftDrop),
                    '#' => Some(Action::HardDrop),
                    _ => {
                        return Err(ScriptError::Action {
                            line: line_no,
                            found: c,
                        })
                    }
                };
                script.actions.push(action);
            }
        }

        Ok(script)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse() {
        let script = "
            pieces: T O i
            ; drop the T on the left
            <<< x #
            ..v   ; wait, then soft drop
        "
        .parse::<Script>()
        .unwrap();
        assert_eq!(script.pieces, [PieceType::T, PieceType::O, PieceType::I]);
        assert_eq!(
            script.actions,
            [
                Some(Action::LEFT),
                Some(Action::LEFT),
                Some(Action::LEFT),
                Some(Action::CW),
                Some(Action::HardDrop),
                None,
                None,
                Some(Action::SoftDrop),
            ]
        );
    }

    #[test]
    fn test_empty() {
        assert_eq!("".parse::<Script>(), Ok(Script::new()));
        assert_eq!("; nothing\n\n".parse::<Script>(), Ok(Script::new()));
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            "..\n.q.".parse::<Script>(),
            Err(ScriptError::Action {
                line: 2,
                found: 'q'
            })
        );
        assert_eq!(
            "pieces: TX".parse::<Script>(),
            Err(ScriptError::Piece {
                line: 1,
                found: 'X'
            })
        );
        let err = "?".parse::<Script>().unwrap_err();
        assert_eq!(err.to_string(), "line 1: unknown action '?'");
    }
}
