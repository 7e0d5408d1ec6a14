//! Mini-game rules. Every call is pure: the client sends the state it holds
//! and gets the next state back.

pub mod stack;
pub mod tictactoe;
pub mod trivia;
pub mod typing;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("unknown typing prompt {0}")]
    UnknownPrompt(usize),
    #[error("unknown trivia question {0}")]
    UnknownQuestion(usize),
    #[error("question {question} has no choice {choice}")]
    UnknownChoice { question: usize, choice: usize },
    #[error("board must have 9 cells, got {0}")]
    BoardSize(usize),
    #[error("board has an impossible mark count")]
    InvalidBoard,
    #[error("cell {0} is off the board")]
    CellOutOfRange(usize),
    #[error("cell {0} is already taken")]
    CellOccupied(usize),
    #[error("game is already over")]
    GameOver,
}
