use folio_schema::{Mark, MoveResponse};

use super::GameError;

pub const CELLS: usize = 9;

pub const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

pub fn winner(cells: &[Option<Mark>]) -> Option<Mark> {
    LINES.iter().find_map(|&[a, b, c]| {
        let mark = (*cells.get(a)?)?;
        (cells.get(b) == Some(&Some(mark)) && cells.get(c) == Some(&Some(mark))).then_some(mark)
    })
}

pub fn is_full(cells: &[Option<Mark>]) -> bool {
    cells.iter().all(Option::is_some)
}

/// X always opens, so the side to move follows from the mark counts.
pub fn to_move(cells: &[Option<Mark>]) -> Result<Mark, GameError> {
    let xs = cells.iter().filter(|c| **c == Some(Mark::X)).count();
    let os = cells.iter().filter(|c| **c == Some(Mark::O)).count();
    match xs.checked_sub(os) {
        Some(0) => Ok(Mark::X),
        Some(1) => Ok(Mark::O),
        _ => Err(GameError::InvalidBoard),
    }
}

/// Applies a move for the side to play and reports the resulting state.
pub fn play(cells: &[Option<Mark>], cell: usize) -> Result<MoveResponse, GameError> {
    if cells.len() != CELLS {
        return Err(GameError::BoardSize(cells.len()));
    }
    let mark = to_move(cells)?;
    if winner(cells).is_some() || is_full(cells) {
        return Err(GameError::GameOver);
    }
    if cell >= CELLS {
        return Err(GameError::CellOutOfRange(cell));
    }
    if cells[cell].is_some() {
        return Err(GameError::CellOccupied(cell));
    }

    let mut next_cells = cells.to_vec();
    next_cells[cell] = Some(mark);

    let winner = winner(&next_cells);
    let draw = winner.is_none() && is_full(&next_cells);
    let next = (winner.is_none() && !draw).then(|| mark.other());

    Ok(MoveResponse {
        cells: next_cells,
        next,
        winner,
        draw,
    })
}
