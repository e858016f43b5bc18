use anyhow::{anyhow, Result};
use crossterm::{
    cursor::MoveTo,
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};

use std::io::{stdout, BufRead, Write};

use connect4_engine::{Board, Cell, Player, HEIGHT, WIDTH};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameState {
    Playing,
    PlayerOneWin,
    PlayerTwoWin,
    Draw,
}

/// A game in progress: the board, whose turn it is and the moves played so far
#[derive(Clone)]
pub struct Game {
    pub board: Board,
    pub to_move: Player,
    pub moves: Vec<usize>,
    pub state: GameState,
}

impl Game {
    pub fn new(first: Player) -> Self {
        Self {
            board: Board::new(),
            to_move: first,
            moves: Vec::new(),
            state: GameState::Playing,
        }
    }

    /// Plays `column` for the side to move, rejecting out of range or full columns
    pub fn play_checked(&mut self, column: usize) -> Result<GameState> {
        if column >= WIDTH {
            return Err(anyhow!(
                "Invalid move, column {} out of range. Columns must be between 0 and {}",
                column,
                WIDTH - 1
            ));
        }
        if !self.board.apply(column, self.to_move) {
            return Err(anyhow!("Invalid move, column {} full", column));
        }
        self.moves.push(column);

        self.state = match self.board.winner() {
            Some(Player::PlayerOne) => GameState::PlayerOneWin,
            Some(Player::PlayerTwo) => GameState::PlayerTwoWin,
            None if self.board.is_full() => GameState::Draw,
            None => GameState::Playing,
        };
        self.to_move = self.to_move.opponent();

        Ok(self.state)
    }

    pub fn display(&self) -> Result<()> {
        let mut stdout = stdout();

        // columns past 9 are labelled a, b, ...
        let cols: String = (0..WIDTH)
            .filter_map(|x| std::char::from_digit(x as u32, 36))
            .collect();
        stdout.queue(PrintStyledContent(style(cols + "\n")))?;
        for _ in 0..HEIGHT {
            stdout.queue(PrintStyledContent(style("\n")))?;
        }
        stdout.flush()?;

        let (origin_x, origin_y) = crossterm::cursor::position()?;

        for row in 0..HEIGHT {
            for column in 0..WIDTH {
                let (pos_x, pos_y) = (origin_x + column as u16, origin_y - 1 - row as u16);

                stdout
                    .queue(MoveTo(pos_x, pos_y))?
                    .queue(PrintStyledContent(
                        style("O")
                            .attribute(Attribute::Bold)
                            .on(Color::DarkBlue)
                            .with(match self.board.get(row, column) {
                                Cell::PlayerOne => Color::Red,
                                Cell::PlayerTwo => Color::Yellow,
                                Cell::Empty => Color::DarkBlue,
                            }),
                    ))?;
            }
        }
        stdout
            .queue(MoveTo(origin_x, origin_y))?
            .queue(PrintStyledContent(style("\n")))?;
        stdout.flush()?;
        Ok(())
    }
}

/// Reads one line of player input, or `None` once the input is closed
pub fn read_answer<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut buffer = String::new();
    if input.read_line(&mut buffer)? == 0 {
        return Ok(None);
    }
    Ok(Some(buffer))
}

/// Parses a column typed by the player, either decimal (`0`-`11`) or a single
/// base-36 digit matching the board labels
pub fn parse_column(input: &str) -> Result<usize> {
    let input = input.trim();
    if let Ok(column) = input.parse::<usize>() {
        return Ok(column);
    }
    let mut chars = input.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => c
            .to_digit(36)
            .map(|c| c as usize)
            .ok_or_else(|| anyhow!("Invalid column: {}", input)),
        _ => Err(anyhow!("Invalid column: {}", input)),
    }
}
