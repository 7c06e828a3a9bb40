use std::io::{self, BufRead, ErrorKind, Write};

use tictactoe_common::{Board, Mark, PlayerKind, Position};

use crate::interface::Interface;

const INSTRUCTIONS: &str = "\
==== TIC TAC TOE ====
Take turns marking cells; the first to fill a row, column or diagonal wins.
Moves are entered as 'row, col', counting from 0.
";

pub struct CommandLineInterface<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> CommandLineInterface<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    /// Re-prompts until `parse` accepts a line. Fails once the input is exhausted.
    fn get_valid_input<T>(&mut self, parse: impl Fn(&str) -> Option<T>) -> io::Result<T> {
        loop {
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(io::Error::new(ErrorKind::UnexpectedEof, "input closed"));
            }

            let cleaned = line.trim().to_lowercase();
            if let Some(value) = parse(&cleaned) {
                return Ok(value);
            }
            writeln!(
                self.output,
                "Sorry, '{}' is not valid input. Please try again.",
                cleaned
            )?;
        }
    }
}

impl<R: BufRead, W: Write> Interface for CommandLineInterface<R, W> {
    fn show_instructions(&mut self) -> io::Result<()> {
        write!(self.output, "{}", INSTRUCTIONS)
    }

    fn solicit_player_kind(&mut self, mark: Mark) -> io::Result<PlayerKind> {
        writeln!(self.output, "Is player {} a human or computer?", mark)?;
        writeln!(self.output, "Enter 'human', 'computer' or 'random'.")?;
        self.get_valid_input(|input| input.parse().ok())
    }

    fn show_board(&mut self, board: &Board) -> io::Result<()> {
        write!(self.output, "{}", render_board(board))
    }

    fn solicit_move(&mut self, mark: Mark) -> io::Result<Position> {
        writeln!(self.output, "Player {}: select your move.", mark)?;
        writeln!(
            self.output,
            "Enter your move coordinates in the format 'row, col' - eg. '0, 0'."
        )?;
        self.get_valid_input(parse_coordinates)
    }

    fn report_invalid_move(&mut self, pos: Position) -> io::Result<()> {
        writeln!(
            self.output,
            "Couldn't move at row: {}, column: {}. Please try again.",
            pos.row, pos.col
        )
    }

    fn report_move(&mut self, mark: Mark, pos: Position) -> io::Result<()> {
        writeln!(
            self.output,
            "Player {} moved at row: {}, column: {}.",
            mark, pos.row, pos.col
        )
    }

    fn report_game_over(&mut self, winner: Option<Mark>) -> io::Result<()> {
        match winner {
            Some(mark) => writeln!(self.output, "Player {} wins!", mark),
            None => writeln!(self.output, "The game ended in a draw."),
        }
    }
}

pub fn render_board(board: &Board) -> String {
    let size = board.size();
    let row_separator = format!("{}-\n", "----".repeat(size));

    let mut rendered = row_separator.clone();
    for row in board.cells().chunks(size) {
        rendered.push('|');
        for cell in row {
            let symbol = cell.map_or(' ', |mark| mark.symbol());
            rendered.push_str(&format!(" {} |", symbol));
        }
        rendered.push('\n');
        rendered.push_str(&row_separator);
    }
    rendered
}

/// Accepts `row, col` with optional surrounding whitespace.
fn parse_coordinates(input: &str) -> Option<Position> {
    let (row, col) = input.split_once(',')?;
    let parse_index = |part: &str| {
        let part = part.trim();
        if part.is_empty() || !part.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        part.parse::<usize>().ok()
    };
    Some(Position::new(parse_index(row)?, parse_index(col)?))
}
