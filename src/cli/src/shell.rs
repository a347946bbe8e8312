use std::{
    collections::VecDeque,
    io::{self, BufRead, Write},
};

use itertools::Itertools;
use log::{debug, info};
use ncube_core::{CubeState, parse_sequence};

use crate::{config::ShellConfig, render::Net};

const PROMPT: &str = "Rotate face: ";

const HELP: &str = "\
Moves are written [layer]<face>['], several to a line separated by spaces.
  Faces:    U (up)  D (down)  L (left)  R (right)  F (front)  B (back)
  Layer:    counts inward from the face, starting at 1; 2U turns the slice
            just under U without turning U itself
  '         turns counterclockwise instead of clockwise
  Examples: U   R'   2F   3D'   F R U R' U' F'

Commands:
  (empty)   repeat the previous line
  undo      take back the last line of moves
  redo      replay a line taken back with undo
  history   list the lines of moves applied so far
  restart   go back to a solved cube, after asking
  help, h, ? show this screen
  quit, q   leave";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Quit,
    Help,
    Undo,
    Redo,
    History,
    Restart,
    Moves(String),
}

impl Command {
    fn parse(line: &str) -> Command {
        match line.to_ascii_lowercase().as_str() {
            "q" | "quit" => Command::Quit,
            "h" | "help" | "?" => Command::Help,
            "undo" => Command::Undo,
            "redo" => Command::Redo,
            "history" => Command::History,
            "restart" => Command::Restart,
            _ => Command::Moves(line.to_owned()),
        }
    }
}

/// One line of moves that changed the cube.
#[derive(Debug, Clone)]
struct Entry {
    text: String,
    moves: usize,
    before: CubeState,
    after: CubeState,
}

/// An interactive session around a single cube.
pub struct Session {
    state: CubeState,
    config: ShellConfig,
    undo: VecDeque<Entry>,
    redo: Vec<Entry>,
    move_count: usize,
    previous: Option<String>,
}

impl Session {
    pub fn new(config: ShellConfig) -> Session {
        Session {
            state: CubeState::new(config.side_length),
            config,
            undo: VecDeque::new(),
            redo: Vec::new(),
            move_count: 0,
            previous: None,
        }
    }

    /// Read lines from `input` until it runs out or the user quits.
    pub fn run(&mut self, mut input: impl BufRead, mut output: impl Write) -> io::Result<()> {
        info!(
            target: "shell",
            "Starting session: side_length={} config={:?}",
            self.state.side_length(),
            self.config
        );

        loop {
            writeln!(output, "{}", Net::new(&self.state, self.config.color))?;
            writeln!(output, "Moves: {}", self.move_count)?;
            write!(output, "{PROMPT}")?;
            output.flush()?;

            let Some(raw) = read_line(&mut input)? else {
                writeln!(output)?;
                break;
            };

            let line = sanitize(&raw, self.config.max_input_len);
            let line = if line.is_empty() {
                match &self.previous {
                    Some(previous) => previous.clone(),
                    None => continue,
                }
            } else {
                line
            };
            self.previous = Some(line.clone());

            let command = Command::parse(&line);
            debug!(target: "shell", "Read {raw:?} as {command:?}");

            match command {
                Command::Quit => break,
                Command::Help => writeln!(output, "{HELP}")?,
                Command::Undo => {
                    if !self.undo() {
                        writeln!(output, "Nothing to undo")?;
                    }
                }
                Command::Redo => {
                    if !self.redo() {
                        writeln!(output, "Nothing to redo")?;
                    }
                }
                Command::History => self.print_history(&mut output)?,
                Command::Restart => {
                    write!(output, "Restart from a solved cube? [y/N] ")?;
                    output.flush()?;

                    let answer = read_line(&mut input)?.unwrap_or_default();
                    if answer.trim().to_ascii_lowercase().starts_with('y') {
                        self.restart();
                    } else {
                        writeln!(output, "Keeping the current cube")?;
                    }
                }
                Command::Moves(text) => {
                    let was_solved = self.state.is_solved();
                    if !self.apply(&text) {
                        writeln!(output, "No change")?;
                    } else if !was_solved && self.state.is_solved() {
                        writeln!(output, "Solved! ({} moves)", self.move_count)?;
                    }
                }
            }
        }

        info!(target: "shell", "Ending session after {} moves", self.move_count);
        Ok(())
    }

    /// Apply a line of moves. Lines that leave the cube as it was are not
    /// recorded or counted. Returns whether the cube changed.
    pub fn apply(&mut self, text: &str) -> bool {
        let mut state = self.state.clone();
        let mut moves = 0;

        for move_ in parse_sequence(text) {
            let next = state.apply_move(&move_);
            if next == state {
                debug!(target: "shell", "{move_} changed nothing");
            } else {
                moves += 1;
                state = next;
            }
        }

        if state == self.state {
            debug!(target: "shell", "{text:?} left the cube as it was");
            return false;
        }

        let entry = Entry {
            text: text.to_owned(),
            moves,
            before: std::mem::replace(&mut self.state, state.clone()),
            after: state,
        };

        self.redo.clear();
        self.push_undo(entry);
        self.move_count += moves;

        true
    }

    pub fn undo(&mut self) -> bool {
        let Some(entry) = self.undo.pop_back() else {
            return false;
        };

        debug!(target: "shell", "Undoing {:?}", entry.text);
        self.state = entry.before.clone();
        self.move_count -= entry.moves;
        self.redo.push(entry);

        true
    }

    pub fn redo(&mut self) -> bool {
        let Some(entry) = self.redo.pop() else {
            return false;
        };

        debug!(target: "shell", "Redoing {:?}", entry.text);
        self.state = entry.after.clone();
        self.move_count += entry.moves;
        self.push_undo(entry);

        true
    }

    pub fn restart(&mut self) {
        info!(target: "shell", "Restarting after {} moves", self.move_count);
        self.state = CubeState::new(self.config.side_length);
        self.undo.clear();
        self.redo.clear();
        self.move_count = 0;
    }

    fn push_undo(&mut self, entry: Entry) {
        self.undo.push_back(entry);

        while self.undo.len() > self.config.history_limit {
            self.undo.pop_front();
        }
    }

    fn print_history(&self, output: &mut impl Write) -> io::Result<()> {
        if self.undo.is_empty() {
            return writeln!(output, "No moves yet");
        }

        let width = self.undo.len().to_string().len();
        let lines = self
            .undo
            .iter()
            .enumerate()
            .map(|(i, entry)| format!("{:>width$}  {}", i + 1, entry.text))
            .join("\n");

        writeln!(output, "{lines}")
    }
}

fn read_line(input: &mut impl BufRead) -> io::Result<Option<String>> {
    let mut line = String::new();

    if input.read_line(&mut line)? == 0 {
        Ok(None)
    } else {
        Ok(Some(line))
    }
}

/// Keep only the characters that can appear in a move or a command, up to
/// `max_len` of them.
fn sanitize(raw: &str, max_len: usize) -> String {
    raw.chars()
        .filter(|&c| c.is_ascii_alphanumeric() || c == '\'' || c == ' ' || c == '?')
        .skip_while(|&c| c == ' ')
        .take(max_len)
        .collect::<String>()
        .trim_end()
        .to_owned()
}
