use std::fmt::{self, Display};

use ncube_core::{CubeState, Face};
use owo_colors::{OwoColorize, Style};

/// The four faces drawn side by side in the middle of the net.
const BELT: [Face; 4] = [Face::Left, Face::Up, Face::Right, Face::Down];

/// The cube unrolled into a cross, ready to print:
///
/// ```text
///    ┌──┐
///    │BB│
///    │BB│
/// ┌──┼──┼──┬──┐
/// │OO│WW│RR│YY│
/// │OO│WW│RR│YY│
/// └──┼──┼──┴──┘
///    │GG│
///    │GG│
///    └──┘
/// ```
pub struct Net<'a> {
    state: &'a CubeState,
    color: bool,
}

impl<'a> Net<'a> {
    pub fn new(state: &'a CubeState, color: bool) -> Self {
        Net { state, color }
    }

    fn stickers(&self, f: &mut fmt::Formatter<'_>, row: &[Face]) -> fmt::Result {
        for &sticker in row {
            let letter = sticker_letter(sticker);
            if self.color {
                write!(f, "{}", letter.style(sticker_style(sticker)))?;
            } else {
                write!(f, "{letter}")?;
            }
        }

        Ok(())
    }

    fn lone_face(&self, f: &mut fmt::Formatter<'_>, face: Face) -> fmt::Result {
        let indent = " ".repeat(self.state.side_length() + 1);

        for row in self.state[face].rows() {
            write!(f, "{indent}│")?;
            self.stickers(f, row)?;
            writeln!(f, "│")?;
        }

        Ok(())
    }
}

impl Display for Net<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.state.side_length();
        let indent = " ".repeat(n + 1);
        let segment = "─".repeat(n);

        writeln!(f, "{indent}┌{segment}┐")?;
        self.lone_face(f, Face::Back)?;

        writeln!(f, "┌{segment}┼{segment}┼{segment}┬{segment}┐")?;
        for row in 0..n {
            write!(f, "│")?;
            for face in BELT {
                self.stickers(f, &self.state[face].cells()[row * n..(row + 1) * n])?;
                write!(f, "│")?;
            }
            writeln!(f)?;
        }
        writeln!(f, "└{segment}┼{segment}┼{segment}┴{segment}┘")?;

        self.lone_face(f, Face::Front)?;
        write!(f, "{indent}└{segment}┘")
    }
}

/// The letter printed for a sticker, after the color it shows on a standard
/// cube.
pub fn sticker_letter(sticker: Face) -> char {
    match sticker {
        Face::Back => 'B',
        Face::Left => 'O',
        Face::Up => 'W',
        Face::Right => 'R',
        Face::Down => 'Y',
        Face::Front => 'G',
    }
}

fn sticker_style(sticker: Face) -> Style {
    let style = Style::new().bold();

    match sticker {
        Face::Back => style.blue(),
        Face::Left => style.truecolor(255, 140, 0),
        Face::Up => style.white(),
        Face::Right => style.red(),
        Face::Down => style.yellow(),
        Face::Front => style.green(),
    }
}

#[cfg(test)]
mod tests {
    use ncube_core::create_state;

    use super::*;

    #[test]
    fn solved_two_by_two() {
        let state = create_state(2);

        assert_eq!(
            Net::new(&state, false).to_string(),
            [
                "   ┌──┐",
                "   │BB│",
                "   │BB│",
                "┌──┼──┼──┬──┐",
                "│OO│WW│RR│YY│",
                "│OO│WW│RR│YY│",
                "└──┼──┼──┴──┘",
                "   │GG│",
                "   │GG│",
                "   └──┘",
            ]
            .join("\n")
        );
    }

    #[test]
    fn turned_three_by_three() {
        let state = create_state(3).apply_text("U");
        let net = Net::new(&state, false).to_string();
        let lines = net.lines().collect::<Vec<_>>();

        assert_eq!(lines.len(), 3 * 3 + 4);
        assert_eq!(lines[3], "    │OOO│");
        assert_eq!(lines[5], "│OOG│WWW│BRR│YYY│");
        assert_eq!(lines[9], "    │RRR│");
    }

    #[test]
    fn color_only_adds_escape_codes() {
        let state = create_state(3).apply_text("R'");
        let plain = Net::new(&state, false).to_string();
        let colored = Net::new(&state, true).to_string();

        assert_ne!(plain, colored);
        assert!(colored.contains('\u{1b}'));
        assert_eq!(strip_escapes(&colored), plain);
    }

    fn strip_escapes(text: &str) -> String {
        let mut out = String::new();
        let mut chars = text.chars();

        while let Some(c) = chars.next() {
            if c == '\u{1b}' {
                for c in chars.by_ref() {
                    if c == 'm' {
                        break;
                    }
                }
            } else {
                out.push(c);
            }
        }

        out
    }
}
