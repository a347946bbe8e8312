use std::io::Write;

use log::{info, warn};
use ncube_core::{CubeState, Move, format_sequence, parse_sequence};

use crate::{config::ShellConfig, render::Net};

/// Apply `sequence` to a solved cube and print the resulting net, followed by
/// `Solved` if the moves cancel out. Unrecognized tokens are skipped with a
/// warning.
pub fn run(
    sequence: &[String],
    config: &ShellConfig,
    mut output: impl Write,
) -> color_eyre::Result<()> {
    let text = sequence.join(" ");
    for token in unrecognized_tokens(&text) {
        warn!(target: "apply", "Ignoring unrecognized move {token:?}");
    }

    let moves = parse_sequence(&text);
    info!(target: "apply", "Applying {}", format_sequence(&moves));

    let state = CubeState::try_new(config.side_length)?.apply_sequence(&moves);
    writeln!(output, "{}", Net::new(&state, config.color))?;
    if state.is_solved() {
        writeln!(output, "Solved")?;
    }

    Ok(())
}

/// The whitespace separated tokens of `text` that do not name a face.
fn unrecognized_tokens(text: &str) -> Vec<&str> {
    text.split_whitespace()
        .filter(|token| !Move::parse(token).is_valid())
        .collect()
}

#[cfg(test)]
mod tests {
    use ncube_core::create_state;

    use super::*;

    fn apply(sequence: &[&str], side_length: usize) -> String {
        let config = ShellConfig {
            side_length,
            color: false,
            ..ShellConfig::default()
        };
        let sequence = sequence.iter().map(ToString::to_string).collect::<Vec<_>>();

        let mut output = Vec::new();
        run(&sequence, &config, &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn prints_the_turned_cube() {
        let output = apply(&["F R", "U R' U' F'"], 3);
        let state = create_state(3).apply_sequence(&parse_sequence("F R U R' U' F'"));

        assert_eq!(output, format!("{}\n", Net::new(&state, false)));
        assert!(!output.contains("Solved"));
    }

    #[test]
    fn reports_solved() {
        let output = apply(&["R", "R'", "2U", "2U'"], 4);

        assert!(output.starts_with(&Net::new(&create_state(4), false).to_string()));
        assert!(output.ends_with("Solved\n"));
    }

    #[test]
    fn unrecognized_tokens_are_skipped() {
        assert_eq!(unrecognized_tokens("R X 2 U' UR"), ["X", "2", "UR"]);
        assert!(unrecognized_tokens("R 3u' f").is_empty());

        assert_eq!(apply(&["R X", "2", "R'"], 3), apply(&["R R'"], 3));
    }

    #[test]
    fn oversized_cube_is_an_error() {
        let config = ShellConfig {
            side_length: usize::MAX,
            ..ShellConfig::default()
        };

        assert!(run(&["U".to_owned()], &config, Vec::new()).is_err());
    }
}
