//! Replay scripts — one input event per line, applied to a [`Board`] in order.
//!
//! ```text
//! # comments and blank lines are skipped
//! focus price.low
//! key PageUp
//! press 150
//! move 180
//! release
//! click 40
//! set red 200
//! blur
//! ```

use rangekit_core::{Board, ControlRef, Key};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ScriptError {
    #[error("line {line}: unknown command '{command}'")]
    UnknownCommand { line: usize, command: String },

    #[error("line {line}: '{command}' needs {expected}")]
    MissingArgument {
        line: usize,
        command: String,
        expected: &'static str,
    },

    #[error("line {line}: '{value}' is not a number")]
    InvalidNumber { line: usize, value: String },

    #[error("line {line}: no control named '{path}'")]
    UnknownControl { line: usize, path: String },

    #[error("line {line}: '{command}' needs a focused control")]
    NothingFocused { line: usize, command: &'static str },

    #[error("line {line}: '{command} {x}' is off the focused control's track")]
    OffTrack {
        line: usize,
        command: &'static str,
        x: f64,
    },
}

/// One parsed script line.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Focus(String),
    Blur,
    Key(Key),
    Press(f64),
    Move(f64),
    Release,
    Click(f64),
    Set(String, i64),
}

/// A step with the line it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub number: usize,
    pub step: Step,
}

pub fn parse(source: &str) -> Result<Vec<Line>, ScriptError> {
    let mut lines = Vec::new();
    for (index, raw) in source.lines().enumerate() {
        let number = index + 1;
        let text = raw.split('#').next().unwrap_or("").trim();
        if text.is_empty() {
            continue;
        }
        let mut words = text.split_whitespace();
        let command = words.next().unwrap_or_default();
        let mut arg = |expected: &'static str| {
            words.next().ok_or_else(|| ScriptError::MissingArgument {
                line: number,
                command: command.to_string(),
                expected,
            })
        };
        let step = match command {
            "focus" => Step::Focus(arg("a control path")?.to_string()),
            "blur" => Step::Blur,
            "key" => {
                let key = arg("a key name")?.parse::<Key>();
                Step::Key(key.unwrap_or_else(|never| match never {}))
            }
            "press" => Step::Press(number_arg(number, arg("an x position")?)?),
            "move" => Step::Move(number_arg(number, arg("an x position")?)?),
            "release" => Step::Release,
            "click" => Step::Click(number_arg(number, arg("an x position")?)?),
            "set" => {
                let path = arg("a control path")?.to_string();
                let value = arg("a value")?;
                let value = value.parse().map_err(|_| ScriptError::InvalidNumber {
                    line: number,
                    value: value.to_string(),
                })?;
                Step::Set(path, value)
            }
            other => {
                return Err(ScriptError::UnknownCommand {
                    line: number,
                    command: other.to_string(),
                })
            }
        };
        lines.push(Line { number, step });
    }
    Ok(lines)
}

fn number_arg(line: usize, value: &str) -> Result<f64, ScriptError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ScriptError::InvalidNumber {
            line,
            value: value.to_string(),
        })
}

/// Apply parsed steps to the board, stopping at the first failing line.
///
/// `press` and `click` act on the focused control and must land on its track;
/// `move` and `release` go to whatever gesture is active.
pub fn run(board: &mut Board, lines: &[Line]) -> Result<(), ScriptError> {
    for Line { number, step } in lines {
        let line = *number;
        let resolve = |board: &Board, path: &str| {
            board.resolve(path).ok_or_else(|| ScriptError::UnknownControl {
                line,
                path: path.to_string(),
            })
        };
        let focused = |board: &Board, command: &'static str| {
            board
                .focused()
                .ok_or(ScriptError::NothingFocused { line, command })
        };
        let on_track = |board: &Board, command: &'static str, x: f64| {
            let target = focused(board, command)?;
            if board.hit_test(target, x) {
                Ok(target)
            } else {
                Err(ScriptError::OffTrack { line, command, x })
            }
        };
        tracing::debug!(line, ?step, "replay");
        match step {
            Step::Focus(path) => {
                let target = resolve(board, path)?;
                board.focus(target);
            }
            Step::Blur => board.blur(),
            Step::Key(key) => {
                focused(board, "key")?;
                board.key_down(key);
            }
            Step::Press(x) => {
                let target = on_track(board, "press", *x)?;
                board.pointer_press(target, *x);
            }
            Step::Move(x) => {
                board.pointer_move(*x);
            }
            Step::Release => {
                board.pointer_release();
            }
            Step::Click(x) => {
                let target = on_track(board, "click", *x)?;
                board.click(target, *x);
            }
            Step::Set(path, value) => {
                let target: ControlRef = resolve(board, path)?;
                board.set_value(target, *value);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rangekit_core::{LayoutConfig, Thumb};

    fn demo() -> Board {
        Board::from_config(&LayoutConfig::demo()).unwrap()
    }

    #[test]
    fn parses_every_command() {
        let lines = parse(
            "# header\n\nfocus price.low\nkey PageUp\npress 150\nmove 180.5\n\
             release  # done\nclick 40\nset red 7\nblur\n",
        )
        .unwrap();
        let steps: Vec<_> = lines.iter().map(|l| l.step.clone()).collect();
        assert_eq!(
            steps,
            vec![
                Step::Focus("price.low".into()),
                Step::Key(Key::PageUp),
                Step::Press(150.0),
                Step::Move(180.5),
                Step::Release,
                Step::Click(40.0),
                Step::Set("red".into(), 7),
                Step::Blur,
            ]
        );
        assert_eq!(lines[0].number, 3);
    }

    #[test]
    fn unknown_keys_parse_as_other() {
        let lines = parse("key Enter").unwrap();
        assert_eq!(lines[0].step, Step::Key(Key::Other("Enter".into())));
    }

    #[test]
    fn parse_errors_name_the_line() {
        assert_eq!(
            parse("blur\njump 3").unwrap_err(),
            ScriptError::UnknownCommand {
                line: 2,
                command: "jump".into()
            }
        );
        assert!(matches!(
            parse("press").unwrap_err(),
            ScriptError::MissingArgument { line: 1, .. }
        ));
        assert!(matches!(
            parse("move left").unwrap_err(),
            ScriptError::InvalidNumber { line: 1, .. }
        ));
        assert!(matches!(
            parse("press NaN").unwrap_err(),
            ScriptError::InvalidNumber { .. }
        ));
        assert!(matches!(
            parse("set red 1.5").unwrap_err(),
            ScriptError::InvalidNumber { .. }
        ));
    }

    #[test]
    fn replays_keyboard_and_drag() {
        let mut board = demo();
        let script = parse("focus price.low\nkey PageUp\npress 150\nmove 180\nrelease\n").unwrap();
        run(&mut board, &script).unwrap();

        let low = board.slider(ControlRef::Thumb(0, Thumb::Low)).unwrap();
        assert!(!low.is_dragging());
        assert!(low.value() <= board.duals()[0].range().max);
        assert_eq!(board.surface().active_subscriptions(), 0);
    }

    #[test]
    fn set_updates_colour() {
        let mut board = demo();
        run(&mut board, &parse("set red 255\nset green 0\nset blue 0").unwrap()).unwrap();
        assert_eq!(board.color().unwrap().hex, "#ff0000");
    }

    #[test]
    fn run_errors() {
        let mut board = demo();
        assert_eq!(
            run(&mut board, &parse("focus nope").unwrap()).unwrap_err(),
            ScriptError::UnknownControl {
                line: 1,
                path: "nope".into()
            }
        );
        assert_eq!(
            run(&mut board, &parse("key End").unwrap()).unwrap_err(),
            ScriptError::NothingFocused {
                line: 1,
                command: "key"
            }
        );
    }

    #[test]
    fn press_and_click_off_the_track_are_rejected() {
        let mut board = demo();
        let before = board.snapshot();
        let err = run(&mut board, &parse("focus red
press 900").unwrap()).unwrap_err();
        assert_eq!(
            err,
            ScriptError::OffTrack {
                line: 2,
                command: "press",
                x: 900.0
            }
        );
        assert!(!board.sliders()[0].is_dragging());
        assert_eq!(board.surface().active_subscriptions(), 0);

        let err = run(&mut board, &parse("click -5").unwrap()).unwrap_err();
        assert!(matches!(err, ScriptError::OffTrack { line: 1, command: "click", .. }));
        assert_eq!(board.sliders()[0].value(), before.controls[0].value_now);

        // the track ends are still on it
        run(&mut board, &parse("press 0
release
click 256").unwrap()).unwrap();
        assert_eq!(board.sliders()[0].value(), 255);
    }
}
