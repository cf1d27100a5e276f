use std::str::FromStr;

use mineboard_core::{CellCount, CellIndex, Coord2, Dim};
use thiserror::Error;

pub(crate) const HELP: &str = "\
Commands:
  r <row> <col> | r <index>   reveal a cell
  f <row> <col> | f <index>   flag or unflag a cell
  n                           start a new game
  config <rows> <cols> <mines>  change the board and start over
  mines <count>               change the mine count and start over
  snapshot                    print the board as JSON
  help                        show this list
  q                           quit";

/// Cell addressed by a command, either linear or as `(row, col)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Target {
    Index(CellIndex),
    Coords(Coord2),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Command {
    Reveal(Target),
    Flag(Target),
    Restart,
    Configure {
        rows: Dim,
        cols: Dim,
        mines: CellCount,
    },
    Mines(CellCount),
    Snapshot,
    Help,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub(crate) enum ParseCommandError {
    #[error("Empty command")]
    Empty,
    #[error("Unknown command `{0}`, type `help` for a list")]
    Unknown(String),
    #[error("`{command}` expects {expected}")]
    Arguments {
        command: &'static str,
        expected: &'static str,
    },
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        use Command::*;

        let mut words = line.split_whitespace();
        let head = words.next().ok_or(ParseCommandError::Empty)?;
        let args: Vec<&str> = words.collect();

        match head.to_ascii_lowercase().as_str() {
            "r" | "reveal" => target(&args)
                .map(Reveal)
                .ok_or(arguments("reveal", "<index> or <row> <col>")),
            "f" | "flag" => target(&args)
                .map(Flag)
                .ok_or(arguments("flag", "<index> or <row> <col>")),
            "n" | "new" | "restart" => no_args(&args, "restart", Restart),
            "config" => match numbers(&args).as_deref() {
                Some(&[rows, cols, mines]) => Ok(Configure { rows, cols, mines }),
                _ => Err(arguments("config", "<rows> <cols> <mines>")),
            },
            "mines" => match numbers(&args).as_deref() {
                Some(&[count]) => Ok(Mines(count)),
                _ => Err(arguments("mines", "<count>")),
            },
            "s" | "snapshot" => no_args(&args, "snapshot", Snapshot),
            "h" | "help" | "?" => no_args(&args, "help", Help),
            "q" | "quit" | "exit" => no_args(&args, "quit", Quit),
            other => Err(ParseCommandError::Unknown(other.to_owned())),
        }
    }
}

fn arguments(command: &'static str, expected: &'static str) -> ParseCommandError {
    ParseCommandError::Arguments { command, expected }
}

fn numbers(args: &[&str]) -> Option<Vec<usize>> {
    args.iter().map(|arg| arg.parse().ok()).collect()
}

fn target(args: &[&str]) -> Option<Target> {
    match numbers(args)?.as_slice() {
        &[index] => Some(Target::Index(index)),
        &[row, col] => Some(Target::Coords((row, col))),
        _ => None,
    }
}

fn no_args(
    args: &[&str],
    command: &'static str,
    parsed: Command,
) -> Result<Command, ParseCommandError> {
    if args.is_empty() {
        Ok(parsed)
    } else {
        Err(arguments(command, "no arguments"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reveal_and_flag_accept_both_addressing_modes() {
        assert_eq!(
            "r 3 4".parse::<Command>(),
            Ok(Command::Reveal(Target::Coords((3, 4))))
        );
        assert_eq!("reveal 42".parse::<Command>(), Ok(Command::Reveal(Target::Index(42))));
        assert_eq!("F 0 9".parse::<Command>(), Ok(Command::Flag(Target::Coords((0, 9)))));
    }

    #[test]
    fn configuration_commands() {
        assert_eq!(
            "config 8 12 15".parse::<Command>(),
            Ok(Command::Configure {
                rows: 8,
                cols: 12,
                mines: 15
            })
        );
        assert_eq!("mines 7".parse::<Command>(), Ok(Command::Mines(7)));
        assert_eq!(
            "config 8 12".parse::<Command>(),
            Err(arguments("config", "<rows> <cols> <mines>"))
        );
    }

    #[test]
    fn bad_input_is_reported() {
        assert_eq!("".parse::<Command>(), Err(ParseCommandError::Empty));
        assert_eq!(
            "dig 1".parse::<Command>(),
            Err(ParseCommandError::Unknown("dig".into()))
        );
        assert_eq!(
            "r -1 2".parse::<Command>(),
            Err(arguments("reveal", "<index> or <row> <col>"))
        );
        assert_eq!(
            "r 1 2 3".parse::<Command>(),
            Err(arguments("reveal", "<index> or <row> <col>"))
        );
        assert_eq!(
            "q now".parse::<Command>(),
            Err(arguments("quit", "no arguments"))
        );
    }
}
