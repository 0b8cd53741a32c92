//! Transport commands typed at the prompt

use std::str::FromStr;
use thiserror::Error;

pub const HELP: &str = "\
Commands:
  play <n>     play track n from the list (1-based)
  toggle       pause/resume (starts the first track if nothing is loaded)
  next, prev   skip forward/back, wrapping around the playlist
  seek <pct>   jump to pct (0-100) of the current track
  vol <pct>    set volume (0-100)
  reload       fetch the playlist again
  list         show the playlist
  help         show this help
  quit         stop and exit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Zero-based playlist index
    Play(usize),
    Toggle,
    Next,
    Previous,
    /// Fraction of the track, 0.0 to 1.0
    Seek(f64),
    Volume(u8),
    Reload,
    List,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,

    #[error("Unknown command '{0}'")]
    Unknown(String),

    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),

    #[error("Invalid argument for '{command}': {value}")]
    InvalidArgument { command: &'static str, value: String },
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let name = words.next().ok_or(CommandError::Empty)?;
        let arg = words.next();

        match name.to_ascii_lowercase().as_str() {
            "play" | "p" => {
                let n: usize = parse_arg("play", arg)?;
                n.checked_sub(1)
                    .map(Command::Play)
                    .ok_or_else(|| invalid("play", "0"))
            }
            "toggle" | "t" | "pause" => Ok(Command::Toggle),
            "next" | "n" => Ok(Command::Next),
            "prev" | "previous" => Ok(Command::Previous),
            "seek" => {
                let pct: f64 = parse_arg("seek", arg)?;
                if !(0.0..=100.0).contains(&pct) {
                    return Err(invalid("seek", &pct.to_string()));
                }
                Ok(Command::Seek(pct / 100.0))
            }
            "vol" | "volume" => {
                let pct: u8 = parse_arg("vol", arg)?;
                if pct > 100 {
                    return Err(invalid("vol", &pct.to_string()));
                }
                Ok(Command::Volume(pct))
            }
            "reload" => Ok(Command::Reload),
            "list" | "ls" => Ok(Command::List),
            "help" | "?" => Ok(Command::Help),
            "quit" | "q" | "exit" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

fn parse_arg<T: FromStr>(command: &'static str, arg: Option<&str>) -> Result<T, CommandError> {
    let arg = arg.ok_or(CommandError::MissingArgument(command))?;
    arg.parse().map_err(|_| invalid(command, arg))
}

fn invalid(command: &'static str, value: &str) -> CommandError {
    CommandError::InvalidArgument {
        command,
        value: value.to_string(),
    }
}
