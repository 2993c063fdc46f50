//! Line commands typed at the control prompt.

use std::str::FromStr;

use anyhow::{anyhow, Context};
use shared::domain::AlgorithmId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlCommand {
    Algorithm(AlgorithmId),
    Size(usize),
    Speed(u8),
    Generate,
    Start,
    Pause,
    Reset,
    Status,
    Help,
    Quit,
}

impl ControlCommand {
    pub fn name(&self) -> &'static str {
        match self {
            ControlCommand::Algorithm(_) => "algorithm",
            ControlCommand::Size(_) => "size",
            ControlCommand::Speed(_) => "speed",
            ControlCommand::Generate => "generate",
            ControlCommand::Start => "start",
            ControlCommand::Pause => "pause",
            ControlCommand::Reset => "reset",
            ControlCommand::Status => "status",
            ControlCommand::Help => "help",
            ControlCommand::Quit => "quit",
        }
    }
}

pub const HELP: &str = "\
commands:
  algo <bubble|selection|insertion|merge|quick|heap>
  size <n>        regenerate with n elements (idle only)
  speed <1-10>    step delay = 201 - speed*20 ms
  gen             generate a new random array (idle only)
  start           start sorting, or resume when paused
  pause
  reset           abort the run and generate a new array
  status
  quit";

impl FromStr for ControlCommand {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let verb = words
            .next()
            .ok_or_else(|| anyhow!("empty command"))?
            .to_ascii_lowercase();
        let arg = words.next();
        if let Some(extra) = words.next() {
            return Err(anyhow!("unexpected argument '{extra}'"));
        }

        let required = |what: &str| arg.ok_or_else(|| anyhow!("{verb} needs {what}"));
        let command = match verb.as_str() {
            "algo" | "algorithm" => ControlCommand::Algorithm(required("an algorithm name")?.parse()?),
            "size" => ControlCommand::Size(
                required("an element count")?
                    .parse()
                    .context("size must be a whole number")?,
            ),
            "speed" => ControlCommand::Speed(
                required("a value from 1 to 10")?
                    .parse()
                    .context("speed must be a whole number")?,
            ),
            "gen" | "generate" => ControlCommand::Generate,
            "start" | "resume" => ControlCommand::Start,
            "pause" => ControlCommand::Pause,
            "reset" => ControlCommand::Reset,
            "status" => ControlCommand::Status,
            "help" | "?" => ControlCommand::Help,
            "quit" | "exit" | "q" => ControlCommand::Quit,
            other => return Err(anyhow!("unknown command '{other}' (try 'help')")),
        };

        let takes_arg = matches!(
            command,
            ControlCommand::Algorithm(_) | ControlCommand::Size(_) | ControlCommand::Speed(_)
        );
        if !takes_arg {
            if let Some(arg) = arg {
                return Err(anyhow!("{verb} takes no argument, got '{arg}'"));
            }
        }
        Ok(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands_with_arguments() {
        assert_eq!(
            "algo Quick".parse::<ControlCommand>().expect("algo"),
            ControlCommand::Algorithm(AlgorithmId::Quick)
        );
        assert_eq!(
            "  size 64 ".parse::<ControlCommand>().expect("size"),
            ControlCommand::Size(64)
        );
        assert_eq!(
            "speed 7".parse::<ControlCommand>().expect("speed"),
            ControlCommand::Speed(7)
        );
        assert_eq!(
            "resume".parse::<ControlCommand>().expect("resume"),
            ControlCommand::Start
        );
    }

    #[test]
    fn rejects_missing_or_stray_arguments() {
        assert!("size".parse::<ControlCommand>().is_err());
        assert!("size many".parse::<ControlCommand>().is_err());
        assert!("pause now".parse::<ControlCommand>().is_err());
        assert!("algo bogo".parse::<ControlCommand>().is_err());
        assert!("".parse::<ControlCommand>().is_err());
        assert!("dance".parse::<ControlCommand>().is_err());
    }
}
