//! Command line parsing.
//!
//! Converts the raw command buffer (no leading ':') into a `ParsedCommand`.
//! Matching is exact: `q`, `w` and `wq` only. No side effects here.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedCommand {
    Quit,
    Write,
    WriteQuit,
    Unknown(String),
}

pub struct CommandParser;

impl CommandParser {
    pub fn parse(raw: &str) -> ParsedCommand {
        match raw {
            "q" => ParsedCommand::Quit,
            "w" => ParsedCommand::Write,
            "wq" => ParsedCommand::WriteQuit,
            other => ParsedCommand::Unknown(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_quit() {
        assert_eq!(CommandParser::parse("q"), ParsedCommand::Quit);
    }

    #[test]
    fn parse_write() {
        assert_eq!(CommandParser::parse("w"), ParsedCommand::Write);
    }

    #[test]
    fn parse_write_quit() {
        assert_eq!(CommandParser::parse("wq"), ParsedCommand::WriteQuit);
    }

    #[test]
    fn parse_unknown() {
        assert_eq!(CommandParser::parse("qw"), ParsedCommand::Unknown("qw".into()));
        assert_eq!(CommandParser::parse(""), ParsedCommand::Unknown(String::new()));
        assert_eq!(CommandParser::parse("Q"), ParsedCommand::Unknown("Q".into()));
    }
}
