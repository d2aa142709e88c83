//! Single-key menu commands

/// Entries of the main menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainCommand {
    Play,
    Settings,
    Help,
    Exit,
}

/// Entries of the settings menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsCommand {
    Help,
    ReadFile,
    Paste,
    Randomize,
    Back,
}

/// Result of reading one command line from the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parsed<T> {
    Command(T),
    /// More than one character was typed
    TooLong,
    Invalid,
}

pub trait MenuKey: Sized {
    fn from_key(key: char) -> Option<Self>;

    /// Parse a line of input. Keys are case-insensitive and must be the
    /// only character on the line.
    fn parse(line: &str) -> Parsed<Self> {
        let line = line.trim_end_matches(['\r', '\n']);
        let mut chars = line.chars();
        match (chars.next(), chars.next()) {
            (Some(key), None) => match Self::from_key(key.to_ascii_uppercase()) {
                Some(command) => Parsed::Command(command),
                None => Parsed::Invalid,
            },
            (Some(_), Some(_)) => Parsed::TooLong,
            (None, _) => Parsed::Invalid,
        }
    }
}

impl MenuKey for MainCommand {
    fn from_key(key: char) -> Option<Self> {
        match key {
            'A' => Some(MainCommand::Play),
            'B' => Some(MainCommand::Settings),
            'H' => Some(MainCommand::Help),
            'X' => Some(MainCommand::Exit),
            _ => None,
        }
    }
}

impl MenuKey for SettingsCommand {
    fn from_key(key: char) -> Option<Self> {
        match key {
            'A' => Some(SettingsCommand::Help),
            'B' => Some(SettingsCommand::ReadFile),
            'C' => Some(SettingsCommand::Paste),
            'D' => Some(SettingsCommand::Randomize),
            'X' => Some(SettingsCommand::Back),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_main_commands() {
        assert_eq!(MainCommand::parse("a\n"), Parsed::Command(MainCommand::Play));
        assert_eq!(MainCommand::parse("B"), Parsed::Command(MainCommand::Settings));
        assert_eq!(MainCommand::parse("h\r\n"), Parsed::Command(MainCommand::Help));
        assert_eq!(MainCommand::parse("x\n"), Parsed::Command(MainCommand::Exit));
    }

    #[test]
    fn test_parse_rejects() {
        assert_eq!(MainCommand::parse("ab\n"), Parsed::TooLong);
        assert_eq!(MainCommand::parse("\n"), Parsed::Invalid);
        assert_eq!(MainCommand::parse("z\n"), Parsed::Invalid);
        // Highscores were never part of the game
        assert_eq!(MainCommand::parse("c\n"), Parsed::Invalid);
    }

    #[test]
    fn test_parse_settings_commands() {
        assert_eq!(SettingsCommand::parse("c\n"), Parsed::Command(SettingsCommand::Paste));
        assert_eq!(SettingsCommand::parse("D\n"), Parsed::Command(SettingsCommand::Randomize));
        assert_eq!(SettingsCommand::parse("x\n"), Parsed::Command(SettingsCommand::Back));
    }
}
