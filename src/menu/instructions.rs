//! Help text shown by the menus

use crate::game_of_life::io::PASTE_TERMINATOR;
use crate::game_of_life::BirthRule;
use crate::utils::ColorOutput;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstructionTopic {
    Welcome,
    GameOfLife,
    Settings,
    SettingsHelp,
}

impl InstructionTopic {
    pub fn text(self, birth: BirthRule) -> String {
        match self {
            InstructionTopic::Welcome => format!(
                "What would you like to do?\n{}\n",
                ColorOutput::menu(" A) Play game\n B) Settings\n H) Show this menu\n X) Exit program")
            ),
            InstructionTopic::GameOfLife => {
                let birth_line = match birth {
                    BirthRule::AtLeastThree => {
                        "\t- Each empty cell with three or more neighbours becomes populated."
                    }
                    BirthRule::ExactlyThree => {
                        "\t- Each empty cell with exactly three neighbours becomes populated."
                    }
                };
                format!(
                    "\nThis is the GAME OF LIFE ({}).\nThe rules are simple:\n{}\nLets start?\n",
                    birth,
                    ColorOutput::warning(&format!(
                        "\t- Each cell with one or no neighbours dies, as if by loneliness.\n\
                         \t- Each cell with four or more neighbours dies, as if by overpopulation.\n\
                         \t- Each cell with two or three neighbours survives.\n{}",
                        birth_line
                    ))
                )
            }
            InstructionTopic::Settings => format!(
                "\nSettings\n{}\n",
                ColorOutput::menu(
                    "A) Help!!\nB) Read gamestate from file\nC) Paste gamestate as string\nD) Randomize gamestate\nX) Back"
                )
            ),
            InstructionTopic::SettingsHelp => format!(
                "{}\n{}\n{}\n{}\n{}\n{}\n{}\n",
                ColorOutput::menu("B) Read gamestate from file"),
                ColorOutput::warning(
                    "\t- use: longest line = board width, number of lines = board height (.txt only)\n\
                     \t- cell state: the most frequent character = alive, second most frequent = dead\n\
                     \t\t- NOTE: defaults to 'o' = alive, '.' = dead if either of them is '.', 'o' or 'O'"
                ),
                ColorOutput::menu("C) Paste gamestate as string"),
                ColorOutput::warning(&format!(
                    "\t- paste the board, then a line containing only '{}'\n\
                     \t  ....o\n\t  .oo..\n\t  .....\n\t  {}",
                    PASTE_TERMINATOR, PASTE_TERMINATOR
                )),
                ColorOutput::menu("D) Randomize gamestate"),
                ColorOutput::warning("\t- generates a board of random size and population"),
                ColorOutput::menu("X) Go back to previous menu"),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topics_are_distinct() {
        let topics = [
            InstructionTopic::Welcome,
            InstructionTopic::GameOfLife,
            InstructionTopic::Settings,
            InstructionTopic::SettingsHelp,
        ];
        let texts: Vec<_> = topics.iter().map(|t| t.text(BirthRule::default())).collect();
        for (i, a) in texts.iter().enumerate() {
            for b in &texts[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_rules_text_follows_birth_rule() {
        assert!(InstructionTopic::GameOfLife
            .text(BirthRule::AtLeastThree)
            .contains("three or more"));
        assert!(InstructionTopic::GameOfLife
            .text(BirthRule::ExactlyThree)
            .contains("exactly three"));
    }

    #[test]
    fn test_welcome_lists_commands() {
        let text = InstructionTopic::Welcome.text(BirthRule::default());
        assert!(text.contains("A) Play game"));
        assert!(text.contains("X) Exit program"));
    }
}
