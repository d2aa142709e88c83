//! The interactive command loop

use super::commands::{MainCommand, MenuKey, Parsed, SettingsCommand};
use super::instructions::InstructionTopic;
use crate::config::Settings;
use crate::game_of_life::io::PASTE_TERMINATOR;
use crate::game_of_life::{
    load_board_file, parse_pasted_board, random_population, LifeEngine, Population,
};
use crate::simulation::{Pacer, Simulation};
use crate::utils::{ColorOutput, ReportFormatter};
use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{BufRead, Write};
use tracing::warn;

/// Largest side of a randomized board
pub const RANDOM_MAX_SIDE: usize = 40;

/// Menu state for one interactive session
pub struct Menu<R, W> {
    input: R,
    output: W,
    settings: Settings,
    population: Option<Population>,
    pacer: Box<dyn Pacer>,
    rng: StdRng,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(input: R, output: W, settings: Settings, pacer: Box<dyn Pacer>) -> Self {
        Self {
            input,
            output,
            settings,
            population: None,
            pacer,
            rng: StdRng::from_entropy(),
        }
    }

    /// Use a fixed seed for randomized boards
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Start with a board already loaded
    pub fn with_population(mut self, population: Population) -> Result<Self> {
        self.adopt(population)?;
        Ok(self)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn population(&self) -> Option<&Population> {
        self.population.as_ref()
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Run the main menu until the user exits or input ends
    pub fn run(&mut self) -> Result<()> {
        self.show(InstructionTopic::Welcome)?;

        loop {
            let Some(line) = self.prompt()? else {
                break;
            };

            match MainCommand::parse(&line) {
                Parsed::Command(MainCommand::Play) => {
                    self.show(InstructionTopic::GameOfLife)?;
                    if !self.play()? {
                        writeln!(
                            self.output,
                            "{}",
                            ColorOutput::error("Failed. Please modify settings:")
                        )?;
                        if !self.settings_menu()? {
                            break;
                        }
                    }
                }
                Parsed::Command(MainCommand::Settings) => {
                    if !self.settings_menu()? {
                        break;
                    }
                }
                Parsed::Command(MainCommand::Help) => self.show(InstructionTopic::Welcome)?,
                Parsed::Command(MainCommand::Exit) => {
                    writeln!(self.output, "Bye :)")?;
                    break;
                }
                Parsed::TooLong => self.reject("Input buffer exceeded. Please try again.")?,
                Parsed::Invalid => self.reject("Invalid command. Please try again.")?,
            }
        }

        self.output.flush()?;
        Ok(())
    }

    /// Returns false when the board size has to be changed before playing
    fn play(&mut self) -> Result<bool> {
        let board = &self.settings.board;
        let mut engine = match LifeEngine::create(
            board.width,
            board.height,
            board.max_dimension,
            self.settings.rules.birth,
        ) {
            Ok(engine) => engine,
            Err(err) if err.needs_reconfiguration() => {
                warn!(error = %err, "could not create grid");
                writeln!(self.output, "{}", ColorOutput::error(&err.to_string()))?;
                return Ok(false);
            }
            Err(err) => return Err(err).context("Failed to create grid"),
        };

        if let Some(ref population) = self.population {
            engine.seed(population)?;
        }

        let simulation = Simulation::from_settings(&self.settings);
        let report = simulation
            .run(&mut engine, self.pacer.as_mut(), &mut self.output)
            .context("Failed to render simulation")?;

        write!(self.output, "{}", ReportFormatter::format_text(&report))?;
        Ok(true)
    }

    /// Returns false if input ended inside the menu
    fn settings_menu(&mut self) -> Result<bool> {
        self.show(InstructionTopic::Settings)?;

        loop {
            let Some(line) = self.prompt()? else {
                return Ok(false);
            };

            match SettingsCommand::parse(&line) {
                Parsed::Command(SettingsCommand::Help) => {
                    self.show(InstructionTopic::SettingsHelp)?
                }
                Parsed::Command(SettingsCommand::ReadFile) => self.read_file()?,
                Parsed::Command(SettingsCommand::Paste) => self.paste()?,
                Parsed::Command(SettingsCommand::Randomize) => self.randomize()?,
                Parsed::Command(SettingsCommand::Back) => return Ok(true),
                Parsed::TooLong => self.reject("Input buffer exceeded. Please try again.")?,
                Parsed::Invalid => self.reject("Invalid command. Please try again.")?,
            }
        }
    }

    fn read_file(&mut self) -> Result<()> {
        write!(self.output, "Board file: ")?;
        self.output.flush()?;
        let Some(line) = self.read_line()? else {
            return Ok(());
        };
        let path = line.trim();

        match load_board_file(path, self.settings.board.max_dimension) {
            Ok(population) => {
                self.adopt(population)?;
                writeln!(
                    self.output,
                    "{}",
                    ColorOutput::success("File read and game initialized *thumbs up*")
                )?;
            }
            Err(err) => {
                warn!(error = %err, "board file rejected");
                writeln!(
                    self.output,
                    "{}",
                    ColorOutput::error(&format!("Something went wrong :( {}", err))
                )?;
            }
        }
        Ok(())
    }

    fn paste(&mut self) -> Result<()> {
        writeln!(
            self.output,
            "Paste the board and finish with a line containing only '{}':",
            PASTE_TERMINATOR
        )?;
        self.output.flush()?;

        let mut lines = Vec::new();
        while let Some(line) = self.read_line()? {
            let done = line.trim_end_matches(['\r', '\n']) == PASTE_TERMINATOR;
            lines.push(line);
            if done {
                break;
            }
        }

        match parse_pasted_board(&lines, self.settings.board.max_dimension) {
            Some(Ok(population)) => {
                self.adopt(population)?;
                writeln!(self.output, "{}", ColorOutput::success("Board pasted"))?;
            }
            Some(Err(err)) => {
                writeln!(self.output, "{}", ColorOutput::error(&err.to_string()))?;
            }
            None => {
                writeln!(
                    self.output,
                    "{}",
                    ColorOutput::error("Input ended before the board was terminated")
                )?;
            }
        }
        Ok(())
    }

    fn randomize(&mut self) -> Result<()> {
        let max_side = RANDOM_MAX_SIDE.min(self.settings.board.max_dimension);
        let population = random_population(&mut self.rng, max_side)?;
        self.adopt(population)?;
        writeln!(self.output, "{}", ColorOutput::success("Random board generated"))?;
        Ok(())
    }

    /// Make a loaded board the one the next game starts from
    fn adopt(&mut self, population: Population) -> Result<()> {
        self.settings.board.width = population.width;
        self.settings.board.height = population.height;
        self.settings.display.alive_glyph = population.alive_glyph;
        self.settings.display.dead_glyph = population.dead_glyph;

        write!(self.output, "{}", ReportFormatter::format_population(&population))?;
        self.population = Some(population);
        Ok(())
    }

    fn show(&mut self, topic: InstructionTopic) -> Result<()> {
        write!(self.output, "{}", topic.text(self.settings.rules.birth))?;
        Ok(())
    }

    fn reject(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{}", ColorOutput::error(message))?;
        Ok(())
    }

    fn prompt(&mut self) -> Result<Option<String>> {
        write!(self.output, "{}", ColorOutput::success("> "))?;
        self.output.flush()?;
        self.read_line()
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read from input")?;
        Ok((read > 0).then_some(line))
    }
}
