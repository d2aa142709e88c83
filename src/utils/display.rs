//! Display and output formatting utilities

use crate::config::DisplayConfig;
use crate::game_of_life::{Grid, Population, Transition};
use crate::simulation::RunReport;
use std::io::{self, Write};

/// Draws a grid one glyph per cell, one line per row.
///
/// Rendering is where transition tags are consumed: every cell's
/// `last_transition` is reset to `Neutral` once drawn.
#[derive(Debug, Clone)]
pub struct Renderer {
    pub alive_glyph: char,
    pub dead_glyph: char,
    pub color: bool,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::from_config(&DisplayConfig::default())
    }
}

impl Renderer {
    pub fn from_config(config: &DisplayConfig) -> Self {
        Self {
            alive_glyph: config.alive_glyph,
            dead_glyph: config.dead_glyph,
            color: config.color && ColorOutput::supports_color(),
        }
    }

    /// Plain renderer, no escape codes
    pub fn plain(alive_glyph: char, dead_glyph: char) -> Self {
        Self {
            alive_glyph,
            dead_glyph,
            color: false,
        }
    }

    /// Use the glyphs a board was written with
    pub fn with_population_glyphs(mut self, population: &Population) -> Self {
        self.alive_glyph = population.alive_glyph;
        self.dead_glyph = population.dead_glyph;
        self
    }

    /// Color for a cell, `None` for the terminal default
    pub fn cell_color(alive: bool, transition: Transition) -> Option<Color> {
        match transition {
            Transition::Died => Some(Color::Red),
            Transition::Born | Transition::Unchanged if alive => Some(Color::Green),
            _ => None,
        }
    }

    pub fn render<W: Write>(&self, grid: &mut Grid, out: &mut W) -> io::Result<()> {
        let width = grid.width();
        for (i, cell) in grid.cells_mut().iter_mut().enumerate() {
            let glyph = if cell.alive {
                self.alive_glyph
            } else {
                self.dead_glyph
            };

            match Self::cell_color(cell.alive, cell.last_transition) {
                Some(color) if self.color => {
                    write!(out, "\x1b[{}m{}\x1b[0m", color.code(), glyph)?
                }
                _ => write!(out, "{}", glyph)?,
            }
            cell.last_transition = Transition::Neutral;

            if (i + 1) % width == 0 {
                writeln!(out)?;
            }
        }
        Ok(())
    }

    /// Render into a string
    pub fn render_to_string(&self, grid: &mut Grid) -> String {
        let mut buffer = Vec::new();
        // Writing to a Vec cannot fail
        let _ = self.render(grid, &mut buffer);
        String::from_utf8_lossy(&buffer).into_owned()
    }
}

/// Formatting for the end-of-run summary
pub struct ReportFormatter;

impl ReportFormatter {
    pub fn format_text(report: &RunReport) -> String {
        let mut output = String::new();
        output.push_str(&format!(
            "Game ended. You survived {} generation(s). Total cell deaths/respawns were: {}\n",
            report.generations_survived(),
            report.total_changes
        ));
        output.push_str(&format!("Final population: {}\n", report.final_population));
        if report.stopped_early {
            output.push_str("Stopped before the population stabilized\n");
        }
        output
    }

    pub fn format_json(report: &RunReport) -> serde_json::Result<String> {
        serde_json::to_string_pretty(report)
    }

    /// Summarize a loaded population
    pub fn format_population(population: &Population) -> String {
        let mut output = String::new();
        output.push_str(&format!("Board x: {}\n", population.width));
        output.push_str(&format!("Board y: {}\n", population.height));
        output.push_str(&format!("Alive character is: {}\n", population.alive_glyph));
        output.push_str(&format!("Dead character is: {}\n", population.dead_glyph));
        output.push_str(&format!("Living cells: {}\n", population.living_count()));
        output
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    /// Check if terminal supports color
    pub fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err()
            && (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    /// Format success message
    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    /// Format error message
    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    /// Format warning message
    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    /// Format info message
    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }

    /// Menu entries
    pub fn menu(text: &str) -> String {
        Self::colored(text, Color::Magenta)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
            Color::Magenta => 35,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_of_life::{infer_population, BirthRule, LifeEngine, DEFAULT_MAX_DIMENSION};

    #[test]
    fn test_plain_render() {
        let mut grid = Grid::from_rows(
            &[vec![true, false, true], vec![false, true, false]],
            DEFAULT_MAX_DIMENSION,
        )
        .unwrap();

        let output = Renderer::plain('O', '.').render_to_string(&mut grid);
        assert_eq!(output, "O.O\n.O.\n");
    }

    #[test]
    fn test_render_consumes_transitions() {
        let mut engine = LifeEngine::create(3, 3, DEFAULT_MAX_DIMENSION, BirthRule::default()).unwrap();
        engine.set_alive(1, 1, true);
        engine.advance_generation();
        assert_eq!(engine.grid().cell(1, 1).unwrap().last_transition, Transition::Died);

        Renderer::plain('O', '.').render_to_string(engine.grid_mut());
        for (_, _, cell) in engine.grid().iter() {
            assert_eq!(cell.last_transition, Transition::Neutral);
        }
    }

    #[test]
    fn test_cell_colors() {
        assert_eq!(Renderer::cell_color(false, Transition::Died), Some(Color::Red));
        assert_eq!(Renderer::cell_color(true, Transition::Born), Some(Color::Green));
        assert_eq!(Renderer::cell_color(true, Transition::Unchanged), Some(Color::Green));
        assert_eq!(Renderer::cell_color(false, Transition::Unchanged), None);
        assert_eq!(Renderer::cell_color(true, Transition::Neutral), None);
    }

    #[test]
    fn test_colored_render() {
        let mut grid = Grid::from_rows(&[vec![true, false]], DEFAULT_MAX_DIMENSION).unwrap();
        let renderer = Renderer {
            alive_glyph: 'O',
            dead_glyph: '.',
            color: true,
        };
        let output = renderer.render_to_string(&mut grid);
        assert_eq!(output, "\x1b[32mO\x1b[0m.\n");
    }

    #[test]
    fn test_zero_generation_round_trip() {
        let text = "--+\n-++\n+--\n";
        let population = infer_population(text.as_bytes(), DEFAULT_MAX_DIMENSION).unwrap();
        let mut engine =
            LifeEngine::from_population(&population, DEFAULT_MAX_DIMENSION, BirthRule::default())
                .unwrap();

        let renderer = Renderer::plain('x', 'y').with_population_glyphs(&population);
        assert_eq!(renderer.render_to_string(engine.grid_mut()), text);
    }

    #[test]
    fn test_report_text() {
        let report = RunReport {
            generations_run: 3,
            total_changes: 7,
            final_population: 4,
            stopped_early: false,
        };
        let text = ReportFormatter::format_text(&report);
        assert!(text.contains("You survived 4 generation(s)"));
        assert!(text.contains("Total cell deaths/respawns were: 7"));
    }

    #[test]
    fn test_report_json() {
        let report = RunReport {
            generations_run: 0,
            total_changes: 0,
            final_population: 4,
            stopped_early: false,
        };
        let json = ReportFormatter::format_json(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["generations_survived"], 0);
        assert_eq!(value["final_population"], 4);
    }

    #[test]
    fn test_color_output() {
        let colored = ColorOutput::colored("test", Color::Red);
        assert!(colored.contains("test"));

        let success = ColorOutput::success("OK");
        assert!(success.contains("OK"));
    }
}
