//! The run loop: advance, render, pace, until nothing changes

use super::report::RunReport;
use crate::config::Settings;
use crate::game_of_life::LifeEngine;
use crate::utils::Renderer;
use std::io::{self, Write};
use std::time::Duration;
use tracing::info;

/// Waits between rendered frames
pub trait Pacer {
    fn pause(&mut self, delay: Duration);
}

/// Sleeps on the monotonic clock
#[derive(Debug, Default)]
pub struct SleepPacer;

impl Pacer for SleepPacer {
    fn pause(&mut self, delay: Duration) {
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
    }
}

/// Never waits
#[derive(Debug, Default)]
pub struct NoPacer;

impl Pacer for NoPacer {
    fn pause(&mut self, _delay: Duration) {}
}

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Drives a [`LifeEngine`] to completion
#[derive(Debug, Clone)]
pub struct Simulation {
    pub renderer: Renderer,
    pub delay: Duration,
    /// Stop after this many changing generations even if still evolving
    pub max_generations: Option<usize>,
    /// Clear the terminal before each frame instead of separating frames
    /// with a blank line
    pub clear_between_frames: bool,
}

impl Simulation {
    pub fn new(renderer: Renderer, delay: Duration) -> Self {
        Self {
            renderer,
            delay,
            max_generations: None,
            clear_between_frames: false,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            Renderer::from_config(&settings.display),
            Duration::from_millis(settings.display.delay_ms),
        )
    }

    pub fn with_max_generations(mut self, max_generations: Option<usize>) -> Self {
        self.max_generations = max_generations;
        self
    }

    /// Render the starting board, then advance and render each generation
    /// until one changes no cell. Stopping only ever happens between
    /// generations.
    pub fn run<W: Write>(
        &self,
        engine: &mut LifeEngine,
        pacer: &mut dyn Pacer,
        out: &mut W,
    ) -> io::Result<RunReport> {
        let mut report = RunReport::default();

        self.draw_frame(engine, out)?;

        loop {
            if let Some(max) = self.max_generations {
                if report.generations_run >= max {
                    report.stopped_early = true;
                    break;
                }
            }

            let changed = engine.advance_generation();
            if changed == 0 {
                break;
            }
            report.generations_run += 1;
            report.total_changes += changed;

            pacer.pause(self.delay);
            self.draw_frame(engine, out)?;
        }

        report.final_population = engine.grid().living_count();
        info!(
            generations = report.generations_run,
            changes = report.total_changes,
            population = report.final_population,
            stopped_early = report.stopped_early,
            "run finished"
        );
        Ok(report)
    }

    fn draw_frame<W: Write>(&self, engine: &mut LifeEngine, out: &mut W) -> io::Result<()> {
        if self.clear_between_frames {
            write!(out, "{}", CLEAR_SCREEN)?;
        } else {
            writeln!(out)?;
        }
        self.renderer.render(engine.grid_mut(), out)?;
        out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_of_life::{BirthRule, DEFAULT_MAX_DIMENSION};

    #[derive(Default)]
    struct CountingPacer {
        pauses: Vec<Duration>,
    }

    impl Pacer for CountingPacer {
        fn pause(&mut self, delay: Duration) {
            self.pauses.push(delay);
        }
    }

    fn simulation() -> Simulation {
        Simulation::new(Renderer::plain('O', '.'), Duration::from_millis(5))
    }

    fn engine_with(width: usize, height: usize, alive: &[(usize, usize)]) -> LifeEngine {
        let mut engine =
            LifeEngine::create(width, height, DEFAULT_MAX_DIMENSION, BirthRule::default()).unwrap();
        for &(x, y) in alive {
            engine.set_alive(x, y, true);
        }
        engine
    }

    #[test]
    fn test_stable_board_reports_zero() {
        let mut engine = engine_with(4, 4, &[(1, 1), (2, 1), (1, 2), (2, 2)]);
        let mut out = Vec::new();
        let report = simulation().run(&mut engine, &mut NoPacer, &mut out).unwrap();

        assert_eq!(report.generations_run, 0);
        assert_eq!(report.generations_survived(), 0);
        assert_eq!(report.total_changes, 0);
        assert_eq!(report.final_population, 4);
        assert_eq!(String::from_utf8(out).unwrap(), "\n....\n.OO.\n.OO.\n....\n");
    }

    #[test]
    fn test_isolated_cell_run() {
        let mut engine = engine_with(3, 3, &[(1, 1)]);
        let mut pacer = CountingPacer::default();
        let mut out = Vec::new();
        let report = simulation().run(&mut engine, &mut pacer, &mut out).unwrap();

        assert_eq!(report.generations_run, 1);
        assert_eq!(report.generations_survived(), 2);
        assert_eq!(report.total_changes, 1);
        assert_eq!(report.final_population, 0);
        assert_eq!(pacer.pauses, vec![Duration::from_millis(5)]);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "\n...\n.O.\n...\n\n...\n...\n...\n"
        );
    }

    #[test]
    fn test_blinker_stops_at_cap() {
        let mut engine = engine_with(5, 5, &[(1, 2), (2, 2), (3, 2)]);
        let sim = simulation().with_max_generations(Some(6));
        let report = sim.run(&mut engine, &mut NoPacer, &mut io::sink()).unwrap();

        assert!(report.stopped_early);
        assert_eq!(report.generations_run, 6);
        assert_eq!(report.total_changes, 24);
        // Even number of flips returns the blinker to horizontal
        assert_eq!(engine.grid().living_cells(), vec![(1, 2), (2, 2), (3, 2)]);
    }

    #[test]
    fn test_clear_between_frames() {
        let mut engine = engine_with(1, 1, &[]);
        let mut sim = simulation();
        sim.clear_between_frames = true;
        let mut out = Vec::new();
        sim.run(&mut engine, &mut NoPacer, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), format!("{}.\n", CLEAR_SCREEN));
    }
}
