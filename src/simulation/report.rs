//! End-of-run statistics

use serde::ser::{Serialize, SerializeStruct, Serializer};

/// What a completed (or stopped) run produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunReport {
    /// Generations that changed at least one cell
    pub generations_run: usize,
    /// Sum of births and deaths across those generations
    pub total_changes: usize,
    pub final_population: usize,
    /// The generation cap was hit before the population stabilized
    pub stopped_early: bool,
}

impl RunReport {
    /// Generations survived as shown to the player.
    ///
    /// Counts the final stable generation too, so any run with at least one
    /// changing generation reports one more than it ran; a board that is
    /// stable from the start reports 0.
    pub fn generations_survived(&self) -> usize {
        if self.generations_run > 0 {
            self.generations_run + 1
        } else {
            0
        }
    }
}

impl Serialize for RunReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("RunReport", 5)?;
        state.serialize_field("generations_run", &self.generations_run)?;
        state.serialize_field("generations_survived", &self.generations_survived())?;
        state.serialize_field("total_changes", &self.total_changes)?;
        state.serialize_field("final_population", &self.final_population)?;
        state.serialize_field("stopped_early", &self.stopped_early)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generations_survived_convention() {
        let mut report = RunReport::default();
        assert_eq!(report.generations_survived(), 0);

        report.generations_run = 1;
        assert_eq!(report.generations_survived(), 2);

        report.generations_run = 10;
        assert_eq!(report.generations_survived(), 11);
    }

    #[test]
    fn test_serialize_includes_survived() {
        let report = RunReport {
            generations_run: 2,
            total_changes: 5,
            final_population: 0,
            stopped_early: true,
        };
        let value = serde_json::to_value(report).unwrap();
        assert_eq!(value["generations_survived"], 3);
        assert_eq!(value["stopped_early"], true);
    }
}
