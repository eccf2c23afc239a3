//! Simulated validation and blockchain registration sequence.
//!
//! The sequence is a fixed ordered list of stages. [`ValidationRun`] only
//! records progress; the flow controller schedules the stage timers.

/// One displayed stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationStage {
    pub progress_pct: u16,
    pub title: &'static str,
    pub message: &'static str,
}

pub const VALIDATION_STAGES: [ValidationStage; 4] = [
    ValidationStage {
        progress_pct: 25,
        title: "Checking Data",
        message: "Validating personal information...",
    },
    ValidationStage {
        progress_pct: 50,
        title: "Verifying Documents",
        message: "Authenticating uploaded documents...",
    },
    ValidationStage {
        progress_pct: 75,
        title: "Blockchain Registration",
        message: "Registering on MI_CARE blockchain...",
    },
    ValidationStage {
        progress_pct: 100,
        title: "Validation Complete",
        message: "Data successfully validated!",
    },
];

/// Result icon shown next to the progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationOutcome {
    #[default]
    Pending,
    Success,
}

/// Progress of the current run.
#[derive(Debug, Clone, Default)]
pub struct ValidationRun {
    stage: Option<usize>,
    outcome: ValidationOutcome,
    visited: Vec<usize>,
    runs_started: usize,
}

impl ValidationRun {
    /// Reset to the pending state shown before the first stage.
    pub fn restart(&mut self) {
        self.stage = None;
        self.outcome = ValidationOutcome::Pending;
        self.visited.clear();
        self.runs_started += 1;
    }

    /// Enter stage `idx`. Returns true when it is the final stage.
    pub fn enter_stage(&mut self, idx: usize) -> bool {
        self.stage = Some(idx);
        self.visited.push(idx);
        idx + 1 == VALIDATION_STAGES.len()
    }

    pub fn complete(&mut self) {
        self.outcome = ValidationOutcome::Success;
    }

    pub fn current_stage(&self) -> Option<&'static ValidationStage> {
        self.stage.map(|i| &VALIDATION_STAGES[i])
    }

    pub fn stage_index(&self) -> Option<usize> {
        self.stage
    }

    /// Width of the progress bar. 25% before the first stage fires.
    pub fn progress_pct(&self) -> u16 {
        self.current_stage()
            .map(|s| s.progress_pct)
            .unwrap_or(VALIDATION_STAGES[0].progress_pct)
    }

    pub fn outcome(&self) -> ValidationOutcome {
        self.outcome
    }

    /// Stages entered since the last restart, in order.
    pub fn visited(&self) -> &[usize] {
        &self.visited
    }

    pub fn runs_started(&self) -> usize {
        self.runs_started
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_starts_at_quarter() {
        let mut run = ValidationRun::default();
        run.restart();
        assert_eq!(run.progress_pct(), 25);
        assert!(run.current_stage().is_none());
        assert_eq!(run.outcome(), ValidationOutcome::Pending);
    }

    #[test]
    fn final_stage_is_reported() {
        let mut run = ValidationRun::default();
        run.restart();
        assert!(!run.enter_stage(0));
        assert!(!run.enter_stage(2));
        assert!(run.enter_stage(3));
        assert_eq!(run.progress_pct(), 100);
        assert_eq!(run.current_stage().map(|s| s.title), Some("Validation Complete"));
    }

    #[test]
    fn restart_clears_history() {
        let mut run = ValidationRun::default();
        run.restart();
        run.enter_stage(0);
        run.complete();
        run.restart();
        assert!(run.visited().is_empty());
        assert_eq!(run.outcome(), ValidationOutcome::Pending);
        assert_eq!(run.runs_started(), 2);
    }
}
