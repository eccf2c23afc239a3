//! Linear step wizards nested inside a screen.

use std::fmt;
use std::marker::PhantomData;

use crate::error::FlowError;

/// A step in a fixed, ordered wizard sequence.
pub trait WizardStep: Copy + Eq + fmt::Debug + 'static {
    /// Every step, in order. Must not be empty.
    const SEQUENCE: &'static [Self];

    /// Button target key (`data-step` / `data-next`).
    fn key(self) -> u8;

    fn title(self) -> &'static str;

    fn from_key(key: u8) -> Option<Self> {
        Self::SEQUENCE.iter().copied().find(|s| s.key() == key)
    }
}

/// Exactly one active step at a time.
#[derive(Debug, Clone)]
pub struct StepWizard<S: WizardStep> {
    active: usize,
    _steps: PhantomData<S>,
}

impl<S: WizardStep> Default for StepWizard<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: WizardStep> StepWizard<S> {
    pub fn new() -> Self {
        Self {
            active: 0,
            _steps: PhantomData,
        }
    }

    pub fn active(&self) -> S {
        S::SEQUENCE[self.active]
    }

    pub fn is_active(&self, step: S) -> bool {
        self.active() == step
    }

    /// Zero-based position of the active step.
    pub fn position(&self) -> usize {
        self.active
    }

    pub fn len(&self) -> usize {
        S::SEQUENCE.len()
    }

    pub fn is_empty(&self) -> bool {
        S::SEQUENCE.is_empty()
    }

    pub fn is_last(&self) -> bool {
        self.active + 1 == S::SEQUENCE.len()
    }

    /// Step following `step` in the sequence, if any.
    pub fn next_after(step: S) -> Option<S> {
        let idx = Self::index_of(step)?;
        S::SEQUENCE.get(idx + 1).copied()
    }

    /// Show the first step again.
    pub fn reset(&mut self) {
        self.active = 0;
    }

    /// Move forward one step from `from` to the step keyed `to`.
    pub fn advance(&mut self, from: S, to: u8) -> Result<S, FlowError> {
        self.step(from, to, 1)
    }

    /// Move back one step from `from` to the step keyed `to`.
    pub fn retreat(&mut self, from: S, to: u8) -> Result<S, FlowError> {
        self.step(from, to, -1)
    }

    fn step(&mut self, from: S, to: u8, direction: isize) -> Result<S, FlowError> {
        if !self.is_active(from) {
            return Err(FlowError::StepNotActive(from.key()));
        }
        let target = S::from_key(to).ok_or(FlowError::UnknownStep(to))?;
        let target_idx = Self::index_of(target).ok_or(FlowError::UnknownStep(to))?;
        if target_idx as isize - self.active as isize != direction {
            return Err(FlowError::UnknownStep(to));
        }
        self.active = target_idx;
        Ok(target)
    }

    fn index_of(step: S) -> Option<usize> {
        S::SEQUENCE.iter().position(|s| *s == step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Three {
        A,
        B,
        C,
    }

    impl WizardStep for Three {
        const SEQUENCE: &'static [Self] = &[Three::A, Three::B, Three::C];

        fn key(self) -> u8 {
            match self {
                Three::A => 1,
                Three::B => 2,
                Three::C => 3,
            }
        }

        fn title(self) -> &'static str {
            "step"
        }
    }

    #[test]
    fn starts_on_first_step() {
        let w: StepWizard<Three> = StepWizard::new();
        assert_eq!(w.active(), Three::A);
        assert_eq!(w.len(), 3);
        assert!(!w.is_last());
    }

    #[test]
    fn advance_and_retreat_one_step() {
        let mut w: StepWizard<Three> = StepWizard::new();
        assert_eq!(w.advance(Three::A, 2), Ok(Three::B));
        assert_eq!(w.advance(Three::B, 3), Ok(Three::C));
        assert!(w.is_last());
        assert_eq!(w.retreat(Three::C, 2), Ok(Three::B));
        assert_eq!(w.active(), Three::B);
    }

    #[test]
    fn missing_or_non_adjacent_target_is_rejected() {
        let mut w: StepWizard<Three> = StepWizard::new();
        assert_eq!(w.advance(Three::A, 9), Err(FlowError::UnknownStep(9)));
        assert_eq!(w.advance(Three::A, 3), Err(FlowError::UnknownStep(3)));
        assert_eq!(w.retreat(Three::A, 1), Err(FlowError::UnknownStep(1)));
        assert_eq!(w.active(), Three::A);
    }

    #[test]
    fn button_on_inactive_step_does_nothing() {
        let mut w: StepWizard<Three> = StepWizard::new();
        assert_eq!(w.advance(Three::B, 3), Err(FlowError::StepNotActive(2)));
        assert_eq!(w.active(), Three::A);
    }

    #[test]
    fn reset_returns_to_first() {
        let mut w: StepWizard<Three> = StepWizard::new();
        w.advance(Three::A, 2).unwrap();
        w.reset();
        assert_eq!(w.position(), 0);
        assert_eq!(StepWizard::<Three>::next_after(Three::C), None);
        assert_eq!(StepWizard::<Three>::next_after(Three::A), Some(Three::B));
    }
}
