use serde::Serialize;
use std::fmt;

/// A counterexample lasso: a finite prefix leading into a cycle whose
/// infinite repetition violates the checked property.
///
/// The cycle is never empty; its last state has a transition back to its
/// first, so `prefix . cycle^omega` is an execution of the checked
/// system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Counterexample<S> {
    pub prefix: Vec<S>,
    pub cycle: Vec<S>,
}

impl<S> Counterexample<S> {
    pub fn new(prefix: Vec<S>, cycle: Vec<S>) -> Self {
        Self { prefix, cycle }
    }

    /// Maps every state through `f`, e.g. to project product states back
    /// to the original system.
    pub fn map_states<T>(self, mut f: impl FnMut(S) -> T) -> Counterexample<T> {
        Counterexample {
            prefix: self.prefix.into_iter().map(&mut f).collect(),
            cycle: self.cycle.into_iter().map(f).collect(),
        }
    }
}

impl<S: fmt::Debug> fmt::Display for Counterexample<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Prefix:")?;
        for s in &self.prefix {
            writeln!(f, "  {s:?}")?;
        }
        writeln!(f, "Cycle:")?;
        for s in &self.cycle {
            writeln!(f, "  {s:?}")?;
        }
        Ok(())
    }
}

/// Outcome of one verification call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationResult<S> {
    /// Every infinite run satisfies the property.
    Succeeded,
    /// Some run violates the property; the lasso witnesses it.
    Failed(Counterexample<S>),
}

impl<S> VerificationResult<S> {
    pub fn is_success(&self) -> bool {
        matches!(self, VerificationResult::Succeeded)
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, VerificationResult::Failed(_))
    }

    pub fn counterexample(&self) -> Option<&Counterexample<S>> {
        match self {
            VerificationResult::Succeeded => None,
            VerificationResult::Failed(cex) => Some(cex),
        }
    }

    /// Stable string naming the verdict, independent of witness content.
    pub fn verdict_class(&self) -> &'static str {
        match self {
            VerificationResult::Succeeded => "succeeded",
            VerificationResult::Failed(_) => "failed",
        }
    }
}

impl<S: fmt::Debug> fmt::Display for VerificationResult<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerificationResult::Succeeded => write!(f, "property holds"),
            VerificationResult::Failed(cex) => {
                writeln!(f, "property violated:")?;
                write!(f, "{cex}")
            }
        }
    }
}
