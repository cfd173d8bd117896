//! Ordered fallback plans for collaborator calls.
//!
//! A plan is a primary attempt followed by `(attempt, condition)` pairs. After
//! a failure the next pair runs only if its condition accepts the error; the
//! first success wins.

use futures::future::BoxFuture;
use std::fmt;

/// When a fallback step may run after the previous step failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptCondition {
    /// Any failure.
    OnAnyError,
    /// The failure message contains one of the markers (case-insensitive).
    OnErrorMentioning(&'static [&'static str]),
}

impl AttemptCondition {
    pub fn allows(&self, error_message: &str) -> bool {
        match self {
            Self::OnAnyError => true,
            Self::OnErrorMentioning(markers) => {
                let message = error_message.to_lowercase();
                markers.iter().any(|m| message.contains(&m.to_lowercase()))
            }
        }
    }
}

/// Result of a plan that succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempted<'a, A, T> {
    pub value: T,
    pub attempt: &'a A,
    /// Zero for the primary attempt.
    pub index: usize,
}

impl<A, T> Attempted<'_, A, T> {
    pub fn used_fallback(&self) -> bool {
        self.index > 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptPlan<A> {
    primary: A,
    fallbacks: Vec<(A, AttemptCondition)>,
}

impl<A> AttemptPlan<A> {
    pub fn new(primary: A) -> Self {
        Self {
            primary,
            fallbacks: Vec::new(),
        }
    }

    /// Adds a fallback step.
    pub fn then(mut self, attempt: A, condition: AttemptCondition) -> Self {
        self.fallbacks.push((attempt, condition));
        self
    }

    pub fn len(&self) -> usize {
        1 + self.fallbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Runs the plan, returning the first success or the last error.
    pub async fn run<'a, T, E, F>(&'a self, mut attempt: F) -> Result<Attempted<'a, A, T>, E>
    where
        F: FnMut(&'a A) -> BoxFuture<'a, Result<T, E>>,
        E: fmt::Display,
    {
        let mut error = match attempt(&self.primary).await {
            Ok(value) => {
                return Ok(Attempted {
                    value,
                    attempt: &self.primary,
                    index: 0,
                })
            }
            Err(e) => e,
        };

        for (i, (step, condition)) in self.fallbacks.iter().enumerate() {
            let message = error.to_string();
            if !condition.allows(&message) {
                return Err(error);
            }
            tracing::warn!("Attempt {} failed ({}), trying fallback", i, message);
            match attempt(step).await {
                Ok(value) => {
                    return Ok(Attempted {
                        value,
                        attempt: step,
                        index: i + 1,
                    })
                }
                Err(e) => error = e,
            }
        }

        Err(error)
    }
}
