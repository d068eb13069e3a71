//! # Accumulated Risk in a Prediction Horizon
//!
//! Converts per-interval conditional grounding probabilities into
//! unconditional ones for an event that can happen at most once in the
//! horizon.
//!
//! ## Recurrence
//!
//! ```text
//! P_i  = p_i · (1 − A_{i−1})        unconditional probability of interval i
//! A_i  = A_{i−1} + P_i               accumulated probability, A_0 = 0
//! R_i  = P_i · C_i                   unconditional risk
//! AR_i = AR_{i−1} + R_i              accumulated risk
//! ```
//!
//! For constant p the accumulated probability is 1 − (1 − p)^n.

use crate::error::{ensure_non_negative, ensure_probability, GroundingRiskError, Result};

/// Unconditional probabilities and risks over adjoining time intervals
#[derive(Debug, Clone, PartialEq)]
pub struct AccumulatedRiskInPredictionHorizon {
    conditional_risks: Vec<f64>,
    unconditional_probabilities: Vec<f64>,
    unconditional_risks: Vec<f64>,
    accumulated_probabilities: Vec<f64>,
    accumulated_risks: Vec<f64>,
}

impl AccumulatedRiskInPredictionHorizon {
    pub fn new(conditional_probabilities: &[f64], consequences: &[f64]) -> Result<Self> {
        if conditional_probabilities.len() != consequences.len() {
            return Err(GroundingRiskError::LengthMismatch {
                probabilities: conditional_probabilities.len(),
                consequences: consequences.len(),
            });
        }
        for &p in conditional_probabilities {
            ensure_probability("conditional_probability", p)?;
        }
        for &c in consequences {
            ensure_non_negative("consequence", c)?;
        }

        let n = conditional_probabilities.len();
        let mut horizon = Self {
            conditional_risks: Vec::with_capacity(n),
            unconditional_probabilities: Vec::with_capacity(n),
            unconditional_risks: Vec::with_capacity(n),
            accumulated_probabilities: Vec::with_capacity(n),
            accumulated_risks: Vec::with_capacity(n),
        };

        let mut accumulated_probability = 0.0;
        let mut accumulated_risk = 0.0;
        for (&p, &consequence) in conditional_probabilities.iter().zip(consequences) {
            // Survival up to this interval uses the value before adding it
            let unconditional_probability = p * (1.0 - accumulated_probability);
            let unconditional_risk = unconditional_probability * consequence;
            accumulated_probability += unconditional_probability;
            accumulated_risk += unconditional_risk;

            horizon.conditional_risks.push(p * consequence);
            horizon.unconditional_probabilities.push(unconditional_probability);
            horizon.unconditional_risks.push(unconditional_risk);
            horizon.accumulated_probabilities.push(accumulated_probability);
            horizon.accumulated_risks.push(accumulated_risk);
        }

        Ok(horizon)
    }

    pub fn len(&self) -> usize {
        self.unconditional_probabilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.unconditional_probabilities.is_empty()
    }

    /// Conditional probability times consequence, per interval
    pub fn conditional_risks(&self) -> &[f64] {
        &self.conditional_risks
    }

    pub fn unconditional_probabilities(&self) -> &[f64] {
        &self.unconditional_probabilities
    }

    pub fn unconditional_risks(&self) -> &[f64] {
        &self.unconditional_risks
    }

    /// Probability of grounding in any interval up to and including i
    pub fn accumulated_probabilities(&self) -> &[f64] {
        &self.accumulated_probabilities
    }

    pub fn accumulated_risks(&self) -> &[f64] {
        &self.accumulated_risks
    }

    /// Probability of grounding somewhere in the horizon
    pub fn total_probability(&self) -> f64 {
        self.accumulated_probabilities.last().copied().unwrap_or(0.0)
    }

    /// Expected cost over the horizon
    pub fn total_risk(&self) -> f64 {
        self.accumulated_risks.last().copied().unwrap_or(0.0)
    }
}
