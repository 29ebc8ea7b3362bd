//! Outcome enumeration and multilinear outcome polynomials.
//!
//! An *outcome* is one full assignment of eat/not-eat to a set of players,
//! represented as a boolean vector (`true` = ate). An [`OutcomePolynomial`]
//! attaches a real coefficient to every outcome and evaluates as
//!
//! ```text
//! f(p) = sum_j coef[j] * prod_i (p[i] if outcome[j][i] else 1 - p[i])
//! ```
//!
//! Multilinearity is what makes the whole engine work: each probability
//! appears at most once per term, so partial derivatives reduce to a masked
//! re-evaluation with sign-flipped coefficients, and the Newton step's
//! Jacobian rows come out of the same evaluation path as the residuals.

use crate::nash::error::EngineError;

/// Enumerate all `2^arity` outcome vectors of the given length.
///
/// Order is fixed: `true` sorts before `false` at every position, so the
/// all-true vector comes first and the all-false vector last. Each call
/// produces a fresh, fully materialized sequence.
///
/// # Errors
/// Returns [`EngineError::InvalidArity`] when `2^arity` cannot be represented
/// (arity >= 64).
pub fn enumerate_outcomes(arity: usize) -> Result<Vec<Vec<bool>>, EngineError> {
    if arity >= usize::BITS as usize {
        return Err(EngineError::InvalidArity(arity));
    }

    let count = 1usize << arity;
    let mut outcomes = Vec::with_capacity(count);
    for code in 0..count {
        let mut outcome = Vec::with_capacity(arity);
        for position in 0..arity {
            // Bit 0 of the code drives the last position; a clear bit means
            // "ate", which yields the all-true-first ordering.
            let bit = (code >> (arity - 1 - position)) & 1;
            outcome.push(bit == 0);
        }
        outcomes.push(outcome);
    }
    Ok(outcomes)
}

/// A multilinear polynomial over per-player probabilities, one term per
/// outcome vector.
///
/// The outcome and coefficient sequences always have equal length and every
/// outcome vector has length `arity`; both invariants are enforced at
/// construction, so evaluation can trust the shapes.
#[derive(Debug, Clone, PartialEq)]
pub struct OutcomePolynomial {
    /// Number of probability dimensions each term ranges over.
    arity: usize,
    /// One boolean vector per term.
    outcomes: Vec<Vec<bool>>,
    /// One real coefficient per term.
    coefficients: Vec<f64>,
}

impl OutcomePolynomial {
    /// Build a polynomial from parallel outcome and coefficient sequences.
    ///
    /// # Errors
    /// Returns [`EngineError::ShapeMismatch`] when the sequences differ in
    /// length or any outcome vector's length differs from the first's.
    pub fn new(outcomes: Vec<Vec<bool>>, coefficients: Vec<f64>) -> Result<Self, EngineError> {
        if outcomes.len() != coefficients.len() {
            return Err(EngineError::ShapeMismatch {
                expected: outcomes.len(),
                found: coefficients.len(),
            });
        }
        let arity = outcomes.first().map_or(0, |outcome| outcome.len());
        for outcome in &outcomes {
            if outcome.len() != arity {
                return Err(EngineError::ShapeMismatch {
                    expected: arity,
                    found: outcome.len(),
                });
            }
        }
        Ok(Self { arity, outcomes, coefficients })
    }

    /// Number of probability dimensions.
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Number of terms (outcome/coefficient pairs).
    pub fn num_terms(&self) -> usize {
        self.coefficients.len()
    }

    /// Evaluate the polynomial at the given probability vector.
    ///
    /// # Errors
    /// Returns [`EngineError::ShapeMismatch`] when `probs.len() != arity`.
    pub fn evaluate(&self, probs: &[f64]) -> Result<f64, EngineError> {
        let mask = vec![true; probs.len()];
        self.evaluate_masked(probs, &mask, None)
    }

    /// Evaluate with a per-dimension mask and an optional alternate
    /// coefficient vector.
    ///
    /// Masked-out dimensions contribute no factor to the per-term product, as
    /// if that player's action were certain. The override coefficients, when
    /// supplied, stand in for the stored ones without mutating the
    /// polynomial; the derivative computation uses this to apply its sign
    /// convention.
    ///
    /// # Errors
    /// Returns [`EngineError::ShapeMismatch`] when `probs` or `mask` disagree
    /// with the arity, or the override length disagrees with the stored
    /// coefficient count.
    pub fn evaluate_masked(
        &self,
        probs: &[f64],
        mask: &[bool],
        coefficients_override: Option<&[f64]>,
    ) -> Result<f64, EngineError> {
        if probs.len() != self.arity {
            return Err(EngineError::ShapeMismatch { expected: self.arity, found: probs.len() });
        }
        if mask.len() != probs.len() {
            return Err(EngineError::ShapeMismatch { expected: probs.len(), found: mask.len() });
        }
        let coefficients = match coefficients_override {
            Some(coefs) => {
                if coefs.len() != self.coefficients.len() {
                    return Err(EngineError::ShapeMismatch {
                        expected: self.coefficients.len(),
                        found: coefs.len(),
                    });
                }
                coefs
            }
            None => self.coefficients.as_slice(),
        };

        let mut result = 0.0;
        for (outcome, &coefficient) in self.outcomes.iter().zip(coefficients) {
            let mut term = coefficient;
            for i in 0..self.arity {
                if !mask[i] {
                    continue;
                }
                term *= if outcome[i] { probs[i] } else { 1.0 - probs[i] };
            }
            result += term;
        }
        Ok(result)
    }

    /// Partial derivatives of the polynomial, one per input dimension.
    ///
    /// Multilinearity makes this a re-evaluation: the derivative of a term
    /// with respect to `p[i]` drops the `p[i]` / `(1 - p[i])` factor and
    /// carries sign `+1` when the outcome bit is true, `-1` when false. So we
    /// negate the coefficients of the false-bit terms and evaluate with
    /// dimension `i` masked out.
    ///
    /// # Errors
    /// Returns [`EngineError::ShapeMismatch`] when `probs.len() != arity`.
    pub fn partial_derivatives(&self, probs: &[f64]) -> Result<Vec<f64>, EngineError> {
        if probs.len() != self.arity {
            return Err(EngineError::ShapeMismatch { expected: self.arity, found: probs.len() });
        }
        let mut derivatives = Vec::with_capacity(self.arity);
        let mut mask = vec![true; self.arity];
        for i in 0..self.arity {
            mask[i] = false;
            let mut signed_coefs = self.coefficients.clone();
            for (outcome, coef) in self.outcomes.iter().zip(signed_coefs.iter_mut()) {
                if !outcome[i] {
                    *coef = -*coef;
                }
            }
            derivatives.push(self.evaluate_masked(probs, &mask, Some(&signed_coefs))?);
            mask[i] = true;
        }
        Ok(derivatives)
    }

    /// Term-wise sum of two polynomials over the same outcome space.
    ///
    /// # Errors
    /// Returns [`EngineError::InconsistentOutcomes`] when the term counts or
    /// any outcome vector disagree.
    pub fn add(&self, other: &OutcomePolynomial) -> Result<OutcomePolynomial, EngineError> {
        if self.outcomes.len() != other.outcomes.len() {
            return Err(EngineError::InconsistentOutcomes);
        }
        let mut coefficients = Vec::with_capacity(self.coefficients.len());
        for j in 0..self.outcomes.len() {
            if self.outcomes[j] != other.outcomes[j] {
                return Err(EngineError::InconsistentOutcomes);
            }
            coefficients.push(self.coefficients[j] + other.coefficients[j]);
        }
        OutcomePolynomial::new(self.outcomes.clone(), coefficients)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_enumeration_count_and_shape() {
        for arity in 0..=6 {
            let outcomes = enumerate_outcomes(arity).unwrap();
            assert_eq!(outcomes.len(), 1 << arity);
            for outcome in &outcomes {
                assert_eq!(outcome.len(), arity);
            }
        }
    }

    #[test]
    fn test_enumeration_distinct_and_ordered() {
        let outcomes = enumerate_outcomes(3).unwrap();
        for i in 0..outcomes.len() {
            for j in (i + 1)..outcomes.len() {
                assert_ne!(outcomes[i], outcomes[j]);
            }
        }
        // true sorts before false: all-true first, all-false last
        assert_eq!(outcomes[0], vec![true, true, true]);
        assert_eq!(outcomes[1], vec![true, true, false]);
        assert_eq!(outcomes[7], vec![false, false, false]);
    }

    #[test]
    fn test_enumeration_invalid_arity() {
        assert_eq!(enumerate_outcomes(64), Err(EngineError::InvalidArity(64)));
    }

    #[test]
    fn test_construction_shape_checks() {
        let outcomes = enumerate_outcomes(2).unwrap();
        assert!(OutcomePolynomial::new(outcomes.clone(), vec![1.0; 4]).is_ok());
        assert!(OutcomePolynomial::new(outcomes.clone(), vec![1.0; 3]).is_err());

        let mut ragged = outcomes;
        ragged[2] = vec![true];
        assert!(OutcomePolynomial::new(ragged, vec![1.0; 4]).is_err());
    }

    #[test]
    fn test_evaluate_known_polynomial() {
        // f(p, q) = p*q over arity 2: coefficient 1 on the all-true outcome
        let outcomes = enumerate_outcomes(2).unwrap();
        let coefs: Vec<f64> =
            outcomes.iter().map(|o| if o.iter().all(|&b| b) { 1.0 } else { 0.0 }).collect();
        let poly = OutcomePolynomial::new(outcomes, coefs).unwrap();
        assert!((poly.evaluate(&[0.5, 0.4]).unwrap() - 0.2).abs() < 1e-12);
        assert!((poly.evaluate(&[1.0, 1.0]).unwrap() - 1.0).abs() < 1e-12);
        assert!(poly.evaluate(&[0.0, 0.7]).unwrap().abs() < 1e-12);
    }

    #[test]
    fn test_evaluate_sums_to_coef_expectation() {
        // With all coefficients 1, the outcome probabilities sum to 1.
        let outcomes = enumerate_outcomes(4).unwrap();
        let poly = OutcomePolynomial::new(outcomes, vec![1.0; 16]).unwrap();
        let value = poly.evaluate(&[0.3, 0.9, 0.1, 0.6]).unwrap();
        assert!((value - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_evaluate_matches_all_true_mask() {
        let mut rng = StdRng::seed_from_u64(7);
        let outcomes = enumerate_outcomes(3).unwrap();
        let coefs: Vec<f64> = (0..8).map(|_| rng.gen_range(-5.0..5.0)).collect();
        let poly = OutcomePolynomial::new(outcomes, coefs).unwrap();
        let probs = [0.2, 0.8, 0.5];
        let full = poly.evaluate(&probs).unwrap();
        let masked = poly.evaluate_masked(&probs, &[true, true, true], None).unwrap();
        assert_eq!(full, masked);
    }

    #[test]
    fn test_evaluate_shape_errors() {
        let outcomes = enumerate_outcomes(2).unwrap();
        let poly = OutcomePolynomial::new(outcomes, vec![1.0; 4]).unwrap();
        assert!(poly.evaluate(&[0.5]).is_err());
        assert!(poly.evaluate_masked(&[0.5, 0.5], &[true], None).is_err());
        assert!(poly.evaluate_masked(&[0.5, 0.5], &[true, true], Some(&[1.0])).is_err());
    }

    #[test]
    fn test_partial_derivatives_match_finite_differences() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..20 {
            let arity = rng.gen_range(1..=4);
            let outcomes = enumerate_outcomes(arity).unwrap();
            let coefs: Vec<f64> =
                (0..outcomes.len()).map(|_| rng.gen_range(-10.0..10.0)).collect();
            let poly = OutcomePolynomial::new(outcomes, coefs).unwrap();
            let probs: Vec<f64> = (0..arity).map(|_| rng.gen_range(0.0..1.0)).collect();

            let analytic = poly.partial_derivatives(&probs).unwrap();
            let h = 1e-6;
            for i in 0..arity {
                let mut hi = probs.clone();
                let mut lo = probs.clone();
                hi[i] += h;
                lo[i] -= h;
                let numeric =
                    (poly.evaluate(&hi).unwrap() - poly.evaluate(&lo).unwrap()) / (2.0 * h);
                assert!(
                    (analytic[i] - numeric).abs() < 1e-4,
                    "derivative {} mismatch: {} vs {}",
                    i,
                    analytic[i],
                    numeric
                );
            }
        }
    }

    #[test]
    fn test_add_polynomials() {
        let outcomes = enumerate_outcomes(2).unwrap();
        let a = OutcomePolynomial::new(outcomes.clone(), vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let b = OutcomePolynomial::new(outcomes, vec![0.5, -2.0, 1.0, 0.0]).unwrap();
        let sum = a.add(&b).unwrap();
        let value = sum.evaluate(&[0.0, 0.0]).unwrap();
        // Only the all-false outcome survives at p = (0, 0)
        assert!((value - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_add_inconsistent_outcomes() {
        let a = OutcomePolynomial::new(enumerate_outcomes(2).unwrap(), vec![1.0; 4]).unwrap();
        let b = OutcomePolynomial::new(enumerate_outcomes(1).unwrap(), vec![1.0; 2]).unwrap();
        assert_eq!(a.add(&b), Err(EngineError::InconsistentOutcomes));

        let mut reversed = enumerate_outcomes(2).unwrap();
        reversed.reverse();
        let c = OutcomePolynomial::new(reversed, vec![1.0; 4]).unwrap();
        assert_eq!(a.add(&c), Err(EngineError::InconsistentOutcomes));
    }

    #[test]
    fn test_arity_zero_polynomial_is_constant() {
        let outcomes = enumerate_outcomes(0).unwrap();
        assert_eq!(outcomes, vec![Vec::<bool>::new()]);
        let poly = OutcomePolynomial::new(outcomes, vec![2.5]).unwrap();
        assert_eq!(poly.evaluate(&[]).unwrap(), 2.5);
        assert!(poly.partial_derivatives(&[]).unwrap().is_empty());
    }
}
