//! Cox-Ross-Rubinstein binomial lattice.
//!
//! The lattice is recombining: node `(i, j)` is reached after `j` up-moves
//! and `i - j` down-moves, so step `i` holds `i + 1` nodes. Only one step is
//! alive at a time. A single buffer of `N + 1` [`LatticeNode`]s is allocated
//! per valuation and rolled back in place, giving O(N) space and O(N²) time.
//!
//! ## Discretisation
//!
//! - dt = T / N
//! - u = e^(σ√dt), d = 1 / u
//! - p = (e^((r-q)dt) - d) / (u - d)
//! - S(i, j) = S·e^((2j - i)·σ√dt)
//!
//! Node spots are evaluated directly from the exponent rather than by
//! repeated multiplication, so there is no drift across wide steps.

use std::sync::atomic::{AtomicBool, Ordering};

use pricer_core::types::{ParameterSet, PriceQuote, PricingError};

/// Minimum step width before the intra-step loop is split across threads.
#[cfg(feature = "parallel")]
pub const PARALLEL_THRESHOLD: usize = 1024;

/// One lattice node: the underlying price and the option values there.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LatticeNode {
    /// Underlying price at this node
    pub spot: f64,
    /// Call value at this node
    pub call: f64,
    /// Put value at this node
    pub put: f64,
}

impl LatticeNode {
    /// Terminal node: option values are the intrinsic payoffs.
    #[inline]
    pub fn terminal(spot: f64, strike: f64) -> Self {
        Self {
            spot,
            call: (spot - strike).max(0.0),
            put: (strike - spot).max(0.0),
        }
    }
}

/// Exercise rule applied during backward induction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatticeExercise {
    /// Compare continuation with immediate exercise at every node (American).
    Early,
    /// Continuation value only (European on the same lattice).
    AtExpiry,
}

impl LatticeExercise {
    #[inline]
    fn settle(self, intrinsic: f64, continuation: f64) -> f64 {
        match self {
            LatticeExercise::Early => intrinsic.max(continuation),
            LatticeExercise::AtExpiry => continuation,
        }
    }
}

/// CRR step parameters derived from a parameter set and a step count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrrParameters {
    /// Time step dt = T / N
    pub dt: f64,
    /// Up factor u
    pub up: f64,
    /// Down factor d = 1 / u
    pub down: f64,
    /// Risk-neutral up probability p
    pub probability: f64,
    /// One-step discount factor e^(-r·dt)
    pub discount: f64,
    /// ln(u) = σ√dt
    pub log_up: f64,
}

impl CrrParameters {
    /// Derives the CRR parameters.
    ///
    /// # Errors
    /// - `PricingError::InvalidStepCount` if `steps == 0`
    /// - `PricingError::Domain` if `params` violates any input invariant
    ///
    /// `p` is not clamped to [0, 1]. With extreme drift relative to σ√dt it
    /// can leave that interval; [`BinomialLattice::new`] rejects such
    /// parameters, see [`CrrParameters::is_arbitrage_free`].
    pub fn new(params: &ParameterSet, steps: usize) -> Result<Self, PricingError> {
        if steps == 0 {
            return Err(PricingError::InvalidStepCount { steps });
        }
        params.validate()?;

        let dt = params.maturity() / steps as f64;
        let log_up = params.volatility() * dt.sqrt();
        let up = log_up.exp();
        let down = 1.0 / up;
        let growth = ((params.rate() - params.dividend_yield()) * dt).exp();

        Ok(Self {
            dt,
            up,
            down,
            probability: (growth - down) / (up - down),
            discount: (-params.rate() * dt).exp(),
            log_up,
        })
    }

    /// Underlying price at node `(step, up_moves)` for initial spot `spot`.
    #[inline]
    pub fn node_spot(&self, spot: f64, step: usize, up_moves: usize) -> f64 {
        debug_assert!(up_moves <= step);
        let net_up = 2.0 * up_moves as f64 - step as f64;
        spot * (net_up * self.log_up).exp()
    }

    /// Whether p lies in [0, 1].
    pub fn is_arbitrage_free(&self) -> bool {
        (0.0..=1.0).contains(&self.probability)
    }
}

/// Allocates `width` zeroed nodes, failing instead of aborting when the
/// request is larger than the allocator can serve.
fn node_buffer(width: usize, steps: usize) -> Result<Vec<LatticeNode>, PricingError> {
    let mut nodes = Vec::new();
    nodes
        .try_reserve_exact(width)
        .map_err(|_| PricingError::InvalidStepCount { steps })?;
    nodes.resize(width, LatticeNode::default());
    Ok(nodes)
}

/// A binomial lattice for one parameter set, with its node buffer.
///
/// The buffer is sized once in [`BinomialLattice::new`] and never resized.
/// Each lattice is owned by a single valuation; nothing is shared between
/// calls.
#[derive(Debug, Clone)]
pub struct BinomialLattice {
    spot: f64,
    strike: f64,
    steps: usize,
    crr: CrrParameters,
    nodes: Vec<LatticeNode>,
    #[cfg(feature = "parallel")]
    scratch: Vec<LatticeNode>,
}

impl BinomialLattice {
    /// Builds the lattice and allocates its `steps + 1` node buffer.
    ///
    /// # Errors
    /// - `PricingError::InvalidStepCount` if `steps == 0` or the node buffer
    ///   cannot be allocated
    /// - `PricingError::Domain` if `params` violates any input invariant
    /// - `PricingError::NonArbitrageFreeLattice` if p falls outside [0, 1]
    pub fn new(params: &ParameterSet, steps: usize) -> Result<Self, PricingError> {
        let width = steps
            .checked_add(1)
            .ok_or(PricingError::InvalidStepCount { steps })?;
        let crr = CrrParameters::new(params, steps)?;
        if !crr.is_arbitrage_free() {
            return Err(PricingError::NonArbitrageFreeLattice {
                probability: crr.probability,
                steps,
            });
        }

        Ok(Self {
            spot: params.spot(),
            strike: params.strike(),
            steps,
            crr,
            nodes: node_buffer(width, steps)?,
            #[cfg(feature = "parallel")]
            scratch: if steps >= PARALLEL_THRESHOLD {
                node_buffer(width, steps)?
            } else {
                Vec::new()
            },
        })
    }

    /// Number of time steps N.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// The CRR parameters of this lattice.
    pub fn crr(&self) -> &CrrParameters {
        &self.crr
    }

    /// Values call and put by backward induction.
    ///
    /// # Errors
    /// `PricingError::Cancelled` if `cancel` is set; the flag is checked once
    /// before each step.
    pub fn rollback(
        &mut self,
        exercise: LatticeExercise,
        cancel: Option<&AtomicBool>,
    ) -> Result<PriceQuote, PricingError> {
        self.fill_terminal();

        for step in (0..self.steps).rev() {
            if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                return Err(PricingError::Cancelled { step });
            }
            self.roll_step(step, exercise);
        }

        let root = self.nodes[0];
        Ok(PriceQuote::new(root.call, root.put))
    }

    fn fill_terminal(&mut self) {
        let (spot, strike, steps, crr) = (self.spot, self.strike, self.steps, self.crr);
        for (j, node) in self.nodes.iter_mut().enumerate() {
            *node = LatticeNode::terminal(crr.node_spot(spot, steps, j), strike);
        }
    }

    fn roll_step(&mut self, step: usize, exercise: LatticeExercise) {
        if self.splits_step(step) {
            self.roll_step_parallel(step, exercise);
        } else {
            self.roll_step_in_place(step, exercise);
        }
    }

    /// Overwrites `nodes[..=step]` with the values at `step`.
    ///
    /// Ascending `j` keeps the update in place: `nodes[j + 1]` still holds
    /// the step + 1 value when `nodes[j]` is written.
    fn roll_step_in_place(&mut self, step: usize, exercise: LatticeExercise) {
        let (spot, strike, crr) = (self.spot, self.strike, self.crr);
        for j in 0..=step {
            let next = roll_node(
                &crr,
                self.nodes[j],
                self.nodes[j + 1],
                crr.node_spot(spot, step, j),
                strike,
                exercise,
            );
            self.nodes[j] = next;
        }
    }

    #[cfg(feature = "parallel")]
    fn splits_step(&self, step: usize) -> bool {
        step + 1 >= PARALLEL_THRESHOLD && !self.scratch.is_empty()
    }

    #[cfg(not(feature = "parallel"))]
    fn splits_step(&self, _step: usize) -> bool {
        false
    }

    #[cfg(not(feature = "parallel"))]
    fn roll_step_parallel(&mut self, step: usize, exercise: LatticeExercise) {
        self.roll_step_in_place(step, exercise);
    }

    /// Writes step values into `scratch` from `nodes` across the rayon pool,
    /// then swaps the buffers.
    #[cfg(feature = "parallel")]
    fn roll_step_parallel(&mut self, step: usize, exercise: LatticeExercise) {
        use rayon::prelude::*;

        let (spot, strike, crr) = (self.spot, self.strike, self.crr);
        let nodes = &self.nodes;
        self.scratch[..=step]
            .par_iter_mut()
            .enumerate()
            .for_each(|(j, out)| {
                *out = roll_node(
                    &crr,
                    nodes[j],
                    nodes[j + 1],
                    crr.node_spot(spot, step, j),
                    strike,
                    exercise,
                );
            });
        std::mem::swap(&mut self.nodes, &mut self.scratch);
    }
}

/// One backward-induction update from the (down, up) children.
#[inline]
fn roll_node(
    crr: &CrrParameters,
    down: LatticeNode,
    up: LatticeNode,
    spot: f64,
    strike: f64,
    exercise: LatticeExercise,
) -> LatticeNode {
    let p = crr.probability;
    let continuation_call = crr.discount * (p * up.call + (1.0 - p) * down.call);
    let continuation_put = crr.discount * (p * up.put + (1.0 - p) * down.put);

    LatticeNode {
        spot,
        call: exercise.settle(spot - strike, continuation_call),
        put: exercise.settle(strike - spot, continuation_put),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn textbook() -> ParameterSet {
        ParameterSet::new(100.0, 100.0, 1.0, 0.05, 0.0, 0.2).unwrap()
    }

    #[test]
    fn test_crr_parameters() {
        let crr = CrrParameters::new(&textbook(), 100).unwrap();
        assert_relative_eq!(crr.dt, 0.01, epsilon = 1e-15);
        assert_relative_eq!(crr.log_up, 0.02, epsilon = 1e-15);
        assert_relative_eq!(crr.up * crr.down, 1.0, epsilon = 1e-15);
        assert_relative_eq!(crr.discount, (-0.0005_f64).exp(), epsilon = 1e-15);

        let expected_p = ((0.0005_f64).exp() - crr.down) / (crr.up - crr.down);
        assert_relative_eq!(crr.probability, expected_p, epsilon = 1e-15);
        assert!(crr.is_arbitrage_free());
    }

    #[test]
    fn test_zero_steps_rejected() {
        let result = CrrParameters::new(&textbook(), 0);
        assert_eq!(result, Err(PricingError::InvalidStepCount { steps: 0 }));
    }

    #[test]
    fn test_step_count_overflow_rejected() {
        let result = BinomialLattice::new(&textbook(), usize::MAX);
        assert!(matches!(
            result,
            Err(PricingError::InvalidStepCount { steps: usize::MAX })
        ));
    }

    #[test]
    fn test_drift_above_volatility_rejected() {
        // r = 5%, σ = 0.1%: e^(r·dt) sits above u, so p is about 3
        let params = ParameterSet::from_percent(100.0, 100.0, 1.0, 5.0, 0.0, 0.1).unwrap();
        let crr = CrrParameters::new(&params, 100).unwrap();
        assert!(!crr.is_arbitrage_free());

        match BinomialLattice::new(&params, 100) {
            Err(PricingError::NonArbitrageFreeLattice { probability, steps }) => {
                assert_eq!(steps, 100);
                assert_relative_eq!(probability, crr.probability);
                assert!(probability > 1.0);
            }
            other => panic!("Expected non-arbitrage-free lattice, got {:?}", other),
        }
    }

    #[test]
    fn test_dividend_above_volatility_rejected() {
        // q dominates: e^((r-q)·dt) falls below d, so p is negative
        let params = ParameterSet::from_percent(100.0, 100.0, 1.0, 0.0, 5.0, 0.1).unwrap();
        match BinomialLattice::new(&params, 100) {
            Err(PricingError::NonArbitrageFreeLattice { probability, .. }) => {
                assert!(probability < 0.0);
            }
            other => panic!("Expected non-arbitrage-free lattice, got {:?}", other),
        }
    }

    #[test]
    fn test_more_steps_restore_valid_probability() {
        // |r - q|·sqrt(dt) < σ once dt is small enough
        let params = ParameterSet::from_percent(100.0, 100.0, 1.0, 5.0, 0.0, 1.0).unwrap();
        assert!(BinomialLattice::new(&params, 10).is_err());
        let lattice = BinomialLattice::new(&params, 100).unwrap();
        assert!(lattice.crr().is_arbitrage_free());
    }

    #[test]
    fn test_node_spot_matches_power_form() {
        let crr = CrrParameters::new(&textbook(), 50).unwrap();
        for (i, j) in [(0, 0), (1, 0), (1, 1), (10, 3), (50, 50), (50, 0)] {
            let power_form =
                100.0 * crr.up.powi(j as i32) * crr.down.powi((i - j) as i32);
            assert_relative_eq!(crr.node_spot(100.0, i, j), power_form, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_node_spot_recombines() {
        // up then down returns to the starting price
        let crr = CrrParameters::new(&textbook(), 10).unwrap();
        assert_relative_eq!(crr.node_spot(100.0, 2, 1), 100.0, epsilon = 1e-12);
        assert_eq!(crr.node_spot(100.0, 0, 0), 100.0);
    }

    #[test]
    fn test_terminal_node_payoffs() {
        let itm = LatticeNode::terminal(120.0, 100.0);
        assert_eq!(itm.call, 20.0);
        assert_eq!(itm.put, 0.0);

        let otm = LatticeNode::terminal(80.0, 100.0);
        assert_eq!(otm.call, 0.0);
        assert_eq!(otm.put, 20.0);
    }

    #[test]
    fn test_single_step_by_hand() {
        let params = textbook();
        let mut lattice = BinomialLattice::new(&params, 1).unwrap();
        let crr = *lattice.crr();
        let quote = lattice.rollback(LatticeExercise::AtExpiry, None).unwrap();

        let up_spot = 100.0 * crr.up;
        let down_spot = 100.0 * crr.down;
        let expected_call = crr.discount * crr.probability * (up_spot - 100.0);
        let expected_put = crr.discount * (1.0 - crr.probability) * (100.0 - down_spot);
        assert_relative_eq!(quote.call(), expected_call, epsilon = 1e-12);
        assert_relative_eq!(quote.put(), expected_put, epsilon = 1e-12);
    }

    #[test]
    fn test_early_exercise_at_root_when_deep_itm() {
        // Deep ITM put with high rate: immediate exercise dominates
        let params = ParameterSet::new(20.0, 100.0, 1.0, 0.10, 0.0, 0.2).unwrap();
        let mut lattice = BinomialLattice::new(&params, 50).unwrap();
        let quote = lattice.rollback(LatticeExercise::Early, None).unwrap();
        assert_relative_eq!(quote.put(), 80.0, epsilon = 1e-12);
    }

    #[test]
    fn test_european_lattice_close_to_closed_form() {
        let mut lattice = BinomialLattice::new(&textbook(), 100).unwrap();
        let quote = lattice.rollback(LatticeExercise::AtExpiry, None).unwrap();
        // CRR with N = 100 sits about 0.02 below Black-Scholes at the money
        assert_relative_eq!(quote.call(), 10.450583572185565, epsilon = 0.03);
        assert_relative_eq!(quote.put(), 5.573526022256971, epsilon = 0.03);
    }

    #[test]
    fn test_rollback_is_repeatable() {
        let mut lattice = BinomialLattice::new(&textbook(), 64).unwrap();
        let first = lattice.rollback(LatticeExercise::Early, None).unwrap();
        let second = lattice.rollback(LatticeExercise::Early, None).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_cancelled_before_first_step() {
        let flag = AtomicBool::new(true);
        let mut lattice = BinomialLattice::new(&textbook(), 100).unwrap();
        let result = lattice.rollback(LatticeExercise::Early, Some(&flag));
        assert_eq!(result, Err(PricingError::Cancelled { step: 99 }));
    }

    #[test]
    fn test_unset_flag_does_not_cancel() {
        let flag = AtomicBool::new(false);
        let mut lattice = BinomialLattice::new(&textbook(), 100).unwrap();
        let with_flag = lattice.rollback(LatticeExercise::Early, Some(&flag)).unwrap();
        let without = lattice.rollback(LatticeExercise::Early, None).unwrap();
        assert_eq!(with_flag, without);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_rollback_matches_sequential_values() {
        let params = ParameterSet::new(100.0, 105.0, 1.0, 0.05, 0.03, 0.25).unwrap();
        let steps = PARALLEL_THRESHOLD + 200;
        let mut lattice = BinomialLattice::new(&params, steps).unwrap();
        let parallel = lattice.rollback(LatticeExercise::Early, None).unwrap();

        // Without a scratch buffer every step rolls back in place
        let mut sequential = lattice.clone();
        sequential.scratch.clear();
        let reference = sequential.rollback(LatticeExercise::Early, None).unwrap();

        assert_relative_eq!(parallel.call(), reference.call(), epsilon = 1e-12);
        assert_relative_eq!(parallel.put(), reference.put(), epsilon = 1e-12);
    }
}
