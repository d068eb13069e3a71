//! # Gate Composition
//!
//! Loss-of-propulsion and power-restoration models built from independent
//! leaf events:
//!
//! ```text
//!  StartUpEvent ──AND──▶ StartupEventSequence ──OR──▶ PowerRestorationEventTree ─┐
//!                                                                                 ├─▶ Scenario ──▶ MachinerySystemOperatingMode
//!  TriggeringEvent ──AND──▶ LossOfPropulsionScenario ─────────────────────────────┘
//! ```
//!
//! `update(available_time)` refreshes every startup event first and then the
//! composites above it, in one call. The argument is validated before any
//! event is touched, so a rejected update leaves the graph unchanged.

use crate::error::{ensure_non_negative, GroundingRiskError, Result};

use super::events::{StartUpEvent, TriggeringEvent};

/// Probability that every independent input occurs
pub fn and_gate<I: IntoIterator<Item = f64>>(probabilities: I) -> f64 {
    probabilities.into_iter().product()
}

/// Probability that at least one independent input occurs.
///
/// Evaluated as 1 − exp(Σ ln(1 − p)) with `ln_1p`/`exp_m1`, which keeps
/// inputs far below machine epsilon from cancelling to zero. A single
/// input is returned unchanged.
pub fn or_gate<I: IntoIterator<Item = f64>>(probabilities: I) -> f64 {
    let mut probabilities = probabilities.into_iter().peekable();
    let Some(first) = probabilities.next() else {
        return 0.0;
    };
    if probabilities.peek().is_none() {
        return first;
    }
    let log_none = (-first).ln_1p() + probabilities.map(|p| (-p).ln_1p()).sum::<f64>();
    -log_none.exp_m1()
}

// ============================================================================
// RESTORATION SIDE
// ============================================================================

/// Startup events that must all succeed for one restoration path.
#[derive(Debug, Clone)]
pub struct StartupEventSequence {
    events: Vec<StartUpEvent>,
    probability: f64,
}

impl StartupEventSequence {
    pub fn new(events: Vec<StartUpEvent>) -> Result<Self> {
        if events.is_empty() {
            return Err(GroundingRiskError::EmptyCollection {
                entity: "StartupEventSequence",
                item: "startup event",
            });
        }
        let mut sequence = Self {
            events,
            probability: 0.0,
        };
        sequence.recompute();
        Ok(sequence)
    }

    pub fn update(&mut self, available_time: f64) -> Result<()> {
        let available_time = ensure_non_negative("available_time", available_time)?;
        self.refresh(available_time);
        Ok(())
    }

    pub(crate) fn refresh(&mut self, available_time: f64) {
        for event in &mut self.events {
            event.refresh(available_time);
        }
        self.recompute();
    }

    fn recompute(&mut self) {
        self.probability = and_gate(self.events.iter().map(StartUpEvent::probability));
    }

    /// Probability that the whole sequence succeeds
    pub fn probability(&self) -> f64 {
        self.probability
    }

    pub fn events(&self) -> &[StartUpEvent] {
        &self.events
    }
}

/// Alternative restoration paths; power is restored if any one succeeds.
///
/// An empty tree has probability 0 (no way to restore power).
#[derive(Debug, Clone)]
pub struct PowerRestorationEventTree {
    sequences: Vec<StartupEventSequence>,
    probability: f64,
}

impl PowerRestorationEventTree {
    pub fn new(sequences: Vec<StartupEventSequence>) -> Self {
        let mut tree = Self {
            sequences,
            probability: 0.0,
        };
        tree.recompute();
        tree
    }

    pub fn update(&mut self, available_time: f64) -> Result<()> {
        let available_time = ensure_non_negative("available_time", available_time)?;
        self.refresh(available_time);
        Ok(())
    }

    pub(crate) fn refresh(&mut self, available_time: f64) {
        for sequence in &mut self.sequences {
            sequence.refresh(available_time);
        }
        self.recompute();
    }

    fn recompute(&mut self) {
        self.probability = or_gate(self.sequences.iter().map(StartupEventSequence::probability));
    }

    /// Probability of restoring propulsion power in time
    pub fn probability(&self) -> f64 {
        self.probability
    }

    pub fn sequences(&self) -> &[StartupEventSequence] {
        &self.sequences
    }
}

// ============================================================================
// LOSS SIDE
// ============================================================================

/// Minimal cut set of triggering events: propulsion is lost only if all occur.
#[derive(Debug, Clone)]
pub struct LossOfPropulsionScenario {
    triggering_events: Vec<TriggeringEvent>,
    probability: f64,
}

impl LossOfPropulsionScenario {
    pub fn new(triggering_events: Vec<TriggeringEvent>) -> Result<Self> {
        if triggering_events.is_empty() {
            return Err(GroundingRiskError::EmptyCollection {
                entity: "LossOfPropulsionScenario",
                item: "triggering event",
            });
        }
        let probability = and_gate(triggering_events.iter().map(TriggeringEvent::probability));
        Ok(Self {
            triggering_events,
            probability,
        })
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }

    pub fn triggering_events(&self) -> &[TriggeringEvent] {
        &self.triggering_events
    }
}

// ============================================================================
// SCENARIOS AND MODES
// ============================================================================

/// A way of losing propulsion together with the ways of recovering from it.
#[derive(Debug, Clone)]
pub struct Scenario {
    name: String,
    loss: LossOfPropulsionScenario,
    restoration: PowerRestorationEventTree,
}

impl Scenario {
    pub fn new(
        name: impl Into<String>,
        loss: LossOfPropulsionScenario,
        restoration: PowerRestorationEventTree,
    ) -> Self {
        Self {
            name: name.into(),
            loss,
            restoration,
        }
    }

    /// Only the restoration tree depends on the available time.
    pub fn update(&mut self, available_time: f64) -> Result<()> {
        self.restoration.update(available_time)
    }

    pub(crate) fn refresh(&mut self, available_time: f64) {
        self.restoration.refresh(available_time);
    }

    /// Loss occurs AND restoration fails
    pub fn probability_of_grounding(&self) -> f64 {
        (1.0 - self.restoration.probability()) * self.loss.probability()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn loss(&self) -> &LossOfPropulsionScenario {
        &self.loss
    }

    pub fn restoration(&self) -> &PowerRestorationEventTree {
        &self.restoration
    }
}

/// All scenarios possible in one machinery configuration.
///
/// P_grounding = 1 − Π_s (1 − (1 − P_restoration,s) · P_loss,s).
/// With no scenarios the mode never grounds.
#[derive(Debug, Clone)]
pub struct MachinerySystemOperatingMode {
    name: String,
    scenarios: Vec<Scenario>,
    probability_of_grounding: f64,
}

impl MachinerySystemOperatingMode {
    pub fn new(name: impl Into<String>, scenarios: Vec<Scenario>) -> Self {
        let mut mode = Self {
            name: name.into(),
            scenarios,
            probability_of_grounding: 0.0,
        };
        mode.recompute();
        mode
    }

    /// Refresh every restoration tree for a new time budget
    pub fn update(&mut self, available_time: f64) -> Result<()> {
        let available_time = ensure_non_negative("available_time", available_time)?;
        for scenario in &mut self.scenarios {
            scenario.refresh(available_time);
        }
        self.recompute();
        Ok(())
    }

    fn recompute(&mut self) {
        self.probability_of_grounding =
            or_gate(self.scenarios.iter().map(Scenario::probability_of_grounding));
        debug_assert!((0.0..=1.0).contains(&self.probability_of_grounding));
    }

    pub fn probability_of_grounding(&self) -> f64 {
        self.probability_of_grounding
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reliability::events::StartUpEventParameters;

    fn event(params: StartUpEventParameters, t: f64) -> StartUpEvent {
        StartUpEvent::new(params, t).unwrap()
    }

    fn genset_start() -> StartUpEventParameters {
        StartUpEventParameters::new(35.0, 1.0, 14.0, 1.0)
    }

    fn hsg_start() -> StartUpEventParameters {
        StartUpEventParameters::new(12.0, 1.0, 3.0, 1.0)
    }

    fn me_restart() -> StartUpEventParameters {
        StartUpEventParameters::new(50.0, 1.2, 20.0, 0.4)
    }

    #[test]
    fn test_gates() {
        assert!((and_gate([0.5, 0.5]) - 0.25).abs() < 1e-12);
        assert!((or_gate([0.5, 0.5]) - 0.75).abs() < 1e-12);
        // Empty gates
        assert_eq!(and_gate(std::iter::empty()), 1.0);
        assert_eq!(or_gate(std::iter::empty()), 0.0);
        // A certain input dominates
        assert_eq!(or_gate([1.0, 0.2]), 1.0);
    }

    #[test]
    fn test_or_gate_tiny_probabilities() {
        let p = or_gate([1e-20]);
        assert!((p - 1e-20).abs() < 1e-32, "got {p}");

        let p = or_gate([1e-20, 3e-20]);
        assert!((p - 4e-20).abs() < 1e-32, "got {p}");
    }

    #[test]
    fn test_mode_keeps_tiny_grounding_probability() {
        // Loss ≈ 3e-8 and restoration almost certain leaves ≈ 3e-8 × 1e-12
        let loss = LossOfPropulsionScenario::new(vec![TriggeringEvent::new(3e-9, 10.0).unwrap()]).unwrap();
        let nearly_certain = StartUpEventParameters::new(1.0, 0.01, 0.0, 1.0 - 1e-12);
        let restoration =
            PowerRestorationEventTree::new(vec![StartupEventSequence::new(vec![event(nearly_certain, 1e6)]).unwrap()]);
        let mode = MachinerySystemOperatingMode::new("tiny", vec![Scenario::new("me", loss, restoration)]);

        let p = mode.probability_of_grounding();
        assert!(p > 0.0);
        assert!((p - 3e-20).abs() < 1e-22, "got {p}");
    }

    #[test]
    fn test_sequence_weakest_link() {
        let t = 40.0;
        let dg = event(genset_start(), t);
        let hsg = event(hsg_start(), t);
        let weakest = dg.probability().min(hsg.probability());

        let sequence = StartupEventSequence::new(vec![dg, hsg]).unwrap();
        assert!(sequence.probability() <= weakest + 1e-15);
    }

    #[test]
    fn test_single_event_sequence_equals_event() {
        let e = event(me_restart(), 90.0);
        let p = e.probability();
        let sequence = StartupEventSequence::new(vec![e]).unwrap();
        assert_eq!(sequence.probability(), p);
    }

    #[test]
    fn test_empty_sequence_rejected() {
        assert!(StartupEventSequence::new(Vec::new()).is_err());
    }

    #[test]
    fn test_tree_best_path() {
        let t = 45.0;
        let a = StartupEventSequence::new(vec![event(me_restart(), t)]).unwrap();
        let b = StartupEventSequence::new(vec![event(genset_start(), t), event(hsg_start(), t)])
            .unwrap();
        let best = a.probability().max(b.probability());

        let tree = PowerRestorationEventTree::new(vec![a, b]);
        assert!(tree.probability() >= best);
        assert!(tree.probability() <= 1.0);
    }

    #[test]
    fn test_tree_two_half_paths() {
        // Nominal 0.5 and an effectively certain completion time
        let half = StartUpEventParameters::new(1.0, 0.01, 0.0, 0.5);
        let a = StartupEventSequence::new(vec![event(half, 1e6)]).unwrap();
        let b = StartupEventSequence::new(vec![event(half, 1e6)]).unwrap();
        assert!((a.probability() - 0.5).abs() < 1e-9);

        let tree = PowerRestorationEventTree::new(vec![a, b]);
        assert!((tree.probability() - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_single_path_tree_equals_sequence() {
        let sequence = StartupEventSequence::new(vec![event(hsg_start(), 20.0)]).unwrap();
        let p = sequence.probability();
        let tree = PowerRestorationEventTree::new(vec![sequence]);
        assert_eq!(tree.probability(), p);
    }

    #[test]
    fn test_update_propagates_through_zero() {
        // All events start at zero probability and must recover after update
        let mut tree = PowerRestorationEventTree::new(vec![
            StartupEventSequence::new(vec![event(me_restart(), 0.0)]).unwrap(),
            StartupEventSequence::new(vec![event(genset_start(), 0.0), event(hsg_start(), 0.0)])
                .unwrap(),
        ]);
        assert_eq!(tree.probability(), 0.0);

        tree.update(120.0).unwrap();
        let rebuilt = PowerRestorationEventTree::new(vec![
            StartupEventSequence::new(vec![event(me_restart(), 120.0)]).unwrap(),
            StartupEventSequence::new(vec![event(genset_start(), 120.0), event(hsg_start(), 120.0)])
                .unwrap(),
        ]);
        assert!((tree.probability() - rebuilt.probability()).abs() < 1e-15);
        assert!(tree.probability() > 0.0);

        // Back to zero
        tree.update(0.0).unwrap();
        assert_eq!(tree.probability(), 0.0);
    }

    #[test]
    fn test_rejected_update_leaves_tree_unchanged() {
        let mut tree = PowerRestorationEventTree::new(vec![
            StartupEventSequence::new(vec![event(hsg_start(), 30.0)]).unwrap(),
        ]);
        let before = tree.probability();
        assert!(tree.update(f64::NAN).is_err());
        assert_eq!(tree.probability(), before);
        assert_eq!(tree.sequences()[0].events()[0].available_time(), 30.0);
    }

    #[test]
    fn test_loss_scenario_cut_set() {
        let dg1 = TriggeringEvent::new(6e-9, 3600.0).unwrap();
        let dg2 = TriggeringEvent::new(6e-9, 3600.0).unwrap();
        let expected = dg1.probability() * dg2.probability();

        let loss = LossOfPropulsionScenario::new(vec![dg1, dg2]).unwrap();
        assert!((loss.probability() - expected).abs() < 1e-30);

        assert!(LossOfPropulsionScenario::new(Vec::new()).is_err());
    }

    #[test]
    fn test_mode_without_scenarios() {
        let mode = MachinerySystemOperatingMode::new("EMPTY", Vec::new());
        assert_eq!(mode.probability_of_grounding(), 0.0);
    }

    #[test]
    fn test_mode_grounding_equals_loss_when_no_restoration() {
        let loss = LossOfPropulsionScenario::new(vec![TriggeringEvent::new(3e-9, 10.0).unwrap()])
            .unwrap();
        let restoration = PowerRestorationEventTree::new(vec![
            StartupEventSequence::new(vec![event(me_restart(), 0.0)]).unwrap(),
        ]);
        assert_eq!(restoration.probability(), 0.0);

        let mode = MachinerySystemOperatingMode::new(
            "ME",
            vec![Scenario::new("loss of main engine", loss, restoration)],
        );
        assert!((mode.probability_of_grounding() - 3e-8).abs() < 1e-15);
    }

    #[test]
    fn test_mode_update_touches_only_restoration() {
        let loss = LossOfPropulsionScenario::new(vec![TriggeringEvent::new(1e-3, 10.0).unwrap()])
            .unwrap();
        let loss_probability = loss.probability();
        let restoration = PowerRestorationEventTree::new(vec![
            StartupEventSequence::new(vec![event(hsg_start(), 0.0)]).unwrap(),
        ]);
        let mut mode = MachinerySystemOperatingMode::new(
            "PTI",
            vec![Scenario::new("loss of HSG", loss, restoration)],
        );
        let at_zero = mode.probability_of_grounding();
        assert!((at_zero - loss_probability).abs() < 1e-15);

        mode.update(60.0).unwrap();
        assert!(mode.probability_of_grounding() < at_zero);
        assert_eq!(mode.scenarios()[0].loss().probability(), loss_probability);

        let restored = mode.scenarios()[0].restoration().probability();
        let expected = (1.0 - restored) * loss_probability;
        assert!((mode.probability_of_grounding() - expected).abs() < 1e-15);
    }

    #[test]
    fn test_mode_combines_scenarios_independently() {
        let make = |rate: f64| {
            let loss = LossOfPropulsionScenario::new(vec![TriggeringEvent::new(rate, 100.0).unwrap()])
                .unwrap();
            Scenario::new("s", loss, PowerRestorationEventTree::new(Vec::new()))
        };
        let a = make(1e-3);
        let b = make(2e-3);
        let pa = a.probability_of_grounding();
        let pb = b.probability_of_grounding();

        let mode = MachinerySystemOperatingMode::new("two", vec![a, b]);
        let expected = 1.0 - (1.0 - pa) * (1.0 - pb);
        assert!((mode.probability_of_grounding() - expected).abs() < 1e-15);
    }
}
