//! # Loss-of-Propulsion Reliability Model
//!
//! Probability that a ship loses propulsion power during a risk time
//! interval and fails to restore it before grounding.
//!
//! ## Methodology
//!
//! 1. **Triggering events**: equipment failures with exponential arrival
//!    times over the risk time interval
//! 2. **Loss-of-propulsion scenarios**: minimal cut sets of triggering events
//!    (AND gate)
//! 3. **Startup events**: start/restart actions with a shifted lognormal
//!    completion time, evaluated at the time available before grounding
//! 4. **Power restoration event trees**: OR over startup sequences, each
//!    an AND over its startup events
//! 5. **Operating modes**: independent scenarios combined by an OR gate over
//!    "loss AND restoration fails"
//!
//! All events are assumed independent.
//!
//! ## References
//!
//! [1] Rausand, M. "Reliability of Safety-Critical Systems", Wiley, 2014
//! [2] IEC 61025: Fault Tree Analysis

pub mod distribution;
pub mod event_tree;
pub mod events;
pub mod machinery;
pub mod monte_carlo;

pub use distribution::*;
pub use event_tree::*;
pub use events::*;
pub use machinery::*;
pub use monte_carlo::*;
