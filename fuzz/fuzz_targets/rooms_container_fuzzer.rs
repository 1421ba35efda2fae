//! Fuzz target for the live room list
//!
//! Drives the real container and the reference model with the same
//! arbitrary operation sequence.
//!
//! # Strategy
//!
//! - Churn: rooms opened, closed and moved while a search is pending
//! - Interaction: activations of listed, stale and missing rooms
//! - Time: arbitrary gaps, including ones shorter than the debounce
//!
//! # Invariants
//!
//! - Real container and model expose the same observable state
//! - At most one entry is selected, and it matches the selected-room slot
//! - The view lists exactly the source's rooms, once each
//! - Settled filter flags agree with the criteria

#![no_main]

use std::time::Duration;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use lobby_core::ContainerConfig;
use lobby_harness::{InvariantRegistry, ModelLobby, Operation, SimLobby};

#[derive(Debug, Arbitrary)]
struct Scenario {
    debounce_ms: u16,
    ops: Vec<Operation>,
}

fuzz_target!(|scenario: Scenario| {
    let debounce = Duration::from_millis(1 + u64::from(scenario.debounce_ms % 999));
    let invariants = InvariantRegistry::standard();

    let mut model = ModelLobby::new(debounce);
    let Ok(mut real) = SimLobby::new(ContainerConfig { filter_debounce: debounce }) else {
        return;
    };

    for (i, op) in scenario.ops.iter().take(256).enumerate() {
        model.apply(op);
        real.apply(op);

        assert_eq!(
            model.observable_state(),
            real.observable_state(),
            "divergence at operation {i}: {op:?}"
        );
        invariants.assert_all(&real.snapshot(), &format!("after operation {i}: {op:?}"));
    }
});
