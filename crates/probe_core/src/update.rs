use crate::{Effect, Msg, RunState};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: RunState, msg: Msg) -> (RunState, Vec<Effect>) {
    let effects = match msg {
        Msg::ProbeCompleted {
            identifier,
            outcome,
        } => {
            if state.is_complete() {
                // Late or duplicate completion; the run is already settled.
                return (state, Vec::new());
            }
            state.apply_completion(identifier, outcome);
            let progress = state.progress();
            let mut effects = Vec::with_capacity(2);
            if state.cadence().should_emit(&progress) {
                effects.push(Effect::EmitProgress(progress));
            }
            if state.is_complete() {
                effects.push(Effect::RunComplete);
            }
            effects
        }
    };

    (state, effects)
}
