//! Probe core: pure run state machine, mapping lookup and reconciliation.
mod effect;
mod identifier;
mod mapping;
mod msg;
mod progress;
mod reconcile;
mod state;
mod template;
mod update;

pub use effect::Effect;
pub use identifier::{parse_identifiers, Identifier};
pub use mapping::Mapping;
pub use msg::Msg;
pub use progress::{ProgressCadence, ProgressState, DEFAULT_PROGRESS_EVERY};
pub use reconcile::{reconcile, MatchRecord, Reconciliation};
pub use state::{ProbeOutcome, RunState};
pub use template::{UrlTemplate, DEFAULT_URL_TEMPLATE, PLACEHOLDER};
pub use update::update;
