#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// A worker finished probing one identifier.
    ProbeCompleted {
        identifier: crate::Identifier,
        outcome: crate::ProbeOutcome,
    },
}
