use crate::ProgressState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Publish a progress snapshot to whoever renders it.
    EmitProgress(ProgressState),
    /// Every identifier has reported back.
    RunComplete,
}
