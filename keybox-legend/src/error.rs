use keybox_scene::handle::HandleKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KeyboxLegendError {
    /// A handler that does not override primitive creation was invoked. This
    /// is a programming contract violation, not a runtime condition.
    #[error("handler does not implement primitive creation")]
    CreateNotImplemented,

    #[error("no handler registered for handle kind {0:?}")]
    UnresolvedHandler(HandleKind),

    #[error("handler for {expected} handles given a {got:?} handle")]
    MismatchedHandle {
        expected: &'static str,
        got: HandleKind,
    },

    #[error("explicit handler list has no entry for child {0}")]
    MissingChildHandler(usize),

    #[error("handler produced no primitives")]
    EmptyHandlerOutput,
}
