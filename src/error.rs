use std::fmt;

/// Returned when a queue is constructed with a capacity of zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CapacityError;

impl fmt::Display for CapacityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("queue capacity must be greater than zero")
    }
}

impl std::error::Error for CapacityError {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DrainError {
    /// The drain target is the queue being drained.
    SelfDrain,
}

impl fmt::Display for DrainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrainError::SelfDrain => write!(f, "cannot drain a queue into itself"),
        }
    }
}

impl std::error::Error for DrainError {}

impl DrainError {
    pub fn is_self_drain(&self) -> bool {
        matches!(self, DrainError::SelfDrain)
    }
}

/// A blocked consumer was woken through its [`Interrupt`](crate::Interrupt)
/// before an element became available.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Interrupted;

impl fmt::Display for Interrupted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("wait interrupted before an element became available")
    }
}

impl std::error::Error for Interrupted {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SendError {
    Closed,
}

impl fmt::Display for SendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SendError::Closed => write!(f, "send failed because the sink is closed"),
        }
    }
}

impl std::error::Error for SendError {}

impl SendError {
    pub fn is_closed(&self) -> bool {
        matches!(self, SendError::Closed)
    }
}
