use std::fmt;

/// Phase of the exchange at the head of a resolver's queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolverState {
    /// Nothing queued.
    Idle,
    /// Opening the stream connection.
    Connecting,
    Sending,
    /// Waiting for the 2-byte length prefix of a stream response.
    ReceivingLength,
    ReceivingBody,
    /// Handing the outcome to the head query's callback.
    Dispatching,
    /// Every handle is gone and the queue has drained.
    Closed,
}

impl ResolverState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolverState::Idle => "idle",
            ResolverState::Connecting => "connecting",
            ResolverState::Sending => "sending",
            ResolverState::ReceivingLength => "receiving_length",
            ResolverState::ReceivingBody => "receiving_body",
            ResolverState::Dispatching => "dispatching",
            ResolverState::Closed => "closed",
        }
    }
}

impl fmt::Display for ResolverState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
