/// Outcome of queuing one message for one subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Queued on the subscriber's outbound channel
    Delivered,
    /// Outbound queue full; the subscriber is too slow and the message was dropped
    Dropped,
    /// Writer task already gone; the connection is about to unregister
    Closed,
    /// No such connection (already disconnected)
    UnknownConnection,
}

impl Delivery {
    /// Metrics label for this outcome
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Delivered => "delivered",
            Self::Dropped => "dropped",
            Self::Closed => "closed",
            Self::UnknownConnection => "unknown_connection",
        }
    }
}

/// Tally of a fan-out across all registered subscribers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FanoutReport {
    pub delivered: usize,
    pub dropped: usize,
    pub closed: usize,
}

impl FanoutReport {
    pub fn record(&mut self, delivery: Delivery) {
        match delivery {
            Delivery::Delivered => self.delivered += 1,
            Delivery::Dropped => self.dropped += 1,
            Delivery::Closed => self.closed += 1,
            Delivery::UnknownConnection => {}
        }
    }

    pub fn failed(&self) -> usize {
        self.dropped + self.closed
    }

    pub fn attempted(&self) -> usize {
        self.delivered + self.failed()
    }
}
