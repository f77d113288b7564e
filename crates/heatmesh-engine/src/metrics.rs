//! Per-node run counters.

use crate::exchange::ExchangeReport;

/// Counters accumulated by one [`HeatNode`](crate::HeatNode) over a run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NodeMetrics {
    /// Steps fully completed (stencil, exchange, swap).
    pub steps_completed: u64,
    /// Boundary messages sent.
    pub messages_sent: u64,
    /// Current-phase messages received directly.
    pub messages_received: u64,
    /// Next-phase messages parked in a pending slot.
    pub early_buffered: u64,
    /// Pending messages consumed at the start of a step.
    pub early_drained: u64,
    /// Polls that made no progress.
    pub blocked_polls: u64,
    /// Cumulative time spent in the stencil, in microseconds.
    pub stencil_us: u64,
}

impl NodeMetrics {
    /// Fold one completed exchange into the totals.
    pub fn record(&mut self, report: &ExchangeReport) {
        self.steps_completed += 1;
        self.messages_sent += u64::from(report.sent);
        self.messages_received += u64::from(report.received);
        self.early_buffered += u64::from(report.buffered_early);
        self.early_drained += u64::from(report.drained_early);
    }

    /// Every edge this node consumed, however it arrived.
    pub fn edges_consumed(&self) -> u64 {
        self.messages_received + self.early_drained
    }
}
