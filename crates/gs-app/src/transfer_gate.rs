//! Mutual exclusion for the shared pasteboard.
//!
//! The pasteboard is a single global slot. A protocol handoff holds the gate
//! from its pasteboard write until its activation request has returned, so a
//! concurrent handoff can never overwrite a message before the receiver was
//! asked to read it.

use tokio::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
pub struct TransferGate {
    slot: Mutex<()>,
}

/// Held for the write-through-activation critical section.
pub type TransferPermit<'a> = MutexGuard<'a, ()>;

impl TransferGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn enter(&self) -> TransferPermit<'_> {
        self.slot.lock().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn test_second_entry_waits_for_first_permit() {
        let gate = Arc::new(TransferGate::new());
        let permit = gate.enter().await;

        let waiter = {
            let gate = gate.clone();
            tokio::spawn(async move {
                let _permit = gate.enter().await;
            })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!waiter.is_finished());

        drop(permit);
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .unwrap()
            .unwrap();
    }
}
