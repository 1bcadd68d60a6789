//! Shared rate gate for external calls.

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

/// Leaky-bucket gate: at most one permit per `interval`, shared by every
/// caller holding a reference. `acquire` suspends until the caller's slot
/// arrives; concurrent callers are handed consecutive slots in lock order,
/// so the interval holds across all workers combined.
#[derive(Debug)]
pub struct RateGate {
    interval: Duration,
    next_slot: Mutex<Instant>,
}

impl RateGate {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_slot: Mutex::new(Instant::now()),
        }
    }

    /// Wait for the next free slot. Returns once the minimum interval since
    /// the previous permit has elapsed.
    pub async fn acquire(&self) {
        let slot = {
            let mut next = self.next_slot.lock().await;
            let now = Instant::now();
            let slot = if *next > now { *next } else { now };
            *next = slot + self.interval;
            slot
        };
        tokio::time::sleep_until(slot).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn first_acquire_is_immediate() {
        let gate = RateGate::new(Duration::from_millis(500));
        let start = Instant::now();
        gate.acquire().await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn sequential_acquires_are_spaced_by_interval() {
        let gate = RateGate::new(Duration::from_millis(500));
        let start = Instant::now();
        gate.acquire().await;
        gate.acquire().await;
        gate.acquire().await;
        assert!(start.elapsed() >= Duration::from_millis(1000));
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_acquires_serialize_through_one_gate() {
        use std::sync::Arc;

        let gate = Arc::new(RateGate::new(Duration::from_millis(200)));
        let start = Instant::now();

        let tasks: Vec<_> = (0..4)
            .map(|_| {
                let gate = gate.clone();
                tokio::spawn(async move {
                    gate.acquire().await;
                    start.elapsed()
                })
            })
            .collect();

        let mut elapsed: Vec<Duration> = Vec::new();
        for task in tasks {
            elapsed.push(task.await.unwrap());
        }
        elapsed.sort();

        // Four permits span at least three full intervals.
        assert!(elapsed[3] >= Duration::from_millis(600));
        // Every consecutive pair is at least one interval apart.
        for pair in elapsed.windows(2) {
            assert!(pair[1] - pair[0] >= Duration::from_millis(200));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn idle_gate_does_not_accumulate_debt() {
        let gate = RateGate::new(Duration::from_millis(100));
        gate.acquire().await;
        tokio::time::sleep(Duration::from_secs(5)).await;

        // After a long idle stretch the next acquire is immediate, not
        // backed up behind phantom slots.
        let start = Instant::now();
        gate.acquire().await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }
}
