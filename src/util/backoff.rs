//! Adaptive spin-yield backoff for compare-and-swap retry loops.
//!
//! Used by the blocking queue while it waits for a capacity or availability
//! slot: transient contention is absorbed with CPU spins before the thread
//! yields to the OS scheduler.

/// Adaptive backoff that starts with CPU spins before yielding the thread.
#[derive(Debug, Default)]
pub struct SpinYield {
    spins: u32,
}

impl SpinYield {
    /// Creates a new adaptive backoff helper.
    pub const fn new() -> Self {
        Self { spins: 0 }
    }

    /// Perform the next backoff step.
    ///
    /// The strategy is:
    /// - For the first few invocations, spin with exponential backoff.
    /// - After the spin budget is exhausted, yield to the scheduler.
    pub fn snooze(&mut self) {
        if self.spins < 6 {
            let spins = 1 << self.spins;
            for _ in 0..spins {
                std::hint::spin_loop();
            }
            self.spins += 1;
        } else {
            std::thread::yield_now();
            self.spins = 0;
        }
    }
}
