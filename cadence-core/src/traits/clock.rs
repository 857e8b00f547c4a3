//! Monotonic time source

/// Trait for the controller clock
///
/// Implementations return a monotonic microsecond counter, typically the
/// FPGA timestamp of the robot controller.
pub trait Clock {
    /// Current time in microseconds since an arbitrary epoch
    fn now_us(&self) -> u64;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_us(&self) -> u64 {
        (**self).now_us()
    }
}
