//! Shooter trait

/// Trait for the flywheel shooter
pub trait Shooter {
    /// Stop the flywheel
    fn stop(&mut self);

    /// Spin up the flywheel
    ///
    /// - `speed_fraction`: Open-loop output fraction (0.0-1.0)
    /// - `target_rpm`: Closed-loop velocity target
    fn set_default(&mut self, speed_fraction: f32, target_rpm: f32);
}
