//! Feeder (intake + elevator) trait

/// Trait for the ball feeder mechanism
///
/// The feeder combines the intake rollers, the pneumatic intake arm and the
/// drop catches that hold a preloaded ball.
pub trait Feeder {
    /// Run the feeder rollers at the given fraction of full output
    fn set_default(&mut self, value: f32);

    /// Extend the drop catches
    fn lock_intake(&mut self);

    /// Raise the intake arm
    fn raise_intake(&mut self);

    /// Lower the intake arm
    fn lower_intake(&mut self);

    /// Retract the drop catches so the intake falls into position
    fn drop_intake(&mut self);

    /// Push the staged ball into the shooter
    fn fire(&mut self);
}
