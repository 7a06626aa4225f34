//! Damped oscillating rotation shared by all hexagon rings.

use embassy_time::Duration;

/// Number of concentric hexagon rings.
pub const RING_COUNT: usize = 6;

/// Starting angle (radians) of each ring, outermost first.
pub const INITIAL_ANGLES: [f32; RING_COUNT] = [0.0, 0.2, 0.4, 0.6, 0.8, 1.0];

/// Drive value the animation starts at.
pub const INITIAL_DRIVE: f32 = 1.0;

/// Per-tick drive step. Only its sign changes at runtime.
pub const DRIVE_STEP: f32 = -0.001;

/// Per-ring rotation angles driven by a single oscillating scalar.
///
/// Each [`advance`](Self::advance) moves `drive` by `drive_velocity`,
/// reverses the velocity once `|drive|` leaves the unit interval, then
/// rotates ring *i* by `drive * deltas[i]`. Angles accumulate without
/// wrapping.
#[derive(Debug, Clone, PartialEq)]
pub struct RotationField {
    angles: [f32; RING_COUNT],
    deltas: [f32; RING_COUNT],
    drive: f32,
    drive_velocity: f32,
}

impl Default for RotationField {
    fn default() -> Self {
        Self::new()
    }
}

impl RotationField {
    /// The badge's starting state: staggered angles, drive at its peak.
    #[must_use]
    pub fn new() -> Self {
        Self::with_drive(INITIAL_DRIVE, DRIVE_STEP)
    }

    /// Same ring layout, custom drive state.
    #[must_use]
    pub fn with_drive(drive: f32, drive_velocity: f32) -> Self {
        Self {
            angles: INITIAL_ANGLES,
            deltas: core::array::from_fn(ring_delta),
            drive,
            drive_velocity,
        }
    }

    /// Step the animation once.
    ///
    /// The step size is fixed per call; `_elapsed` is accepted so the
    /// frame loop can hand over its measured time, but the animation
    /// speed follows the frame rate rather than wall-clock time.
    pub fn advance(&mut self, _elapsed: Duration) {
        self.drive += self.drive_velocity;
        if libm::fabsf(self.drive) > 1.0 {
            self.drive_velocity = -self.drive_velocity;
        }

        let drive = self.drive;
        for (angle, delta) in self.angles.iter_mut().zip(self.deltas) {
            *angle += drive * delta;
        }
    }

    pub const fn angles(&self) -> &[f32; RING_COUNT] {
        &self.angles
    }

    pub const fn deltas(&self) -> &[f32; RING_COUNT] {
        &self.deltas
    }

    /// Angle of the outermost ring; the LED ring follows this one.
    pub const fn reference_angle(&self) -> f32 {
        self.angles[0]
    }

    pub const fn drive(&self) -> f32 {
        self.drive
    }

    pub const fn drive_velocity(&self) -> f32 {
        self.drive_velocity
    }
}

/// Angular coefficient of ring `index`: inner rings turn faster.
fn ring_delta(index: usize) -> f32 {
    (index + 1) as f32 * 0.01
}
