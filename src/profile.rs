//! Camera power-draw profile generation.

use rand::{Rng, SeedableRng, rngs::StdRng};

/// A draw-rate generator that models how hard the camera works over a
/// shooting scenario.
///
/// `DrawProfile` produces a per-step power consumption rate built from a
/// baseline, a sinusoidal swing across the scenario (bursts of activity
/// versus idle framing), and seeded Gaussian noise. The engine feeds the
/// sampled rate into the battery before each drain step.
///
/// # Examples
///
/// ```
/// use cambat_sim::profile::DrawProfile;
///
/// let mut profile = DrawProfile::new(
///     1.0,  // base_rate - average draw in units per minute
///     0.5,  // amp - swing between burst and idle
///     0.0,  // phase_rad - no phase shift
///     0.05, // noise_std - small shot-to-shot variation
///     48,   // steps - scenario length
///     42,   // seed - for reproducible randomness
/// );
///
/// let rate = profile.rate_at(12);
/// assert!(rate >= 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct DrawProfile {
    /// Baseline draw rate in units per minute.
    pub base_rate: f32,

    /// Amplitude of the sinusoidal swing in units per minute.
    pub amp: f32,

    /// Phase offset of the sinusoidal pattern in radians.
    pub phase_rad: f32,

    /// Standard deviation of the Gaussian noise in units per minute.
    pub noise_std: f32,

    /// Number of steps in one scenario cycle.
    pub steps: usize,

    /// Random number generator for noise generation.
    rng: StdRng,
}

impl DrawProfile {
    /// Creates a new draw profile with the specified parameters.
    ///
    /// # Arguments
    ///
    /// * `base_rate` - Baseline draw rate in units per minute
    /// * `amp` - Amplitude of the sinusoidal swing
    /// * `phase_rad` - Phase offset in radians
    /// * `noise_std` - Standard deviation of the Gaussian noise
    /// * `steps` - Number of steps in one scenario cycle
    /// * `seed` - Random seed for reproducible noise
    pub fn new(
        base_rate: f32,
        amp: f32,
        phase_rad: f32,
        noise_std: f32,
        steps: usize,
        seed: u64,
    ) -> Self {
        Self {
            base_rate,
            amp,
            phase_rad,
            noise_std,
            steps: steps.max(1),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Samples the draw rate at a specific step.
    ///
    /// The rate combines the baseline, the sinusoidal swing at the
    /// step's position in the cycle, and one draw of Gaussian noise.
    /// The result is clamped so the rate is never negative.
    ///
    /// # Arguments
    ///
    /// * `step` - The simulation step
    ///
    /// # Returns
    ///
    /// The draw rate in units per minute at the specified step
    pub fn rate_at(&mut self, step: usize) -> f32 {
        let cycle_pos = (step % self.steps) as f32 / self.steps as f32; // [0,1)
        let angle = 2.0 * std::f32::consts::PI * cycle_pos + self.phase_rad;
        let sinus = angle.sin();

        let noise = if self.noise_std > 0.0 {
            // Gaussian-ish noise via Box-Muller
            let u1: f32 = self.rng.random::<f32>().clamp(1e-6, 1.0);
            let u2: f32 = self.rng.random::<f32>();
            let z0 = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f32::consts::PI * u2).cos();
            z0 * self.noise_std
        } else {
            0.0
        };

        let rate = self.base_rate + self.amp * sinus + noise;
        rate.max(0.0) // the camera never feeds charge back through the draw path
    }
}
