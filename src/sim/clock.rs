/// A simulation clock that tracks steps over a fixed scenario length.
///
/// The `Clock` converts a step count and a per-step duration in minutes
/// into a sequence of [`Tick`]s, advanced one at a time or driven to
/// completion with a callback.
///
/// # Examples
///
/// ```
/// use cambat_sim::sim::clock::Clock;
///
/// let mut clock = Clock::new(3, 30.0);
/// let mut times = Vec::new();
///
/// clock.run(|tick| times.push(tick.time_min));
/// assert_eq!(times, vec![0.0, 30.0, 60.0]);
/// ```
pub struct Clock {
    /// Current step of the simulation
    current: usize,
    /// Total steps to run in the simulation
    total: usize,
    /// Simulated duration of one step in minutes
    minutes_per_step: f32,
}

/// One position of the clock: a step index and its start time in minutes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    /// Step index, starting from 0.
    pub step: usize,
    /// Simulated time at the start of the step, in minutes.
    pub time_min: f32,
}

impl Clock {
    /// Creates a new clock.
    ///
    /// # Arguments
    ///
    /// * `total` - The total number of steps the clock will run
    /// * `minutes_per_step` - Simulated duration of one step in minutes
    pub fn new(total: usize, minutes_per_step: f32) -> Self {
        Self {
            current: 0,
            total,
            minutes_per_step,
        }
    }

    /// Advances the clock by one step.
    ///
    /// # Returns
    ///
    /// * `Some(tick)` - The step and its start time before advancing
    /// * `None` - If the clock has reached its total steps
    pub fn tick(&mut self) -> Option<Tick> {
        if self.current < self.total {
            let tick = Tick {
                step: self.current,
                time_min: self.current as f32 * self.minutes_per_step,
            };
            self.current += 1;
            Some(tick)
        } else {
            None
        }
    }

    /// Runs a function for each remaining step in the clock.
    ///
    /// # Arguments
    ///
    /// * `f` - A function called with each tick until the clock completes
    pub fn run(&mut self, mut f: impl FnMut(Tick)) {
        while let Some(tick) = self.tick() {
            f(tick);
        }
    }
}
