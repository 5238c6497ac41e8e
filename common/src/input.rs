//! Input sampling: edge detection, trigger ramps and the gearbox.
//!
//! Digital inputs are polled from the superloop. An [`EdgeDetector`] keeps the
//! previous level and reports a change exactly once, so holding a button
//! across many polls fires its action a single time. Debouncing comes from
//! the polling cadence of the gate that samples the input.
//!
//! The throttle and brake triggers are on/off switches. [`Ramp`] turns them
//! into an analog-like 0..=255 value by moving one step per control tick.

/// Highest selectable gear.
pub const MAX_GEAR: u8 = 8;

// =============================================================================
// Edge Detection
// =============================================================================

/// Direction of a level change on a digital input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// Input became active.
    Pressed,
    /// Input became inactive.
    Released,
}

/// Level-change detector for a single digital input.
#[derive(Clone, Copy, Debug)]
pub struct EdgeDetector {
    last: bool,
}

impl EdgeDetector {
    /// Create a detector that assumes `initial` as the previous level.
    pub const fn new(initial: bool) -> Self { Self { last: initial } }

    /// Feed the current level; returns the edge if it differs from the last one.
    pub fn update(
        &mut self,
        active: bool,
    ) -> Option<Edge> {
        if active == self.last {
            return None;
        }
        self.last = active;
        Some(if active { Edge::Pressed } else { Edge::Released })
    }

    /// Last level seen.
    #[inline]
    pub const fn level(&self) -> bool { self.last }
}

// =============================================================================
// Trigger Ramp
// =============================================================================

/// Saturating 0..=255 ramp driven by a digital trigger.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Ramp {
    value: u8,
}

impl Ramp {
    /// A released ramp at 0.
    pub const fn new() -> Self { Self { value: 0 } }

    /// Step by +1 while the trigger is active, -1 while it is released.
    pub fn step(
        &mut self,
        active: bool,
    ) -> u8 {
        self.value = if active { self.value.saturating_add(1) } else { self.value.saturating_sub(1) };
        self.value
    }

    /// Current ramp value.
    #[inline]
    pub const fn value(&self) -> u8 { self.value }
}

// =============================================================================
// Gearbox
// =============================================================================

/// Sequential gearbox with neutral (0) and gears 1..=8.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Gearbox {
    gear: u8,
}

impl Gearbox {
    /// Start in neutral.
    pub const fn new() -> Self { Self { gear: 0 } }

    /// Current gear, 0 for neutral.
    #[inline]
    pub const fn gear(&self) -> u8 { self.gear }

    /// Shift up one gear. Returns `true` if the gear changed.
    pub fn shift_up(&mut self) -> bool {
        if self.gear < MAX_GEAR {
            self.gear += 1;
            true
        } else {
            false
        }
    }

    /// Shift down one gear. Returns `true` if the gear changed.
    pub fn shift_down(&mut self) -> bool {
        if self.gear > 0 {
            self.gear -= 1;
            true
        } else {
            false
        }
    }
}

// =============================================================================
// Control Inputs
// =============================================================================

/// Control signals produced by the input sampler each tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControlInputs {
    pub throttle: u8,
    pub brake: u8,
    pub gear: u8,
    pub steer_angle_tenth_deg: i16,
}

/// Trigger and paddle state sampled by the Driving control loop.
#[derive(Clone, Copy, Debug)]
pub struct InputSampler {
    throttle: Ramp,
    brake: Ramp,
    gearbox: Gearbox,
    gear_down: EdgeDetector,
    gear_up: EdgeDetector,
}

/// Levels of the four driving controls at one control tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DriveLevels {
    pub throttle_trigger: bool,
    pub brake_trigger: bool,
    pub gear_down: bool,
    pub gear_up: bool,
}

impl InputSampler {
    /// Released triggers, neutral gear, paddles assumed released.
    pub const fn new() -> Self {
        Self {
            throttle: Ramp::new(),
            brake: Ramp::new(),
            gearbox: Gearbox::new(),
            gear_down: EdgeDetector::new(false),
            gear_up: EdgeDetector::new(false),
        }
    }

    /// Advance one control tick. Returns the new gear if a paddle changed it.
    pub fn sample(
        &mut self,
        levels: DriveLevels,
    ) -> Option<u8> {
        self.throttle.step(levels.throttle_trigger);
        self.brake.step(levels.brake_trigger);

        let mut shifted = false;
        if self.gear_down.update(levels.gear_down) == Some(Edge::Pressed) {
            shifted |= self.gearbox.shift_down();
        }
        if self.gear_up.update(levels.gear_up) == Some(Edge::Pressed) {
            shifted |= self.gearbox.shift_up();
        }

        shifted.then_some(self.gearbox.gear())
    }

    #[inline]
    pub const fn throttle(&self) -> u8 { self.throttle.value() }

    #[inline]
    pub const fn brake(&self) -> u8 { self.brake.value() }

    #[inline]
    pub const fn gear(&self) -> u8 { self.gearbox.gear() }
}

impl Default for InputSampler {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Unit Tests
// =============================================================================
