//! Arcade-style vehicle model.
//!
//! Turns throttle, brake and gear into engine RPM and road speed once per
//! control tick. Rates are in km/h per tick, so the car reaches top speed in
//! well under a second of full throttle; this is a toy for driving a
//! dashboard, not a calibrated drivetrain.
//!
//! # Branches
//!
//! - **Neutral** (gear 0): RPM chases a throttle-proportional target through a
//!   0.1 blend per tick. The car only coasts and brakes.
//! - **Engaged** (gear 1..=8): speed integrates throttle and brake and is
//!   ceiled at the gear's top speed. RPM is proportional to speed within the
//!   gear and assigned directly, with no blending.

use crate::input::MAX_GEAR;

// =============================================================================
// Model Constants
// =============================================================================

/// Engine idle speed.
pub const IDLE_RPM: f32 = 0.0;

/// Engine speed at the top of every gear.
pub const MAX_RPM: f32 = 8000.0;

/// Speed gained per tick at full throttle.
pub const ACCEL_RATE: f32 = 0.2;

/// Speed lost per tick at full brake.
pub const BRAKE_RATE: f32 = 0.8;

/// Speed lost per tick when coasting.
pub const FRICTION_RATE: f32 = 0.1;

/// Neutral-gear RPM blend factor per tick.
pub const NEUTRAL_RPM_BLEND: f32 = 0.1;

/// Top speed per gear in km/h.
///
/// Index 0 (neutral) is a guard value and is never used as a divisor: the
/// engaged branch only runs for gears 1..=8.
pub const GEAR_MAX_SPEED: [f32; MAX_GEAR as usize + 1] = [0.0, 40.0, 70.0, 110.0, 150.0, 190.0, 240.0, 280.0, 320.0];

/// Scale a 0..=255 pedal value to 0.0..=1.0.
#[inline]
fn pedal(value: u8) -> f32 { f32::from(value) / 255.0 }

// =============================================================================
// Vehicle State
// =============================================================================

/// Continuous speed plus the integer snapshot published to the rest of the system.
///
/// `out_rpm` and `out_kmh` are only ever written by [`VehicleState::update`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct VehicleState {
    current_kmh: f32,
    out_rpm: i16,
    out_kmh: i16,
}

impl VehicleState {
    /// A stationary car with the engine at idle.
    pub const fn new() -> Self {
        Self {
            current_kmh: 0.0,
            out_rpm: 0,
            out_kmh: 0,
        }
    }

    /// Continuous road speed in km/h.
    #[inline]
    pub const fn speed_kmh(&self) -> f32 { self.current_kmh }

    /// Published engine speed.
    #[inline]
    pub const fn rpm(&self) -> i16 { self.out_rpm }

    /// Published road speed, truncated to whole km/h.
    #[inline]
    pub const fn kmh(&self) -> i16 { self.out_kmh }

    /// Advance the model by one control tick.
    ///
    /// Gears above 8 are treated as 8.
    pub fn update(
        &mut self,
        throttle: u8,
        brake: u8,
        gear: u8,
    ) {
        let gear = gear.min(MAX_GEAR);

        if gear == 0 {
            self.update_neutral(throttle, brake);
        } else {
            self.update_engaged(throttle, brake, gear);
        }

        self.out_kmh = self.current_kmh as i16;
    }

    fn update_neutral(
        &mut self,
        throttle: u8,
        brake: u8,
    ) {
        let target_rpm = IDLE_RPM + pedal(throttle) * (MAX_RPM - IDLE_RPM);
        let rpm = f32::from(self.out_rpm);
        self.out_rpm = (rpm + (target_rpm - rpm) * NEUTRAL_RPM_BLEND) as i16;

        if self.current_kmh > 0.0 {
            self.current_kmh -= FRICTION_RATE;
        }
        if brake > 0 {
            self.current_kmh -= pedal(brake) * BRAKE_RATE;
        }
        if self.current_kmh < 0.0 {
            self.current_kmh = 0.0;
        }
    }

    fn update_engaged(
        &mut self,
        throttle: u8,
        brake: u8,
        gear: u8,
    ) {
        let top_speed = GEAR_MAX_SPEED[usize::from(gear)];

        if throttle > 0 {
            self.current_kmh += pedal(throttle) * ACCEL_RATE;
        } else {
            self.current_kmh -= FRICTION_RATE;
        }
        if brake > 0 {
            self.current_kmh -= pedal(brake) * BRAKE_RATE;
        }

        if self.current_kmh < 0.0 {
            self.current_kmh = 0.0;
        }
        if self.current_kmh > top_speed {
            self.current_kmh = top_speed;
        }

        let target_rpm = (self.current_kmh / top_speed) * MAX_RPM;
        self.out_rpm = target_rpm.max(IDLE_RPM) as i16;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
