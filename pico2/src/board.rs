//! `Board` implementation on RP2350 peripherals.

use defmt::info;
use drivesync_common::board::{Board, Input as WheelInput, SimEvent};
use drivesync_common::clock::{DateTime, SoftClock, WallTime};
use drivesync_common::encoder::{EncoderCounter, EncoderSnapshot};
use drivesync_common::leds::{LedBar, RUNGS};
use drivesync_common::panel;
use drivesync_pico2::config::{BUTTON_POLARITY, SWITCH_POLARITY, millivolts_from_raw};
use embassy_rp::adc::{self, Adc};
use embassy_rp::gpio::{Input, Level, Output};
use embassy_rp::uart::{self, UartTx};
use embassy_time::{Duration, Instant};

use crate::display::Pim715Display;

/// Digital controls, as wired.
pub struct Controls {
    pub arm: Input<'static>,
    pub page: Input<'static>,
    pub brake_trigger: Input<'static>,
    pub throttle_trigger: Input<'static>,
    pub gear_down: Input<'static>,
    pub gear_up: Input<'static>,
}

/// The wheel: controls, pot, LEDs, display, telemetry UART and the encoder counter.
pub struct RpBoard {
    controls: Controls,
    leds: [Output<'static>; RUNGS],
    adc: Adc<'static, adc::Blocking>,
    pot: adc::Channel<'static>,
    last_mv: u16,
    uart: UartTx<'static, uart::Blocking>,
    display: Pim715Display<'static>,
    encoder: &'static EncoderCounter,
    clock: SoftClock,
}

impl RpBoard {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        controls: Controls,
        leds: [Output<'static>; RUNGS],
        adc: Adc<'static, adc::Blocking>,
        pot: adc::Channel<'static>,
        uart: UartTx<'static, uart::Blocking>,
        display: Pim715Display<'static>,
        encoder: &'static EncoderCounter,
    ) -> Self {
        Self {
            controls,
            leds,
            adc,
            pot,
            last_mv: 0,
            uart,
            display,
            encoder,
            clock: SoftClock::new(),
        }
    }
}

impl Board for RpBoard {
    fn is_active(
        &mut self,
        input: WheelInput,
    ) -> bool {
        let c = &self.controls;
        match input {
            WheelInput::Arm => BUTTON_POLARITY.is_active(c.arm.is_high()),
            WheelInput::PageToggle => BUTTON_POLARITY.is_active(c.page.is_high()),
            WheelInput::BrakeTrigger => SWITCH_POLARITY.is_active(c.brake_trigger.is_high()),
            WheelInput::ThrottleTrigger => SWITCH_POLARITY.is_active(c.throttle_trigger.is_high()),
            WheelInput::GearDown => SWITCH_POLARITY.is_active(c.gear_down.is_high()),
            WheelInput::GearUp => SWITCH_POLARITY.is_active(c.gear_up.is_high()),
        }
    }

    fn read_millivolts(&mut self) -> u16 {
        // Keep the previous reading if a conversion fails
        if let Ok(raw) = self.adc.blocking_read(&mut self.pot) {
            self.last_mv = millivolts_from_raw(raw);
        }
        self.last_mv
    }

    fn encoder(&mut self) -> EncoderSnapshot { self.encoder.snapshot() }

    fn wall_clock(&mut self) -> WallTime {
        let now = self.now_ms();
        self.clock.time(now)
    }

    fn set_wall_clock(
        &mut self,
        datetime: DateTime,
    ) {
        let now = self.now_ms();
        self.clock.set(datetime, now);
    }

    fn transmit(
        &mut self,
        byte: u8,
    ) {
        self.uart.blocking_write(&[byte]).ok();
    }

    fn draw_text(
        &mut self,
        row: u8,
        col: u8,
        text: &str,
    ) {
        panel::draw_text(&mut self.display, row, col, text);
    }

    fn clear_display(&mut self) { panel::clear(&mut self.display); }

    fn draw_logo(&mut self) { panel::draw_logo(&mut self.display); }

    fn set_leds(
        &mut self,
        leds: LedBar,
    ) {
        for (pin, lit) in self.leds.iter_mut().zip(leds.rungs()) {
            pin.set_level(Level::from(lit));
        }
    }

    fn now_ms(&mut self) -> u32 { Instant::now().as_millis() as u32 }

    fn delay_ms(
        &mut self,
        ms: u32,
    ) {
        embassy_time::block_for(Duration::from_millis(u64::from(ms)));
    }

    fn notify(
        &mut self,
        event: SimEvent,
    ) {
        info!("{}", event);
    }
}
