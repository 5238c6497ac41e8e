//! `Board` implementation on a desktop window.
//!
//! The panel and the LED ladder are drawn into one `SimulatorDisplay`.
//! Telemetry bytes are looped back through a [`FrameDecoder`] and printed, so
//! the bench also exercises the consumer side of the link.

use std::thread;
use std::time::{Duration, Instant};

use drivesync_common::board::{Board, Input, SimEvent};
use drivesync_common::clock::{DateTime, SoftClock, WallTime};
use drivesync_common::colors::BLACK;
use drivesync_common::config::{PANEL_HEIGHT, PANEL_WIDTH};
use drivesync_common::encoder::{EncoderCounter, EncoderSnapshot};
use drivesync_common::leds::LedBar;
use drivesync_common::{FrameDecoder, TelemetryFrame, panel};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};

use crate::keys::{KeyAction, STEER_COUNTS_PER_KEY, action_for, turn_pot};
use crate::timing::{FRAME_TIME, POLL_INTERVAL};

/// Strip below the text panel holding the LED ladder.
const LED_STRIP_HEIGHT: u32 = 40;
const LED_STRIP_ORIGIN: Point = Point::new(16, PANEL_HEIGHT as i32 + 8);

/// Potentiometer at mid-travel on power-up.
const POT_START_MV: u16 = 1650;

/// Desktop stand-in for the wheel hardware.
pub struct SimBoard {
    display: SimulatorDisplay<Rgb565>,
    window: Window,
    held: [bool; Input::ALL.len()],
    millivolts: u16,
    encoder: EncoderCounter,
    clock: SoftClock,
    leds: LedBar,
    decoder: FrameDecoder,
    last_frame: Option<TelemetryFrame>,
    started: Instant,
    last_refresh: Instant,
    quit: bool,
}

impl SimBoard {
    /// Open the window. `hold_arm` starts with the arm button held (diagnostic boot).
    pub fn new(hold_arm: bool) -> Self {
        let mut display = SimulatorDisplay::new(Size::new(PANEL_WIDTH, PANEL_HEIGHT + LED_STRIP_HEIGHT));
        let output_settings = OutputSettingsBuilder::new().scale(2).build();
        let mut window = Window::new("DriveSync Wheel Sim", &output_settings);

        display.clear(BLACK).ok();
        window.update(&display);

        let mut held = [false; Input::ALL.len()];
        held[Input::Arm as usize] = hold_arm;

        let now = Instant::now();
        Self {
            display,
            window,
            held,
            millivolts: POT_START_MV,
            encoder: EncoderCounter::new(),
            clock: SoftClock::new(),
            leds: LedBar::OFF,
            decoder: FrameDecoder::new(),
            last_frame: None,
            started: now,
            last_refresh: now,
            quit: false,
        }
    }

    /// The window was closed.
    #[inline]
    pub const fn quit_requested(&self) -> bool { self.quit }

    /// Refresh the window and pump input events, at most once per frame.
    pub fn service(&mut self) {
        if self.last_refresh.elapsed() < FRAME_TIME {
            return;
        }
        self.last_refresh = Instant::now();

        panel::draw_led_strip(&mut self.display, LED_STRIP_ORIGIN, self.leds);
        self.window.update(&self.display);

        let events: Vec<SimulatorEvent> = self.window.events().collect();
        for event in events {
            match event {
                SimulatorEvent::Quit => self.quit = true,
                SimulatorEvent::KeyDown { keycode, repeat, .. } => match action_for(keycode) {
                    Some(KeyAction::Hold(input)) => self.held[input as usize] = true,
                    // Key repeat keeps turning
                    Some(KeyAction::Steer { clockwise }) => {
                        for _ in 0..STEER_COUNTS_PER_KEY {
                            self.encoder.on_channel_a_rising(!clockwise);
                        }
                    }
                    Some(KeyAction::Pot(delta)) => {
                        self.millivolts = turn_pot(self.millivolts, delta);
                        if !repeat {
                            println!("pot: {} mV", self.millivolts);
                        }
                    }
                    None => {}
                },
                SimulatorEvent::KeyUp { keycode, .. } => {
                    if let Some(KeyAction::Hold(input)) = action_for(keycode) {
                        self.held[input as usize] = false;
                    }
                }
                _ => {}
            }
        }
    }

    fn print_frame(
        &mut self,
        frame: TelemetryFrame,
    ) {
        // The link runs at ~500 frames/s; only print changes
        if self.last_frame == Some(frame) {
            return;
        }
        self.last_frame = Some(frame);
        println!(
            "telemetry: gear {} | {:>4} rpm | {:>3} km/h | thr {:>3} brk {:>3} | steer {:>6}",
            frame.gear, frame.rpm, frame.speed_kmh, frame.throttle, frame.brake, frame.steer_angle
        );
    }
}

impl Board for SimBoard {
    fn is_active(
        &mut self,
        input: Input,
    ) -> bool {
        self.held[input as usize]
    }

    fn read_millivolts(&mut self) -> u16 { self.millivolts }

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
        match self.decoder.push(byte) {
            Some(Ok(frame)) => self.print_frame(frame),
            Some(Err(err)) => eprintln!("telemetry: {err}"),
            None => {}
        }
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
        self.leds = leds;
    }

    fn now_ms(&mut self) -> u32 { self.started.elapsed().as_millis() as u32 }

    fn delay_ms(
        &mut self,
        ms: u32,
    ) {
        // Keep the window alive through startup pauses
        let until = Instant::now() + Duration::from_millis(u64::from(ms));
        while Instant::now() < until && !self.quit {
            self.service();
            thread::sleep(POLL_INTERVAL);
        }
    }

    fn notify(
        &mut self,
        event: SimEvent,
    ) {
        let now = self.now_ms();
        println!("[{now:>8} ms] {event:?}");
    }
}
