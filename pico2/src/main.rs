//! DriveSync steering wheel firmware for Raspberry Pi Pico 2 (RP2350)
//!
//! Runs the wheel state machine on a Pimoroni PIM715 Display Pack 2.8" and
//! streams telemetry frames over UART0.
//!
//! # Architecture
//!
//! - Thread mode: a single busy superloop polling [`Controller`]. It never
//!   yields; pauses are `embassy_time::block_for`.
//! - `SWI_IRQ_1` (priority 2): an interrupt executor running the encoder
//!   edge tasks, which preempt the superloop and update a lock-free counter.
//!
//! # Controls
//!
//! - **A** (hold 3.5 s): arm and enter Driving; on the settings page,
//!   release to re-zero steering. Held at power-on: Diagnostic.
//! - **B**: toggle drive/settings page (Diagnostic: inputs/encoder page).
//! - Triggers: throttle (right) and brake (left). Paddles: gear down/up.

#![no_std]
#![no_main]
// Crate-level lints (match lib.rs for consistency)
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

// Modules only used in the binary (not testable on host)
mod board;
mod display;
mod encoder;
mod fault;

use cortex_m_rt::entry;
use defmt::info;
use drivesync_common::Controller;
use drivesync_common::encoder::EncoderCounter;
use drivesync_pico2::config::{DISPLAY_BUFFER_LEN, UART_BAUD};
use embassy_executor::InterruptExecutor;
use embassy_rp::adc::{self, Adc};
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::interrupt;
use embassy_rp::interrupt::{InterruptExt, Priority};
use embassy_rp::spi::Spi;
use embassy_rp::uart::{self, UartTx};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use crate::board::{Controls, RpBoard};
use crate::display::{display_spi_config, init_display};
use crate::fault::{InitError, halt};

// =============================================================================
// Shared State
// =============================================================================

/// Written by the encoder tasks, snapshotted by the superloop.
static ENCODER: EncoderCounter = EncoderCounter::new();

/// High-priority executor for the encoder edge tasks.
static EXECUTOR_HIGH: InterruptExecutor = InterruptExecutor::new();

/// Staging buffer for the display SPI interface.
static DISPLAY_BUFFER: StaticCell<[u8; DISPLAY_BUFFER_LEN]> = StaticCell::new();

#[interrupt]
unsafe fn SWI_IRQ_1() {
    // SAFETY: the executor was started on this interrupt
    unsafe { EXECUTOR_HIGH.on_interrupt() }
}

#[entry]
fn main() -> ! {
    info!("DriveSync wheel starting...");

    let p = embassy_rp::init(Default::default());

    // Encoder edges first, so no count is lost during display init
    interrupt::SWI_IRQ_1.set_priority(Priority::P2);
    let spawner = EXECUTOR_HIGH.start(interrupt::SWI_IRQ_1);

    let channel_a = Input::new(p.PIN_10, Pull::Up);
    let channel_b = Input::new(p.PIN_11, Pull::Up);
    let index = Input::new(p.PIN_22, Pull::Up);
    if spawner.spawn(encoder::quadrature_task(channel_a, channel_b, &ENCODER)).is_err() {
        halt(InitError::Spawn);
    }
    if spawner.spawn(encoder::index_task(index, &ENCODER)).is_err() {
        halt(InitError::Spawn);
    }
    info!("Encoder tasks spawned");

    // Initialize display pins
    // PIM715 pinout: CS=17, DC=16, CLK=18, MOSI=19, Backlight=20
    let cs = Output::new(p.PIN_17, Level::High);
    let dc = Output::new(p.PIN_16, Level::Low);
    let _backlight = Output::new(p.PIN_20, Level::High);

    // Blocking TX-only SPI: the superloop owns the display exclusively
    let spi = Spi::new_blocking_txonly(p.SPI0, p.PIN_18, p.PIN_19, display_spi_config());
    let buffer = DISPLAY_BUFFER.init([0; DISPLAY_BUFFER_LEN]);
    let display = match init_display(spi, cs, dc, buffer) {
        Ok(display) => display,
        Err(err) => halt(err),
    };
    info!("Display initialized");

    // Buttons on the pack are active-low; triggers and paddles pull high
    let controls = Controls {
        arm: Input::new(p.PIN_12, Pull::Up),
        page: Input::new(p.PIN_13, Pull::Up),
        brake_trigger: Input::new(p.PIN_6, Pull::Down),
        throttle_trigger: Input::new(p.PIN_7, Pull::Down),
        gear_down: Input::new(p.PIN_8, Pull::Down),
        gear_up: Input::new(p.PIN_9, Pull::Down),
    };

    // LED ladder, bottom rung first
    let leds = [
        Output::new(p.PIN_2, Level::Low),
        Output::new(p.PIN_3, Level::Low),
        Output::new(p.PIN_4, Level::Low),
        Output::new(p.PIN_5, Level::Low),
    ];

    let adc = Adc::new_blocking(p.ADC, adc::Config::default());
    let pot = adc::Channel::new_pin(p.PIN_26, Pull::None);

    let mut uart_config = uart::Config::default();
    uart_config.baudrate = UART_BAUD;
    let uart = UartTx::new_blocking(p.UART0, p.PIN_0, uart_config);
    info!("Peripherals initialized");

    let mut board = RpBoard::new(controls, leds, adc, pot, uart, display, &ENCODER);

    let controller = Controller::boot(&mut board);
    info!("Superloop starting in {}", controller.kind());
    controller.run(&mut board)
}
