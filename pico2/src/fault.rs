//! Fatal initialization errors.
//!
//! A failed peripheral bring-up is not recoverable: the error is logged over
//! RTT and the core parks forever. The wheel simply appears frozen.

use defmt::{Format, error};

/// Peripheral bring-up failures.
#[derive(Clone, Copy, Debug, Format)]
pub enum InitError {
    /// Chip-select pin could not be claimed for the display SPI device.
    SpiDevice,
    /// ST7789 init sequence failed.
    Display,
    /// Encoder task could not be spawned on the interrupt executor.
    Spawn,
}

/// Log `err` and stop.
pub fn halt(err: InitError) -> ! {
    error!("Init failed: {}, halting", err);
    loop {
        cortex_m::asm::wfi();
    }
}
