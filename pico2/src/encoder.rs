//! Quadrature encoder edge tasks.
//!
//! Both tasks run on the high-priority interrupt executor, so a GPIO edge
//! preempts the busy superloop and is counted even while the main loop is
//! inside a blocking delay.

use defmt::info;
use drivesync_common::encoder::EncoderCounter;
use embassy_rp::gpio::Input;

/// Count channel A rising edges; channel B gives the direction.
#[embassy_executor::task]
pub async fn quadrature_task(
    mut channel_a: Input<'static>,
    channel_b: Input<'static>,
    counter: &'static EncoderCounter,
) {
    info!("Encoder quadrature task started");

    loop {
        channel_a.wait_for_rising_edge().await;
        counter.on_channel_a_rising(channel_b.is_high());
    }
}

/// Count index (once per revolution) pulses.
#[embassy_executor::task]
pub async fn index_task(
    mut index: Input<'static>,
    counter: &'static EncoderCounter,
) {
    info!("Encoder index task started");

    loop {
        index.wait_for_rising_edge().await;
        counter.on_index();
    }
}
