//! Scriptable [`Board`] for unit tests.
//!
//! Time only moves when a test advances it or the code under test calls
//! `delay_ms`. Every output is recorded.

use crate::board::{Board, Input, SimEvent};
use crate::clock::{DateTime, SoftClock, WallTime};
use crate::config::{PANEL_COLUMNS, PANEL_ROWS};
use crate::encoder::EncoderSnapshot;
use crate::leds::LedBar;
use crate::telemetry::{FrameDecoder, TelemetryFrame};

const COLS: usize = PANEL_COLUMNS as usize;
const ROWS: usize = PANEL_ROWS as usize;

pub struct MockBoard {
    pub now: u32,
    pub inputs: [bool; Input::ALL.len()],
    pub millivolts: u16,
    pub encoder: EncoderSnapshot,
    pub clock: SoftClock,
    pub clock_set: Option<DateTime>,
    pub transmitted: Vec<u8>,
    pub screen: [[u8; COLS]; ROWS],
    pub draws: usize,
    pub clears: u32,
    pub logo_drawn: bool,
    pub leds: LedBar,
    pub led_history: Vec<LedBar>,
    pub delays: Vec<u32>,
    pub events: Vec<SimEvent>,
}

fn slot(input: Input) -> usize {
    Input::ALL
        .iter()
        .position(|&i| i == input)
        .expect("input listed in Input::ALL")
}

impl MockBoard {
    pub fn new() -> Self {
        Self {
            now: 0,
            inputs: [false; Input::ALL.len()],
            millivolts: 0,
            encoder: EncoderSnapshot::default(),
            clock: SoftClock::new(),
            clock_set: None,
            transmitted: Vec::new(),
            screen: [[b' '; COLS]; ROWS],
            draws: 0,
            clears: 0,
            logo_drawn: false,
            leds: LedBar::OFF,
            led_history: Vec::new(),
            delays: Vec::new(),
            events: Vec::new(),
        }
    }

    pub fn press(
        &mut self,
        input: Input,
    ) {
        self.inputs[slot(input)] = true;
    }

    pub fn release(
        &mut self,
        input: Input,
    ) {
        self.inputs[slot(input)] = false;
    }

    pub fn advance(
        &mut self,
        ms: u32,
    ) {
        self.now = self.now.wrapping_add(ms);
    }

    /// Full 20-column text of a panel row.
    pub fn row(
        &self,
        row: u8,
    ) -> String {
        String::from_utf8_lossy(&self.screen[usize::from(row)]).into_owned()
    }

    /// Every complete frame sent so far.
    pub fn frames(&self) -> Vec<TelemetryFrame> {
        let mut decoder = FrameDecoder::new();
        self.transmitted
            .iter()
            .filter_map(|&b| decoder.push(b))
            .map(|r| r.expect("firmware frames are well-formed"))
            .collect()
    }
}

impl Board for MockBoard {
    fn is_active(
        &mut self,
        input: Input,
    ) -> bool {
        self.inputs[slot(input)]
    }

    fn read_millivolts(&mut self) -> u16 { self.millivolts }

    fn encoder(&mut self) -> EncoderSnapshot { self.encoder }

    fn wall_clock(&mut self) -> WallTime { self.clock.time(self.now) }

    fn set_wall_clock(
        &mut self,
        datetime: DateTime,
    ) {
        self.clock.set(datetime, self.now);
        self.clock_set = Some(datetime);
    }

    fn transmit(
        &mut self,
        byte: u8,
    ) {
        self.transmitted.push(byte);
    }

    fn draw_text(
        &mut self,
        row: u8,
        col: u8,
        text: &str,
    ) {
        self.draws += 1;
        let line = &mut self.screen[usize::from(row)];
        for (cell, byte) in line.iter_mut().skip(usize::from(col)).zip(text.bytes()) {
            *cell = byte;
        }
    }

    fn clear_display(&mut self) {
        self.clears += 1;
        self.screen = [[b' '; COLS]; ROWS];
    }

    fn draw_logo(&mut self) { self.logo_drawn = true; }

    fn set_leds(
        &mut self,
        leds: LedBar,
    ) {
        self.leds = leds;
        self.led_history.push(leds);
    }

    fn now_ms(&mut self) -> u32 { self.now }

    fn delay_ms(
        &mut self,
        ms: u32,
    ) {
        self.delays.push(ms);
        self.advance(ms);
    }

    fn notify(
        &mut self,
        event: SimEvent,
    ) {
        self.events.push(event);
    }
}
