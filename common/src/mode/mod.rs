//! Top-level Arming / Driving / Diagnostic state machine.
//!
//! # Lifecycle
//!
//! ```text
//! power-on -> startup --arm released--> Arming --held 3500 ms--> Driving
//!                     \--arm held-----> Diagnostic
//! ```
//!
//! Driving and Diagnostic are terminal: only a power cycle leaves them.
//!
//! Each mode is polled once per superloop pass and owns its own timing
//! gates. The controller owns every piece of session state (calibration,
//! vehicle model, pages); the only state shared with interrupt context is
//! the encoder counter, read through [`Board::encoder`].

mod arming;
mod diagnostic;
mod driving;

pub use arming::Arming;
pub use diagnostic::{Diagnostic, DiagnosticPage};
pub use driving::{DrivePage, Driving};

use crate::board::{Board, SimEvent};
use crate::startup;

/// Which sub-loop is running.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ModeKind {
    Arming,
    Driving,
    Diagnostic,
}

enum Mode {
    Arming(Arming),
    Driving(Driving),
    Diagnostic(Diagnostic),
}

/// Superloop controller.
pub struct Controller {
    mode: Mode,
}

impl Controller {
    /// Run the startup sequence and enter the mode it selects.
    pub fn boot<B: Board>(board: &mut B) -> Self {
        let kind = startup::run(board);
        board.notify(SimEvent::Booted { mode: kind });
        Self::enter(kind)
    }

    /// Start directly in `kind`, skipping the startup sequence.
    ///
    /// Driving starts uncalibrated, as if armed at tick 0.
    pub fn enter(kind: ModeKind) -> Self {
        let mode = match kind {
            ModeKind::Arming => Mode::Arming(Arming::new()),
            ModeKind::Driving => Mode::Driving(Driving::new(Default::default(), 0)),
            ModeKind::Diagnostic => Mode::Diagnostic(Diagnostic::new()),
        };
        Self { mode }
    }

    /// Current mode.
    pub const fn kind(&self) -> ModeKind {
        match self.mode {
            Mode::Arming(_) => ModeKind::Arming,
            Mode::Driving(_) => ModeKind::Driving,
            Mode::Diagnostic(_) => ModeKind::Diagnostic,
        }
    }

    /// Driving state, once armed.
    pub const fn driving(&self) -> Option<&Driving> {
        match &self.mode {
            Mode::Driving(driving) => Some(driving),
            _ => None,
        }
    }

    /// Diagnostic state, if the session booted into it.
    pub const fn diagnostic(&self) -> Option<&Diagnostic> {
        match &self.mode {
            Mode::Diagnostic(diagnostic) => Some(diagnostic),
            _ => None,
        }
    }

    /// One superloop pass.
    pub fn poll<B: Board>(
        &mut self,
        board: &mut B,
    ) {
        match &mut self.mode {
            Mode::Arming(arming) => {
                if let Some(calibration) = arming.poll(board) {
                    board.notify(SimEvent::Armed {
                        zero_offset: calibration.zero_offset,
                        baseline_mv: calibration.baseline_mv,
                    });
                    let now = board.now_ms();
                    self.mode = Mode::Driving(Driving::new(calibration, now));
                }
            }
            Mode::Driving(driving) => driving.poll(board),
            Mode::Diagnostic(diagnostic) => diagnostic.poll(board),
        }
    }

    /// Poll forever.
    pub fn run<B: Board>(
        mut self,
        board: &mut B,
    ) -> ! {
        loop {
            self.poll(board);
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
