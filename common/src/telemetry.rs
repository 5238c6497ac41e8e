//! Fixed-layout telemetry frame streamed over the serial link.
//!
//! # Frame Layout (16 bytes, multi-byte fields big-endian)
//!
//! | Offset | Field | Encoding |
//! |--------|-------|----------|
//! | 0 | sync | `0xAB` |
//! | 1 | separator | `'.'` |
//! | 2 | gear | u8 |
//! | 3 | separator | `'.'` |
//! | 4-5 | RPM | u16 |
//! | 6 | separator | `'.'` |
//! | 7-8 | speed km/h | u16 |
//! | 9 | separator | `'.'` |
//! | 10 | throttle | u8 |
//! | 11 | separator | `'.'` |
//! | 12 | brake | u8 |
//! | 13 | separator | `'.'` |
//! | 14-15 | steer angle, tenths of a degree | i16 |
//!
//! There is no checksum or escaping. Receivers find frames by the sync byte
//! and reject windows whose separators are not in place; [`FrameDecoder`]
//! implements that resynchronisation for host tools.

use core::fmt;

use heapless::Vec;

/// Total frame length in bytes.
pub const FRAME_LEN: usize = 16;

/// First byte of every frame.
pub const SYNC_BYTE: u8 = 0xAB;

/// Separator between fields.
pub const SEPARATOR: u8 = b'.';

/// Offsets of the six separator bytes.
pub const SEPARATOR_OFFSETS: [usize; 6] = [1, 3, 6, 9, 11, 13];

/// Reasons a 16-byte window is not a valid frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Byte 0 is not [`SYNC_BYTE`].
    Sync,
    /// A separator byte is not `'.'`.
    Separator { offset: usize },
}

impl fmt::Display for FrameError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::Sync => write!(f, "missing sync byte 0x{SYNC_BYTE:02X}"),
            Self::Separator { offset } => write!(f, "bad separator at offset {offset}"),
        }
    }
}

/// One telemetry sample.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TelemetryFrame {
    pub gear: u8,
    pub rpm: u16,
    pub speed_kmh: u16,
    pub throttle: u8,
    pub brake: u8,
    /// Steering angle in tenths of a degree.
    pub steer_angle: i16,
}

impl TelemetryFrame {
    /// Serialize into the 16-byte wire layout.
    pub fn encode(&self) -> [u8; FRAME_LEN] {
        let rpm = self.rpm.to_be_bytes();
        let speed = self.speed_kmh.to_be_bytes();
        let steer = self.steer_angle.to_be_bytes();

        [
            SYNC_BYTE,
            SEPARATOR,
            self.gear,
            SEPARATOR,
            rpm[0],
            rpm[1],
            SEPARATOR,
            speed[0],
            speed[1],
            SEPARATOR,
            self.throttle,
            SEPARATOR,
            self.brake,
            SEPARATOR,
            steer[0],
            steer[1],
        ]
    }

    /// Parse a frame, checking the sync byte and every separator.
    pub fn decode(bytes: &[u8; FRAME_LEN]) -> Result<Self, FrameError> {
        if bytes[0] != SYNC_BYTE {
            return Err(FrameError::Sync);
        }
        if let Some(&offset) = SEPARATOR_OFFSETS.iter().find(|&&i| bytes[i] != SEPARATOR) {
            return Err(FrameError::Separator { offset });
        }

        Ok(Self {
            gear: bytes[2],
            rpm: u16::from_be_bytes([bytes[4], bytes[5]]),
            speed_kmh: u16::from_be_bytes([bytes[7], bytes[8]]),
            throttle: bytes[10],
            brake: bytes[12],
            steer_angle: i16::from_be_bytes([bytes[14], bytes[15]]),
        })
    }
}

// =============================================================================
// Stream Decoder
// =============================================================================

/// Byte-at-a-time frame extractor with resynchronisation.
///
/// Bytes are discarded until a sync byte arrives. Once 16 bytes are buffered
/// the window is decoded; on a separator mismatch the leading sync byte is
/// dropped and the remainder is rescanned for the next sync byte, so a frame
/// that starts inside a corrupt window is still recovered.
#[derive(Debug, Default)]
pub struct FrameDecoder {
    window: Vec<u8, FRAME_LEN>,
    discarded: u32,
}

impl FrameDecoder {
    /// Create an empty decoder.
    pub const fn new() -> Self {
        Self {
            window: Vec::new(),
            discarded: 0,
        }
    }

    /// Feed one received byte.
    ///
    /// Returns `Some` when a full window has been evaluated.
    pub fn push(
        &mut self,
        byte: u8,
    ) -> Option<Result<TelemetryFrame, FrameError>> {
        if self.window.is_empty() && byte != SYNC_BYTE {
            self.discarded = self.discarded.wrapping_add(1);
            return None;
        }

        // Window is never full here: it is drained as soon as it fills
        let _ = self.window.push(byte);
        if !self.window.is_full() {
            return None;
        }

        let mut bytes = [0u8; FRAME_LEN];
        bytes.copy_from_slice(&self.window);

        match TelemetryFrame::decode(&bytes) {
            Ok(frame) => {
                self.window.clear();
                Some(Ok(frame))
            }
            Err(err) => {
                self.resync(&bytes[1..]);
                Some(Err(err))
            }
        }
    }

    /// Number of bytes dropped while hunting for a sync byte.
    #[inline]
    pub const fn discarded(&self) -> u32 { self.discarded }

    fn resync(
        &mut self,
        rest: &[u8],
    ) {
        self.window.clear();
        self.discarded = self.discarded.wrapping_add(1);

        match rest.iter().position(|&b| b == SYNC_BYTE) {
            Some(start) => {
                self.discarded = self.discarded.wrapping_add(start as u32);
                // rest is at most FRAME_LEN - 1 bytes long
                let _ = self.window.extend_from_slice(&rest[start..]);
            }
            None => self.discarded = self.discarded.wrapping_add(rest.len() as u32),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const REFERENCE_FRAME: TelemetryFrame = TelemetryFrame {
        gear: 3,
        rpm: 4096,
        speed_kmh: 88,
        throttle: 200,
        brake: 0,
        steer_angle: -300,
    };

    const REFERENCE_BYTES: [u8; FRAME_LEN] = [
        0xAB, 0x2E, 0x03, 0x2E, 0x10, 0x00, 0x2E, 0x00, 0x58, 0x2E, 0xC8, 0x2E, 0x00, 0x2E, 0xFE, 0xD4,
    ];

    #[test]
    fn test_encode_reference_frame() {
        assert_eq!(REFERENCE_FRAME.encode(), REFERENCE_BYTES);
    }

    #[test]
    fn test_decode_reference_frame() {
        assert_eq!(TelemetryFrame::decode(&REFERENCE_BYTES), Ok(REFERENCE_FRAME));
    }

    #[test]
    fn test_decode_rejects_bad_sync() {
        let mut bytes = REFERENCE_BYTES;
        bytes[0] = 0x00;
        assert_eq!(TelemetryFrame::decode(&bytes), Err(FrameError::Sync));
    }

    #[test]
    fn test_decode_reports_first_bad_separator() {
        let mut bytes = REFERENCE_BYTES;
        bytes[9] = b',';
        bytes[13] = b',';
        assert_eq!(TelemetryFrame::decode(&bytes), Err(FrameError::Separator { offset: 9 }));
    }

    #[test]
    fn test_decoder_skips_leading_garbage() {
        let mut decoder = FrameDecoder::new();
        for b in [0x00, 0x12, 0x2E] {
            assert_eq!(decoder.push(b), None);
        }
        let mut result = None;
        for b in REFERENCE_BYTES {
            result = decoder.push(b);
        }
        assert_eq!(result, Some(Ok(REFERENCE_FRAME)));
        assert_eq!(decoder.discarded(), 3);
    }

    #[test]
    fn test_decoder_back_to_back_frames() {
        let mut decoder = FrameDecoder::new();
        let second = TelemetryFrame {
            gear: 4,
            ..REFERENCE_FRAME
        };
        let frames: std::vec::Vec<_> = REFERENCE_BYTES
            .iter()
            .chain(second.encode().iter())
            .filter_map(|&b| decoder.push(b))
            .collect();
        assert_eq!(frames, vec![Ok(REFERENCE_FRAME), Ok(second)]);
    }

    #[test]
    fn test_decoder_recovers_frame_inside_corrupt_window() {
        let mut decoder = FrameDecoder::new();
        // A stray sync byte followed by a truncated frame start, then a real frame
        let mut stream = vec![SYNC_BYTE, b'.', 0x01];
        stream.extend_from_slice(&REFERENCE_BYTES);

        let results: std::vec::Vec<_> = stream.iter().filter_map(|&b| decoder.push(b)).collect();
        assert_eq!(results.len(), 2);
        assert!(matches!(results[0], Err(FrameError::Separator { .. })));
        assert_eq!(results[1], Ok(REFERENCE_FRAME));
    }

    #[test]
    fn test_frame_error_display() {
        assert_eq!(FrameError::Sync.to_string(), "missing sync byte 0xAB");
        assert_eq!(FrameError::Separator { offset: 6 }.to_string(), "bad separator at offset 6");
    }
}
