//! Human readable fuse reports
//!
//! [`FuseReport`] lists every bit of a fuse triple next to its datasheet
//! name and then the options it decodes to:
//!
//! ```text
//! lfuse = 0xff
//!   7  CKDIV8     1 *  Divide clock by 8
//!   6  CKOUT      1    Clock output
//!   ...
//! options: --bod-level=2v7 --div8-disable --clk-sel=cry-8m-slow
//! clock:   Crystal oscillator (8-16 MHz), slowly rising power
//! ```
//!
//! Bits that differ from the factory default are marked with `*`.

use std::fmt;

use fusegen_core::fuse::bits_of;
use fusegen_core::{ClockSelect, Configuration, FuseByte, FuseBytes};

/// One-line description of a clock selection
pub fn describe_clock(clock: &ClockSelect) -> String {
    let source = clock.source_description();
    match clock {
        ClockSelect::ExternalOscillator { speed, mode, .. } => {
            format!("{} ({}), {}", source, speed.range(), mode.description())
        }
        ClockSelect::LowFrequency { mode, fast_start } => {
            let mut text = format!("{}, {}", source, mode.description());
            if *fast_start {
                text.push_str(", fast start-up");
            }
            text
        }
        ClockSelect::InternalRc { mode }
        | ClockSelect::Internal128k { mode }
        | ClockSelect::ExternalClock { mode } => {
            format!("{}, {}", source, mode.description())
        }
    }
}

/// Bit-by-bit report of a fuse triple
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuseReport {
    fuses: FuseBytes,
    decoded: fusegen_core::Result<Configuration>,
}

impl FuseReport {
    /// Build a report, decoding the triple once
    pub fn new(fuses: FuseBytes) -> Self {
        Self {
            fuses,
            decoded: fuses.decode(),
        }
    }

    /// The reported fuse bytes
    pub fn fuses(&self) -> &FuseBytes {
        &self.fuses
    }

    /// Decoded configuration, or why decoding failed
    pub fn decoded(&self) -> &fusegen_core::Result<Configuration> {
        &self.decoded
    }

    /// Number of bits that differ from the factory default
    pub fn changed_bits(&self) -> usize {
        FuseByte::ALL
            .into_iter()
            .flat_map(bits_of)
            .filter(|bit| !bit.is_default(&self.fuses))
            .count()
    }
}

impl fmt::Display for FuseReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for fuse in FuseByte::ALL {
            writeln!(f, "{} = 0x{:02x}", fuse, self.fuses.get(fuse))?;
            for bit in bits_of(fuse) {
                let marker = if bit.is_default(&self.fuses) { ' ' } else { '*' };
                writeln!(
                    f,
                    "  {}  {:<10} {} {}  {}",
                    bit.bit_index,
                    bit.name,
                    bit.value(&self.fuses),
                    marker,
                    bit.description
                )?;
            }
        }

        match &self.decoded {
            Ok(config) => {
                writeln!(f, "options: {}", config.args())?;
                if let Some(clock) = &config.clock_select {
                    writeln!(f, "clock:   {}", describe_clock(clock))?;
                }
                Ok(())
            }
            Err(e) => writeln!(f, "options: cannot decode ({})", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_clock() {
        let cases = [
            ("cry-8m-slow", "Crystal oscillator (8-16 MHz), slowly rising power"),
            ("cer-0m4-fast-fstart", "Ceramic resonator (0.4-0.9 MHz), fast rising power, fast start-up"),
            ("lf-bod", "Low frequency (32 kHz) oscillator, BOD enabled"),
            ("lf-fast-fstart", "Low frequency (32 kHz) oscillator, fast rising power, fast start-up"),
            ("rc-slow", "Internal RC oscillator (8 MHz), slowly rising power"),
            ("int-fast", "Internal oscillator (128 kHz), fast rising power"),
            ("ext-bod", "External clock, BOD enabled"),
        ];
        for (token, expected) in cases {
            let clock: ClockSelect = token.parse().unwrap();
            assert_eq!(describe_clock(&clock), expected, "token {}", token);
        }
    }

    #[test]
    fn test_default_report() {
        let report = FuseReport::new(FuseBytes::DEFAULT);
        assert_eq!(report.changed_bits(), 0);

        let text = report.to_string();
        assert!(text.starts_with("lfuse = 0x62\n"));
        assert!(text.contains("hfuse = 0xdf\n"));
        assert!(text.contains("efuse = 0xf7\n"));
        assert!(text.contains("  7  CKDIV8     0    Divide clock by 8\n"));
        assert!(text.contains("options: --bod-level=off --clk-sel=rc-slow\n"));
        assert!(text.ends_with("clock:   Internal RC oscillator (8 MHz), slowly rising power\n"));
        // 3 headers, 24 bits, options and clock
        assert_eq!(text.lines().count(), 29);
    }

    #[test]
    fn test_changed_bits_marked() {
        let report = FuseReport::new(FuseBytes::new(0xFF, 0xDD, 0xF5));
        let text = report.to_string();
        assert!(text.contains("  7  CKDIV8     1 *  Divide clock by 8\n"));
        assert!(text.contains("  1  BODLEVEL1  0 *  Brown-out detector trigger level\n"));
        assert!(text.contains("--bod-level=2v7 --div8-disable --clk-sel=cry-8m-slow"));
        // lfuse: CKDIV8, SUT0, CKSEL3, CKSEL2, CKSEL0; BODLEVEL1 in both hfuse and efuse
        assert_eq!(report.changed_bits(), 7);
    }

    #[test]
    fn test_undecodable_report() {
        let report = FuseReport::new(FuseBytes::new(0x72, 0xDF, 0xF7));
        assert!(report.decoded().is_err());

        let text = report.to_string();
        assert!(text.contains("lfuse = 0x72\n"));
        assert!(text.ends_with("options: cannot decode (unrecognized clock select value)\n"));
        assert!(!text.contains("clock:"));
    }
}
