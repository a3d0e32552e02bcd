//! CKSEL/SUT code tables
//!
//! Codes are looked up in small static tables, one per bit group. Encoding
//! searches a table by key, decoding searches the same table by bit pattern,
//! so the two directions cannot drift apart.

use super::types::{ClockSelect, ResonatorKind, ResonatorMode, SpeedClass, StartupMode};
use crate::error::{Error, FuseOption, Result};
use crate::fuse::LowFuse;

/// CKSEL3: set for crystal/ceramic resonators
const RESONATOR_FAMILY: u8 = 0b00_1000;
/// CKSEL[2:1] of a resonator code
const SPEED_MASK: u8 = 0b00_0110;
/// SUT[1:0] and CKSEL0 of a resonator code
const RESONATOR_MASK: u8 = 0b11_0001;
/// SUT[1:0] of any other code
const MODE_MASK: u8 = 0b11_0000;
/// CKSEL[2:0] of any other code
const SOURCE_MASK: u8 = 0b00_0111;

/// Code used when no clock selection is given (`rc-slow`)
pub const DEFAULT_CODE: u8 = 0b10_0010;

static SPEED_TABLE: [(SpeedClass, u8); 4] = [
    (SpeedClass::Mhz8, 0b00_0110),
    (SpeedClass::Mhz3, 0b00_0100),
    (SpeedClass::Mhz0_9, 0b00_0010),
    (SpeedClass::Mhz0_4, 0b00_0000),
];

static RESONATOR_TABLE: [((ResonatorKind, ResonatorMode), u8); 8] = [
    ((ResonatorKind::Crystal, ResonatorMode::Slow), 0b11_0001),
    ((ResonatorKind::Crystal, ResonatorMode::Fast), 0b10_0001),
    ((ResonatorKind::Crystal, ResonatorMode::Bod), 0b01_0001),
    ((ResonatorKind::Ceramic, ResonatorMode::Slow), 0b00_0001),
    ((ResonatorKind::Ceramic, ResonatorMode::Fast), 0b11_0000),
    ((ResonatorKind::Ceramic, ResonatorMode::Bod), 0b10_0000),
    ((ResonatorKind::Ceramic, ResonatorMode::SlowFastStart), 0b01_0000),
    ((ResonatorKind::Ceramic, ResonatorMode::FastFastStart), 0b00_0000),
];

static MODE_TABLE: [(StartupMode, u8); 3] = [
    (StartupMode::Slow, 0b10_0000),
    (StartupMode::Fast, 0b01_0000),
    (StartupMode::Bod, 0b00_0000),
];

/// Clock source of the non-resonator family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Source {
    LowFrequency,
    LowFrequencyFastStart,
    InternalRc,
    Internal128k,
    ExternalClock,
}

static SOURCE_TABLE: [(Source, u8); 5] = [
    (Source::LowFrequency, 0b101),
    (Source::LowFrequencyFastStart, 0b100),
    (Source::InternalRc, 0b010),
    (Source::Internal128k, 0b011),
    (Source::ExternalClock, 0b000),
];

impl Source {
    /// Whether `mode` has a code for this source
    ///
    /// The low-frequency oscillator has no fast start-up code with BOD.
    const fn has_entry(self, mode: StartupMode) -> bool {
        !matches!(
            (self, mode),
            (Source::LowFrequencyFastStart, StartupMode::Bod)
        )
    }

    const fn with_mode(self, mode: StartupMode) -> ClockSelect {
        match self {
            Source::LowFrequency => ClockSelect::LowFrequency {
                mode,
                fast_start: false,
            },
            Source::LowFrequencyFastStart => ClockSelect::LowFrequency {
                mode,
                fast_start: true,
            },
            Source::InternalRc => ClockSelect::InternalRc { mode },
            Source::Internal128k => ClockSelect::Internal128k { mode },
            Source::ExternalClock => ClockSelect::ExternalClock { mode },
        }
    }
}

fn code_of<K: Copy + PartialEq>(table: &[(K, u8)], key: K) -> Option<u8> {
    table.iter().find(|(k, _)| *k == key).map(|&(_, code)| code)
}

fn key_of<K: Copy>(table: &[(K, u8)], code: u8) -> Option<K> {
    table.iter().find(|(_, c)| *c == code).map(|&(key, _)| key)
}

impl ClockSelect {
    /// Split a non-resonator selection into its table keys
    const fn internal_parts(&self) -> Option<(Source, StartupMode)> {
        match *self {
            ClockSelect::ExternalOscillator { .. } => None,
            ClockSelect::LowFrequency {
                mode,
                fast_start: false,
            } => Some((Source::LowFrequency, mode)),
            ClockSelect::LowFrequency {
                mode,
                fast_start: true,
            } => Some((Source::LowFrequencyFastStart, mode)),
            ClockSelect::InternalRc { mode } => Some((Source::InternalRc, mode)),
            ClockSelect::Internal128k { mode } => Some((Source::Internal128k, mode)),
            ClockSelect::ExternalClock { mode } => Some((Source::ExternalClock, mode)),
        }
    }

    fn lookup_code(&self) -> Option<u8> {
        if let ClockSelect::ExternalOscillator { kind, speed, mode } = *self {
            let speed_bits = code_of(&SPEED_TABLE, speed)?;
            let resonator_bits = code_of(&RESONATOR_TABLE, (kind, mode))?;
            return Some(RESONATOR_FAMILY | speed_bits | resonator_bits);
        }

        let (source, mode) = self.internal_parts()?;
        if !source.has_entry(mode) {
            return None;
        }
        Some(code_of(&MODE_TABLE, mode)? | code_of(&SOURCE_TABLE, source)?)
    }

    /// Encode into the 6-bit CKSEL/SUT field
    ///
    /// Fails with [`Error::UnrecognizedValue`] when the combination has no
    /// code, e.g. a crystal with fast start-up.
    pub fn encode(&self) -> Result<u8> {
        match self.lookup_code() {
            Some(code) => {
                log::trace!("clock select {} -> 0b{:06b}", self, code);
                Ok(code)
            }
            None => {
                log::debug!("clock select {} has no CKSEL/SUT code", self);
                Err(Error::UnrecognizedValue(FuseOption::ClockSelect))
            }
        }
    }

    /// Decode a 6-bit CKSEL/SUT field
    ///
    /// Bits above bit 5 are ignored. CKSEL3 picks the family, the remaining
    /// bits must then match that family's tables exactly.
    pub fn decode(code: u8) -> Result<Self> {
        let code = code & LowFuse::CKSEL_SUT.bits();

        let sel = if code & RESONATOR_FAMILY != 0 {
            decode_resonator(code)
        } else {
            decode_other(code)
        };

        match sel {
            Some(sel) => {
                log::trace!("clock select 0b{:06b} -> {}", code, sel);
                Ok(sel)
            }
            None => {
                log::debug!("unrecognized clock select encoding 0b{:06b}", code);
                Err(Error::UnrecognizedValue(FuseOption::ClockSelect))
            }
        }
    }

    /// Iterate over every clock selection that has a code
    ///
    /// Resonators come first (by speed class), followed by the other sources.
    pub fn all() -> impl Iterator<Item = ClockSelect> {
        let resonators = SPEED_TABLE.iter().flat_map(|&(speed, _)| {
            RESONATOR_TABLE
                .iter()
                .map(move |&((kind, mode), _)| ClockSelect::ExternalOscillator { kind, speed, mode })
        });
        let others = SOURCE_TABLE.iter().flat_map(|&(source, _)| {
            MODE_TABLE
                .iter()
                .filter(move |&&(mode, _)| source.has_entry(mode))
                .map(move |&(mode, _)| source.with_mode(mode))
        });
        resonators.chain(others)
    }
}

fn decode_resonator(code: u8) -> Option<ClockSelect> {
    let speed = key_of(&SPEED_TABLE, code & SPEED_MASK)?;
    let (kind, mode) = key_of(&RESONATOR_TABLE, code & RESONATOR_MASK)?;
    Some(ClockSelect::ExternalOscillator { kind, speed, mode })
}

fn decode_other(code: u8) -> Option<ClockSelect> {
    let mode = key_of(&MODE_TABLE, code & MODE_MASK)?;
    let source = key_of(&SOURCE_TABLE, code & SOURCE_MASK)?;
    if !source.has_entry(mode) {
        return None;
    }
    Some(source.with_mode(mode))
}

/// Encode an optional clock selection
///
/// `None` stands for the factory setting and yields [`DEFAULT_CODE`].
pub fn encode_clock_select(sel: Option<&ClockSelect>) -> Result<u8> {
    match sel {
        Some(sel) => sel.encode(),
        None => Ok(DEFAULT_CODE),
    }
}
