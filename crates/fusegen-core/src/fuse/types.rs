//! Fuse triple types

use core::fmt;
use core::str::FromStr;

use super::bits::{ExtendedFuse, HighFuse, LowFuse};
use crate::config::Configuration;
use crate::error::{Error, MalformedInput, Result};

/// One of the three fuse bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FuseByte {
    /// Low fuse (clock selection, CKOUT, CKDIV8)
    Low,
    /// High fuse (reset, debugWIRE, SPI, watchdog, EEPROM, BODLEVEL copy)
    High,
    /// Extended fuse (clock failure detection, BODLEVEL)
    Extended,
}

impl FuseByte {
    /// All fuse bytes in triple order
    pub const ALL: [FuseByte; 3] = [FuseByte::Low, FuseByte::High, FuseByte::Extended];

    /// Name used by programming tools (`lfuse`, `hfuse`, `efuse`)
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Low => "lfuse",
            Self::High => "hfuse",
            Self::Extended => "efuse",
        }
    }
}

impl fmt::Display for FuseByte {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The three fuse bytes of the device
///
/// This is a plain value; nothing here reads or writes hardware.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FuseBytes {
    /// Low fuse byte
    pub lfuse: u8,
    /// High fuse byte
    pub hfuse: u8,
    /// Extended fuse byte
    pub efuse: u8,
}

impl Default for FuseBytes {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl FuseBytes {
    /// Factory default fuses, also produced by an all-default [`Configuration`]
    pub const DEFAULT: FuseBytes = FuseBytes::new(0x62, 0xDF, 0xF7);

    /// Create a fuse triple
    pub const fn new(lfuse: u8, hfuse: u8, efuse: u8) -> Self {
        Self {
            lfuse,
            hfuse,
            efuse,
        }
    }

    /// Get the raw value of one fuse byte
    pub const fn get(&self, fuse: FuseByte) -> u8 {
        match fuse {
            FuseByte::Low => self.lfuse,
            FuseByte::High => self.hfuse,
            FuseByte::Extended => self.efuse,
        }
    }

    /// Low fuse as bit flags
    pub const fn low(&self) -> LowFuse {
        LowFuse::from_bits_retain(self.lfuse)
    }

    /// High fuse as bit flags
    pub const fn high(&self) -> HighFuse {
        HighFuse::from_bits_retain(self.hfuse)
    }

    /// Extended fuse as bit flags
    pub const fn extended(&self) -> ExtendedFuse {
        ExtendedFuse::from_bits_retain(self.efuse)
    }

    /// The packed CKSEL/SUT field (low 6 bits of `lfuse`)
    pub const fn clock_select_bits(&self) -> u8 {
        self.lfuse & LowFuse::CKSEL_SUT.bits()
    }

    /// Decode into the configuration that produces these fuses
    ///
    /// See [`crate::decode::decode`].
    pub fn decode(&self) -> Result<Configuration> {
        crate::decode::decode(self)
    }
}

impl fmt::Display for FuseBytes {
    /// Formats as `lfuse hfuse efuse` in lowercase hex, e.g. `62 df f7`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02x} {:02x} {:02x}", self.lfuse, self.hfuse, self.efuse)
    }
}

/// Parse one hex byte, with or without a `0x` prefix
fn parse_hex_u8(s: &str, fuse: FuseByte) -> Result<u8> {
    let s = s.trim();
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    u8::from_str_radix(digits, 16).map_err(|_| Error::MalformedInput(MalformedInput::InvalidHex { fuse }))
}

impl FromStr for FuseBytes {
    type Err = Error;

    /// Parses `lfuse,hfuse,efuse`, e.g. `62,df,f7` or `0x62, 0xDF, 0xF7`
    fn from_str(s: &str) -> Result<Self> {
        let mut fields = s.split(',');
        let mut bytes = [0u8; 3];

        for (slot, fuse) in bytes.iter_mut().zip(FuseByte::ALL) {
            let field = fields
                .next()
                .ok_or(Error::MalformedInput(MalformedInput::MissingField { fuse }))?;
            *slot = parse_hex_u8(field, fuse)?;
        }

        if fields.next().is_some() {
            return Err(Error::MalformedInput(MalformedInput::TrailingField));
        }

        Ok(Self::new(bytes[0], bytes[1], bytes[2]))
    }
}
