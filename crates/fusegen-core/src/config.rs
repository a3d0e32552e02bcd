//! Device configuration options
//!
//! A [`Configuration`] is the symbolic side of the codec. Two of its fields
//! are optional; leaving them out selects the factory setting, and
//! [`Configuration::canonicalize`] makes that choice explicit.

use core::fmt;
use core::str::FromStr;

use crate::clock::ClockSelect;
use crate::error::{Error, FuseOption, Result};
use crate::fuse::FuseBytes;

/// Brown-out detector trip level (BODLEVEL[2:0])
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BrownOutLevel {
    /// Brown-out detection disabled
    #[default]
    Off,
    /// 1.8 V typical
    V1_8,
    /// 2.7 V typical
    V2_7,
    /// 4.3 V typical
    V4_3,
}

impl BrownOutLevel {
    /// All levels
    pub const ALL: [BrownOutLevel; 4] = [
        BrownOutLevel::Off,
        BrownOutLevel::V1_8,
        BrownOutLevel::V2_7,
        BrownOutLevel::V4_3,
    ];

    /// Option token for this level
    pub const fn token(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::V1_8 => "1v8",
            Self::V2_7 => "2v7",
            Self::V4_3 => "4v3",
        }
    }

    /// BODLEVEL[2:0] bit pattern
    pub const fn bits(&self) -> u8 {
        match self {
            Self::Off => 0b111,
            Self::V1_8 => 0b110,
            Self::V2_7 => 0b101,
            Self::V4_3 => 0b100,
        }
    }

    /// Look up a level from a BODLEVEL[2:0] bit pattern
    ///
    /// Patterns `011` down to `000` are reserved and yield
    /// [`Error::UnrecognizedValue`].
    pub fn from_bits(bits: u8) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|level| level.bits() == bits)
            .ok_or(Error::UnrecognizedValue(FuseOption::BrownOutLevel))
    }
}

impl fmt::Display for BrownOutLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for BrownOutLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|level| level.token() == s)
            .ok_or(Error::UnrecognizedValue(FuseOption::BrownOutLevel))
    }
}

/// Structured fuse configuration
///
/// Boolean fields are `false` when the feature keeps its factory setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Configuration {
    /// Enable clock failure detection (CFD)
    pub clock_failure_detect: bool,
    /// Brown-out trip level, `None` means [`BrownOutLevel::Off`]
    pub brown_out_level: Option<BrownOutLevel>,
    /// Disable the external reset pin (RSTDISBL)
    pub reset_disable: bool,
    /// Enable debugWIRE (DWEN)
    pub debug_wire_enable: bool,
    /// Disable serial (SPI) programming (SPIEN)
    pub spi_program_disable: bool,
    /// Force the watchdog on in system reset mode (WDTON)
    pub watchdog_force_on: bool,
    /// Preserve EEPROM contents through chip erase (EESAVE)
    pub eeprom_preserve: bool,
    /// Disable the divide-by-8 clock prescaler at start-up (CKDIV8)
    pub clock_divide_by_8_disable: bool,
    /// Output the system clock on CLKO (CKOUT)
    pub clock_output_enable: bool,
    /// Clock source and start-up time, `None` means `rc-slow`
    pub clock_select: Option<ClockSelect>,
}

impl Configuration {
    /// Create a configuration with every option at its factory setting
    pub const fn new() -> Self {
        Self {
            clock_failure_detect: false,
            brown_out_level: None,
            reset_disable: false,
            debug_wire_enable: false,
            spi_program_disable: false,
            watchdog_force_on: false,
            eeprom_preserve: false,
            clock_divide_by_8_disable: false,
            clock_output_enable: false,
            clock_select: None,
        }
    }

    /// Replace absent options with the values they stand for
    ///
    /// Decoding always yields a canonical configuration.
    pub fn canonicalize(&self) -> Self {
        Self {
            brown_out_level: Some(self.brown_out_level.unwrap_or_default()),
            clock_select: Some(self.clock_select.unwrap_or_default()),
            ..*self
        }
    }

    /// Encode into fuse bytes
    ///
    /// See [`crate::encode::encode`].
    pub fn encode(&self) -> Result<FuseBytes> {
        crate::encode::encode(self)
    }

    /// Render as option flags, e.g. `--bod-level=2v7 --clk-sel=cry-8m-slow`
    pub fn args(&self) -> ConfigArgs<'_> {
        ConfigArgs { config: self }
    }
}

/// Display adapter that renders a [`Configuration`] as option flags
///
/// Flags are separated by single spaces. Options at their factory setting
/// produce no flag, except `--bod-level` and `--clk-sel` which appear
/// whenever the value is present.
#[derive(Debug, Clone, Copy)]
pub struct ConfigArgs<'a> {
    config: &'a Configuration,
}

impl fmt::Display for ConfigArgs<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = self.config;
        let mut sep = "";
        let mut flag = |f: &mut fmt::Formatter<'_>, args: fmt::Arguments<'_>| {
            let res = write!(f, "{}{}", sep, args);
            sep = " ";
            res
        };

        if c.clock_failure_detect {
            flag(f, format_args!("--cfd-enable"))?;
        }
        if let Some(level) = c.brown_out_level {
            flag(f, format_args!("--bod-level={}", level))?;
        }
        if c.reset_disable {
            flag(f, format_args!("--reset-disable"))?;
        }
        if c.debug_wire_enable {
            flag(f, format_args!("--debugwire-enable"))?;
        }
        if c.spi_program_disable {
            flag(f, format_args!("--spi-disable"))?;
        }
        if c.watchdog_force_on {
            flag(f, format_args!("--wdt-enable"))?;
        }
        if c.eeprom_preserve {
            flag(f, format_args!("--ee-save"))?;
        }
        if c.clock_divide_by_8_disable {
            flag(f, format_args!("--div8-disable"))?;
        }
        if c.clock_output_enable {
            flag(f, format_args!("--clk-out"))?;
        }
        if let Some(sel) = c.clock_select {
            flag(f, format_args!("--clk-sel={}", sel))?;
        }
        Ok(())
    }
}
