//! Clock selection types

use core::fmt;
use core::str::FromStr;

use crate::error::{Error, FuseOption, Result};

/// External resonator kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResonatorKind {
    /// Quartz crystal (`cry`)
    Crystal,
    /// Ceramic resonator (`cer`)
    Ceramic,
}

impl ResonatorKind {
    /// All resonator kinds
    pub const ALL: [ResonatorKind; 2] = [ResonatorKind::Crystal, ResonatorKind::Ceramic];

    /// Option token for this kind
    pub const fn token(&self) -> &'static str {
        match self {
            Self::Crystal => "cry",
            Self::Ceramic => "cer",
        }
    }
}

/// Frequency band of an external resonator (CKSEL[2:1])
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpeedClass {
    /// 8-16 MHz (`8m`)
    Mhz8,
    /// 3-8 MHz (`3m`)
    Mhz3,
    /// 0.9-3 MHz (`0m9`)
    Mhz0_9,
    /// 0.4-0.9 MHz (`0m4`)
    Mhz0_4,
}

impl SpeedClass {
    /// All speed classes, fastest first
    pub const ALL: [SpeedClass; 4] = [
        SpeedClass::Mhz8,
        SpeedClass::Mhz3,
        SpeedClass::Mhz0_9,
        SpeedClass::Mhz0_4,
    ];

    /// Option token for this speed class
    pub const fn token(&self) -> &'static str {
        match self {
            Self::Mhz8 => "8m",
            Self::Mhz3 => "3m",
            Self::Mhz0_9 => "0m9",
            Self::Mhz0_4 => "0m4",
        }
    }

    /// Frequency range covered by this class
    pub const fn range(&self) -> &'static str {
        match self {
            Self::Mhz8 => "8-16 MHz",
            Self::Mhz3 => "3-8 MHz",
            Self::Mhz0_9 => "0.9-3 MHz",
            Self::Mhz0_4 => "0.4-0.9 MHz",
        }
    }

    fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.token() == token)
    }
}

/// Start-up delay policy (SUT)
///
/// `Slow` and `Fast` describe how quickly the supply rises at power-on;
/// `Bod` relies on the brown-out detector and needs no extra delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StartupMode {
    /// Slowly rising power
    #[default]
    Slow,
    /// Fast rising power
    Fast,
    /// Brown-out detection enabled
    Bod,
}

impl StartupMode {
    /// All start-up modes
    pub const ALL: [StartupMode; 3] = [StartupMode::Slow, StartupMode::Fast, StartupMode::Bod];

    /// Option token for this mode
    pub const fn token(&self) -> &'static str {
        match self {
            Self::Slow => "slow",
            Self::Fast => "fast",
            Self::Bod => "bod",
        }
    }

    /// Human readable description
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Slow => "slowly rising power",
            Self::Fast => "fast rising power",
            Self::Bod => "BOD enabled",
        }
    }

    fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.token() == token)
    }
}

/// Start-up mode of an external resonator
///
/// The fast start-up variants only exist for ceramic resonators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResonatorMode {
    /// Slowly rising power
    Slow,
    /// Fast rising power
    Fast,
    /// Brown-out detection enabled
    Bod,
    /// Slowly rising power, fast oscillator start-up
    SlowFastStart,
    /// Fast rising power, fast oscillator start-up
    FastFastStart,
}

impl ResonatorMode {
    /// All resonator modes
    pub const ALL: [ResonatorMode; 5] = [
        ResonatorMode::Slow,
        ResonatorMode::Fast,
        ResonatorMode::Bod,
        ResonatorMode::SlowFastStart,
        ResonatorMode::FastFastStart,
    ];

    /// Option token for this mode
    pub const fn token(&self) -> &'static str {
        match self {
            Self::Slow => "slow",
            Self::Fast => "fast",
            Self::Bod => "bod",
            Self::SlowFastStart => "slow-fstart",
            Self::FastFastStart => "fast-fstart",
        }
    }

    /// Human readable description
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Slow => "slowly rising power",
            Self::Fast => "fast rising power",
            Self::Bod => "BOD enabled",
            Self::SlowFastStart => "slowly rising power, fast start-up",
            Self::FastFastStart => "fast rising power, fast start-up",
        }
    }

    const fn from_parts(mode: StartupMode, fast_start: bool) -> Option<Self> {
        match (mode, fast_start) {
            (StartupMode::Slow, false) => Some(Self::Slow),
            (StartupMode::Fast, false) => Some(Self::Fast),
            (StartupMode::Bod, false) => Some(Self::Bod),
            (StartupMode::Slow, true) => Some(Self::SlowFastStart),
            (StartupMode::Fast, true) => Some(Self::FastFastStart),
            (StartupMode::Bod, true) => None,
        }
    }
}

/// Clock source and start-up behaviour
///
/// Every variant corresponds to one family of CKSEL/SUT codes. Some values
/// can be written down but have no code, notably a crystal with a fast
/// start-up mode or a low-frequency oscillator with both `Bod` and
/// `fast_start`; encoding those fails with [`Error::UnrecognizedValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClockSelect {
    /// External crystal or ceramic resonator
    ExternalOscillator {
        /// Crystal or ceramic
        kind: ResonatorKind,
        /// Frequency band
        speed: SpeedClass,
        /// Start-up mode
        mode: ResonatorMode,
    },
    /// Low frequency (32 kHz) crystal oscillator
    LowFrequency {
        /// Start-up mode
        mode: StartupMode,
        /// Fast oscillator start-up
        fast_start: bool,
    },
    /// Calibrated internal RC oscillator (8 MHz)
    InternalRc {
        /// Start-up mode
        mode: StartupMode,
    },
    /// Internal 128 kHz oscillator
    Internal128k {
        /// Start-up mode
        mode: StartupMode,
    },
    /// External clock on the XTAL1 pin
    ExternalClock {
        /// Start-up mode
        mode: StartupMode,
    },
}

impl Default for ClockSelect {
    /// Internal RC oscillator, slowly rising power (factory setting)
    fn default() -> Self {
        ClockSelect::InternalRc {
            mode: StartupMode::Slow,
        }
    }
}

impl ClockSelect {
    /// Human readable name of the clock source
    pub const fn source_description(&self) -> &'static str {
        match self {
            Self::ExternalOscillator {
                kind: ResonatorKind::Crystal,
                ..
            } => "Crystal oscillator",
            Self::ExternalOscillator {
                kind: ResonatorKind::Ceramic,
                ..
            } => "Ceramic resonator",
            Self::LowFrequency { .. } => "Low frequency (32 kHz) oscillator",
            Self::InternalRc { .. } => "Internal RC oscillator (8 MHz)",
            Self::Internal128k { .. } => "Internal oscillator (128 kHz)",
            Self::ExternalClock { .. } => "External clock",
        }
    }
}

impl fmt::Display for ClockSelect {
    /// Formats the option token, e.g. `cry-8m-slow` or `lf-fast-fstart`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExternalOscillator { kind, speed, mode } => {
                write!(f, "{}-{}-{}", kind.token(), speed.token(), mode.token())
            }
            Self::LowFrequency { mode, fast_start } => {
                write!(f, "lf-{}", mode.token())?;
                if *fast_start {
                    write!(f, "-fstart")?;
                }
                Ok(())
            }
            Self::InternalRc { mode } => write!(f, "rc-{}", mode.token()),
            Self::Internal128k { mode } => write!(f, "int-{}", mode.token()),
            Self::ExternalClock { mode } => write!(f, "ext-{}", mode.token()),
        }
    }
}

impl FromStr for ClockSelect {
    type Err = Error;

    /// Parses an option token such as `cer-3m-fast-fstart` or `rc-bod`
    ///
    /// The result is not checked against the code table; use
    /// [`ClockSelect::encode`] for that.
    fn from_str(s: &str) -> Result<Self> {
        let unrecognized = Error::UnrecognizedValue(FuseOption::ClockSelect);
        let mut parts = s.split('-');
        let family = parts.next().ok_or(unrecognized)?;

        let sel = match family {
            "cry" | "cer" => {
                let kind = if family == "cry" {
                    ResonatorKind::Crystal
                } else {
                    ResonatorKind::Ceramic
                };
                let speed = parts
                    .next()
                    .and_then(SpeedClass::from_token)
                    .ok_or(unrecognized)?;
                let (mode, fast_start) = parse_mode(&mut parts).ok_or(unrecognized)?;
                let mode = ResonatorMode::from_parts(mode, fast_start).ok_or(unrecognized)?;
                ClockSelect::ExternalOscillator { kind, speed, mode }
            }
            "lf" => {
                let (mode, fast_start) = parse_mode(&mut parts).ok_or(unrecognized)?;
                ClockSelect::LowFrequency { mode, fast_start }
            }
            "rc" | "int" | "ext" => {
                let mode = parts
                    .next()
                    .and_then(StartupMode::from_token)
                    .ok_or(unrecognized)?;
                match family {
                    "rc" => ClockSelect::InternalRc { mode },
                    "int" => ClockSelect::Internal128k { mode },
                    _ => ClockSelect::ExternalClock { mode },
                }
            }
            _ => return Err(unrecognized),
        };

        if parts.next().is_some() {
            return Err(unrecognized);
        }
        Ok(sel)
    }
}

/// Parse `<mode>` or `<mode>-fstart`
fn parse_mode<'a>(parts: &mut impl Iterator<Item = &'a str>) -> Option<(StartupMode, bool)> {
    let mode = StartupMode::from_token(parts.next()?)?;
    match parts.next() {
        None => Some((mode, false)),
        Some("fstart") => Some((mode, true)),
        Some(_) => None,
    }
}
