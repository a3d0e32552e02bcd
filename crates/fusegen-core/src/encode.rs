//! Configuration to fuse bytes

use crate::clock::encode_clock_select;
use crate::config::Configuration;
use crate::error::Result;
use crate::fuse::{ExtendedFuse, FuseBytes, HighFuse, LowFuse};

/// Encode a configuration into fuse bytes
///
/// The extended fuse starts with its reserved bits set; the other two start
/// at zero. Each option then sets the bits of its non-enabled (active-low)
/// or enabled (active-high) state. The brown-out level is written to both
/// `efuse` and `hfuse`.
///
/// Any option without a code fails the whole call, no partial triple is
/// ever returned.
pub fn encode(config: &Configuration) -> Result<FuseBytes> {
    // Resolve the table-driven fields first
    let bod = config.brown_out_level.unwrap_or_default().bits();
    let cksel = encode_clock_select(config.clock_select.as_ref())?;

    let mut efuse = ExtendedFuse::RESERVED;
    let mut hfuse = HighFuse::empty();
    let mut lfuse = LowFuse::empty();

    if config.clock_failure_detect {
        efuse |= ExtendedFuse::CFD;
    }
    efuse |= ExtendedFuse::from_bits_retain(bod) & ExtendedFuse::BODLEVEL;
    hfuse |= HighFuse::from_bits_retain(bod) & HighFuse::BODLEVEL;

    if !config.reset_disable {
        hfuse |= HighFuse::RSTDISBL;
    }
    if !config.debug_wire_enable {
        hfuse |= HighFuse::DWEN;
    }
    if config.spi_program_disable {
        hfuse |= HighFuse::SPIEN;
    }
    if !config.watchdog_force_on {
        hfuse |= HighFuse::WDTON;
    }
    if !config.eeprom_preserve {
        hfuse |= HighFuse::EESAVE;
    }

    if config.clock_divide_by_8_disable {
        lfuse |= LowFuse::CKDIV8;
    }
    if !config.clock_output_enable {
        lfuse |= LowFuse::CKOUT;
    }
    lfuse |= LowFuse::from_bits_retain(cksel) & LowFuse::CKSEL_SUT;

    let fuses = FuseBytes::new(lfuse.bits(), hfuse.bits(), efuse.bits());
    log::debug!("encoded {} -> {}", config.args(), fuses);
    Ok(fuses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{ClockSelect, ResonatorKind, ResonatorMode, SpeedClass, StartupMode};
    use crate::config::BrownOutLevel;
    use crate::error::{Error, FuseOption};
    use std::string::ToString;

    #[test]
    fn test_default_configuration() {
        let fuses = encode(&Configuration::new()).unwrap();
        assert_eq!(fuses, FuseBytes::new(0x62, 0xDF, 0xF7));
        assert_eq!(fuses, FuseBytes::DEFAULT);
        assert_eq!(fuses.to_string(), "62 df f7");
    }

    #[test]
    fn test_explicit_defaults_match_absent() {
        let explicit = Configuration::new().canonicalize();
        assert_eq!(encode(&explicit), encode(&Configuration::new()));
    }

    #[test]
    fn test_brown_out_written_to_both_fuses() {
        for (level, bits) in [
            (BrownOutLevel::Off, 0b111),
            (BrownOutLevel::V1_8, 0b110),
            (BrownOutLevel::V2_7, 0b101),
            (BrownOutLevel::V4_3, 0b100),
        ] {
            let config = Configuration {
                brown_out_level: Some(level),
                ..Configuration::new()
            };
            let fuses = encode(&config).unwrap();
            assert_eq!(fuses.efuse & 0b111, bits, "efuse for {}", level);
            assert_eq!(fuses.hfuse & 0b111, bits, "hfuse for {}", level);
            assert_eq!(fuses.efuse & 0xF8, 0xF0);
            assert_eq!(fuses.hfuse & 0xF8, 0xD8);
        }
    }

    #[test]
    fn test_single_options() {
        let base = Configuration::new();
        let cases: [(Configuration, FuseBytes); 8] = [
            (
                Configuration {
                    clock_failure_detect: true,
                    ..base
                },
                FuseBytes::new(0x62, 0xDF, 0xFF),
            ),
            (
                Configuration {
                    reset_disable: true,
                    ..base
                },
                FuseBytes::new(0x62, 0x5F, 0xF7),
            ),
            (
                Configuration {
                    debug_wire_enable: true,
                    ..base
                },
                FuseBytes::new(0x62, 0x9F, 0xF7),
            ),
            (
                Configuration {
                    spi_program_disable: true,
                    ..base
                },
                FuseBytes::new(0x62, 0xFF, 0xF7),
            ),
            (
                Configuration {
                    watchdog_force_on: true,
                    ..base
                },
                FuseBytes::new(0x62, 0xCF, 0xF7),
            ),
            (
                Configuration {
                    eeprom_preserve: true,
                    ..base
                },
                FuseBytes::new(0x62, 0xD7, 0xF7),
            ),
            (
                Configuration {
                    clock_divide_by_8_disable: true,
                    ..base
                },
                FuseBytes::new(0xE2, 0xDF, 0xF7),
            ),
            (
                Configuration {
                    clock_output_enable: true,
                    ..base
                },
                FuseBytes::new(0x22, 0xDF, 0xF7),
            ),
        ];

        for (config, expected) in cases {
            assert_eq!(encode(&config), Ok(expected), "{}", config.args());
        }
    }

    #[test]
    fn test_arduino_style_configuration() {
        let config = Configuration {
            brown_out_level: Some(BrownOutLevel::V2_7),
            eeprom_preserve: true,
            clock_divide_by_8_disable: true,
            clock_select: Some(ClockSelect::ExternalOscillator {
                kind: ResonatorKind::Crystal,
                speed: SpeedClass::Mhz8,
                mode: ResonatorMode::Slow,
            }),
            ..Configuration::new()
        };
        assert_eq!(encode(&config), Ok(FuseBytes::new(0xFF, 0xD5, 0xF5)));
    }

    #[test]
    fn test_unencodable_clock_fails_whole_encode() {
        let config = Configuration {
            brown_out_level: Some(BrownOutLevel::V1_8),
            eeprom_preserve: true,
            clock_select: Some(ClockSelect::LowFrequency {
                mode: StartupMode::Bod,
                fast_start: true,
            }),
            ..Configuration::new()
        };
        assert_eq!(
            encode(&config),
            Err(Error::UnrecognizedValue(FuseOption::ClockSelect))
        );
    }

    #[test]
    fn test_crystal_fast_start_fails() {
        let config = Configuration {
            clock_select: Some(ClockSelect::ExternalOscillator {
                kind: ResonatorKind::Crystal,
                speed: SpeedClass::Mhz3,
                mode: ResonatorMode::SlowFastStart,
            }),
            ..Configuration::new()
        };
        assert!(encode(&config).is_err());
    }
}
