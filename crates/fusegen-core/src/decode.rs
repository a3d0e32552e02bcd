//! Fuse bytes to configuration

use crate::clock::ClockSelect;
use crate::config::{BrownOutLevel, Configuration};
use crate::error::Result;
use crate::fuse::{ExtendedFuse, FuseBytes, HighFuse, LowFuse};

/// Decode fuse bytes into the configuration that produces them
///
/// Every field of the result is explicit, including the two that
/// [`Configuration`] allows to be absent.
///
/// The brown-out level is taken from `efuse` alone. `hfuse` carries a copy
/// of the same bits which is not checked against it. The reserved `efuse`
/// bits are ignored as well.
///
/// An unknown BODLEVEL pattern or CKSEL/SUT code fails the whole call.
pub fn decode(fuses: &FuseBytes) -> Result<Configuration> {
    let efuse = fuses.extended();
    let hfuse = fuses.high();
    let lfuse = fuses.low();

    let bod_bits = (efuse & ExtendedFuse::BODLEVEL).bits();
    let brown_out_level = BrownOutLevel::from_bits(bod_bits)?;
    let clock_select = ClockSelect::decode(fuses.clock_select_bits())?;

    let hfuse_bod_bits = (hfuse & HighFuse::BODLEVEL).bits();
    if hfuse_bod_bits != bod_bits {
        log::warn!(
            "hfuse BODLEVEL 0b{:03b} differs from efuse BODLEVEL 0b{:03b}, using efuse",
            hfuse_bod_bits,
            bod_bits
        );
    }
    if !efuse.contains(ExtendedFuse::RESERVED) {
        log::debug!("efuse 0x{:02x} has reserved bits cleared", fuses.efuse);
    }

    let config = Configuration {
        clock_failure_detect: efuse.contains(ExtendedFuse::CFD),
        brown_out_level: Some(brown_out_level),
        reset_disable: !hfuse.contains(HighFuse::RSTDISBL),
        debug_wire_enable: !hfuse.contains(HighFuse::DWEN),
        spi_program_disable: hfuse.contains(HighFuse::SPIEN),
        watchdog_force_on: !hfuse.contains(HighFuse::WDTON),
        eeprom_preserve: !hfuse.contains(HighFuse::EESAVE),
        clock_divide_by_8_disable: lfuse.contains(LowFuse::CKDIV8),
        clock_output_enable: !lfuse.contains(LowFuse::CKOUT),
        clock_select: Some(clock_select),
    };

    log::debug!("decoded {} -> {}", fuses, config.args());
    Ok(config)
}
