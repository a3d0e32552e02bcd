//! Fuse bit definitions

use bitflags::bitflags;

use super::types::{FuseByte, FuseBytes};

bitflags! {
    /// Low fuse byte (`lfuse`)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct LowFuse: u8 {
        /// Set: system clock not divided by 8
        const CKDIV8    = 1 << 7;
        /// Set: clock output disabled (active-low)
        const CKOUT     = 1 << 6;
        /// Combined CKSEL[3:0] and SUT[1:0] field
        const CKSEL_SUT = 0b0011_1111;
    }
}

bitflags! {
    /// High fuse byte (`hfuse`)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct HighFuse: u8 {
        /// Set: reset pin enabled (active-low disable)
        const RSTDISBL = 1 << 7;
        /// Set: debugWIRE disabled (active-low)
        const DWEN     = 1 << 6;
        /// Set: SPI programming disabled
        const SPIEN    = 1 << 5;
        /// Set: watchdog not forced on (active-low)
        const WDTON    = 1 << 4;
        /// Set: EEPROM erased on chip erase (active-low)
        const EESAVE   = 1 << 3;
        /// Copy of the brown-out level, BODLEVEL[2:0]
        const BODLEVEL = 0b0000_0111;
    }
}

bitflags! {
    /// Extended fuse byte (`efuse`)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ExtendedFuse: u8 {
        /// Unused bits, read back as 1
        const RESERVED = 0b1111_0000;
        /// Set: clock failure detection enabled
        const CFD      = 1 << 3;
        /// Brown-out level, BODLEVEL[2:0]
        const BODLEVEL = 0b0000_0111;
    }
}

/// Description of a single fuse bit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FuseBitInfo {
    /// Fuse byte the bit lives in
    pub fuse: FuseByte,
    /// Bit index within the byte (0-7)
    pub bit_index: u8,
    /// Datasheet name of the bit
    pub name: &'static str,
    /// Factory default value (0 or 1)
    pub default: u8,
    /// Short description of what the bit controls
    pub description: &'static str,
}

impl FuseBitInfo {
    const fn new(
        fuse: FuseByte,
        bit_index: u8,
        name: &'static str,
        default: u8,
        description: &'static str,
    ) -> Self {
        Self {
            fuse,
            bit_index,
            name,
            default,
            description,
        }
    }

    /// Mask of this bit within its fuse byte
    pub const fn mask(&self) -> u8 {
        1 << self.bit_index
    }

    /// Read this bit (0 or 1) from a fuse triple
    pub const fn value(&self, fuses: &FuseBytes) -> u8 {
        (fuses.get(self.fuse) >> self.bit_index) & 1
    }

    /// Check whether the bit holds its factory default in `fuses`
    pub const fn is_default(&self, fuses: &FuseBytes) -> bool {
        self.value(fuses) == self.default
    }
}

/// Every fuse bit, ordered lfuse, hfuse, efuse and MSB first within a byte
pub static FUSE_BIT_MAP: [FuseBitInfo; 24] = [
    FuseBitInfo::new(FuseByte::Low, 7, "CKDIV8", 0, "Divide clock by 8"),
    FuseBitInfo::new(FuseByte::Low, 6, "CKOUT", 1, "Clock output"),
    FuseBitInfo::new(FuseByte::Low, 5, "SUT1", 1, "Start-up time"),
    FuseBitInfo::new(FuseByte::Low, 4, "SUT0", 0, "Start-up time"),
    FuseBitInfo::new(FuseByte::Low, 3, "CKSEL3", 0, "Clock source"),
    FuseBitInfo::new(FuseByte::Low, 2, "CKSEL2", 0, "Clock source"),
    FuseBitInfo::new(FuseByte::Low, 1, "CKSEL1", 1, "Clock source"),
    FuseBitInfo::new(FuseByte::Low, 0, "CKSEL0", 0, "Clock source"),
    FuseBitInfo::new(FuseByte::High, 7, "RSTDISBL", 1, "External reset disable"),
    FuseBitInfo::new(FuseByte::High, 6, "DWEN", 1, "debugWIRE enable"),
    FuseBitInfo::new(FuseByte::High, 5, "SPIEN", 0, "Serial programming disable"),
    FuseBitInfo::new(FuseByte::High, 4, "WDTON", 1, "Watchdog timer always on"),
    FuseBitInfo::new(FuseByte::High, 3, "EESAVE", 1, "Preserve EEPROM through chip erase"),
    FuseBitInfo::new(FuseByte::High, 2, "BODLEVEL2", 1, "Brown-out detector trigger level"),
    FuseBitInfo::new(FuseByte::High, 1, "BODLEVEL1", 1, "Brown-out detector trigger level"),
    FuseBitInfo::new(FuseByte::High, 0, "BODLEVEL0", 1, "Brown-out detector trigger level"),
    FuseBitInfo::new(FuseByte::Extended, 7, "-", 1, "Reserved"),
    FuseBitInfo::new(FuseByte::Extended, 6, "-", 1, "Reserved"),
    FuseBitInfo::new(FuseByte::Extended, 5, "-", 1, "Reserved"),
    FuseBitInfo::new(FuseByte::Extended, 4, "-", 1, "Reserved"),
    FuseBitInfo::new(FuseByte::Extended, 3, "CFD", 0, "Clock failure detection enable"),
    FuseBitInfo::new(FuseByte::Extended, 2, "BODLEVEL2", 1, "Brown-out detector trigger level"),
    FuseBitInfo::new(FuseByte::Extended, 1, "BODLEVEL1", 1, "Brown-out detector trigger level"),
    FuseBitInfo::new(FuseByte::Extended, 0, "BODLEVEL0", 1, "Brown-out detector trigger level"),
];

/// Iterate over the bits of a single fuse byte, MSB first
pub fn bits_of(fuse: FuseByte) -> impl Iterator<Item = &'static FuseBitInfo> {
    FUSE_BIT_MAP.iter().filter(move |b| b.fuse == fuse)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_map_defaults_match_default_triple() {
        let mut bytes = [0u8; 3];
        for bit in FUSE_BIT_MAP.iter() {
            bytes[bit.fuse as usize] |= bit.default << bit.bit_index;
        }
        let fuses = FuseBytes::new(bytes[0], bytes[1], bytes[2]);
        assert_eq!(fuses, FuseBytes::DEFAULT);
        assert!(FUSE_BIT_MAP.iter().all(|b| b.is_default(&fuses)));
    }

    #[test]
    fn test_bit_map_covers_every_bit_once() {
        for fuse in FuseByte::ALL {
            let mut seen = 0u8;
            for bit in bits_of(fuse) {
                assert_eq!(seen & bit.mask(), 0, "{} bit {} listed twice", fuse, bit.bit_index);
                seen |= bit.mask();
            }
            assert_eq!(seen, 0xFF);
        }
    }

    #[test]
    fn test_bitflag_masks_match_bit_map() {
        let named = |fuse: FuseByte, name: &str| {
            bits_of(fuse)
                .filter(|b| b.name.starts_with(name))
                .fold(0u8, |acc, b| acc | b.mask())
        };
        assert_eq!(named(FuseByte::Low, "CKDIV8"), LowFuse::CKDIV8.bits());
        assert_eq!(named(FuseByte::Low, "CKOUT"), LowFuse::CKOUT.bits());
        assert_eq!(
            named(FuseByte::Low, "SUT") | named(FuseByte::Low, "CKSEL"),
            LowFuse::CKSEL_SUT.bits()
        );
        assert_eq!(named(FuseByte::High, "BODLEVEL"), HighFuse::BODLEVEL.bits());
        assert_eq!(named(FuseByte::High, "SPIEN"), HighFuse::SPIEN.bits());
        assert_eq!(named(FuseByte::Extended, "-"), ExtendedFuse::RESERVED.bits());
        assert_eq!(named(FuseByte::Extended, "BODLEVEL"), ExtendedFuse::BODLEVEL.bits());
    }

    #[test]
    fn test_value_reads_bit() {
        let fuses = FuseBytes::new(0x80, 0x00, 0x08);
        let ckdiv8 = &FUSE_BIT_MAP[0];
        assert_eq!(ckdiv8.value(&fuses), 1);
        assert!(!ckdiv8.is_default(&fuses));
        let cfd = bits_of(FuseByte::Extended).find(|b| b.name == "CFD").unwrap();
        assert_eq!(cfd.value(&fuses), 1);
    }
}
