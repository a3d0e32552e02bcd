//! fusegen-core - AVR fuse byte codec
//!
//! This crate converts between a structured set of device options and the
//! three fuse bytes (`lfuse`, `hfuse`, `efuse`) of an ATmega328PB-class
//! microcontroller. It is `no_std` and allocation free; every operation is
//! a pure function over `Copy` values.
//!
//! # Features
//!
//! - `std` - Implement `std::error::Error` for the error types
//!
//! # Example
//!
//! ```
//! use fusegen_core::{BrownOutLevel, Configuration};
//!
//! let mut config = Configuration::new();
//! config.brown_out_level = Some(BrownOutLevel::V2_7);
//! config.clock_select = Some("cry-8m-slow".parse().unwrap());
//!
//! let fuses = config.encode().unwrap();
//! assert_eq!(fuses.to_string(), "7f dd f5");
//!
//! let decoded = fuses.decode().unwrap();
//! assert_eq!(decoded, config.canonicalize());
//! ```

#![no_std]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

#[cfg(any(feature = "std", test))]
extern crate std;

pub mod clock;
pub mod config;
pub mod decode;
pub mod encode;
pub mod error;
pub mod fuse;

pub use clock::{ClockSelect, ResonatorKind, ResonatorMode, SpeedClass, StartupMode};
pub use config::{BrownOutLevel, ConfigArgs, Configuration};
pub use decode::decode;
pub use encode::encode;
pub use error::{Error, FuseOption, MalformedInput, Result};
pub use fuse::{ExtendedFuse, FuseBitInfo, FuseByte, FuseBytes, HighFuse, LowFuse, FUSE_BIT_MAP};
