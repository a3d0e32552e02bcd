//! fusegen - AVR fuse byte generator and decoder
//!
//! Host-side companion to `fusegen-core`. The core crate does the actual
//! conversion between device options and fuse bytes; this crate adds named
//! fuse profiles stored in TOML or RON files and a bit-by-bit report of a
//! fuse triple.
//!
//! # Example
//!
//! ```
//! use fusegen::profile::ProfileSet;
//!
//! let profiles = ProfileSet::from_toml_str(r#"
//! [[profile]]
//! name = "uno"
//! description = "16 MHz crystal, 2.7 V brown-out"
//!
//! [profile.options]
//! bod_level = "2v7"
//! div8_disable = true
//! clk_sel = "cry-8m-slow"
//! "#).unwrap();
//!
//! let fuses = profiles.find("uno").unwrap().encode().unwrap();
//! assert_eq!(fuses.to_string(), "ff dd f5");
//! ```

pub mod error;
pub mod profile;
pub mod report;

pub use error::{FusegenError, Result};
pub use fusegen_core::{
    decode, encode, BrownOutLevel, ClockSelect, Configuration, FuseBytes, FuseOption,
};
