//! Fuse bytes and their bit layout
//!
//! The target exposes three fuse bytes. Most bits are active-low: a cleared
//! bit enables the feature it names.
//!
//! ```text
//! EFUSE (default = F7)           HFUSE (default = DF)           LFUSE (default = 62)
//! bit 7 | reserved    | 1        bit 7 | RSTDISBL    | 1        bit 7 | CKDIV8      | 0
//! bit 6 | reserved    | 1        bit 6 | DWEN        | 1        bit 6 | CKOUT       | 1
//! bit 5 | reserved    | 1        bit 5 | SPIEN       | 0        bit 5 | SUT[1]      | 1
//! bit 4 | reserved    | 1        bit 4 | WDTON       | 1        bit 4 | SUT[0]      | 0
//! bit 3 | CFD         | 0        bit 3 | EESAVE      | 1        bit 3 | CKSEL[3]    | 0
//! bit 2 | BODLEVEL[2] | 1        bit 2 | BODLEVEL[2] | 1        bit 2 | CKSEL[2]    | 0
//! bit 1 | BODLEVEL[1] | 1        bit 1 | BODLEVEL[1] | 1        bit 1 | CKSEL[1]    | 1
//! bit 0 | BODLEVEL[0] | 1        bit 0 | BODLEVEL[0] | 1        bit 0 | CKSEL[0]    | 0
//! ```

mod bits;
mod types;

pub use bits::*;
pub use types::*;
