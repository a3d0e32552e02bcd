//! Clock source and start-up time selection
//!
//! The low six bits of `lfuse` pack CKSEL[3:0] and SUT[1:0] into a single
//! field whose layout depends on CKSEL3:
//!
//! ```text
//!  bit   5    4    3    2    1    0
//!       SUT1 SUT0 CKS3 CKS2 CKS1 CKS0
//!
//!  CKSEL3 = 1: external crystal / ceramic resonator
//!       [ kind/mode ] 1  [ speed ] [kind/mode]
//!
//!  CKSEL3 = 0: everything else
//!       [  mode   ]  0  [ source (3 bits)   ]
//! ```
//!
//! The tables in this module are the single source of truth for both
//! directions; a code is accepted by [`ClockSelect::decode`] exactly when
//! some [`ClockSelect`] encodes to it.

mod table;
mod types;

pub use table::encode_clock_select;
pub use types::*;
