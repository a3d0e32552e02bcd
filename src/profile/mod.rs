//! Named fuse profiles
//!
//! A profile stores a set of fuse options under a name, so that a board's
//! fuse settings can be kept in version control next to its firmware.
//! Profiles are read from TOML or RON files:
//!
//! ```toml
//! [[profile]]
//! name = "uno"
//! description = "ATmega328PB, 16 MHz crystal"
//!
//! [profile.options]
//! bod_level = "2v7"
//! ee_save = true
//! div8_disable = true
//! clk_sel = "cry-8m-slow"
//! ```
//!
//! Option names follow the flags printed by [`Configuration::args`]
//! (`--bod-level` becomes `bod_level`). Token values are the strings
//! accepted by [`BrownOutLevel`] and [`ClockSelect`].

mod file;

use fusegen_core::{BrownOutLevel, ClockSelect, Configuration, FuseBytes};
use serde::{Deserialize, Serialize};

use crate::error::{FusegenError, Result};

fn is_false(value: &bool) -> bool {
    !*value
}

/// Fuse options as written in a profile file
///
/// Every field may be omitted and then keeps its factory setting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProfileOptions {
    /// Enable clock failure detection
    #[serde(skip_serializing_if = "is_false")]
    pub cfd_enable: bool,
    /// Brown-out level token (`off`, `1v8`, `2v7`, `4v3`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bod_level: Option<String>,
    /// Disable the reset pin
    #[serde(skip_serializing_if = "is_false")]
    pub reset_disable: bool,
    /// Enable debugWIRE
    #[serde(skip_serializing_if = "is_false")]
    pub debugwire_enable: bool,
    /// Disable SPI programming
    #[serde(skip_serializing_if = "is_false")]
    pub spi_disable: bool,
    /// Force the watchdog on
    #[serde(skip_serializing_if = "is_false")]
    pub wdt_enable: bool,
    /// Preserve EEPROM through chip erase
    #[serde(skip_serializing_if = "is_false")]
    pub ee_save: bool,
    /// Disable the divide-by-8 clock prescaler
    #[serde(skip_serializing_if = "is_false")]
    pub div8_disable: bool,
    /// Output the system clock
    #[serde(skip_serializing_if = "is_false")]
    pub clk_out: bool,
    /// Clock selection token, e.g. `cry-8m-slow`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clk_sel: Option<String>,
}

impl ProfileOptions {
    /// Resolve option tokens into a [`Configuration`]
    ///
    /// The first token that does not parse fails the whole conversion.
    pub fn resolve(&self) -> fusegen_core::Result<Configuration> {
        let brown_out_level = self
            .bod_level
            .as_deref()
            .map(str::parse::<BrownOutLevel>)
            .transpose()?;
        let clock_select = self
            .clk_sel
            .as_deref()
            .map(str::parse::<ClockSelect>)
            .transpose()?;

        Ok(Configuration {
            clock_failure_detect: self.cfd_enable,
            brown_out_level,
            reset_disable: self.reset_disable,
            debug_wire_enable: self.debugwire_enable,
            spi_program_disable: self.spi_disable,
            watchdog_force_on: self.wdt_enable,
            eeprom_preserve: self.ee_save,
            clock_divide_by_8_disable: self.div8_disable,
            clock_output_enable: self.clk_out,
            clock_select,
        })
    }

    /// Express a configuration as profile options
    pub fn from_configuration(config: &Configuration) -> Self {
        Self {
            cfd_enable: config.clock_failure_detect,
            bod_level: config.brown_out_level.map(|level| level.to_string()),
            reset_disable: config.reset_disable,
            debugwire_enable: config.debug_wire_enable,
            spi_disable: config.spi_program_disable,
            wdt_enable: config.watchdog_force_on,
            ee_save: config.eeprom_preserve,
            div8_disable: config.clock_divide_by_8_disable,
            clk_out: config.clock_output_enable,
            clk_sel: config.clock_select.map(|sel| sel.to_string()),
        }
    }
}

/// A named set of fuse options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Profile {
    /// Unique name of the profile
    pub name: String,
    /// Free-form description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Fuse options
    #[serde(default)]
    pub options: ProfileOptions,
}

impl Profile {
    /// Create a profile without description
    pub fn new(name: impl Into<String>, options: ProfileOptions) -> Self {
        Self {
            name: name.into(),
            description: None,
            options,
        }
    }

    /// Create a profile that reproduces the given fuse bytes
    pub fn from_fuses(name: impl Into<String>, fuses: &FuseBytes) -> Result<Self> {
        let config = fuses.decode()?;
        Ok(Self::new(name, ProfileOptions::from_configuration(&config)))
    }

    /// Resolve the profile's options
    pub fn configuration(&self) -> Result<Configuration> {
        self.options
            .resolve()
            .map_err(|source| FusegenError::InvalidProfile {
                name: self.name.clone(),
                source,
            })
    }

    /// Encode the profile into fuse bytes
    pub fn encode(&self) -> Result<FuseBytes> {
        let config = self.configuration()?;
        config
            .encode()
            .map_err(|source| FusegenError::InvalidProfile {
                name: self.name.clone(),
                source,
            })
    }
}

/// Collection of profiles with unique names
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileSet {
    profiles: Vec<Profile>,
}

impl ProfileSet {
    /// Create an empty profile set
    pub fn new() -> Self {
        Self {
            profiles: Vec::new(),
        }
    }

    /// Add a profile, rejecting duplicate names
    pub fn push(&mut self, profile: Profile) -> Result<()> {
        if self.find(&profile.name).is_some() {
            return Err(FusegenError::DuplicateProfile(profile.name));
        }
        self.profiles.push(profile);
        Ok(())
    }

    /// Find a profile by exact name
    pub fn find(&self, name: &str) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.name == name)
    }

    /// Look up a profile, failing if it does not exist
    pub fn get(&self, name: &str) -> Result<&Profile> {
        self.find(name)
            .ok_or_else(|| FusegenError::UnknownProfile(name.to_string()))
    }

    /// Get all profiles in load order
    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    /// Iterate over all profiles
    pub fn iter(&self) -> impl Iterator<Item = &Profile> {
        self.profiles.iter()
    }

    /// Get the number of profiles
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Check if the set is empty
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
