//! Profile file formats
//!
//! TOML files hold an array of `[[profile]]` tables, RON files a struct with
//! a `profile` list:
//!
//! ```ron
//! (
//!     profile: [
//!         (
//!             name: "uno",
//!             options: (bod_level: Some("2v7"), clk_sel: Some("cry-8m-slow")),
//!         ),
//!     ],
//! )
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{Profile, ProfileSet};
use crate::error::{FusegenError, Result};

/// On-disk layout shared by both formats
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct ProfileFile {
    #[serde(default)]
    profile: Vec<Profile>,
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> FusegenError + '_ {
    move |source| FusegenError::Io {
        path: path.to_path_buf(),
        source,
    }
}

impl ProfileSet {
    /// Parse a profile set from TOML
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let mut set = Self::new();
        set.load_toml(content)?;
        Ok(set)
    }

    /// Parse a profile set from RON
    pub fn from_ron_str(content: &str) -> Result<Self> {
        let mut set = Self::new();
        set.load_ron(content)?;
        Ok(set)
    }

    /// Add profiles from a TOML string, returning how many were added
    pub fn load_toml(&mut self, content: &str) -> Result<usize> {
        let file: ProfileFile = toml::from_str(content)?;
        self.extend_checked(file.profile)
    }

    /// Add profiles from a RON string, returning how many were added
    pub fn load_ron(&mut self, content: &str) -> Result<usize> {
        let file: ProfileFile = ron::from_str(content)?;
        self.extend_checked(file.profile)
    }

    /// Add profiles from a `.toml` or `.ron` file
    pub fn load_file(&mut self, path: &Path) -> Result<usize> {
        let content = fs::read_to_string(path).map_err(io_error(path))?;

        let count = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => self.load_toml(&content)?,
            Some("ron") => self.load_ron(&content)?,
            _ => return Err(FusegenError::UnsupportedFormat(path.to_path_buf())),
        };
        log::debug!("Loaded {} profile(s) from {}", count, path.display());
        Ok(count)
    }

    /// Add profiles from every `.toml` and `.ron` file in a directory
    ///
    /// Files are read in name order so that duplicate errors are stable.
    pub fn load_dir(&mut self, dir: &Path) -> Result<usize> {
        let mut paths: Vec<PathBuf> = Vec::new();
        for entry in fs::read_dir(dir).map_err(io_error(dir))? {
            let path = entry.map_err(io_error(dir))?.path();
            if path
                .extension()
                .is_some_and(|ext| ext == "toml" || ext == "ron")
            {
                paths.push(path);
            } else {
                log::warn!("Skipping {}, not a profile file", path.display());
            }
        }
        paths.sort();

        let mut total = 0;
        for path in &paths {
            total += self.load_file(path)?;
        }
        log::info!(
            "Loaded {} profile(s) from {} file(s) in {}",
            total,
            paths.len(),
            dir.display()
        );
        Ok(total)
    }

    /// Write the profile set as TOML
    pub fn to_toml_string(&self) -> Result<String> {
        let file = ProfileFile {
            profile: self.profiles.clone(),
        };
        Ok(toml::to_string(&file)?)
    }

    /// Append a batch of profiles, leaving the set untouched on a duplicate
    fn extend_checked(&mut self, profiles: Vec<Profile>) -> Result<usize> {
        for (i, profile) in profiles.iter().enumerate() {
            let repeated = profiles[..i].iter().any(|p| p.name == profile.name);
            if repeated || self.find(&profile.name).is_some() {
                return Err(FusegenError::DuplicateProfile(profile.name.clone()));
            }
        }

        let count = profiles.len();
        self.profiles.extend(profiles);
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::ProfileOptions;
    use fusegen_core::{FuseBytes, FuseOption};

    const BOARDS_TOML: &str = r#"
[[profile]]
name = "uno"
description = "16 MHz crystal"

[profile.options]
bod_level = "2v7"
ee_save = true
div8_disable = true
clk_sel = "cry-8m-slow"

[[profile]]
name = "factory"
"#;

    const BOARDS_RON: &str = r#"
(
    profile: [
        (
            name: "lowpower",
            description: Some("32 kHz watch crystal"),
            options: (
                bod_level: Some("1v8"),
                wdt_enable: true,
                clk_sel: Some("lf-slow"),
            ),
        ),
    ],
)
"#;

    fn scratch_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "fusegen-{}-{}",
            tag,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_parse_toml() {
        let set = ProfileSet::from_toml_str(BOARDS_TOML).unwrap();
        assert_eq!(set.len(), 2);

        let uno = set.find("uno").unwrap();
        assert_eq!(uno.description.as_deref(), Some("16 MHz crystal"));
        assert_eq!(uno.encode().unwrap(), FuseBytes::new(0xFF, 0xD5, 0xF5));

        let factory = set.find("factory").unwrap();
        assert_eq!(factory.options, ProfileOptions::default());
        assert_eq!(factory.encode().unwrap(), FuseBytes::DEFAULT);
    }

    #[test]
    fn test_parse_ron() {
        let set = ProfileSet::from_ron_str(BOARDS_RON).unwrap();
        let profile = set.find("lowpower").unwrap();
        // lf-slow = 0b100101, BODLEVEL 110, WDTON programmed
        assert_eq!(profile.encode().unwrap(), FuseBytes::new(0x65, 0xCE, 0xF6));
    }

    #[test]
    fn test_unknown_option_rejected() {
        let result = ProfileSet::from_toml_str(
            r#"
[[profile]]
name = "typo"

[profile.options]
bod = "2v7"
"#,
        );
        assert!(matches!(result, Err(FusegenError::Toml(_))));
    }

    #[test]
    fn test_bad_token_reported_on_encode() {
        let set = ProfileSet::from_toml_str(
            r#"
[[profile]]
name = "broken"

[profile.options]
bod_level = "5v0"
clk_sel = "cry-8m-slow"
"#,
        )
        .unwrap();

        let err = set.find("broken").unwrap().encode().unwrap_err();
        assert!(matches!(
            err,
            FusegenError::InvalidProfile {
                source: fusegen_core::Error::UnrecognizedValue(FuseOption::BrownOutLevel),
                ..
            }
        ));
        assert_eq!(
            err.to_string(),
            "Profile 'broken': unrecognized brown-out level value"
        );
    }

    #[test]
    fn test_duplicate_across_sources() {
        let mut set = ProfileSet::from_toml_str(BOARDS_TOML).unwrap();
        let dup = r#"(profile: [(name: "uno")])"#;
        assert!(matches!(
            set.load_ron(dup),
            Err(FusegenError::DuplicateProfile(name)) if name == "uno"
        ));

        // A rejected batch adds nothing
        let batch = r#"(profile: [(name: "new"), (name: "new")])"#;
        assert!(set.load_ron(batch).is_err());
        assert_eq!(set.len(), 2);
        assert!(set.find("new").is_none());
    }

    #[test]
    fn test_toml_output_reloads() {
        let mut set = ProfileSet::new();
        set.push(Profile::from_fuses("readback", &FuseBytes::new(0xFF, 0xDD, 0xF5)).unwrap())
            .unwrap();

        let text = set.to_toml_string().unwrap();
        assert!(text.contains("[[profile]]"));
        assert!(text.contains("clk_sel = \"cry-8m-slow\""));
        assert!(!text.contains("cfd_enable"));

        let reloaded = ProfileSet::from_toml_str(&text).unwrap();
        assert_eq!(reloaded, set);
        assert_eq!(
            reloaded.find("readback").unwrap().encode().unwrap(),
            FuseBytes::new(0xFF, 0xDD, 0xF5)
        );
    }

    #[test]
    fn test_load_dir() {
        let dir = scratch_dir("load-dir");
        fs::write(dir.join("boards.toml"), BOARDS_TOML).unwrap();
        fs::write(dir.join("lowpower.ron"), BOARDS_RON).unwrap();
        fs::write(dir.join("README.txt"), "not a profile").unwrap();

        let mut set = ProfileSet::new();
        assert_eq!(set.load_dir(&dir).unwrap(), 3);
        let names: Vec<&str> = set.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["uno", "factory", "lowpower"]);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_load_file_errors() {
        let dir = scratch_dir("load-file");
        let txt = dir.join("profiles.txt");
        fs::write(&txt, BOARDS_TOML).unwrap();

        let mut set = ProfileSet::new();
        assert!(matches!(
            set.load_file(&txt),
            Err(FusegenError::UnsupportedFormat(path)) if path == txt
        ));
        assert!(matches!(
            set.load_file(&dir.join("missing.toml")),
            Err(FusegenError::Io { .. })
        ));
        assert!(set.is_empty());

        fs::remove_dir_all(&dir).unwrap();
    }
}
