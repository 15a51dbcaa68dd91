use std::{ffi::OsString, path::PathBuf};

use nix::unistd::{Gid, Uid};
use serde::Deserialize;
use serde_derive::Deserialize;

use crate::result::{Error, Result};

const BUILTIN_CONFIG: &str = include_str!("../call_isilon_quota.toml");

#[derive(Deserialize, Clone, Debug)]
pub struct Config {
    /// Tag used for the system log and the usage message.
    pub program_id: String,

    /// Quota script to run. Must be absolute.
    pub script: PathBuf,

    /// Working directory of the quota script. Must be absolute.
    pub working_directory: PathBuf,

    pub max_username_len: usize,

    pub charset: Charset,

    pub identity: Identity,

    pub environment: ChildEnvironment,
}

/// The uid/gid pair the launcher switches to before spawning the script.
#[derive(Deserialize, Copy, Clone, Debug, PartialEq)]
pub struct Identity {
    pub uid: u32,
    pub gid: u32,
}

impl Identity {
    pub fn uid(&self) -> Uid {
        Uid::from_raw(self.uid)
    }

    pub fn gid(&self) -> Gid {
        Gid::from_raw(self.gid)
    }
}

#[derive(Debug, Copy, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Charset {
    AsciiAlphanumeric,
    AsciiLowercaseAlphanumeric,
}

impl Charset {
    pub fn permits(&self, c: char) -> bool {
        match self {
            Charset::AsciiAlphanumeric => c.is_ascii_alphanumeric(),
            Charset::AsciiLowercaseAlphanumeric => c.is_ascii_lowercase() || c.is_ascii_digit(),
        }
    }
}

/// Environment handed to the quota script. Everything not listed here is dropped.
#[derive(Deserialize, Clone, Debug)]
pub struct ChildEnvironment {
    pub path: String,
    pub keep: Vec<String>,
}

impl ChildEnvironment {
    /// Builds the child's environment, looking up kept variables with `lookup`.
    /// `PATH` always comes from the configuration.
    pub fn resolve<F: Fn(&str) -> Option<OsString>>(&self, lookup: F) -> Vec<(OsString, OsString)> {
        let mut vars = vec![(OsString::from("PATH"), OsString::from(&self.path))];
        for name in self.keep.iter().filter(|name| name.as_str() != "PATH") {
            if let Some(value) = lookup(name) {
                vars.push((OsString::from(name), value));
            }
        }
        vars
    }
}

impl Config {
    /// Parses and validates the configuration compiled into the binary.
    pub fn builtin() -> Result<Self> {
        Self::parse(BUILTIN_CONFIG)
    }

    pub fn parse(config_str: &str) -> Result<Self> {
        let config = Config::deserialize(toml::Deserializer::new(config_str))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.program_id.is_empty() {
            return Err(Error::InvalidConfig("program_id is empty".to_owned()))
        }
        if !self.script.is_absolute() {
            return Err(Error::InvalidConfig(format!("script {} is not absolute", self.script.display())))
        }
        if !self.working_directory.is_absolute() {
            return Err(Error::InvalidConfig(format!(
                "working_directory {} is not absolute",
                self.working_directory.display(),
            )))
        }
        if self.max_username_len == 0 {
            return Err(Error::InvalidConfig("max_username_len must be at least 1".to_owned()))
        }
        for name in &self.environment.keep {
            if name.is_empty() || name.contains(['=', '\0']) {
                return Err(Error::InvalidConfig(format!("invalid environment variable name '{}'", name)))
            }
        }
        Ok(())
    }

    pub fn usage(&self) -> String {
        format!("Usage: {} <username>", self.program_id)
    }
}
