use std::fmt::Display;

use crate::{config::Config, result::{Error, Result}};

/// A username that passed syntactic validation and is safe to hand to the quota script.
#[derive(Debug, Clone, PartialEq)]
pub struct Username(String);

impl Username {
    /// Accepts `name` only if it is at most `max_username_len` characters long
    /// and every character is in the configured charset.
    pub fn parse(config: &Config, name: &str) -> Result<Self> {
        // Length in bytes; anything non-ASCII is rejected below anyway.
        if name.len() > config.max_username_len {
            return Err(Error::Usage)
        }
        if !name.chars().all(|c| config.charset.permits(c)) {
            return Err(Error::Usage)
        }
        Ok(Username(name.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Username {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
