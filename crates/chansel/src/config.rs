// SPDX-License-Identifier: (MIT OR Apache-2.0)

/// Environment variable consulted by [`SelectConfig::from_env`].
pub const SHUFFLE_ENV: &str = "CHANSEL_SHUFFLE";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectConfig {
    /// Randomize case order on every resolution.
    pub shuffle: bool,
}

impl Default for SelectConfig {
    fn default() -> Self {
        Self { shuffle: true }
    }
}

impl SelectConfig {
    /// Defaults, with `CHANSEL_SHUFFLE=0|false|off` turning shuffling off.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(val) = std::env::var(SHUFFLE_ENV) {
            config.shuffle = parse_flag(&val).unwrap_or(config.shuffle);
        }
        config
    }
}

fn parse_flag(val: &str) -> Option<bool> {
    match val.trim().to_ascii_lowercase().as_str() {
        "0" | "false" | "off" | "no" => Some(false),
        "1" | "true" | "on" | "yes" => Some(true),
        _ => None,
    }
}
