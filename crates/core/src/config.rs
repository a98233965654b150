//! Grid configuration
//!
//! Dimensions and palette size are fixed for the lifetime of a session.

use thiserror::Error;

use crate::types::{BlockColor, DEFAULT_COLORS, GRID_HEIGHT, GRID_WIDTH, MIN_GRID_DIM, PALETTE};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("grid must be at least {min}x{min}, got {width}x{height}")]
    TooSmall { width: u8, height: u8, min: u8 },

    #[error("colour count must be in 1..={max}, got {got}")]
    InvalidColors { got: u8, max: u8 },

    #[error("invalid value {value:?} for {var}")]
    InvalidVar { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridConfig {
    pub width: u8,
    pub height: u8,
    /// Number of palette colours in play (taken from the front of `PALETTE`)
    pub colors: u8,
    /// Fixed seed for dealing; None lets the caller pick one
    pub seed: Option<u32>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: GRID_WIDTH,
            height: GRID_HEIGHT,
            colors: DEFAULT_COLORS,
            seed: None,
        }
    }
}

impl GridConfig {
    pub fn new(width: u8, height: u8, colors: u8) -> Result<Self, ConfigError> {
        let config = Self {
            width,
            height,
            colors,
            seed: None,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < MIN_GRID_DIM || self.height < MIN_GRID_DIM {
            return Err(ConfigError::TooSmall {
                width: self.width,
                height: self.height,
                min: MIN_GRID_DIM,
            });
        }
        if self.colors == 0 || self.colors as usize > PALETTE.len() {
            return Err(ConfigError::InvalidColors {
                got: self.colors,
                max: PALETTE.len() as u8,
            });
        }
        Ok(())
    }

    /// Colours a fresh block may be dealt
    pub fn palette(&self) -> &'static [BlockColor] {
        let n = (self.colors as usize).clamp(1, PALETTE.len());
        &PALETTE[..n]
    }

    /// Total block count
    pub fn cells(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Create from environment variables
    ///
    /// - `BLOCK_GRID_WIDTH`, `BLOCK_GRID_HEIGHT` (default 10)
    /// - `BLOCK_GRID_COLORS` (default 4)
    /// - `BLOCK_GRID_SEED` (default: unset)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`GridConfig::from_env`] with an explicit variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            width: parse_var(&lookup, "BLOCK_GRID_WIDTH")?.unwrap_or(defaults.width),
            height: parse_var(&lookup, "BLOCK_GRID_HEIGHT")?.unwrap_or(defaults.height),
            colors: parse_var(&lookup, "BLOCK_GRID_COLORS")?.unwrap_or(defaults.colors),
            seed: parse_var(&lookup, "BLOCK_GRID_SEED")?,
        };
        config.validate()?;
        Ok(config)
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<T>, ConfigError> {
    let Some(raw) = lookup(var) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse()
        .map(Some)
        .map_err(|_| ConfigError::InvalidVar { var, value: raw })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults_are_ten_by_ten_four_colours() {
        let c = GridConfig::default();
        assert_eq!((c.width, c.height, c.colors), (10, 10, 4));
        assert_eq!(c.palette(), &PALETTE[..]);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn rejects_degenerate_dimensions() {
        assert_eq!(
            GridConfig::new(1, 10, 4),
            Err(ConfigError::TooSmall {
                width: 1,
                height: 10,
                min: MIN_GRID_DIM
            })
        );
        assert!(GridConfig::new(2, 2, 4).is_ok());
    }

    #[test]
    fn rejects_bad_colour_counts() {
        assert!(matches!(
            GridConfig::new(10, 10, 0),
            Err(ConfigError::InvalidColors { got: 0, .. })
        ));
        assert!(matches!(
            GridConfig::new(10, 10, 5),
            Err(ConfigError::InvalidColors { got: 5, .. })
        ));
        assert_eq!(GridConfig::new(10, 10, 2).unwrap().palette().len(), 2);
    }

    #[test]
    fn env_lookup_overrides_defaults() {
        let c = GridConfig::from_lookup(lookup(&[
            ("BLOCK_GRID_WIDTH", "6"),
            ("BLOCK_GRID_HEIGHT", " 8 "),
            ("BLOCK_GRID_SEED", "42"),
        ]))
        .unwrap();
        assert_eq!((c.width, c.height, c.colors, c.seed), (6, 8, 4, Some(42)));
    }

    #[test]
    fn env_lookup_reports_unparsable_values() {
        let err = GridConfig::from_lookup(lookup(&[("BLOCK_GRID_COLORS", "many")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidVar {
                var: "BLOCK_GRID_COLORS",
                value: "many".to_string()
            }
        );
    }
}
