//! The single source of truth for huffpak compression configuration.
//!
//! `HuffpakConfig` is designed to be created once at the application boundary
//! (e.g., from a user's JSON snippet or CLI flags) and then passed by
//! reference into the pipeline. Centralizing the knobs here keeps the kernels
//! pure and eliminates prop drilling.

use serde::{Deserialize, Serialize};

use crate::error::HuffpakError;

/// The unified configuration for a compression operation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct HuffpakConfig {
    /// The symbol width in bytes. `1` is classic byte-level Huffman; larger
    /// values group bytes into fixed-width N-grams.
    #[serde(default = "default_order")]
    pub order: usize,

    /// The byte appended to the input tail when its length is not a multiple
    /// of `order`. The decoder never inspects it; `padding_len` in the
    /// container header alone drives stripping.
    #[serde(default)]
    pub filler_byte: u8,
}

impl Default for HuffpakConfig {
    fn default() -> Self {
        Self {
            order: default_order(),
            filler_byte: 0,
        }
    }
}

impl HuffpakConfig {
    /// Parses a config from a JSON snippet, applying defaults for absent
    /// fields. This is the application-boundary constructor.
    pub fn from_json(json: &str) -> Result<Self, HuffpakError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validates field ranges. The container stores `order` as a `u16`, so a
    /// wider order cannot be represented on disk.
    pub fn validate(&self) -> Result<(), HuffpakError> {
        if self.order == 0 {
            return Err(HuffpakError::InvalidConfig(
                "order must be at least 1".to_string(),
            ));
        }
        if self.order > u16::MAX as usize {
            return Err(HuffpakError::InvalidConfig(format!(
                "order {} exceeds the container limit of {}",
                self.order,
                u16::MAX
            )));
        }
        Ok(())
    }
}

/// Helper for `serde` to default `order` to byte-level Huffman.
fn default_order() -> usize {
    1
}
