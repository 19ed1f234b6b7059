// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Address space configuration.
//!
//! Cache sizing is fixed at construction; there is no runtime setter. The
//! defaults match typical interactive browsing: records stay live for two
//! minutes and at most 1024 of them are held.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Configuration for an [`AddressSpace`](crate::AddressSpace).
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use uascope_client::AddressSpaceConfig;
///
/// let config = AddressSpaceConfig::builder()
///     .cache_max_entries(256)
///     .cache_expire_after(Duration::from_secs(30))
///     .build()
///     .unwrap();
///
/// assert_eq!(config.cache_max_entries, 256);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressSpaceConfig {
    /// Maximum number of cached node records.
    #[serde(default = "default_cache_max_entries")]
    pub cache_max_entries: usize,

    /// How long a cached record stays live after its write.
    #[serde(default = "default_cache_expire_after", with = "humantime_serde")]
    pub cache_expire_after: Duration,
}

fn default_cache_max_entries() -> usize {
    1024
}

fn default_cache_expire_after() -> Duration {
    Duration::from_secs(120)
}

impl Default for AddressSpaceConfig {
    fn default() -> Self {
        Self {
            cache_max_entries: default_cache_max_entries(),
            cache_expire_after: default_cache_expire_after(),
        }
    }
}

impl AddressSpaceConfig {
    /// Creates a configuration builder.
    pub fn builder() -> AddressSpaceConfigBuilder {
        AddressSpaceConfigBuilder::default()
    }

    /// Validates this configuration.
    pub fn validate(&self) -> Result<()> {
        if self.cache_max_entries == 0 {
            return Err(Error::configuration(
                "cache_max_entries must be greater than 0",
            ));
        }
        if self.cache_expire_after.is_zero() {
            return Err(Error::configuration(
                "cache_expire_after must be greater than 0",
            ));
        }
        Ok(())
    }
}

// =============================================================================
// AddressSpaceConfigBuilder
// =============================================================================

/// Builder for [`AddressSpaceConfig`].
#[derive(Debug, Default)]
pub struct AddressSpaceConfigBuilder {
    cache_max_entries: Option<usize>,
    cache_expire_after: Option<Duration>,
}

impl AddressSpaceConfigBuilder {
    /// Sets the maximum number of cached node records.
    pub fn cache_max_entries(mut self, max_entries: usize) -> Self {
        self.cache_max_entries = Some(max_entries);
        self
    }

    /// Sets how long a cached record stays live after its write.
    pub fn cache_expire_after(mut self, expire_after: Duration) -> Self {
        self.cache_expire_after = Some(expire_after);
        self
    }

    /// Builds and validates the configuration.
    pub fn build(self) -> Result<AddressSpaceConfig> {
        let config = AddressSpaceConfig {
            cache_max_entries: self.cache_max_entries.unwrap_or_else(default_cache_max_entries),
            cache_expire_after: self
                .cache_expire_after
                .unwrap_or_else(default_cache_expire_after),
        };

        config.validate()?;
        Ok(config)
    }
}

// =============================================================================
// Tests
// =============================================================================
