//! Document build configuration.

use std::error::Error;
use std::fmt;

use flatdoc_arena::{ConfigError, PoolConfig};

/// Configuration for building a [`Document`](crate::Document).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentConfig {
    /// Slot pool sizing.
    pub pool: PoolConfig,
    /// Deepest container nesting accepted by the builder.
    ///
    /// Default: [`DocumentConfig::DEFAULT_NESTING_LIMIT`].
    pub nesting_limit: usize,
    /// Shrink the pool to its usage once the tree is built.
    pub shrink_after_build: bool,
}

impl DocumentConfig {
    /// Default nesting limit.
    pub const DEFAULT_NESTING_LIMIT: usize = 10;

    /// Config with the given pool and default build settings.
    pub fn new(pool: PoolConfig) -> Self {
        Self {
            pool,
            nesting_limit: Self::DEFAULT_NESTING_LIMIT,
            shrink_after_build: false,
        }
    }

    /// Check the config.
    pub fn validate(&self) -> Result<(), DocumentConfigError> {
        self.pool.validate().map_err(DocumentConfigError::Pool)?;
        if self.nesting_limit == 0 {
            return Err(DocumentConfigError::ZeroNestingLimit);
        }
        Ok(())
    }
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self::new(PoolConfig::default())
    }
}

/// Errors from validating a [`DocumentConfig`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DocumentConfigError {
    /// The pool config is invalid.
    Pool(ConfigError),
    /// A nesting limit of zero would reject every container.
    ZeroNestingLimit,
}

impl fmt::Display for DocumentConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pool(err) => write!(f, "invalid pool config: {err}"),
            Self::ZeroNestingLimit => write!(f, "nesting limit must be at least 1"),
        }
    }
}

impl Error for DocumentConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Pool(err) => Some(err),
            Self::ZeroNestingLimit => None,
        }
    }
}
