//! Combat-specific error types.
//!
//! Almost every failure in the combat core is non-fatal and handled where it
//! is detected (no target, HUD not mounted, readiness gate closed).  What is
//! left here is what a caller must see:
//!
//! - [`CombatError::CapabilityNotSupported`]: a programming-contract violation
//!   (asking an entity variant for something it cannot do).
//! - Config I/O and parse failures, surfaced to the binary's loader.

use thiserror::Error;

/// Optional abilities an entity variant may or may not have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Explode,
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Capability::Explode => f.write_str("explode"),
        }
    }
}

/// Top-level error enum for the combat core.
#[derive(Debug, Error)]
pub enum CombatError {
    /// The entity variant does not support the requested capability.
    #[error("{variant} cannot {capability}: capability not supported")]
    CapabilityNotSupported {
        /// Human-readable variant name (e.g. `"reaper"`).
        variant: &'static str,
        capability: Capability,
    },

    #[error("failed to read combat config: {0}")]
    ConfigRead(#[from] std::io::Error),

    #[error("failed to parse combat config: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

/// Convenience alias: a `Result` using `CombatError` as the error type.
pub type CombatResult<T> = Result<T, CombatError>;
