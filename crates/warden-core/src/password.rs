//! bcrypt password encoding.

use anyhow::anyhow;
use bcrypt::{hash, verify};

use crate::errors::AppError;

/// bcrypt work factor used when nothing else is configured.
pub const DEFAULT_COST: u32 = 10;

const MIN_COST: u32 = 4;
const MAX_COST: u32 = 31;

/// Hashes raw passwords and checks raw passwords against stored hashes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PasswordEncoder {
    cost: u32,
}

impl PasswordEncoder {
    /// Out-of-range costs are clamped into bcrypt's accepted 4..=31.
    pub fn new(cost: u32) -> Self {
        Self {
            cost: cost.clamp(MIN_COST, MAX_COST),
        }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    pub fn encode(&self, raw_password: &str) -> Result<String, AppError> {
        hash(raw_password, self.cost)
            .map_err(|e| AppError::internal(anyhow!("Failed to hash password: {}", e)))
    }

    pub fn matches(&self, raw_password: &str, encoded: &str) -> Result<bool, AppError> {
        verify(raw_password, encoded)
            .map_err(|e| AppError::internal(anyhow!("Failed to verify password: {}", e)))
    }
}

impl Default for PasswordEncoder {
    fn default() -> Self {
        Self::new(DEFAULT_COST)
    }
}

/// Hashes with the default cost.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    PasswordEncoder::default().encode(password)
}

/// Verification reads the cost from `hash`, so any bcrypt hash works here.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    PasswordEncoder::default().matches(password, hash)
}
