//! External collaborators the engine calls but does not own.
//!
//! Inventory and character records belong to other systems. The engine only
//! needs the narrow surface below; in-memory implementations back tests and
//! the CLI.
mod memory;

pub use memory::{InMemoryCharacters, InMemoryInventory, InventorySnapshot, Wallet};

use gathering_core::{CharacterId, MaterialId};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CollaboratorError {
    #[error("{character} is not known to the character store")]
    CharacterNotFound { character: CharacterId },

    #[error("insufficient funds: {required} required, {available} available")]
    InsufficientFunds { required: u64, available: u64 },

    #[error("collaborator lock was poisoned")]
    LockPoisoned,

    #[error("collaborator backend failed: {0}")]
    Backend(String),
}

pub type Result<T> = std::result::Result<T, CollaboratorError>;

/// Material and currency holdings.
pub trait InventoryStore: Send + Sync {
    fn add_material(
        &self,
        character: CharacterId,
        material: &MaterialId,
        quantity: u32,
    ) -> Result<()>;

    fn currency(&self, character: CharacterId) -> Result<u64>;

    /// Removes `amount`, returning the new balance. Fails without debiting
    /// when the balance is short.
    fn debit_currency(&self, character: CharacterId, amount: u64) -> Result<u64>;

    /// Adds `amount` back, returning the new balance.
    fn credit_currency(&self, character: CharacterId, amount: u64) -> Result<u64>;
}

/// Character-level facts owned outside the gathering engine.
pub trait CharacterStore: Send + Sync {
    fn character_level(&self, character: CharacterId) -> Result<u8>;
}
