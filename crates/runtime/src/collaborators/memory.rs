use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use gathering_core::{CharacterId, MaterialId};
use serde::{Deserialize, Serialize};

use super::{CharacterStore, CollaboratorError, InventoryStore, Result};

/// Currency and materials of one character.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    pub currency: u64,
    pub materials: BTreeMap<MaterialId, u64>,
}

/// Serializable copy of an [`InMemoryInventory`].
pub type InventorySnapshot = HashMap<CharacterId, Wallet>;

/// Inventory held in memory. Unknown characters start with an empty wallet.
#[derive(Debug, Default)]
pub struct InMemoryInventory {
    wallets: RwLock<HashMap<CharacterId, Wallet>>,
}

impl InMemoryInventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: InventorySnapshot) -> Self {
        Self {
            wallets: RwLock::new(snapshot),
        }
    }

    pub fn snapshot(&self) -> Result<InventorySnapshot> {
        Ok(self
            .wallets
            .read()
            .map_err(|_| CollaboratorError::LockPoisoned)?
            .clone())
    }

    pub fn set_currency(&self, character: CharacterId, amount: u64) -> Result<()> {
        self.with_wallet(character, |wallet| wallet.currency = amount)
    }

    pub fn quantity(&self, character: CharacterId, material: &MaterialId) -> Result<u64> {
        let wallets = self
            .wallets
            .read()
            .map_err(|_| CollaboratorError::LockPoisoned)?;
        Ok(wallets
            .get(&character)
            .and_then(|wallet| wallet.materials.get(material).copied())
            .unwrap_or(0))
    }

    pub fn wallet(&self, character: CharacterId) -> Result<Wallet> {
        let wallets = self
            .wallets
            .read()
            .map_err(|_| CollaboratorError::LockPoisoned)?;
        Ok(wallets.get(&character).cloned().unwrap_or_default())
    }

    fn with_wallet<R>(&self, character: CharacterId, f: impl FnOnce(&mut Wallet) -> R) -> Result<R> {
        let mut wallets = self
            .wallets
            .write()
            .map_err(|_| CollaboratorError::LockPoisoned)?;
        Ok(f(wallets.entry(character).or_default()))
    }
}

impl InventoryStore for InMemoryInventory {
    fn add_material(
        &self,
        character: CharacterId,
        material: &MaterialId,
        quantity: u32,
    ) -> Result<()> {
        self.with_wallet(character, |wallet| {
            *wallet.materials.entry(material.clone()).or_default() += u64::from(quantity);
        })
    }

    fn currency(&self, character: CharacterId) -> Result<u64> {
        self.with_wallet(character, |wallet| wallet.currency)
    }

    fn debit_currency(&self, character: CharacterId, amount: u64) -> Result<u64> {
        self.with_wallet(character, |wallet| {
            if wallet.currency < amount {
                return Err(CollaboratorError::InsufficientFunds {
                    required: amount,
                    available: wallet.currency,
                });
            }
            wallet.currency -= amount;
            Ok(wallet.currency)
        })?
    }

    fn credit_currency(&self, character: CharacterId, amount: u64) -> Result<u64> {
        self.with_wallet(character, |wallet| {
            wallet.currency = wallet.currency.saturating_add(amount);
            wallet.currency
        })
    }
}

/// Character levels held in memory.
#[derive(Debug, Default)]
pub struct InMemoryCharacters {
    levels: RwLock<HashMap<CharacterId, u8>>,
}

impl InMemoryCharacters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_levels(levels: HashMap<CharacterId, u8>) -> Self {
        Self {
            levels: RwLock::new(levels),
        }
    }

    pub fn set_level(&self, character: CharacterId, level: u8) -> Result<()> {
        self.levels
            .write()
            .map_err(|_| CollaboratorError::LockPoisoned)?
            .insert(character, level);
        Ok(())
    }

    pub fn levels(&self) -> Result<HashMap<CharacterId, u8>> {
        Ok(self
            .levels
            .read()
            .map_err(|_| CollaboratorError::LockPoisoned)?
            .clone())
    }
}

impl CharacterStore for InMemoryCharacters {
    fn character_level(&self, character: CharacterId) -> Result<u8> {
        self.levels
            .read()
            .map_err(|_| CollaboratorError::LockPoisoned)?
            .get(&character)
            .copied()
            .ok_or(CollaboratorError::CharacterNotFound { character })
    }
}
