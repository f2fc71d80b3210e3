pub use entry::*;
pub use raffle::*;

pub mod entry;
pub mod raffle;

/// Seed prefixes for every PDA the program derives.
pub const RAFFLE_SEED: &[u8] = b"raffle";
pub const ENTRY_SEED: &[u8] = b"entry";
pub const PRIZE_VAULT_SEED: &[u8] = b"prize_vault";
pub const ENTRY_VAULT_SEED: &[u8] = b"entry_vault";
