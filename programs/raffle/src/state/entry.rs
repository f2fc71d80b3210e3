use anchor_lang::prelude::*;

// 8 discriminator + 32 raffle + 32 owner + 8 num_entries + 8 ticket_start_index + 1 bump
pub const ENTRY_ACCOUNT_SIZE: usize = 8 + 32 + 32 + 8 + 8 + 1;

#[account]
pub struct EntryAccount {
    pub raffle: Pubkey,
    pub owner: Pubkey,
    pub num_entries: u64,
    pub ticket_start_index: u64,
    pub bump: u8,
}

impl EntryAccount {
    /// Whether `ticket` falls inside `[ticket_start_index, ticket_start_index + num_entries)`.
    pub fn contains_ticket(&self, ticket: u64) -> bool {
        ticket >= self.ticket_start_index && ticket - self.ticket_start_index < self.num_entries
    }
}
