use anchor_lang::prelude::*;

use crate::error::RaffleError;

// Space calculation:
// 8 (discriminator) +
// 32 (authority) +
// 32 (nft_mint) +
// 32 (payment_mint) +
// 8 (entry_price) +
// 8 (max_entries) +
// 8 (current_entries) +
// 8 (entry_records) +
// 8 (created_at) +
// 8 (end_timestamp) +
// 9 (winning_ticket: Option<u64>) +
// 33 (winner: Option<Pubkey>) +
// 1 (status) +
// 1 (bump) =
// 196 total bytes
pub const RAFFLE_ACCOUNT_SIZE: usize = 8 + 32 + 32 + 32 + 8 + 8 + 8 + 8 + 8 + 8 + 9 + 33 + 1 + 1;

/// Longest window a raffle may stay open, in seconds (30 days).
pub const MAX_DURATION: i64 = 30 * 24 * 60 * 60;

type StateResult<T> = core::result::Result<T, RaffleError>;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum RaffleStatus {
    Active = 0,
    Ended = 1,
    Claimed = 2,
    Cancelled = 3,
}

#[account]
pub struct RaffleAccount {
    pub authority: Pubkey,
    pub nft_mint: Pubkey,
    pub payment_mint: Pubkey,
    pub entry_price: u64,
    pub max_entries: u64,
    pub current_entries: u64,
    pub entry_records: u64,
    pub created_at: i64,
    pub end_timestamp: i64,
    pub winning_ticket: Option<u64>,
    pub winner: Option<Pubkey>,
    pub status: RaffleStatus,
    pub bump: u8,
}

impl RaffleAccount {
    /// Checks the parameters a raffle is initialized with against the current time.
    pub fn validate_params(
        entry_price: u64,
        max_entries: u64,
        end_timestamp: i64,
        now: i64,
    ) -> StateResult<()> {
        if entry_price == 0 {
            return Err(RaffleError::InvalidEntryPrice);
        }
        if max_entries == 0 {
            return Err(RaffleError::InvalidMaxEntries);
        }
        if end_timestamp <= now {
            return Err(RaffleError::InvalidEndTimestamp);
        }
        let latest_end = now.checked_add(MAX_DURATION).ok_or(RaffleError::Overflow)?;
        if end_timestamp > latest_end {
            return Err(RaffleError::DurationTooLong);
        }
        Ok(())
    }

    pub fn entry_cost(&self, num_entries: u64) -> StateResult<u64> {
        num_entries
            .checked_mul(self.entry_price)
            .ok_or(RaffleError::Overflow)
    }

    /// Reserves `num_entries` tickets and returns the index of the first one.
    ///
    /// Tickets are handed out contiguously, so consecutive calls produce
    /// disjoint ranges in the order the entries were made.
    pub fn record_entries(&mut self, num_entries: u64) -> StateResult<u64> {
        if num_entries == 0 {
            return Err(RaffleError::InvalidEntryAmount);
        }
        if self.is_sold_out() {
            return Err(RaffleError::MaxEntriesReached);
        }
        let total = self
            .current_entries
            .checked_add(num_entries)
            .ok_or(RaffleError::Overflow)?;
        if total > self.max_entries {
            return Err(RaffleError::MaxEntriesReached);
        }

        let ticket_start_index = self.current_entries;
        self.current_entries = total;
        self.entry_records = self
            .entry_records
            .checked_add(1)
            .ok_or(RaffleError::Overflow)?;
        Ok(ticket_start_index)
    }

    pub fn is_sold_out(&self) -> bool {
        self.current_entries >= self.max_entries
    }

    pub fn is_open_for_entries(&self, now: i64) -> bool {
        self.status == RaffleStatus::Active && now < self.end_timestamp
    }

    /// A raffle can be drawn once its window has closed or every entry is sold.
    pub fn is_drawable(&self, now: i64) -> bool {
        now >= self.end_timestamp || self.is_sold_out()
    }

    pub fn check_drawable(&self, now: i64) -> StateResult<()> {
        if self.status != RaffleStatus::Active {
            return Err(RaffleError::RaffleNotActive);
        }
        if !self.is_drawable(now) {
            return Err(RaffleError::RaffleNotEnded);
        }
        if self.current_entries == 0 {
            return Err(RaffleError::NoEntries);
        }
        Ok(())
    }

    /// Returns the winning ticket if the prize is still waiting to be claimed.
    pub fn check_claimable(&self) -> StateResult<u64> {
        match self.status {
            RaffleStatus::Ended => self.winning_ticket.ok_or(RaffleError::RaffleNotEnded),
            RaffleStatus::Claimed => Err(RaffleError::PrizeAlreadyClaimed),
            RaffleStatus::Active | RaffleStatus::Cancelled => Err(RaffleError::RaffleNotEnded),
        }
    }

    /// Moves an active raffle to Cancelled. Drawn or claimed raffles stay put.
    pub fn cancel(&mut self) -> StateResult<()> {
        if self.status != RaffleStatus::Active {
            return Err(RaffleError::RaffleNotActive);
        }
        self.status = RaffleStatus::Cancelled;
        Ok(())
    }

    pub fn check_refundable(&self) -> StateResult<()> {
        if self.status != RaffleStatus::Cancelled {
            return Err(RaffleError::RaffleNotCancelled);
        }
        Ok(())
    }

    pub fn has_settled(&self) -> bool {
        matches!(self.status, RaffleStatus::Ended | RaffleStatus::Claimed)
    }

    pub fn set_winning_ticket(&mut self, winning_ticket: u64) {
        self.winning_ticket = Some(winning_ticket);
        self.status = RaffleStatus::Ended;
    }

    pub fn set_winner(&mut self, winner: Pubkey) {
        self.winner = Some(winner);
        self.status = RaffleStatus::Claimed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_700_000_000;

    fn raffle(max_entries: u64) -> RaffleAccount {
        RaffleAccount {
            authority: Pubkey::new_unique(),
            nft_mint: Pubkey::new_unique(),
            payment_mint: Pubkey::new_unique(),
            entry_price: 5_000,
            max_entries,
            current_entries: 0,
            entry_records: 0,
            created_at: NOW,
            end_timestamp: NOW + 3_600,
            winning_ticket: None,
            winner: None,
            status: RaffleStatus::Active,
            bump: 255,
        }
    }

    #[test]
    fn validate_params_rejects_zero_price_and_capacity() {
        assert!(matches!(
            RaffleAccount::validate_params(0, 10, NOW + 60, NOW),
            Err(RaffleError::InvalidEntryPrice)
        ));
        assert!(matches!(
            RaffleAccount::validate_params(1, 0, NOW + 60, NOW),
            Err(RaffleError::InvalidMaxEntries)
        ));
    }

    #[test]
    fn validate_params_bounds_the_window() {
        assert!(matches!(
            RaffleAccount::validate_params(1, 10, NOW, NOW),
            Err(RaffleError::InvalidEndTimestamp)
        ));
        assert!(matches!(
            RaffleAccount::validate_params(1, 10, NOW + MAX_DURATION + 1, NOW),
            Err(RaffleError::DurationTooLong)
        ));
        assert!(RaffleAccount::validate_params(1, 10, NOW + MAX_DURATION, NOW).is_ok());
    }

    #[test]
    fn entries_are_handed_out_contiguously() {
        let mut raffle = raffle(10);
        assert_eq!(raffle.record_entries(3).ok(), Some(0));
        assert_eq!(raffle.record_entries(4).ok(), Some(3));
        assert_eq!(raffle.current_entries, 7);
        assert_eq!(raffle.entry_records, 2);
    }

    #[test]
    fn entries_past_capacity_are_rejected() {
        let mut raffle = raffle(5);
        assert!(raffle.record_entries(4).is_ok());
        assert!(matches!(
            raffle.record_entries(2),
            Err(RaffleError::MaxEntriesReached)
        ));
        assert_eq!(raffle.current_entries, 4);
        assert!(raffle.record_entries(1).is_ok());
        assert!(raffle.is_sold_out());
        assert!(matches!(
            raffle.record_entries(1),
            Err(RaffleError::MaxEntriesReached)
        ));
    }

    #[test]
    fn zero_entries_are_rejected() {
        let mut raffle = raffle(5);
        assert!(matches!(
            raffle.record_entries(0),
            Err(RaffleError::InvalidEntryAmount)
        ));
        assert_eq!(raffle.entry_records, 0);
    }

    #[test]
    fn entry_cost_detects_overflow() {
        let mut raffle = raffle(5);
        assert_eq!(raffle.entry_cost(3).ok(), Some(15_000));
        raffle.entry_price = u64::MAX;
        assert!(matches!(raffle.entry_cost(2), Err(RaffleError::Overflow)));
    }

    #[test]
    fn draw_requires_closed_window_or_sell_out() {
        let mut raffle = raffle(2);
        raffle.record_entries(1).unwrap();
        assert!(matches!(
            raffle.check_drawable(NOW),
            Err(RaffleError::RaffleNotEnded)
        ));
        assert!(raffle.check_drawable(raffle.end_timestamp).is_ok());

        raffle.record_entries(1).unwrap();
        assert!(raffle.check_drawable(NOW).is_ok());
    }

    #[test]
    fn draw_requires_entries_and_active_status() {
        let mut raffle = raffle(2);
        assert!(matches!(
            raffle.check_drawable(raffle.end_timestamp),
            Err(RaffleError::NoEntries)
        ));
        raffle.status = RaffleStatus::Cancelled;
        assert!(matches!(
            raffle.check_drawable(raffle.end_timestamp),
            Err(RaffleError::RaffleNotActive)
        ));
    }

    #[test]
    fn claim_follows_the_status_machine() {
        let mut raffle = raffle(2);
        raffle.record_entries(2).unwrap();
        assert!(matches!(
            raffle.check_claimable(),
            Err(RaffleError::RaffleNotEnded)
        ));

        raffle.set_winning_ticket(1);
        assert_eq!(raffle.status, RaffleStatus::Ended);
        assert_eq!(raffle.check_claimable().ok(), Some(1));
        assert!(raffle.has_settled());

        let winner = Pubkey::new_unique();
        raffle.set_winner(winner);
        assert_eq!(raffle.winner, Some(winner));
        assert!(matches!(
            raffle.check_claimable(),
            Err(RaffleError::PrizeAlreadyClaimed)
        ));
    }

    #[test]
    fn only_active_raffles_can_be_cancelled() {
        let mut raffle = raffle(3);
        raffle.record_entries(2).unwrap();
        assert!(matches!(
            raffle.check_refundable(),
            Err(RaffleError::RaffleNotCancelled)
        ));

        assert!(raffle.cancel().is_ok());
        assert_eq!(raffle.status, RaffleStatus::Cancelled);
        assert!(raffle.check_refundable().is_ok());
        assert!(!raffle.has_settled());
        assert!(matches!(
            raffle.check_claimable(),
            Err(RaffleError::RaffleNotEnded)
        ));
        assert!(matches!(raffle.cancel(), Err(RaffleError::RaffleNotActive)));
        assert_eq!(raffle.status, RaffleStatus::Cancelled);
    }

    #[test]
    fn drawn_raffles_cannot_be_cancelled_or_refunded() {
        let mut raffle = raffle(2);
        raffle.record_entries(2).unwrap();
        raffle.set_winning_ticket(0);
        assert!(matches!(raffle.cancel(), Err(RaffleError::RaffleNotActive)));
        assert!(matches!(
            raffle.check_refundable(),
            Err(RaffleError::RaffleNotCancelled)
        ));
        assert_eq!(raffle.status, RaffleStatus::Ended);

        raffle.set_winner(Pubkey::new_unique());
        assert!(matches!(raffle.cancel(), Err(RaffleError::RaffleNotActive)));
        assert!(matches!(
            raffle.check_refundable(),
            Err(RaffleError::RaffleNotCancelled)
        ));
        assert_eq!(raffle.status, RaffleStatus::Claimed);
    }

    #[test]
    fn oversized_entries_fail_on_capacity_not_cost() {
        let mut raffle = raffle(10);
        assert!(matches!(
            raffle.record_entries(u64::MAX / 1_000),
            Err(RaffleError::MaxEntriesReached)
        ));
        assert!(matches!(
            raffle.entry_cost(u64::MAX / 1_000),
            Err(RaffleError::Overflow)
        ));
        assert_eq!(raffle.current_entries, 0);
    }

    #[test]
    fn entries_close_with_the_window() {
        let raffle = raffle(2);
        assert!(raffle.is_open_for_entries(NOW));
        assert!(!raffle.is_open_for_entries(raffle.end_timestamp));
    }
}
