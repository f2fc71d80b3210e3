use anchor_lang::error_code;

#[error_code]
pub enum RaffleError {
    Overflow,
    #[msg("Raffle has not ended yet")]
    RaffleNotEnded,
    #[msg("Raffle has already ended")]
    RaffleEnded,
    #[msg("Maximum entries reached")]
    MaxEntriesReached,
    #[msg("Invalid entry amount")]
    InvalidEntryAmount,
    #[msg("Not the winner")]
    NotWinner,
    #[msg("Prize already claimed")]
    PrizeAlreadyClaimed,
    #[msg("Entry price must be greater than zero")]
    InvalidEntryPrice,
    #[msg("Maximum entries must be greater than zero")]
    InvalidMaxEntries,
    #[msg("End timestamp must be in the future")]
    InvalidEndTimestamp,
    #[msg("Raffle duration exceeds maximum allowed")]
    DurationTooLong,
    #[msg("Only the raffle authority may perform this action")]
    Unauthorized,
    #[msg("Raffle is not active")]
    RaffleNotActive,
    #[msg("Raffle has no entries")]
    NoEntries,
    #[msg("Invalid SlotHashes account provided")]
    InvalidSlotHashesAccount,
    #[msg("Entry vault is empty")]
    NothingToWithdraw,
    #[msg("Raffle has not been cancelled")]
    RaffleNotCancelled,
    #[msg("Signer does not own this entry")]
    NotEntryOwner,
    #[msg("Prize mint must be a non-fungible token")]
    InvalidPrizeMint,
}
