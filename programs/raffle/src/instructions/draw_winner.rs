use anchor_lang::prelude::*;
use anchor_lang::solana_program::sysvar::slot_hashes;

use crate::{
    error::RaffleError,
    randomness,
    state::{RaffleAccount, RaffleStatus},
};

/// Event emitted when a winning ticket is drawn
#[event]
pub struct WinnerDrawn {
    /// The pubkey of the raffle
    pub raffle: Pubkey,
    /// Index of the winning ticket
    pub winning_ticket: u64,
    /// Total entries the ticket was drawn from
    pub total_entries: u64,
}

/// Draws the winning ticket for a raffle using on-chain randomness from block hashes.
///
/// Execution requirements:
/// 1. The signer must be the raffle authority
/// 2. The raffle must be in Active state
/// 3. The end timestamp must have passed, or every entry must be sold
/// 4. At least one entry must have been sold
///
/// The winning ticket mixes the most recent slot hash with the current
/// timestamp and maps the result onto `[0, current_entries)`.
///
/// After execution:
/// - The winning ticket index is stored in the raffle account
/// - The raffle state is changed to Ended
///
/// # Errors
/// - `Unauthorized` if the signer is not the raffle authority
/// - `RaffleNotActive` if the raffle is not in Active state
/// - `RaffleNotEnded` if entries are still open
/// - `NoEntries` if nobody entered
/// - `InvalidSlotHashesAccount` if the provided SlotHashes account is invalid
pub fn draw_winner(ctx: Context<DrawWinner>) -> Result<()> {
    let clock = Clock::get()?;
    ctx.accounts.raffle.check_drawable(clock.unix_timestamp)?;

    let total_entries = ctx.accounts.raffle.current_entries;
    let winning_ticket = {
        let data = ctx.accounts.recent_slothashes.data.borrow();
        randomness::draw_ticket(&data[..], clock.unix_timestamp, total_entries)?
    };

    ctx.accounts.raffle.set_winning_ticket(winning_ticket);

    msg!(
        "Drawing winner for raffle: ticket {} of {}",
        winning_ticket,
        total_entries
    );

    emit!(WinnerDrawn {
        raffle: ctx.accounts.raffle.key(),
        winning_ticket,
        total_entries,
    });

    Ok(())
}

/// Accounts required for the draw_winner instruction
#[derive(Accounts)]
pub struct DrawWinner<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    /// The raffle to draw. Status and timing are checked in the handler.
    #[account(
        mut,
        has_one = authority @ RaffleError::Unauthorized,
        constraint = raffle.status == RaffleStatus::Active @ RaffleError::RaffleNotActive,
    )]
    pub raffle: Account<'info, RaffleAccount>,

    /// The SlotHashes sysvar contains the most recent block hashes
    /// CHECK: Validated by address. Anchor refuses to deserialize SlotHashes.
    #[account(address = slot_hashes::ID @ RaffleError::InvalidSlotHashesAccount)]
    pub recent_slothashes: UncheckedAccount<'info>,
}
