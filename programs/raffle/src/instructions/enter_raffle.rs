use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, TransferChecked};

use crate::{
    error::RaffleError,
    state::{
        EntryAccount, RaffleAccount, RaffleStatus, ENTRY_ACCOUNT_SIZE, ENTRY_SEED,
        ENTRY_VAULT_SEED,
    },
};

/// Event emitted when a user enters a raffle
#[event]
pub struct RaffleEntered {
    /// The pubkey of the raffle
    pub raffle: Pubkey,
    /// The entrant's address
    pub user: Pubkey,
    /// The entry record created for this purchase
    pub entry: Pubkey,
    /// Number of entries purchased
    pub num_entries: u64,
    /// Total amount paid in payment token base units
    pub payment_amount: u64,
    /// Index of the first ticket in this purchase
    pub ticket_start_index: u64,
}

/// Instruction to enter a raffle by paying for one or more entries
///
/// # Arguments
/// * `ctx` - The context object containing all required accounts
/// * `num_entries` - The number of entries to purchase
///
/// # Security Considerations
/// 1. Validates num_entries is greater than 0
/// 2. Ensures the purchase does not exceed the raffle's maximum entries
/// 3. Raffle must be Active and before its end timestamp (account constraints)
/// 4. Payment goes to the raffle's entry vault PDA
///
/// # Implementation Notes
/// - Each call creates one entry record covering a contiguous ticket range
/// - Raffle counters are updated before the token transfer
pub fn enter_raffle(ctx: Context<EnterRaffle>, num_entries: u64) -> Result<()> {
    let ticket_start_index = ctx.accounts.raffle.record_entries(num_entries)?;
    let payment_amount = ctx.accounts.raffle.entry_cost(num_entries)?;

    let entry = &mut ctx.accounts.entry;
    entry.raffle = ctx.accounts.raffle.key();
    entry.owner = ctx.accounts.user.key();
    entry.num_entries = num_entries;
    entry.ticket_start_index = ticket_start_index;
    entry.bump = ctx.bumps.entry;

    token::transfer_checked(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            TransferChecked {
                from: ctx.accounts.user_payment_account.to_account_info(),
                mint: ctx.accounts.payment_mint.to_account_info(),
                to: ctx.accounts.entry_vault.to_account_info(),
                authority: ctx.accounts.user.to_account_info(),
            },
        ),
        payment_amount,
        ctx.accounts.payment_mint.decimals,
    )?;

    msg!("User entering raffle with {} entries", num_entries);

    emit!(RaffleEntered {
        raffle: ctx.accounts.raffle.key(),
        user: ctx.accounts.user.key(),
        entry: ctx.accounts.entry.key(),
        num_entries,
        payment_amount,
        ticket_start_index,
    });

    Ok(())
}

/// Accounts required for the enter_raffle instruction
#[derive(Accounts)]
pub struct EnterRaffle<'info> {
    #[account(mut)]
    pub user: Signer<'info>,

    /// Must be Active and not past its end timestamp
    #[account(
        mut,
        constraint = raffle.status == RaffleStatus::Active @ RaffleError::RaffleEnded,
        constraint = Clock::get()?.unix_timestamp < raffle.end_timestamp @ RaffleError::RaffleEnded,
    )]
    pub raffle: Account<'info, RaffleAccount>,

    /// New entry record for this purchase
    /// PDA with seeds ["entry", raffle_key, entry_records]
    #[account(
        init,
        payer = user,
        space = ENTRY_ACCOUNT_SIZE,
        seeds = [
            ENTRY_SEED,
            raffle.key().as_ref(),
            raffle.entry_records.to_le_bytes().as_ref(),
        ],
        bump,
    )]
    pub entry: Account<'info, EntryAccount>,

    #[account(address = raffle.payment_mint)]
    pub payment_mint: Account<'info, Mint>,

    #[account(
        mut,
        token::mint = payment_mint,
        token::authority = user,
    )]
    pub user_payment_account: Account<'info, TokenAccount>,

    #[account(
        mut,
        seeds = [
            ENTRY_VAULT_SEED,
            raffle.key().as_ref(),
        ],
        bump,
    )]
    pub entry_vault: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}
