use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, TransferChecked};

use crate::{
    error::RaffleError,
    state::{RaffleAccount, PRIZE_VAULT_SEED, RAFFLE_SEED},
};

/// Event emitted when a raffle is cancelled
#[event]
pub struct RaffleCancelled {
    /// The pubkey of the cancelled raffle
    pub raffle: Pubkey,
    /// The timestamp when the raffle was cancelled
    pub cancelled_at: i64,
    /// Entries sold before cancellation; these can now be refunded
    pub refundable_entries: u64,
}

/// Instruction to cancel an active raffle
///
/// # Security Considerations
/// 1. Verifies the signer is the raffle authority
/// 2. Ensures the raffle is still Active, so no winner has been drawn
///
/// # Implementation Notes
/// - Returns the escrowed NFT to the authority
/// - Changes raffle state to Cancelled
/// - Entry payments stay in the entry vault until each entrant calls refund_entry
pub fn cancel_raffle(ctx: Context<CancelRaffle>) -> Result<()> {
    ctx.accounts.raffle.cancel()?;

    let authority = ctx.accounts.raffle.authority;
    let nft_mint = ctx.accounts.raffle.nft_mint;
    let bump = [ctx.accounts.raffle.bump];
    let signer_seeds: &[&[&[u8]]] = &[&[
        RAFFLE_SEED,
        authority.as_ref(),
        nft_mint.as_ref(),
        &bump,
    ]];

    token::transfer_checked(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            TransferChecked {
                from: ctx.accounts.prize_vault.to_account_info(),
                mint: ctx.accounts.nft_mint.to_account_info(),
                to: ctx.accounts.authority_nft_account.to_account_info(),
                authority: ctx.accounts.raffle.to_account_info(),
            },
            signer_seeds,
        ),
        ctx.accounts.prize_vault.amount,
        ctx.accounts.nft_mint.decimals,
    )?;

    let clock = Clock::get()?;
    emit!(RaffleCancelled {
        raffle: ctx.accounts.raffle.key(),
        cancelled_at: clock.unix_timestamp,
        refundable_entries: ctx.accounts.raffle.current_entries,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct CancelRaffle<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        mut,
        has_one = authority @ RaffleError::Unauthorized,
    )]
    pub raffle: Account<'info, RaffleAccount>,

    #[account(address = raffle.nft_mint)]
    pub nft_mint: Account<'info, Mint>,

    #[account(
        mut,
        seeds = [
            PRIZE_VAULT_SEED,
            raffle.key().as_ref(),
        ],
        bump,
    )]
    pub prize_vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        token::mint = nft_mint,
        token::authority = authority,
    )]
    pub authority_nft_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}
