use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, TransferChecked};

use crate::{
    error::RaffleError,
    state::{EntryAccount, RaffleAccount, ENTRY_VAULT_SEED, RAFFLE_SEED},
};

/// Event emitted when an entrant is refunded
#[event]
pub struct EntryRefunded {
    /// The pubkey of the raffle
    pub raffle: Pubkey,
    /// The refunded entrant
    pub user: Pubkey,
    /// Amount returned in payment token base units
    pub amount: u64,
}

/// Instruction to refund an entry in a cancelled raffle
///
/// # Security Considerations
/// 1. Validates the raffle is in Cancelled state
/// 2. Ensures signer is the owner of the entry
/// 3. Refund amount is recomputed from the raffle's entry price
///
/// # Implementation Notes
/// - Closes the entry account and returns its rent to the entrant,
///   so an entry can only be refunded once
pub fn refund_entry(ctx: Context<RefundEntry>) -> Result<()> {
    ctx.accounts.raffle.check_refundable()?;
    let amount = ctx
        .accounts
        .raffle
        .entry_cost(ctx.accounts.entry.num_entries)?;

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
                from: ctx.accounts.entry_vault.to_account_info(),
                mint: ctx.accounts.payment_mint.to_account_info(),
                to: ctx.accounts.user_payment_account.to_account_info(),
                authority: ctx.accounts.raffle.to_account_info(),
            },
            signer_seeds,
        ),
        amount,
        ctx.accounts.payment_mint.decimals,
    )?;

    emit!(EntryRefunded {
        raffle: ctx.accounts.raffle.key(),
        user: ctx.accounts.user.key(),
        amount,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct RefundEntry<'info> {
    #[account(mut)]
    pub user: Signer<'info>,

    pub raffle: Account<'info, RaffleAccount>,

    /// Closed after the refund; rent goes back to the entrant
    #[account(
        mut,
        close = user,
        constraint = entry.raffle == raffle.key() @ RaffleError::NotEntryOwner,
        constraint = entry.owner == user.key() @ RaffleError::NotEntryOwner,
    )]
    pub entry: Account<'info, EntryAccount>,

    #[account(address = raffle.payment_mint)]
    pub payment_mint: Account<'info, Mint>,

    #[account(
        mut,
        seeds = [
            ENTRY_VAULT_SEED,
            raffle.key().as_ref(),
        ],
        bump,
    )]
    pub entry_vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        token::mint = payment_mint,
        token::authority = user,
    )]
    pub user_payment_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}
