use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, TransferChecked};

use crate::{
    error::RaffleError,
    state::{RaffleAccount, ENTRY_VAULT_SEED, RAFFLE_SEED},
};

/// Event emitted when entry proceeds are withdrawn
#[event]
pub struct ProceedsWithdrawn {
    /// The pubkey of the raffle
    pub raffle: Pubkey,
    /// Amount withdrawn in payment token base units
    pub amount: u64,
}

/// Instruction to withdraw everything in a raffle's entry vault to the authority
///
/// # Security Considerations
/// 1. Verifies the signer is the raffle authority
/// 2. Validates a winning ticket has been drawn (Ended or Claimed)
/// 3. Validates the vault has funds to withdraw
///
/// Cancelled raffles keep their proceeds in the vault so entrants can refund.
pub fn withdraw_proceeds(ctx: Context<WithdrawProceeds>) -> Result<()> {
    require!(
        ctx.accounts.raffle.has_settled(),
        RaffleError::RaffleNotEnded
    );

    let amount = ctx.accounts.entry_vault.amount;
    require!(amount > 0, RaffleError::NothingToWithdraw);

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
                to: ctx.accounts.authority_payment_account.to_account_info(),
                authority: ctx.accounts.raffle.to_account_info(),
            },
            signer_seeds,
        ),
        amount,
        ctx.accounts.payment_mint.decimals,
    )?;

    emit!(ProceedsWithdrawn {
        raffle: ctx.accounts.raffle.key(),
        amount,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct WithdrawProceeds<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(has_one = authority @ RaffleError::Unauthorized)]
    pub raffle: Account<'info, RaffleAccount>,

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
        token::authority = authority,
    )]
    pub authority_payment_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}
