use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, TransferChecked};

use crate::{
    error::RaffleError,
    state::{EntryAccount, RaffleAccount, PRIZE_VAULT_SEED, RAFFLE_SEED},
};

/// Event emitted when the winner takes the prize
#[event]
pub struct PrizeClaimed {
    /// The pubkey of the raffle
    pub raffle: Pubkey,
    /// The winner's address
    pub winner: Pubkey,
    /// The winning ticket number
    pub winning_ticket: u64,
}

/// Transfers the escrowed NFT to the holder of the winning ticket.
///
/// This instruction can only be executed when:
/// 1. The raffle is in Ended state (a winning ticket has been drawn)
/// 2. The supplied entry belongs to this raffle and to the signer
/// 3. The entry's ticket range contains the winning ticket
///
/// After execution:
/// - The winner's address is stored in the raffle account
/// - The raffle state is changed to Claimed
pub fn claim_prize(ctx: Context<ClaimPrize>) -> Result<()> {
    let winning_ticket = ctx.accounts.raffle.check_claimable()?;
    require!(
        ctx.accounts.entry.contains_ticket(winning_ticket),
        RaffleError::NotWinner
    );

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
                to: ctx.accounts.winner_nft_account.to_account_info(),
                authority: ctx.accounts.raffle.to_account_info(),
            },
            signer_seeds,
        ),
        ctx.accounts.prize_vault.amount,
        ctx.accounts.nft_mint.decimals,
    )?;

    let winner = ctx.accounts.winner.key();
    ctx.accounts.raffle.set_winner(winner);

    msg!("Winner claiming prize: {}", winner);

    emit!(PrizeClaimed {
        raffle: ctx.accounts.raffle.key(),
        winner,
        winning_ticket,
    });

    Ok(())
}

/// Accounts required for the claim_prize instruction
#[derive(Accounts)]
pub struct ClaimPrize<'info> {
    #[account(mut)]
    pub winner: Signer<'info>,

    #[account(mut)]
    pub raffle: Account<'info, RaffleAccount>,

    /// The entry holding the winning ticket
    #[account(
        constraint = entry.raffle == raffle.key() @ RaffleError::NotWinner,
        constraint = entry.owner == winner.key() @ RaffleError::NotWinner,
    )]
    pub entry: Account<'info, EntryAccount>,

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
        token::authority = winner,
    )]
    pub winner_nft_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}
