use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, TransferChecked};

use crate::{
    error::RaffleError,
    state::{
        RaffleAccount, RaffleStatus, ENTRY_VAULT_SEED, PRIZE_VAULT_SEED, RAFFLE_ACCOUNT_SIZE,
        RAFFLE_SEED,
    },
};

/// Event emitted when a raffle is initialized
#[event]
pub struct RaffleInitialized {
    /// The pubkey of the created raffle
    pub raffle: Pubkey,
    /// The account that created the raffle
    pub authority: Pubkey,
    /// The NFT held in escrow as the prize
    pub nft_mint: Pubkey,
    /// Price per entry in payment token base units
    pub entry_price: u64,
    /// Maximum number of entries that can be sold
    pub max_entries: u64,
    /// When the raffle stops accepting entries
    pub end_timestamp: i64,
}

/// Instruction to initialize a new NFT raffle
///
/// # Arguments
/// * `ctx` - The context object containing all required accounts
/// * `entry_price` - Price per entry in payment token base units (must be > 0)
/// * `max_entries` - Maximum number of entries that can be sold (must be > 0)
/// * `end_timestamp` - Unix timestamp when entries close (future, at most 30 days out)
///
/// # Account Validations
/// * Raffle - New PDA with seeds ["raffle", authority, nft_mint]
/// * Prize Vault - New token account PDA ["prize_vault", raffle] owned by the raffle
/// * Entry Vault - New token account PDA ["entry_vault", raffle] owned by the raffle
/// * Authority NFT Account - Holds the prize NFT and is owned by the authority
///
/// # Implementation Notes
/// - Initializes the raffle in Active state
/// - Moves the prize NFT into escrow before any entry can be sold
pub fn initialize_raffle(
    ctx: Context<InitializeRaffle>,
    entry_price: u64,
    max_entries: u64,
    end_timestamp: i64,
) -> Result<()> {
    let current_time = Clock::get()?.unix_timestamp;
    RaffleAccount::validate_params(entry_price, max_entries, end_timestamp, current_time)?;

    let raffle = &mut ctx.accounts.raffle;
    raffle.authority = ctx.accounts.authority.key();
    raffle.nft_mint = ctx.accounts.nft_mint.key();
    raffle.payment_mint = ctx.accounts.payment_mint.key();
    raffle.entry_price = entry_price;
    raffle.max_entries = max_entries;
    raffle.end_timestamp = end_timestamp;
    raffle.bump = ctx.bumps.raffle;

    // Set default values
    raffle.current_entries = 0;
    raffle.entry_records = 0;
    raffle.created_at = current_time;
    raffle.winning_ticket = None;
    raffle.winner = None;
    raffle.status = RaffleStatus::Active;

    // Escrow the prize
    token::transfer_checked(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            TransferChecked {
                from: ctx.accounts.authority_nft_account.to_account_info(),
                mint: ctx.accounts.nft_mint.to_account_info(),
                to: ctx.accounts.prize_vault.to_account_info(),
                authority: ctx.accounts.authority.to_account_info(),
            },
        ),
        1,
        ctx.accounts.nft_mint.decimals,
    )?;

    msg!("Raffle initialized with entry price: {}", entry_price);

    emit!(RaffleInitialized {
        raffle: ctx.accounts.raffle.key(),
        authority: ctx.accounts.authority.key(),
        nft_mint: ctx.accounts.nft_mint.key(),
        entry_price,
        max_entries,
        end_timestamp,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct InitializeRaffle<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        init,
        payer = authority,
        space = RAFFLE_ACCOUNT_SIZE,
        seeds = [
            RAFFLE_SEED,
            authority.key().as_ref(),
            nft_mint.key().as_ref(),
        ],
        bump
    )]
    pub raffle: Account<'info, RaffleAccount>,

    /// The prize NFT
    #[account(
        constraint = nft_mint.supply == 1 && nft_mint.decimals == 0 @ RaffleError::InvalidPrizeMint,
    )]
    pub nft_mint: Account<'info, Mint>,

    /// The token entries are paid in
    pub payment_mint: Account<'info, Mint>,

    #[account(
        mut,
        token::mint = nft_mint,
        token::authority = authority,
    )]
    pub authority_nft_account: Account<'info, TokenAccount>,

    #[account(
        init,
        payer = authority,
        seeds = [
            PRIZE_VAULT_SEED,
            raffle.key().as_ref(),
        ],
        bump,
        token::mint = nft_mint,
        token::authority = raffle,
    )]
    pub prize_vault: Account<'info, TokenAccount>,

    #[account(
        init,
        payer = authority,
        seeds = [
            ENTRY_VAULT_SEED,
            raffle.key().as_ref(),
        ],
        bump,
        token::mint = payment_mint,
        token::authority = raffle,
    )]
    pub entry_vault: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}
