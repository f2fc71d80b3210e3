#![allow(unexpected_cfgs)]

use anchor_lang::prelude::*;
use instructions::*;

pub mod error;
pub mod instructions;
pub mod randomness;
pub mod state;

declare_id!("BYhrkv1yPFJrtyKbL5UBF2GvabQw3His9tF5AV2JgzRy");

#[program]
pub mod raffle {
    use super::*;

    /// Initialize a new raffle and escrow its NFT prize
    pub fn initialize_raffle(
        ctx: Context<InitializeRaffle>,
        entry_price: u64,
        max_entries: u64,
        end_timestamp: i64,
    ) -> Result<()> {
        instructions::initialize_raffle::initialize_raffle(
            ctx,
            entry_price,
            max_entries,
            end_timestamp,
        )
    }

    /// Enter a raffle by paying in the raffle's payment token
    pub fn enter_raffle(ctx: Context<EnterRaffle>, num_entries: u64) -> Result<()> {
        instructions::enter_raffle::enter_raffle(ctx, num_entries)
    }

    /// Select the winning ticket using slot hash randomness
    pub fn draw_winner(ctx: Context<DrawWinner>) -> Result<()> {
        instructions::draw_winner::draw_winner(ctx)
    }

    /// Claim the NFT prize as the holder of the winning ticket
    pub fn claim_prize(ctx: Context<ClaimPrize>) -> Result<()> {
        instructions::claim_prize::claim_prize(ctx)
    }

    pub fn withdraw_proceeds(ctx: Context<WithdrawProceeds>) -> Result<()> {
        instructions::withdraw_proceeds::withdraw_proceeds(ctx)
    }

    pub fn cancel_raffle(ctx: Context<CancelRaffle>) -> Result<()> {
        instructions::cancel_raffle::cancel_raffle(ctx)
    }

    pub fn refund_entry(ctx: Context<RefundEntry>) -> Result<()> {
        instructions::refund_entry::refund_entry(ctx)
    }
}
