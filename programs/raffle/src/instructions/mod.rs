pub use cancel_raffle::*;
pub use claim_prize::*;
pub use draw_winner::*;
pub use enter_raffle::*;
pub use initialize_raffle::*;
pub use refund_entry::*;
pub use withdraw_proceeds::*;

pub mod cancel_raffle;
pub mod claim_prize;
pub mod draw_winner;
pub mod enter_raffle;
pub mod initialize_raffle;
pub mod refund_entry;
pub mod withdraw_proceeds;
