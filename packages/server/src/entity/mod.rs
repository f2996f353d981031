pub mod campaign;
pub mod entry;
pub mod raffle;
pub mod tenant;
pub mod winner;
