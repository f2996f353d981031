pub mod campaign;
pub mod media;
pub mod page;
pub mod raffle;
pub mod winner;
