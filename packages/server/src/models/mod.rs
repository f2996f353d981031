pub mod campaign;
pub mod entry;
pub mod media;
pub mod page;
pub mod raffle;
pub mod shared;
pub mod winner;
