mod common;

mod media;
mod raffle;
mod winner;
