//! The campaign engine: tenant resolution, lifecycle gating, entry admission,
//! winner selection and page presentation.

pub mod admission;
pub mod error;
pub mod gate;
pub mod notifier;
pub mod presentation;
pub mod selection;
pub mod store;
pub mod tenant;

pub use error::{CampaignError, ErrorKind};
