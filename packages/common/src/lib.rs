pub mod contact;
pub mod customization;
pub mod lifecycle;
pub mod media;
pub mod object_id;
pub mod question;
pub mod retry;
pub mod selection;
pub mod ticket;

pub use customization::{Customizations, MediaItem, MediaKind};
pub use lifecycle::{RafflePhase, RaffleWindow};
pub use object_id::ObjectId;
pub use question::{Answers, CustomQuestion, QuestionType};
pub use selection::SelectionMethod;
pub use ticket::TicketFormat;
