mod card;
mod match_record;
mod status;
mod tab;

pub use card::*;
pub use match_record::*;
pub use status::*;
pub use tab::*;
