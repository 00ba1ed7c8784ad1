mod code;
mod election_core;
mod results;
mod spec;
mod view;

pub use code::ParticipationCode;
pub use election_core::{Election, ElectionCore, ElectionStatus};
pub use results::{ElectionResults, OptionTally};
pub use spec::ElectionSpec;
pub use view::ElectionView;
