pub mod election;
pub mod mongodb;
pub mod store;
