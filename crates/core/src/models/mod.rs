pub mod closed_trade;
pub mod feed;
pub mod lesson;
pub mod performance;
pub mod portfolio;
pub mod position;
pub mod risk;
pub mod settings;
pub mod snapshot;
pub mod token;
