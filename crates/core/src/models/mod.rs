pub mod news;
pub mod notification;
pub mod ohlc;
pub mod rule;
pub mod settings;
pub mod snapshot;
pub mod state;
pub mod tick;
