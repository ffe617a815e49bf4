pub mod cozy;

pub use cozy::{BoardError, Position};
