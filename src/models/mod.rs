pub mod energy_event;

pub use energy_event::{EnergyEvent, EventDate, Hour};
