pub mod domain;

pub use domain::{Driver, Location, LocationUpdate};
