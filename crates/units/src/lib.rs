pub mod energy;
pub mod length;
pub mod magnetic_field;
pub mod time;

#[cfg(test)]
mod magnetic_field_test;

pub use energy::Energy;
pub use length::Length;
pub use magnetic_field::MagneticField;
pub use time::{SPEED_OF_LIGHT_CM_PER_NS, Time};
