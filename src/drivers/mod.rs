//! Actuator and input drivers, hardware initialisation.

pub mod hw_init;
pub mod motor;
pub mod servo;
pub mod switch;
pub mod watchdog;
