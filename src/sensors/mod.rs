//! Sensor inputs.
//!
//! Only the wheel encoders live here; the start switch is a plain
//! debounced input in [`crate::drivers::switch`].

pub mod encoder;
