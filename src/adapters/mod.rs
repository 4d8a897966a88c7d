//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements         | Connects to                 |
//! |------------|--------------------|-----------------------------|
//! | `hardware` | ActuatorPort       | H-bridge GPIO + LEDC, servo |
//! |            | EncoderPort        | ISR pulse counters          |
//! | `serial`   | EventSink          | UART0 host link             |
//! | `delay`    | DelayNs            | FreeRTOS delay + TWDT       |
//! | `time`     | (none)             | ESP32 system timer          |

pub mod delay;
pub mod hardware;
pub mod serial;
pub mod time;
