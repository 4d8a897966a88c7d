//! GPIO / peripheral pin assignments for the rig controller (ESP32 DevKit).
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Motor A (H-bridge channel 1)
// ---------------------------------------------------------------------------

/// Direction-select output 1.
pub const MOTOR_A_IN_A_GPIO: i32 = 17;
/// Direction-select output 2.
pub const MOTOR_A_IN_B_GPIO: i32 = 21;
/// LEDC PWM intensity output.
pub const MOTOR_A_PWM_GPIO: i32 = 25;
/// Encoder phase A; rising edges are counted.
pub const MOTOR_A_ENC_A_GPIO: i32 = 34;
/// Encoder phase B; configured as an input, not decoded.
pub const MOTOR_A_ENC_B_GPIO: i32 = 35;

// ---------------------------------------------------------------------------
// Motor B (H-bridge channel 2)
// ---------------------------------------------------------------------------

pub const MOTOR_B_IN_A_GPIO: i32 = 22;
pub const MOTOR_B_IN_B_GPIO: i32 = 23;
pub const MOTOR_B_PWM_GPIO: i32 = 26;
pub const MOTOR_B_ENC_A_GPIO: i32 = 16;
pub const MOTOR_B_ENC_B_GPIO: i32 = 27;

// ---------------------------------------------------------------------------
// Servo
// ---------------------------------------------------------------------------

/// 50 Hz position-PWM output.
pub const SERVO_GPIO: i32 = 4;

// ---------------------------------------------------------------------------
// Start switch (active-low with internal pull-up)
// ---------------------------------------------------------------------------

pub const SWITCH_GPIO: i32 = 5;

// ---------------------------------------------------------------------------
// Host link (UART0, shared with the boot console)
// ---------------------------------------------------------------------------

pub const LINK_UART_PORT: i32 = 0;
pub const LINK_TX_GPIO: i32 = 1;
pub const LINK_RX_GPIO: i32 = 3;
pub const LINK_BAUD: u32 = 115_200;

// ---------------------------------------------------------------------------
// PWM configuration
// ---------------------------------------------------------------------------

/// Motor LEDC resolution (bits).  8-bit gives 0 – 255 duty levels.
pub const MOTOR_PWM_RESOLUTION_BITS: u32 = 8;
/// Motor LEDC frequency.
pub const MOTOR_PWM_FREQ_HZ: u32 = 5_000;
/// Servo LEDC resolution (bits).  14-bit keeps ~1 µs pulse granularity.
pub const SERVO_PWM_RESOLUTION_BITS: u32 = 14;
/// Standard hobby-servo frame rate.
pub const SERVO_PWM_FREQ_HZ: u32 = 50;
