//! Motor rig firmware: main entry point.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     Adapters (outer ring)                    │
//! │                                                              │
//! │  HardwareAdapter     SerialLink    WatchdogDelay  Esp32Time  │
//! │  (Actuator+Encoder)  (Link+Sink)   (DelayNs)                 │
//! │                                                              │
//! │  ─────────────── Port Trait Boundary ──────────────────      │
//! │                                                              │
//! │  ┌────────────────────────────────────────────────────────┐  │
//! │  │            RigService (pure logic)                     │  │
//! │  │  line framing · command parse · calibration sweep      │  │
//! │  └────────────────────────────────────────────────────────┘  │
//! │                                                              │
//! │  Encoder ISRs ──▶ ENCODERS (critical-section counters)       │
//! └──────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_hal::delay::FreeRtos;
use log::{info, warn};

use motor_rig::adapters::delay::WatchdogDelay;
use motor_rig::adapters::hardware::HardwareAdapter;
use motor_rig::adapters::serial::SerialLink;
use motor_rig::adapters::time::Esp32TimeAdapter;
use motor_rig::app::service::{Outcome, RigService};
use motor_rig::config::RigConfig;
use motor_rig::drivers::{hw_init, switch::SwitchDriver, watchdog::Watchdog};
use motor_rig::error::Error;
use motor_rig::pins;
use motor_rig::sensors::encoder::ENCODERS;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Motor rig v{}                    ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    let config = RigConfig::default();
    match serde_json::to_string(&config) {
        Ok(json) => info!("Config: {json}"),
        Err(e) => warn!("Config: not serialisable ({e})"),
    }

    // ── 3. Peripherals ────────────────────────────────────────
    hw_init::init_peripherals().map_err(Error::from)?;
    hw_init::init_isr_service().map_err(Error::from)?;
    let watchdog = Watchdog::new();

    // ── 4. Adapters + service ─────────────────────────────────
    let mut hw = HardwareAdapter::new(&ENCODERS);
    let mut link = SerialLink::new();
    let mut delay = WatchdogDelay::new(FreeRtos, &watchdog);
    let time = Esp32TimeAdapter::new();
    let mut switch = SwitchDriver::new(pins::SWITCH_GPIO, config.debounce_ms);

    let mut service = RigService::new(config)?;
    service.start(&mut hw, &mut link);

    // ── 5. Main loop ──────────────────────────────────────────
    loop {
        let edge = switch.poll(time.uptime_ms());
        if let Some(edge) = edge {
            info!("Switch: {:?}", edge);
        }

        if let Outcome::Swept(_) = service.poll_once(edge, &mut link, &mut hw, &mut delay) {
            info!("Calibration sweeps since boot: {}", service.sweeps());
        }

        watchdog.feed();
        FreeRtos::delay_ms(1);
    }
}
