//=========================================================================
// Command Line
//=========================================================================

//=== External Dependencies ===============================================

use clap::Parser;

//=== Internal Dependencies ===============================================

use crate::engine::{EngineBuilder, DEFAULT_TPS, DEFAULT_WINDOW_SIZE};
use crate::sensors::SensorKind;

//=== Cli =================================================================

/// Interactive 3D visualizations of tactile sensing principles.
///
/// Space applies load, Tab / Shift+Tab switch sensors, Backspace restarts
/// the current sensor, R resets the view, Escape quits.
#[derive(Debug, Clone, Parser)]
#[command(name = "tactile-viz", version, about)]
pub struct Cli {
    /// Sensor shown at startup.
    #[arg(long, value_enum, default_value_t = SensorKind::Capacitive)]
    pub sensor: SensorKind,

    /// Logic ticks per second.
    #[arg(long, default_value_t = DEFAULT_TPS, value_parser = parse_tps)]
    pub tps: f64,

    /// Window width in physical pixels.
    #[arg(long, default_value_t = DEFAULT_WINDOW_SIZE.0, value_parser = clap::value_parser!(u32).range(1..))]
    pub width: u32,

    /// Window height in physical pixels.
    #[arg(long, default_value_t = DEFAULT_WINDOW_SIZE.1, value_parser = clap::value_parser!(u32).range(1..))]
    pub height: u32,
}

impl Cli {
    pub fn into_builder(self) -> EngineBuilder {
        EngineBuilder::new()
            .with_initial_sensor(self.sensor)
            .with_tps(self.tps)
            .with_window_size(self.width, self.height)
    }
}

fn parse_tps(value: &str) -> Result<f64, String> {
    let tps: f64 = value.parse().map_err(|e| format!("{e}"))?;
    if tps.is_finite() && tps > 0.0 {
        Ok(tps)
    } else {
        Err(format!("must be a positive number, got {value}"))
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
