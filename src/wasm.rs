//! WebAssembly bindings for Lattice Life.
//!
//! Thin wrapper around [`Simulation`] for a browser renderer: the settings
//! panel pushes configuration in, a timer calls `tick`, and the render loop
//! pulls alive flags and positions out as typed arrays.

use std::time::Duration;

use js_sys::{Float32Array, Uint8Array};
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::{
    compute::{Simulation, StepClock},
    schema::{Seed, SimulationConfig},
};

/// Initialize WASM module with panic hook and logging.
#[wasm_bindgen(start)]
pub fn init() {
    // Set panic hook for better error messages in browser
    console_error_panic_hook::set_once();

    // Initialize WASM logger
    wasm_logger::init(wasm_logger::Config::default());
}

fn js_error(context: &str, e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&format!("{context}: {e}"))
}

/// Host milliseconds to a `Duration`: NaN and negatives map to zero,
/// values past `Duration::MAX` (including infinity) saturate.
fn millis(ms: f64) -> Duration {
    if ms.is_nan() || ms <= 0.0 {
        return Duration::ZERO;
    }
    Duration::try_from_secs_f64(ms / 1000.0).unwrap_or(Duration::MAX)
}

/// WebAssembly wrapper for the lattice engine.
#[wasm_bindgen]
pub struct WasmSimulation {
    simulation: Simulation,
    clock: StepClock,
}

#[wasm_bindgen]
impl WasmSimulation {
    /// Create a simulation from a JSON `SimulationConfig`.
    ///
    /// `now_ms` is the host clock (e.g. `performance.now()`); the first tick
    /// is due one step period later.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str, now_ms: f64) -> Result<WasmSimulation, JsValue> {
        let config = SimulationConfig::from_json_str(config_json)
            .map_err(|e| js_error("Invalid config", e))?;
        let clock = StepClock::from_millis(config.step_period_ms, millis(now_ms));
        let simulation = Simulation::new(config).map_err(|e| js_error("Invalid config", e))?;

        Ok(WasmSimulation { simulation, clock })
    }

    /// Step if the timer is due at `now_ms`. Late ticks are dropped.
    /// Returns true if a new generation was produced.
    #[wasm_bindgen]
    pub fn tick(&mut self, now_ms: f64) -> bool {
        self.clock.poll(millis(now_ms)) && self.simulation.step()
    }

    /// Perform one step immediately (still gated by `running`).
    #[wasm_bindgen]
    pub fn step(&mut self) -> bool {
        self.simulation.step()
    }

    #[wasm_bindgen(js_name = setRunning)]
    pub fn set_running(&mut self, running: bool) {
        self.simulation.set_running(running);
    }

    /// Change cell size and gap. Returns the `Reconfigured` outcome.
    #[wasm_bindgen]
    pub fn resize(&mut self, cell_size: f32, gap: f32) -> Result<JsValue, JsValue> {
        let change = self
            .simulation
            .resize(cell_size, gap)
            .map_err(|e| js_error("Invalid geometry", e))?;
        serde_wasm_bindgen::to_value(&change).map_err(|e| js_error("Serialization error", e))
    }

    /// Apply a full JSON configuration from the settings panel.
    #[wasm_bindgen(js_name = setConfig)]
    pub fn set_config(&mut self, config_json: &str, now_ms: f64) -> Result<JsValue, JsValue> {
        let config: SimulationConfig =
            serde_json::from_str(config_json).map_err(|e| js_error("Invalid config JSON", e))?;
        let period = Duration::from_millis(config.step_period_ms);

        let change = self
            .simulation
            .on_config_changed(config)
            .map_err(|e| js_error("Invalid config", e))?;
        if period != self.clock.period() {
            self.clock.set_period(period, millis(now_ms));
        }

        serde_wasm_bindgen::to_value(&change).map_err(|e| js_error("Serialization error", e))
    }

    /// Rebuild with a new JSON `Seed`.
    #[wasm_bindgen]
    pub fn reseed(&mut self, seed_json: &str) -> Result<(), JsValue> {
        let seed: Seed =
            serde_json::from_str(seed_json).map_err(|e| js_error("Invalid seed JSON", e))?;
        self.simulation
            .reseed(seed)
            .map_err(|e| js_error("Invalid seed", e))
    }

    /// Alive flags (1 = alive) in flat `i * side² + j * side + k` order.
    #[wasm_bindgen(js_name = aliveFlags)]
    pub fn alive_flags(&self) -> Uint8Array {
        Uint8Array::from(self.simulation.alive_bytes().as_slice())
    }

    /// Packed `[x, y, z]` world positions in the same order as `aliveFlags`.
    #[wasm_bindgen]
    pub fn positions(&self) -> Float32Array {
        Float32Array::from(self.simulation.positions().as_slice())
    }

    /// Edge length to draw each cell with.
    #[wasm_bindgen(js_name = cellSize)]
    pub fn cell_size(&self) -> f32 {
        self.simulation.config().cell_size
    }

    /// Get current lattice state as a JS object.
    #[wasm_bindgen(js_name = getState)]
    pub fn get_state(&self) -> Result<JsValue, JsValue> {
        let snapshot = StateSnapshot {
            side: self.simulation.side(),
            generation: self.simulation.generation(),
            running: self.simulation.is_running(),
            alive: self.simulation.alive_bytes(),
        };

        serde_wasm_bindgen::to_value(&snapshot).map_err(|e| js_error("Serialization error", e))
    }

    /// Get lattice statistics as a JS object.
    #[wasm_bindgen(js_name = getStats)]
    pub fn get_stats(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.simulation.stats())
            .map_err(|e| js_error("Serialization error", e))
    }

    #[wasm_bindgen(js_name = getSide)]
    pub fn get_side(&self) -> usize {
        self.simulation.side()
    }

    #[wasm_bindgen(js_name = getGeneration)]
    pub fn get_generation(&self) -> u64 {
        self.simulation.generation()
    }

    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.simulation.is_running()
    }
}

/// Serializable snapshot of lattice state.
#[derive(Serialize)]
struct StateSnapshot {
    side: usize,
    generation: u64,
    running: bool,
    alive: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    const CONFIG: &str = r#"{ "running": true, "seed": { "pattern": { "type": "Solid" } } }"#;

    #[wasm_bindgen_test]
    fn test_tick_follows_clock() {
        let mut sim = WasmSimulation::new(CONFIG, 0.0).unwrap();
        assert!(!sim.tick(600.0));
        assert!(sim.tick(1200.0));
        assert_eq!(sim.get_generation(), 1);
        // Ten periods late still yields a single generation.
        assert!(sim.tick(13_500.0));
        assert!(!sim.tick(13_500.0));
        assert_eq!(sim.get_generation(), 2);
    }

    #[wasm_bindgen_test]
    fn test_millis_handles_non_finite() {
        assert_eq!(millis(1500.0), Duration::from_millis(1500));
        assert_eq!(millis(-5.0), Duration::ZERO);
        assert_eq!(millis(f64::NAN), Duration::ZERO);
        assert_eq!(millis(f64::INFINITY), Duration::MAX);
        assert_eq!(millis(f64::MAX), Duration::MAX);
    }

    #[wasm_bindgen_test]
    fn test_tick_with_non_finite_time() {
        let mut sim = WasmSimulation::new(CONFIG, f64::NAN).unwrap();
        assert!(!sim.tick(f64::NAN));
        assert!(sim.tick(f64::INFINITY));
        assert_eq!(sim.get_generation(), 1);

        let mut sim = WasmSimulation::new(CONFIG, f64::INFINITY).unwrap();
        assert!(sim.tick(f64::INFINITY));
    }

    #[wasm_bindgen_test]
    fn test_buffers_match_side() {
        let mut sim = WasmSimulation::new(CONFIG, 0.0).unwrap();
        assert_eq!(sim.alive_flags().length(), 216);
        assert_eq!(sim.positions().length(), 216 * 3);

        sim.resize(30.0, 10.0).unwrap();
        assert_eq!(sim.get_side(), 5);
        assert_eq!(sim.alive_flags().length(), 125);
    }
}
