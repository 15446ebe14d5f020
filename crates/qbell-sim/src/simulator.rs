//! Shot-based circuit simulation.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, instrument};

use qbell_ir::{Circuit, InstructionKind, MeasurementKey, QubitId};

use crate::error::{SimError, SimResult};
use crate::statevector::Statevector;

/// Widest register whose amplitude indices fit in a `usize`.
const MAX_REGISTER_QUBITS: u32 = usize::BITS - 1;

/// Simulator settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Maximum number of qubits supported. Values above the addressable
    /// register width are clamped to it.
    pub max_qubits: u32,
    /// RNG seed; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            max_qubits: 20,
            seed: None,
        }
    }
}

impl SimulatorConfig {
    /// Set the seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the qubit limit.
    #[must_use]
    pub fn with_max_qubits(mut self, max_qubits: u32) -> Self {
        self.max_qubits = max_qubits;
        self
    }
}

/// Outcome histogram for one measurement key.
///
/// Bitstrings list outcome bits in measurement operand order, so `"10"`
/// for `measure(q0, q1)` means q0 read 1 and q1 read 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts(FxHashMap<String, u64>);

impl Counts {
    /// Record one occurrence of `bitstring`.
    pub fn insert(&mut self, bitstring: String) {
        *self.0.entry(bitstring).or_insert(0) += 1;
    }

    /// Occurrences of `bitstring`.
    pub fn get(&self, bitstring: &str) -> u64 {
        self.0.get(bitstring).copied().unwrap_or(0)
    }

    /// Total number of recorded shots.
    pub fn total(&self) -> u64 {
        self.0.values().sum()
    }

    /// Entries sorted by bitstring.
    pub fn sorted(&self) -> Vec<(&str, u64)> {
        let mut entries: Vec<_> = self.0.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        entries.sort_unstable();
        entries
    }

    /// The most frequent bitstring, ties broken by bitstring order.
    pub fn most_frequent(&self) -> Option<(&str, u64)> {
        self.sorted()
            .into_iter()
            .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(a.0)))
    }

    /// Number of distinct bitstrings.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Measurement records from a simulation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunResult {
    /// Number of repetitions executed.
    pub repetitions: u32,
    records: FxHashMap<MeasurementKey, Vec<Vec<bool>>>,
}

impl RunResult {
    /// Per-shot outcome bits recorded under `key`.
    pub fn records(&self, key: &MeasurementKey) -> SimResult<&[Vec<bool>]> {
        self.records
            .get(key)
            .map(Vec::as_slice)
            .ok_or_else(|| SimError::UnknownKey(key.to_string()))
    }

    /// Outcome histogram for `key`.
    pub fn histogram(&self, key: &MeasurementKey) -> SimResult<Counts> {
        let mut counts = Counts::default();
        for shot in self.records(key)? {
            counts.insert(bits_to_string(shot));
        }
        Ok(counts)
    }

    /// Keys with recorded outcomes, sorted.
    pub fn keys(&self) -> Vec<&MeasurementKey> {
        let mut keys: Vec<_> = self.records.keys().collect();
        keys.sort();
        keys
    }
}

fn bits_to_string(bits: &[bool]) -> String {
    bits.iter().map(|&b| if b { '1' } else { '0' }).collect()
}

/// Local statevector simulator.
///
/// Each repetition starts from |0…0⟩ and runs the whole circuit;
/// measurements sample and collapse the state.
pub struct Simulator {
    config: SimulatorConfig,
    rng: StdRng,
}

impl Simulator {
    /// Create a new simulator with default settings.
    pub fn new() -> Self {
        Self::with_config(SimulatorConfig::default())
    }

    /// Create a simulator from a config.
    pub fn with_config(config: SimulatorConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { config, rng }
    }

    /// Get the active configuration.
    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Run `circuit` `repetitions` times and collect measurement records.
    #[instrument(skip(self, circuit), fields(circuit = circuit.name()))]
    pub fn run(&mut self, circuit: &Circuit, repetitions: u32) -> SimResult<RunResult> {
        if repetitions == 0 {
            return Err(SimError::ZeroRepetitions);
        }
        let start = Instant::now();
        let layout = self.layout(circuit)?;
        debug!(
            "Starting simulation: {} qubits, {} repetitions",
            layout.len(),
            repetitions
        );

        let mut records: FxHashMap<MeasurementKey, Vec<Vec<bool>>> = FxHashMap::default();
        for _ in 0..repetitions {
            self.execute(circuit, &layout, &mut records);
        }

        debug!("Simulation completed in {:?}", start.elapsed());
        Ok(RunResult {
            repetitions,
            records,
        })
    }

    /// Run `circuit` once and return the final state.
    ///
    /// Measurements still sample and collapse.
    pub fn final_state(&mut self, circuit: &Circuit) -> SimResult<Statevector> {
        let layout = self.layout(circuit)?;
        let mut records = FxHashMap::default();
        Ok(self.execute(circuit, &layout, &mut records))
    }

    /// Map qubit handles onto dense register positions in sorted order.
    fn layout(&self, circuit: &Circuit) -> SimResult<FxHashMap<QubitId, usize>> {
        let qubits = circuit.all_qubits();
        let max = self.config.max_qubits.min(MAX_REGISTER_QUBITS);
        if qubits.len() > max as usize {
            return Err(SimError::CircuitTooLarge {
                qubits: qubits.len(),
                max,
            });
        }
        Ok(qubits.into_iter().enumerate().map(|(i, q)| (q, i)).collect())
    }

    fn execute(
        &mut self,
        circuit: &Circuit,
        layout: &FxHashMap<QubitId, usize>,
        records: &mut FxHashMap<MeasurementKey, Vec<Vec<bool>>>,
    ) -> Statevector {
        let mut sv = Statevector::new(layout.len());
        for inst in circuit.all_operations() {
            let positions: Vec<usize> = inst.qubits.iter().map(|q| layout[q]).collect();
            match &inst.kind {
                InstructionKind::Gate(gate) => sv.apply_gate(*gate, &positions),
                InstructionKind::Measure { key } => {
                    let bits: Vec<bool> = positions
                        .iter()
                        .map(|&p| sv.measure(p, &mut self.rng))
                        .collect();
                    records.entry(key.clone()).or_default().push(bits);
                }
                InstructionKind::Barrier => {}
            }
        }
        sv
    }
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new()
    }
}
