//! Statevector simulation engine.

use num_complex::Complex64;
use rand::Rng;
use std::f64::consts::PI;

use qbell_ir::StandardGate;

/// A statevector representing a quantum state.
///
/// Amplitudes are stored little-endian: position `i` of the register is
/// bit `i` of the amplitude index.
#[derive(Debug, Clone, PartialEq)]
pub struct Statevector {
    /// The state amplitudes (2^n complex numbers).
    amplitudes: Vec<Complex64>,
    /// Number of qubits.
    num_qubits: usize,
}

impl Statevector {
    /// Create a new statevector initialized to |0...0⟩.
    pub fn new(num_qubits: usize) -> Self {
        let size = 1 << num_qubits;
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); size];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Self {
            amplitudes,
            num_qubits,
        }
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Get all amplitudes.
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Get a single amplitude.
    pub fn amplitude(&self, index: usize) -> Option<Complex64> {
        self.amplitudes.get(index).copied()
    }

    /// Probability of each basis state.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(Complex64::norm_sqr).collect()
    }

    /// Apply a standard gate to register positions.
    ///
    /// `positions` must hold `gate.num_qubits()` distinct indices; the
    /// circuit layer guarantees this for validated instructions.
    pub fn apply_gate(&mut self, gate: StandardGate, positions: &[usize]) {
        match gate {
            StandardGate::I => {}
            StandardGate::X => self.apply_x(positions[0]),
            StandardGate::Y => self.apply_y(positions[0]),
            StandardGate::Z => self.apply_z(positions[0]),
            StandardGate::H => self.apply_h(positions[0]),
            StandardGate::S => self.apply_phase(positions[0], PI / 2.0),
            StandardGate::Sdg => self.apply_phase(positions[0], -PI / 2.0),
            StandardGate::CX => self.apply_cx(positions[0], positions[1]),
            StandardGate::CZ => self.apply_cz(positions[0], positions[1]),
            StandardGate::Swap => self.apply_swap(positions[0], positions[1]),
        }
    }

    // =========================================================================
    // Single-qubit gate implementations
    // =========================================================================

    fn apply_x(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                let j = i | mask;
                self.amplitudes.swap(i, j);
            }
        }
    }

    fn apply_y(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        let i_val = Complex64::new(0.0, 1.0);
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                let j = i | mask;
                let tmp = self.amplitudes[i];
                self.amplitudes[i] = -i_val * self.amplitudes[j];
                self.amplitudes[j] = i_val * tmp;
            }
        }
    }

    fn apply_z(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if i & mask != 0 {
                *amp = -*amp;
            }
        }
    }

    fn apply_h(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        let sqrt2_inv = 1.0 / 2.0_f64.sqrt();
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = sqrt2_inv * (a + b);
                self.amplitudes[j] = sqrt2_inv * (a - b);
            }
        }
    }

    fn apply_phase(&mut self, qubit: usize, theta: f64) {
        let mask = 1 << qubit;
        let phase = Complex64::from_polar(1.0, theta);
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if i & mask != 0 {
                *amp *= phase;
            }
        }
    }

    // =========================================================================
    // Two-qubit gate implementations
    // =========================================================================

    fn apply_cx(&mut self, control: usize, target: usize) {
        let ctrl_mask = 1 << control;
        let tgt_mask = 1 << target;
        for i in 0..self.amplitudes.len() {
            if (i & ctrl_mask != 0) && (i & tgt_mask == 0) {
                let j = i | tgt_mask;
                self.amplitudes.swap(i, j);
            }
        }
    }

    fn apply_cz(&mut self, control: usize, target: usize) {
        let both = (1 << control) | (1 << target);
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if i & both == both {
                *amp = -*amp;
            }
        }
    }

    fn apply_swap(&mut self, q1: usize, q2: usize) {
        let m1 = 1 << q1;
        let m2 = 1 << q2;
        for i in 0..self.amplitudes.len() {
            if (i & m1 != 0) && (i & m2 == 0) {
                let j = (i & !m1) | m2;
                self.amplitudes.swap(i, j);
            }
        }
    }

    // =========================================================================
    // Measurement
    // =========================================================================

    /// Probability that measuring `qubit` yields 1.
    pub fn probability_one(&self, qubit: usize) -> f64 {
        let mask = 1 << qubit;
        self.amplitudes
            .iter()
            .enumerate()
            .filter(|(i, _)| i & mask != 0)
            .map(|(_, a)| a.norm_sqr())
            .sum()
    }

    /// Measure `qubit` in the computational basis, collapsing the state.
    pub fn measure<R: Rng>(&mut self, qubit: usize, rng: &mut R) -> bool {
        let p1 = self.probability_one(qubit);
        let r: f64 = rng.r#gen();
        let outcome = r < p1;

        let mask = 1 << qubit;
        let kept = if outcome { p1 } else { 1.0 - p1 };
        let norm = kept.sqrt();
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if (i & mask != 0) == outcome {
                if norm > 0.0 {
                    *amp /= norm;
                }
            } else {
                *amp = Complex64::new(0.0, 0.0);
            }
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn approx_eq(a: Complex64, b: Complex64) -> bool {
        (a - b).norm() < 1e-10
    }

    #[test]
    fn test_initial_state() {
        let sv = Statevector::new(2);
        assert_eq!(sv.num_qubits(), 2);
        assert!(approx_eq(sv.amplitudes[0], Complex64::new(1.0, 0.0)));
        for i in 1..4 {
            assert!(approx_eq(sv.amplitudes[i], Complex64::new(0.0, 0.0)));
        }
    }

    #[test]
    fn test_hadamard() {
        let mut sv = Statevector::new(1);
        sv.apply_gate(StandardGate::H, &[0]);

        let sqrt2_inv = 1.0 / 2.0_f64.sqrt();
        assert!(approx_eq(sv.amplitudes[0], Complex64::new(sqrt2_inv, 0.0)));
        assert!(approx_eq(sv.amplitudes[1], Complex64::new(sqrt2_inv, 0.0)));
    }

    #[test]
    fn test_bell_state() {
        let mut sv = Statevector::new(2);
        sv.apply_gate(StandardGate::H, &[0]);
        sv.apply_gate(StandardGate::CX, &[0, 1]);

        let sqrt2_inv = 1.0 / 2.0_f64.sqrt();
        assert!(approx_eq(sv.amplitudes[0], Complex64::new(sqrt2_inv, 0.0)));
        assert!(approx_eq(sv.amplitudes[1], Complex64::new(0.0, 0.0)));
        assert!(approx_eq(sv.amplitudes[2], Complex64::new(0.0, 0.0)));
        assert!(approx_eq(sv.amplitudes[3], Complex64::new(sqrt2_inv, 0.0)));
    }

    #[test]
    fn test_swap() {
        let mut sv = Statevector::new(2);
        sv.apply_gate(StandardGate::X, &[0]);
        sv.apply_gate(StandardGate::Swap, &[0, 1]);
        assert!(approx_eq(sv.amplitudes[2], Complex64::new(1.0, 0.0)));
    }

    #[test]
    fn test_s_sdg_cancel() {
        let mut sv = Statevector::new(1);
        sv.apply_gate(StandardGate::H, &[0]);
        let before = sv.clone();
        sv.apply_gate(StandardGate::S, &[0]);
        sv.apply_gate(StandardGate::Sdg, &[0]);
        for (a, b) in sv.amplitudes().iter().zip(before.amplitudes()) {
            assert!(approx_eq(*a, *b));
        }
    }

    #[test]
    fn test_measure_deterministic() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut sv = Statevector::new(1);
        sv.apply_gate(StandardGate::X, &[0]);

        for _ in 0..100 {
            assert!(sv.measure(0, &mut rng));
        }
    }

    #[test]
    fn test_measure_collapses_bell_pair() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let mut sv = Statevector::new(2);
            sv.apply_gate(StandardGate::H, &[0]);
            sv.apply_gate(StandardGate::CX, &[0, 1]);

            let first = sv.measure(0, &mut rng);
            let second = sv.measure(1, &mut rng);
            assert_eq!(first, second);

            let total: f64 = sv.probabilities().iter().sum();
            assert!((total - 1.0).abs() < 1e-10);
        }
    }
}
