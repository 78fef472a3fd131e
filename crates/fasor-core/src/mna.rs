//! Complex MNA system and pure stamp contributions.

use nalgebra::{DMatrix, DVector};
use num_complex::Complex;

/// A component's additive contribution to the MNA system.
///
/// Stamps are collected as `(row, col, value)` triples and merged into the
/// matrix in one pass, so each component's stamp can be inspected and
/// tested in isolation, and assembly is commutative across components.
#[derive(Debug, Clone, Default)]
pub struct Contribution {
    matrix: Vec<(usize, usize, Complex<f64>)>,
    rhs: Vec<(usize, Complex<f64>)>,
}

impl Contribution {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a single matrix entry.
    pub fn add(&mut self, row: usize, col: usize, value: Complex<f64>) {
        self.matrix.push((row, col, value));
    }

    /// Add a single RHS entry.
    pub fn add_rhs(&mut self, row: usize, value: Complex<f64>) {
        self.rhs.push((row, value));
    }

    /// Two-terminal admittance stamp between node rows `i` and `j`
    /// (`None` for ground):
    ///   A[i,i] += y,  A[j,j] += y,  A[i,j] -= y,  A[j,i] -= y.
    pub fn admittance(&mut self, i: Option<usize>, j: Option<usize>, y: Complex<f64>) {
        if let Some(i) = i {
            self.add(i, i, y);
        }
        if let Some(j) = j {
            self.add(j, j, y);
        }
        if let (Some(i), Some(j)) = (i, j) {
            self.add(i, j, -y);
            self.add(j, i, -y);
        }
    }

    /// Couple a branch-current unknown to its terminal nodes: the ±1
    /// entries in both the KCL columns and the branch-equation row.
    pub fn branch_coupling(&mut self, pos: Option<usize>, neg: Option<usize>, branch_row: usize) {
        let one = Complex::new(1.0, 0.0);
        if let Some(i) = pos {
            self.add(i, branch_row, one);
            self.add(branch_row, i, one);
        }
        if let Some(j) = neg {
            self.add(j, branch_row, -one);
            self.add(branch_row, j, -one);
        }
    }

    /// Matrix triples, for per-component inspection in tests.
    pub fn matrix_entries(&self) -> &[(usize, usize, Complex<f64>)] {
        &self.matrix
    }

    /// RHS triples.
    pub fn rhs_entries(&self) -> &[(usize, Complex<f64>)] {
        &self.rhs
    }
}

/// Complex MNA system: `A·x = z`.
///
/// Rows/columns `0..num_nodes` are node voltages; `num_nodes..size` are
/// branch currents of voltage-defining elements. Built once per analysis
/// and discarded after the solve.
#[derive(Debug, Clone)]
pub struct AcSystem {
    matrix: DMatrix<Complex<f64>>,
    rhs: DVector<Complex<f64>>,
    num_nodes: usize,
}

impl AcSystem {
    /// Create a zeroed system for `num_nodes` node voltages and
    /// `num_branches` branch currents.
    pub fn new(num_nodes: usize, num_branches: usize) -> Self {
        let size = num_nodes + num_branches;
        Self {
            matrix: DMatrix::from_element(size, size, Complex::new(0.0, 0.0)),
            rhs: DVector::from_element(size, Complex::new(0.0, 0.0)),
            num_nodes,
        }
    }

    /// Total system size (N + M).
    pub fn size(&self) -> usize {
        self.matrix.nrows()
    }

    /// Number of node-voltage unknowns.
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Merge a component's contribution additively.
    pub fn apply(&mut self, contribution: &Contribution) {
        for &(row, col, value) in contribution.matrix_entries() {
            self.matrix[(row, col)] += value;
        }
        for &(row, value) in contribution.rhs_entries() {
            self.rhs[row] += value;
        }
    }

    /// Get a reference to the coefficient matrix.
    pub fn matrix(&self) -> &DMatrix<Complex<f64>> {
        &self.matrix
    }

    /// Get a reference to the RHS vector.
    pub fn rhs(&self) -> &DVector<Complex<f64>> {
        &self.rhs
    }
}
