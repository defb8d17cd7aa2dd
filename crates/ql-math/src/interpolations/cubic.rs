//! Natural cubic spline interpolation (translates the `Spline` derivative
//! approximation with second-derivative-zero boundary conditions of
//! `ql/math/interpolations/cubicinterpolation.hpp`).
//!
//! The node slopes come from the tridiagonal system of a C² spline; once the
//! slopes are known the spline is evaluated as a piecewise cubic Hermite
//! polynomial.  Outside the nodes the first/last polynomial is continued.

use ql_core::{errors::Result, Real};

use super::{check_nodes, locate, Interpolation1D};

// ── Shared helpers ────────────────────────────────────────────────────────────

/// Convert slopes (`ts`) + data (`xs`, `ys`) into polynomial coefficients.
///
/// For each interval `[x_i, x_{i+1}]`:
///
///   `f(x) = y_i + dx*(a_i + dx*(b_i + dx*c_i))`
///
/// where `dx = x - x_i`.
fn compute_coefficients(
    xs: &[Real],
    ys: &[Real],
    ts: &[Real],
) -> (Vec<Real>, Vec<Real>, Vec<Real>) {
    let n = xs.len();
    let mut a = Vec::with_capacity(n - 1);
    let mut b = Vec::with_capacity(n - 1);
    let mut c = Vec::with_capacity(n - 1);

    for i in 0..n - 1 {
        let dx = xs[i + 1] - xs[i];
        let s = (ys[i + 1] - ys[i]) / dx;
        a.push(ts[i]);
        b.push((3.0 * s - ts[i + 1] - 2.0 * ts[i]) / dx);
        c.push((ts[i + 1] + ts[i] - 2.0 * s) / (dx * dx));
    }

    (a, b, c)
}

/// Evaluate `y_i + dx*(a_i + dx*(b_i + dx*c_i))`.
fn poly_eval(xs: &[Real], ys: &[Real], a: &[Real], b: &[Real], c: &[Real], x: Real) -> Real {
    let i = locate(xs, x);
    let dx = x - xs[i];
    ys[i] + dx * (a[i] + dx * (b[i] + dx * c[i]))
}

/// Node slopes of the natural cubic spline through `(xs, ys)`.
///
/// Solves for the second derivatives `m_i` with `m_0 = m_{n-1} = 0` using
/// the Thomas algorithm, then converts them to first derivatives.  Two
/// nodes give the straight line through them.
fn natural_slopes(xs: &[Real], ys: &[Real]) -> Vec<Real> {
    let n = xs.len();
    let dx: Vec<Real> = xs.windows(2).map(|w| w[1] - w[0]).collect();
    let s: Vec<Real> = (0..n - 1).map(|i| (ys[i + 1] - ys[i]) / dx[i]).collect();

    let mut m = vec![0.0; n];
    if n > 2 {
        // interior equations i = 1..n-2:
        // dx[i-1] m[i-1] + 2 (dx[i-1] + dx[i]) m[i] + dx[i] m[i+1] = 6 (s[i] - s[i-1])
        let k = n - 2;
        let mut diag = Vec::with_capacity(k);
        let mut rhs = Vec::with_capacity(k);
        for i in 1..n - 1 {
            diag.push(2.0 * (dx[i - 1] + dx[i]));
            rhs.push(6.0 * (s[i] - s[i - 1]));
        }
        // forward sweep; sub-diagonal of row r is dx[r], super-diagonal dx[r+1]
        for r in 1..k {
            let w = dx[r] / diag[r - 1];
            diag[r] -= w * dx[r];
            rhs[r] -= w * rhs[r - 1];
        }
        m[k] = rhs[k - 1] / diag[k - 1];
        for r in (0..k - 1).rev() {
            m[r + 1] = (rhs[r] - dx[r + 1] * m[r + 2]) / diag[r];
        }
    }

    let mut ts = Vec::with_capacity(n);
    for i in 0..n - 1 {
        ts.push(s[i] - dx[i] * (2.0 * m[i] + m[i + 1]) / 6.0);
    }
    ts.push(s[n - 2] + dx[n - 2] * (m[n - 2] + 2.0 * m[n - 1]) / 6.0);
    ts
}

/// Evaluate the natural spline through `(xs, ys)` at a single point without
/// keeping the coefficients around.  `xs` must hold at least two strictly
/// increasing nodes.
pub(crate) fn natural_spline_value(xs: &[Real], ys: &[Real], x: Real) -> Real {
    let ts = natural_slopes(xs, ys);
    let (a, b, c) = compute_coefficients(xs, ys, &ts);
    poly_eval(xs, ys, &a, &b, &c, x)
}

// ── CubicNaturalSpline ────────────────────────────────────────────────────────

/// Natural cubic spline: C² piecewise cubic with zero second derivative at
/// both ends.
///
/// Corresponds to `QuantLib::CubicNaturalSpline`.
#[derive(Debug, Clone)]
pub struct CubicNaturalSpline {
    xs: Vec<Real>,
    ys: Vec<Real>,
    a: Vec<Real>,
    b: Vec<Real>,
    c: Vec<Real>,
}

impl CubicNaturalSpline {
    /// Build a natural cubic spline through at least 2 strictly increasing
    /// nodes.
    pub fn new(xs: &[Real], ys: &[Real]) -> Result<Self> {
        check_nodes(xs, ys, 2)?;
        let ts = natural_slopes(xs, ys);
        let (a, b, c) = compute_coefficients(xs, ys, &ts);
        Ok(Self {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
            a,
            b,
            c,
        })
    }

    /// First derivative at `x`.
    pub fn derivative(&self, x: Real) -> Real {
        let i = locate(&self.xs, x);
        let dx = x - self.xs[i];
        self.a[i] + dx * (2.0 * self.b[i] + 3.0 * dx * self.c[i])
    }

    /// Second derivative at `x`.
    pub fn second_derivative(&self, x: Real) -> Real {
        let i = locate(&self.xs, x);
        let dx = x - self.xs[i];
        2.0 * self.b[i] + 6.0 * dx * self.c[i]
    }
}

impl Interpolation1D for CubicNaturalSpline {
    fn x_min(&self) -> Real {
        self.xs[0]
    }

    fn x_max(&self) -> Real {
        self.xs[self.xs.len() - 1]
    }

    fn operator(&self, x: Real) -> Real {
        poly_eval(&self.xs, &self.ys, &self.a, &self.b, &self.c, x)
    }
}
