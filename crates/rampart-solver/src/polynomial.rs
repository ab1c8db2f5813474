//! Closed-form root extraction for low-degree polynomials with real coefficients.
//!
//! All solvers return complex roots. Negative discriminants never fail, they
//! produce roots with a non-zero imaginary part that callers filter out.
//! The leading coefficient must be non-zero; every solver normalizes to monic
//! form first.

use num_complex::Complex64;

const THIRD: f64 = 1.0 / 3.0;
const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// Relative size below which `s²` in the quartic factorization counts as zero.
const DEGENERATE_EPS: f64 = 1e-9;

/// Roots of `a·x² + b·x + c = 0`.
///
/// Uses the monic form `x = -½(b/a) ∓ √(¼(b/a)² − c/a)`. When the
/// discriminant is negative the two roots are a complex-conjugate pair.
/// A non-negative discriminant yields roots with an imaginary part of exactly zero.
pub fn solve_quadratic(a: f64, b: f64, c: f64) -> [Complex64; 2] {
    let b = b / a;
    let c = c / a;

    let half = -0.5 * b;
    let delta = half * half - c;
    let sqrt_delta = Complex64::new(delta, 0.0).sqrt();

    [half - sqrt_delta, half + sqrt_delta]
}

/// Roots of the monic quadratic `x² + b·x + c = 0` with complex coefficients.
fn solve_monic_quadratic(b: Complex64, c: Complex64) -> [Complex64; 2] {
    let half = -0.5 * b;
    let sqrt_delta = (half * half - c).sqrt();
    [half - sqrt_delta, half + sqrt_delta]
}

/// Real cube root that stays on the real branch for negative radicands.
fn signed_cbrt(x: f64) -> f64 {
    if x >= 0.0 {
        x.powf(THIRD)
    } else {
        -(-x).powf(THIRD)
    }
}

/// Depressed-cubic terms shared by [`solve_cubic`] and [`solve_cubic_principal_root`].
struct DepressedCubic {
    /// One third of the normalized quadratic coefficient (the depression shift).
    shift: f64,
    /// Normalized constant coefficient, needed for the triple-root case.
    constant: f64,
    f: f64,
    g: f64,
    h: f64,
}

impl DepressedCubic {
    fn new(a: f64, b: f64, c: f64, d: f64) -> Self {
        let b = b / a;
        let c = c / a;
        let d = d / a;

        let shift = b * THIRD;
        let shift2 = shift * shift;

        let f = THIRD * c - shift2;
        let g = shift * (2.0 * shift2 - c) + d;
        let h = 0.25 * g * g + f * f * f;

        Self {
            shift,
            constant: d,
            f,
            g,
            h,
        }
    }

    fn is_triple_root(&self) -> bool {
        self.f == 0.0 && self.g == 0.0 && self.h == 0.0
    }

    /// `(j, k)` of the trigonometric form, valid when `h <= 0`.
    fn trig_terms(&self) -> (f64, f64) {
        let j = (-self.f).sqrt();
        // Rounding can push the ratio a hair outside [-1, 1].
        let ratio = (-0.5 * self.g / (j * j * j)).clamp(-1.0, 1.0);
        (j, ratio.acos())
    }

    /// `(S, U)` of Cardano's formula, valid when `h > 0`.
    fn cardano_terms(&self) -> (f64, f64) {
        let sqrt_h = self.h.sqrt();
        (
            signed_cbrt(-0.5 * self.g + sqrt_h),
            signed_cbrt(-0.5 * self.g - sqrt_h),
        )
    }
}

/// Roots of `a·x³ + b·x² + c·x + d = 0`.
///
/// Three real roots come from Viète's trigonometric form (`h <= 0`), one real
/// root plus a complex-conjugate pair from Cardano's formula (`h > 0`).
pub fn solve_cubic(a: f64, b: f64, c: f64, d: f64) -> [Complex64; 3] {
    let cubic = DepressedCubic::new(a, b, c, d);
    let shift = cubic.shift;

    if cubic.is_triple_root() {
        let r = Complex64::from(-signed_cbrt(cubic.constant));
        return [r, r, r];
    }

    if cubic.h <= 0.0 {
        let (j, k) = cubic.trig_terms();
        let m = (THIRD * k).cos();
        let n = SQRT_3 * (THIRD * k).sin();
        return [
            Complex64::from(2.0 * j * m - shift),
            Complex64::from(-j * (m + n) - shift),
            Complex64::from(-j * (m - n) - shift),
        ];
    }

    let (s, u) = cubic.cardano_terms();
    let sum = s + u;
    let diff = s - u;
    let im = diff * SQRT_3 * 0.5;
    [
        Complex64::from(sum - shift),
        Complex64::new(-0.5 * sum - shift, im),
        Complex64::new(-0.5 * sum - shift, -im),
    ]
}

/// A single real root of `a·x³ + b·x² + c·x + d = 0`.
///
/// Same branches as [`solve_cubic`] but only the first root is produced:
/// the largest of three real roots, or the lone real root.
pub fn solve_cubic_principal_root(a: f64, b: f64, c: f64, d: f64) -> Complex64 {
    let cubic = DepressedCubic::new(a, b, c, d);

    if cubic.is_triple_root() {
        return Complex64::from(-signed_cbrt(cubic.constant));
    }

    if cubic.h <= 0.0 {
        let (j, k) = cubic.trig_terms();
        return Complex64::from(2.0 * j * (THIRD * k).cos() - cubic.shift);
    }

    let (s, u) = cubic.cardano_terms();
    Complex64::from(s + u - cubic.shift)
}

/// Roots of `a·x⁴ + b·x³ + c·x² + d·x + e = 0` by Ferrari's method.
///
/// The quartic is depressed, a real root `z0` of its resolvent cubic is taken
/// from [`solve_cubic_principal_root`], and the depressed quartic factors into
/// `(y² + s·y + z0 + t)(y² − s·y + z0 − t)` with `s² = 2p + 2z0`.
/// When `s` vanishes numerically, `t = −q/s` is replaced by `t = √(z0² + r)`.
pub fn solve_quartic(a: f64, b: f64, c: f64, d: f64, e: f64) -> [Complex64; 4] {
    let b = b / a;
    let c = c / a;
    let d = d / a;
    let e = e / a;

    let shift = 0.25 * b;
    let shift2 = shift * shift;

    let p = 3.0 * shift2 - 0.5 * c;
    let q = b * shift2 - c * shift + 0.5 * d;
    let r = 3.0 * shift2 * shift2 - c * shift2 + d * shift - e;

    let z0 = solve_cubic_principal_root(1.0, p, r, p * r - 0.5 * q * q);

    let s2 = 2.0 * p + 2.0 * z0.re;
    let (s, t) = if s2.abs() <= DEGENERATE_EPS * (p.abs() + z0.re.abs()).max(1.0) {
        (Complex64::new(0.0, 0.0), (z0 * z0 + r).sqrt())
    } else {
        let s = Complex64::from(s2).sqrt();
        (s, -q / s)
    };

    let [r0, r1] = solve_monic_quadratic(s, z0 + t);
    let [r2, r3] = solve_monic_quadratic(-s, z0 - t);

    [r0 - shift, r1 - shift, r2 - shift, r3 - shift]
}
