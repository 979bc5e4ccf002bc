use std::ops::Mul;

/// Coordinate axis for elementary rotations.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// 4×4 homogeneous transform, column-major.
///
/// Element `(row, col)` lives at index `col * 4 + row`, which is the layout the
/// GPU expects for a `mat4x4<f32>` uniform.
///
/// Operations never mutate in place; each returns a new matrix.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Mat4 {
    m: [f32; 16],
}

impl Mat4 {
    pub const IDENTITY: Mat4 = Mat4 {
        m: [
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0, //
        ],
    };

    #[inline]
    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    /// Builds a matrix from 16 column-major values.
    #[inline]
    pub const fn from_cols_array(m: [f32; 16]) -> Self {
        Self { m }
    }

    #[inline]
    pub const fn to_cols_array(&self) -> [f32; 16] {
        self.m
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.m[col * 4 + row]
    }

    #[inline]
    pub fn col(&self, col: usize) -> [f32; 4] {
        let base = col * 4;
        [self.m[base], self.m[base + 1], self.m[base + 2], self.m[base + 3]]
    }

    /// Returns `a * b`.
    ///
    /// Column `c` of the result is `a` applied to column `c` of `b`, so `b` is
    /// the transform applied first to column vectors.
    pub fn multiply(a: &Mat4, b: &Mat4) -> Mat4 {
        let mut out = [0.0f32; 16];
        for col in 0..4 {
            for row in 0..4 {
                let mut acc = 0.0;
                for k in 0..4 {
                    acc += a.m[k * 4 + row] * b.m[col * 4 + k];
                }
                out[col * 4 + row] = acc;
            }
        }
        Mat4 { m: out }
    }

    /// Right-handed rotation about `axis` by `angle` radians.
    ///
    /// At `angle == 0.0` the result is exactly [`Mat4::IDENTITY`].
    pub fn rotation(axis: Axis, angle: f32) -> Mat4 {
        match axis {
            Axis::X => Self::rotation_x(angle),
            Axis::Y => Self::rotation_y(angle),
            Axis::Z => Self::rotation_z(angle),
        }
    }

    pub fn rotation_x(angle: f32) -> Mat4 {
        let (s, c) = angle.sin_cos();
        let mut m = Self::IDENTITY.m;
        m[5] = c;
        m[6] = s;
        m[9] = -s;
        m[10] = c;
        Mat4 { m }
    }

    pub fn rotation_y(angle: f32) -> Mat4 {
        let (s, c) = angle.sin_cos();
        let mut m = Self::IDENTITY.m;
        m[0] = c;
        m[2] = -s;
        m[8] = s;
        m[10] = c;
        Mat4 { m }
    }

    pub fn rotation_z(angle: f32) -> Mat4 {
        let (s, c) = angle.sin_cos();
        let mut m = Self::IDENTITY.m;
        m[0] = c;
        m[1] = s;
        m[4] = -s;
        m[5] = c;
        Mat4 { m }
    }

    pub fn transpose(&self) -> Mat4 {
        let mut out = [0.0f32; 16];
        for col in 0..4 {
            for row in 0..4 {
                out[row * 4 + col] = self.m[col * 4 + row];
            }
        }
        Mat4 { m: out }
    }

    /// Applies the matrix to a homogeneous column vector.
    pub fn transform(&self, v: [f32; 4]) -> [f32; 4] {
        let mut out = [0.0f32; 4];
        for (row, o) in out.iter_mut().enumerate() {
            *o = (0..4).map(|k| self.get(row, k) * v[k]).sum();
        }
        out
    }

    /// Applies the matrix to a point (`w = 1`) and drops `w`.
    pub fn transform_point(&self, p: [f32; 3]) -> [f32; 3] {
        let [x, y, z, _] = self.transform([p[0], p[1], p[2], 1.0]);
        [x, y, z]
    }

    /// Full 4×4 determinant by cofactor expansion along the first row.
    pub fn determinant(&self) -> f32 {
        let a = |r: usize, c: usize| self.get(r, c);

        // 2×2 minors of the bottom two rows.
        let s0 = a(2, 0) * a(3, 1) - a(2, 1) * a(3, 0);
        let s1 = a(2, 0) * a(3, 2) - a(2, 2) * a(3, 0);
        let s2 = a(2, 0) * a(3, 3) - a(2, 3) * a(3, 0);
        let s3 = a(2, 1) * a(3, 2) - a(2, 2) * a(3, 1);
        let s4 = a(2, 1) * a(3, 3) - a(2, 3) * a(3, 1);
        let s5 = a(2, 2) * a(3, 3) - a(2, 3) * a(3, 2);

        let c0 = a(1, 1) * s5 - a(1, 2) * s4 + a(1, 3) * s3;
        let c1 = a(1, 0) * s5 - a(1, 2) * s2 + a(1, 3) * s1;
        let c2 = a(1, 0) * s4 - a(1, 1) * s2 + a(1, 3) * s0;
        let c3 = a(1, 0) * s3 - a(1, 1) * s1 + a(1, 2) * s0;

        a(0, 0) * c0 - a(0, 1) * c1 + a(0, 2) * c2 - a(0, 3) * c3
    }

    /// Component-wise comparison within `eps`.
    pub fn approx_eq(&self, other: &Mat4, eps: f32) -> bool {
        self.m
            .iter()
            .zip(other.m.iter())
            .all(|(a, b)| (a - b).abs() <= eps)
    }

    /// True when `Mᵀ·M` is the identity within `eps`.
    pub fn is_orthonormal(&self, eps: f32) -> bool {
        Mat4::multiply(&self.transpose(), self).approx_eq(&Mat4::IDENTITY, eps)
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Mat4 {
    type Output = Mat4;

    #[inline]
    fn mul(self, rhs: Mat4) -> Mat4 {
        Mat4::multiply(&self, &rhs)
    }
}

impl Mul<&Mat4> for &Mat4 {
    type Output = Mat4;

    #[inline]
    fn mul(self, rhs: &Mat4) -> Mat4 {
        Mat4::multiply(self, rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-6;
    const AXES: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    fn sample() -> Mat4 {
        Mat4::from_cols_array([
            1.0, 2.0, 3.0, 4.0, //
            5.0, 6.0, 7.0, 8.0, //
            9.0, 10.0, 11.0, 12.0, //
            13.0, 14.0, 15.0, 16.0, //
        ])
    }

    // ── identity ──────────────────────────────────────────────────────────

    #[test]
    fn identity_layout() {
        let m = Mat4::identity().to_cols_array();
        for (i, v) in m.iter().enumerate() {
            let expected = if i % 5 == 0 { 1.0 } else { 0.0 };
            assert_eq!(*v, expected, "index {i}");
        }
    }

    #[test]
    fn identity_is_two_sided_unit() {
        let m = sample();
        assert!(Mat4::multiply(&Mat4::identity(), &m).approx_eq(&m, EPS));
        assert!(Mat4::multiply(&m, &Mat4::identity()).approx_eq(&m, EPS));

        let r = Mat4::rotation_z(0.3) * Mat4::rotation_x(1.1);
        assert!((Mat4::identity() * r).approx_eq(&r, EPS));
        assert!((r * Mat4::identity()).approx_eq(&r, EPS));
    }

    // ── multiply ──────────────────────────────────────────────────────────

    #[test]
    fn multiply_is_column_major() {
        // Translation by (1, 2, 3) lives in column 3.
        let mut t = Mat4::IDENTITY.to_cols_array();
        t[12] = 1.0;
        t[13] = 2.0;
        t[14] = 3.0;
        let t = Mat4::from_cols_array(t);
        assert_eq!(t.col(3), [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(t.get(1, 3), 2.0);

        // Rotate first, then translate.
        let m = t * Mat4::rotation_z(std::f32::consts::FRAC_PI_2);
        let p = m.transform_point([1.0, 0.0, 0.0]);
        assert!((p[0] - 1.0).abs() < EPS);
        assert!((p[1] - 3.0).abs() < EPS);
        assert!((p[2] - 3.0).abs() < EPS);
    }

    #[test]
    fn multiply_known_product() {
        let a = sample();
        let b = a.transpose();
        let p = a * b;
        // (row 0, col 0) = sum over k of a(0,k) * a(0,k) = 1 + 25 + 81 + 169
        assert_eq!(p.get(0, 0), 276.0);
        // (row 1, col 0) = sum over k of a(1,k) * a(0,k)
        assert_eq!(p.get(1, 0), 2.0 + 30.0 + 90.0 + 182.0);
    }

    #[test]
    fn multiply_is_associative() {
        let a = Mat4::rotation_x(0.4);
        let b = Mat4::rotation_y(-1.3);
        let c = Mat4::rotation_z(2.2);
        assert!(((a * b) * c).approx_eq(&(a * (b * c)), EPS));
    }

    #[test]
    fn composition_order_matters() {
        let (t, eps) = (1.7f32, 1e-4);
        let rx = Mat4::rotation_x(t * 0.7);
        let ry = Mat4::rotation_y(t * 0.5);
        let rz = Mat4::rotation_z(t);
        let zyx = (rz * ry) * rx;
        let xyz = (rx * ry) * rz;
        assert!(!zyx.approx_eq(&xyz, eps));
    }

    // ── rotation ──────────────────────────────────────────────────────────

    #[test]
    fn rotation_at_zero_is_identity() {
        for axis in AXES {
            assert_eq!(Mat4::rotation(axis, 0.0), Mat4::identity(), "{axis:?}");
        }
    }

    #[test]
    fn rotation_is_proper() {
        for axis in AXES {
            for i in -8..=8 {
                let angle = i as f32 * 0.77;
                let r = Mat4::rotation(axis, angle);
                assert!(r.is_orthonormal(EPS), "{axis:?} at {angle}");
                assert!((r.determinant() - 1.0).abs() < EPS, "{axis:?} at {angle}");
            }
        }
    }

    #[test]
    fn rotation_preserves_length() {
        let v = [0.3, -0.175, 0.9];
        let len = |p: [f32; 3]| (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt();
        let r = Mat4::rotation_z(1.0) * Mat4::rotation_y(0.5) * Mat4::rotation_x(0.7);
        assert!((len(r.transform_point(v)) - len(v)).abs() < 1e-5);
    }

    #[test]
    fn rotation_is_right_handed() {
        let quarter = std::f32::consts::FRAC_PI_2;

        // X: +Y goes to +Z.
        let p = Mat4::rotation_x(quarter).transform_point([0.0, 1.0, 0.0]);
        assert!(p[2] > 1.0 - EPS && p[1].abs() < EPS);

        // Y: +Z goes to +X.
        let p = Mat4::rotation_y(quarter).transform_point([0.0, 0.0, 1.0]);
        assert!(p[0] > 1.0 - EPS && p[2].abs() < EPS);

        // Z: +X goes to +Y.
        let p = Mat4::rotation_z(quarter).transform_point([1.0, 0.0, 0.0]);
        assert!(p[1] > 1.0 - EPS && p[0].abs() < EPS);
    }

    #[test]
    fn rotation_z_layout() {
        let (s, c) = 0.25f32.sin_cos();
        let m = Mat4::rotation_z(0.25).to_cols_array();
        assert_eq!((m[0], m[1], m[4], m[5]), (c, s, -s, c));
        assert_eq!(m[10], 1.0);
        assert_eq!(m[15], 1.0);
    }

    // ── determinant ───────────────────────────────────────────────────────

    #[test]
    fn determinant_of_singular_and_scaled() {
        assert_eq!(sample().determinant(), 0.0);

        let mut s = Mat4::IDENTITY.to_cols_array();
        s[0] = 2.0;
        s[5] = 3.0;
        s[10] = 4.0;
        assert_eq!(Mat4::from_cols_array(s).determinant(), 24.0);
    }
}
