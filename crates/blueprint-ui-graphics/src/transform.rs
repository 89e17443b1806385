//! 3D affine transforms applied to native views.

/// Row-major 4x4 matrix using the row-vector convention, so
/// `a.concat(&b)` applies `a` first and then `b`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform3D {
    pub m: [[f32; 4]; 4],
}

impl Transform3D {
    pub const IDENTITY: Transform3D = Transform3D {
        m: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    pub fn scale(sx: f32, sy: f32, sz: f32) -> Self {
        let mut transform = Self::IDENTITY;
        transform.m[0][0] = sx;
        transform.m[1][1] = sy;
        transform.m[2][2] = sz;
        transform
    }

    pub fn translation(tx: f32, ty: f32, tz: f32) -> Self {
        let mut transform = Self::IDENTITY;
        transform.m[3][0] = tx;
        transform.m[3][1] = ty;
        transform.m[3][2] = tz;
        transform
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Returns the transform that applies `self` followed by `other`.
    pub fn concat(&self, other: &Transform3D) -> Transform3D {
        let mut m = [[0.0; 4]; 4];
        for (row, out) in m.iter_mut().enumerate() {
            for (column, value) in out.iter_mut().enumerate() {
                *value = (0..4)
                    .map(|k| self.m[row][k] * other.m[k][column])
                    .sum();
            }
        }
        Transform3D { m }
    }

    /// Maps a 2D point through the transform, ignoring perspective.
    pub fn apply_to_point(&self, x: f32, y: f32) -> (f32, f32) {
        let m = &self.m;
        (
            x * m[0][0] + y * m[1][0] + m[3][0],
            x * m[0][1] + y * m[1][1] + m[3][1],
        )
    }
}

impl Default for Transform3D {
    fn default() -> Self {
        Self::IDENTITY
    }
}
