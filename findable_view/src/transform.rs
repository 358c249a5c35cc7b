// Copyright 2025 the Findable Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Vec2};

use crate::matrix::Transform2x2;
use crate::state::ViewState;

/// Per-frame view transform: scale first, then rotate.
///
/// Build one `ViewTransform` per frame from the current [`ViewState`] and pass
/// every renderable point through it. Points are expressed relative to the
/// nucleus; [`ViewTransform::to_screen`] adds the nucleus back.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
    matrix: Transform2x2,
    inverse: Option<Transform2x2>,
}

impl ViewTransform {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        matrix: Transform2x2::IDENTITY,
        inverse: Some(Transform2x2::IDENTITY),
    };

    /// Builds `Rotation(rotation) × Scaling(scale, scale)` for `state`.
    #[must_use]
    pub fn from_state(state: &ViewState) -> Self {
        Self::from_matrix(
            Transform2x2::rotation(state.rotation)
                * Transform2x2::scaling(state.scale, state.scale),
        )
    }

    /// Wraps an arbitrary matrix.
    #[must_use]
    pub fn from_matrix(matrix: Transform2x2) -> Self {
        Self {
            matrix,
            inverse: matrix.inverse(),
        }
    }

    /// Returns the underlying 2×2 matrix.
    #[must_use]
    pub fn matrix(&self) -> Transform2x2 {
        self.matrix
    }

    /// Applies the matrix to a nucleus-relative vector.
    #[must_use]
    pub fn transform_vector(&self, v: Vec2) -> Vec2 {
        self.matrix.transform_vector(v)
    }

    /// Maps a nucleus-relative vector to screen coordinates.
    #[must_use]
    pub fn to_screen(&self, nucleus: Point, v: Vec2) -> Point {
        nucleus + self.matrix.transform_vector(v)
    }

    /// Maps a screen point back to a nucleus-relative vector.
    ///
    /// Returns `None` when the matrix is singular.
    #[must_use]
    pub fn from_screen(&self, nucleus: Point, screen: Point) -> Option<Vec2> {
        self.inverse.map(|inv| inv.transform_vector(screen - nucleus))
    }

    /// The full screen-space [`Affine`] anchored at `nucleus`.
    ///
    /// Rendering backends can install this once and draw nucleus-relative
    /// geometry directly.
    #[must_use]
    pub fn to_affine(&self, nucleus: Point) -> Affine {
        Affine::translate(nucleus.to_vec2()) * self.matrix.to_affine()
    }
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<&ViewState> for ViewTransform {
    fn from(state: &ViewState) -> Self {
        Self::from_state(state)
    }
}
