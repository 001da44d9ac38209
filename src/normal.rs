// Copyright 2026 the Morphometry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Unit normals of a sampled tangent field.

use crate::{GeometryError, Vec2};

/// The unit normal for a single tangent: the normalized tangent turned by +90°.
///
/// # Errors
///
/// Returns [`GeometryError::DegenerateTangent`] if the tangent has zero
/// length (coincident control points) or is not finite.
pub fn normal_at(tangent: Vec2) -> Result<Vec2, GeometryError> {
    tangent
        .try_normalize()
        .map(Vec2::turn_90)
        .map_err(|_| GeometryError::DegenerateTangent)
}

/// Unit normals for a sequence of tangent (hodograph) vectors.
///
/// # Errors
///
/// Fails with [`GeometryError::DegenerateTangent`] on the first tangent
/// that has zero length.
pub fn normals_at(tangents: &[Vec2]) -> Result<Vec<Vec2>, GeometryError> {
    tangents.iter().map(|&t| normal_at(t)).collect()
}
