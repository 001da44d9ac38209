// Copyright 2026 the Morphometry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by the geometry core.

use std::error::Error as StdError;
use std::fmt;

/// A degenerate or invalid geometric configuration.
///
/// All of these are recoverable: the caller is expected to report the
/// problem to the user and keep the session alive. None of the operations
/// in this crate produce `NaN` or infinite measurements; they fail with
/// one of these variants instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum GeometryError {
    /// An operation needed at least one point, but the path was empty.
    EmptyPath,
    /// A tangent vector had zero length, so no normal exists.
    ///
    /// This happens when consecutive control points coincide.
    DegenerateTangent,
    /// A direction or ray vector had zero length.
    DegenerateVector,
    /// The arc length inversion could not bracket a root.
    RootBracket,
    /// A polygon or curve needed more vertices than were supplied.
    TooFewVertices {
        /// The number of vertices that were available.
        found: usize,
    },
    /// A 2×2 linear system had no unique solution.
    ///
    /// This never escapes the crate; intersection code treats it as
    /// "no intersection".
    SingularSystem,
    /// An input coordinate was `NaN` or infinite.
    NonFinitePoint,
    /// A width spine met the image bounds in fewer than two points.
    SpineOutOfBounds,
    /// The measurement is not in a state that accepts this event.
    InvalidState,
    /// A spine index does not refer to a spine in the arena.
    UnknownSpine,
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPath => write!(f, "the path has no points"),
            Self::DegenerateTangent => write!(f, "tangent vector has zero length"),
            Self::DegenerateVector => write!(f, "vector has zero length"),
            Self::RootBracket => write!(f, "unable to bracket the arc length parameter"),
            Self::TooFewVertices { found } => {
                write!(f, "at least three vertices are required, found {found}")
            }
            Self::SingularSystem => write!(f, "linear system is singular"),
            Self::NonFinitePoint => write!(f, "point coordinates must be finite"),
            Self::SpineOutOfBounds => {
                write!(f, "width spine does not cross the image bounds twice")
            }
            Self::InvalidState => write!(f, "the measurement cannot accept this event now"),
            Self::UnknownSpine => write!(f, "no width spine with this index"),
        }
    }
}

impl StdError for GeometryError {}

/// An invalid measurement configuration.
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub enum ConfigError {
    /// A numeric setting is outside its permitted range.
    OutOfRange {
        /// The name of the offending setting.
        field: &'static str,
        /// The value that was rejected.
        value: f64,
    },
    /// The configuration document could not be parsed.
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { field, value } => {
                write!(f, "setting `{field}` has invalid value {value}")
            }
            Self::Parse(msg) => write!(f, "unable to parse configuration: {msg}"),
        }
    }
}

impl StdError for ConfigError {}
