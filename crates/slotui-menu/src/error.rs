//! Error taxonomy for menu construction and lifecycle.

use thiserror::Error;

use slotui_core::SurfaceError;

/// Errors surfaced by menu construction and lifecycle operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MenuError {
    /// A character-addressed slot was used without a shape.
    #[error("menu shape is not defined")]
    ShapeNotSet,
    /// The character occurs nowhere in the shape.
    #[error("no slot matching character {0:?} in the menu shape")]
    NoMatchingChar(char),
    /// `fire()` was called on a session that is already open.
    #[error("menu session is already open")]
    AlreadyOpen,
    /// Sessions are one to six rows of nine slots.
    #[error("menu rows must be 1..=6, got {0}")]
    InvalidRows(usize),
    /// A surface write failed while populating the grid.
    #[error(transparent)]
    Surface(#[from] SurfaceError),
}
