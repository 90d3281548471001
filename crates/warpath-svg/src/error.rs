//! Errors for path data and host document handling.

use warpath_core::WarpError;

/// Errors that can occur while reading, normalizing, or warping SVG data.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SvgError {
    /// The path data string could not be tokenized.
    #[error("invalid path data: {0}")]
    PathData(String),

    /// The path uses a command outside the normalized set (`M L Q C Z`).
    #[error("unsupported path command '{0}' (normalize the path first)")]
    UnsupportedCommand(char),

    /// Path data must begin with a move-to.
    #[error("path data must start with a move-to command")]
    MissingMoveTo,

    /// A command's parameters do not divide into whole groups.
    #[error("command '{command}' takes parameters in groups of {group}, got {count}")]
    ParameterCount {
        /// Command letter as written.
        command: char,
        /// Parameters consumed per repetition.
        group: usize,
        /// Parameters supplied.
        count: usize,
    },

    /// The host document could not be parsed.
    #[error("malformed SVG document: {0}")]
    Document(String),

    /// An end tag did not match the open element, or an element was left open.
    #[error("unbalanced tag <{0}>")]
    UnbalancedTag(String),

    /// The warp core rejected an operation.
    #[error(transparent)]
    Warp(#[from] WarpError),
}
