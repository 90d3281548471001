//! warpath-svg: SVG surface for `warpath-core`.
//!
//! Reads path data and whole SVG documents, rewrites every piece of
//! geometry into uniform curve segments, and writes the warped result
//! back:
//!
//! - [`parse`] / [`encode`] convert between normalized path data and
//!   [`warpath_core::Path`],
//! - [`normalize`] rewrites arbitrary path data (shorthands, arcs) into a
//!   single curve type,
//! - [`shape_path_data`] turns basic shapes into path data,
//! - [`SvgDocument`] holds the host document,
//! - [`Warp`] runs core operations over every path of a document.

mod arc;
pub mod document;
pub mod encode;
pub mod error;
pub mod normalize;
pub mod parse;
pub mod shapes;
pub mod warp;

pub use document::{NodeId, SvgDocument};
pub use encode::encode;
pub use error::SvgError;
pub use normalize::{FLATTEN_PIECES, normalize, normalize_path};
pub use parse::parse;
pub use shapes::{SHAPE_ELEMENTS, geometry_attributes, shape_path_data};
pub use warp::Warp;
