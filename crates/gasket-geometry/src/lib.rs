//! Geometry for the Sierpinski gasket.
//!
//! Dependency-free: subdivision is tested without a window, a GPU, or any
//! engine code.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`point`] | `Point` and midpoint |
//! | [`triangle`] | `Triangle`, area, containment, corner split |
//! | [`subdivide`] | `subdivide` iterator, `for_each_leaf`, `leaf_count` |
//!
//! # Quick start
//!
//! ```rust
//! use gasket_geometry::{subdivide, Triangle};
//!
//! let leaves: Vec<Triangle> = subdivide(Triangle::ROOT, 5).collect();
//! assert_eq!(leaves.len(), 243);
//! ```

pub mod point;
pub mod subdivide;
pub mod triangle;

pub use point::Point;
pub use subdivide::{for_each_leaf, leaf_count, subdivide, Subdivide};
pub use triangle::Triangle;
