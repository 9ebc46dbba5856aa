//! # Tile Baker
//!
//! Bakes a fixed grid of photographs into one large "tile" image, written as
//! a full-resolution JPEG and a thumbnail, both stamped with the day they were
//! made. A one-shot batch tool: run it, look at the result, fix any photo it
//! flags and run it again.
//!
//! # Architecture: Three Phases
//!
//! ```text
//! 1. Discover   img_in/   →  sorted source list, count checked against the grid
//! 2. Compose    sources   →  in-memory canvas, one cell at a time
//! 3. Finalize   canvas    →  img_out/YYYYMMDD__name.jpg + --SMALL.jpg, then open
//! ```
//!
//! [`bake::bake`] runs all three and reports progress as [`bake::BakeEvent`]s;
//! the library never prints. Everything happens on one thread, and only one
//! source image is decoded at a time.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`bake`] | Pipeline entry point and the `check` dry run |
//! | [`scan`] | Phase 1: list input JPEGs in file-name order, check the count |
//! | [`compose`] | Phase 2: fit, crop and paste every source onto the canvas |
//! | [`naming`] | Date-stamped output file names |
//! | [`launcher`] | Open the result in the platform's default viewer |
//! | [`imaging`] | Geometry, pixel operations, canvas and JPEG I/O |
//! | [`config`] | `tile.toml` loading, merging onto stock defaults, validation |
//! | [`types`] | Shared types: grid shape, positions, per-cell reports |
//! | [`output`] | Console formatting for the CLI |
//!
//! # Design Decisions
//!
//! ## Positional Contract
//!
//! The grid is filled from the input files sorted by file name, left to right
//! and top to bottom. File names are the only way to say which photo goes
//! where, so the sort is done explicitly rather than trusting directory
//! listing order.
//!
//! ## Lenient Fitting
//!
//! Every photo is scaled to the cell height and cropped around its horizontal
//! center. One that ends up narrower than its cell is still pasted, padded
//! with blank pixels, and flagged in its [`types::CellStatus`]. A single bad
//! photo never stops the batch.
//!
//! ## Wrong Count Is Not an Error
//!
//! A folder with the wrong number of photos yields
//! [`bake::BakeOutcome::CountMismatch`] and writes nothing. The binary turns
//! it into exit status 2.
//!
//! ## Tolerant Regions
//!
//! Crops may reach outside the source and pastes may reach outside the
//! canvas. Both intersect rectangles first
//! ([`imaging::calculations::Rect::intersect`]) and copy only the overlap.

pub mod bake;
pub mod compose;
pub mod config;
pub mod imaging;
pub mod launcher;
pub mod naming;
pub mod output;
pub mod scan;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
