//! ecbviz - Block Boundary Visualizer
//!
//! Shows how a byte sequence falls into fixed-size cipher blocks and how
//! prepending attacker-controlled bytes shifts those boundaries. This is
//! the arithmetic behind ECB byte-at-a-time attacks; no encryption is
//! performed.
//!
//! ## Layers
//!
//! ```text
//! Text → UTF-8 bytes → Inject (optional) → Segment → Render
//! ```
//!
//! - **Segment**: split into blocks, count blocks, compute padding
//! - **Inject**: prepend filler bytes and report the block delta
//! - **Render**: hex pairs, printable ASCII, byte offsets
//!
//! ## Example
//!
//! ```
//! use ecbviz::blocks::{injection_block_delta, padding_needed, segment};
//!
//! let blocks = segment(b"YELLOW SUBMARINE!", 16).unwrap();
//! assert_eq!(blocks.len(), 2);
//! assert_eq!(padding_needed(17, 16).unwrap(), 15);
//! assert_eq!(injection_block_delta(64, 1, 16).unwrap(), 1);
//! ```

pub mod blocks;
pub mod cli;
pub mod config;
pub mod error;
pub mod render;

pub use blocks::{injection_block_delta, padding_needed, segment, Block, InjectionReport};
pub use config::{BlockSize, RenderOptions};
pub use error::{EcbVizError, Result};
