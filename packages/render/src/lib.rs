//! Pure rendering core for property overview pages.
//!
//! Everything in this crate is deterministic and free of I/O: the same
//! `(blocks, style, device)` input always produces byte-identical output.
//! The server's public delivery endpoint and the authenticated preview both
//! go through [`render_document`], so there is exactly one place that turns
//! property data into markup.

pub mod blocks;
pub mod escape;
pub mod style;
pub mod types;

pub use blocks::{render_blocks, render_document};
pub use style::render_style_sheet;
pub use types::{
    BlockType, Device, NoticeVariant, PropertyBlock, PropertyBlockTableData, PropertyStyle,
    TableRow, TableVariant, parse_blocks_json,
};
