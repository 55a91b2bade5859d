//! Presentation of a finished run.
//!
//! - [`report`]: human-readable text printed to stdout
//! - [`json`]: optional machine-readable report written to disk
//!
//! # Output Structure
//!
//! ```text
//! image_dir/
//! ├── article_1_photo.jpg
//! └── article_3_photo.jpg
//!
//! json_output_dir/
//! └── 2025-05-06T203000Z.json
//! ```

pub mod json;
pub mod report;
