//! Cross-cutting utility functions shared by the demo frame sources and CLI.
//!
//! Submodules:
//! - [`file_list`] — recursive directory expansion into a flat `Vec<PathBuf>`,
//!   used by [`crate::sources::ppm::PpmFrameSource`] to enumerate frame files.

pub mod file_list;

pub use file_list::create_file_list;
