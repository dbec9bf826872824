//! MT5 drop-folder adapters.
//!
//! The drop folder is shared with an external, uncontrolled writer (the
//! MT5 terminal), so every read here tolerates missing files and partial
//! writes, and every write the terminal depends on is atomic.

pub mod drop_folder;
pub mod watch;

pub use drop_folder::DropFolder;
pub use watch::{watch_dir, FsEvent};
