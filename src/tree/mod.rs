//! In-memory archive tree
//!
//! Directory and file nodes addressed by slash-separated paths relative to
//! the node an operation is invoked on.

pub mod content;
pub mod node;
pub mod path;

pub use content::FileContent;
pub use node::{DirectoryNode, FileNode, TreeEntry};
