//! Period file discovery, reading and dataset assembly

mod assembler;
pub mod source;

pub use assembler::{assemble, try_assemble};
pub use source::{DirectorySource, FileSource, MemorySource, TableSource, TextSource};
