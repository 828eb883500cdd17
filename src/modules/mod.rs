pub mod catalogue;
pub mod extractor;
pub mod storage;

pub use catalogue::*;
pub use extractor::*;
pub use storage::*;
