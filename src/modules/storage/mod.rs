pub mod bibtex;

pub use bibtex::*;
