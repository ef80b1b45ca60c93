pub mod authors;
pub mod publication;

pub use authors::*;
pub use publication::*;
