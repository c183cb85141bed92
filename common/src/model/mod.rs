mod bytesize;
mod fields;

pub use bytesize::*;
pub use fields::*;
