//! The offset/limit/sorting pagination aggregate.

pub use querybind_pagination::*;
