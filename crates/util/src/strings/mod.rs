mod escape;

pub use escape::{append_quoted, escape};
