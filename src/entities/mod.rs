pub mod prelude;

pub mod chains;
