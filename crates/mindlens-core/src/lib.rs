pub mod analysis;
pub mod builders;
pub mod chatfmt;
pub mod upstream;
