pub mod aggregate;
pub mod tree;
