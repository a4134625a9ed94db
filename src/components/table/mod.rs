mod component;
mod controller;
mod input_row;

pub use component::DocumentTable;
