pub mod grid;
pub mod panels;
pub mod plot;
pub mod sections;
