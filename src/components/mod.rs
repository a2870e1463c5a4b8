pub mod constellation;
pub mod starfield;
