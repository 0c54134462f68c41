pub mod batch;
pub mod simulate;
