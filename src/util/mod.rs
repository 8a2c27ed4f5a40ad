pub mod byte_size;
pub mod human;
pub mod report;
