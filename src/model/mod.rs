pub mod submission;
pub mod legacy;
