pub mod candidate;
pub mod candidate_set;
pub mod constraints;
pub mod diagnosis;
pub mod error;
pub mod matching;
pub mod ports;
pub mod resolution;
pub mod value_objects;
