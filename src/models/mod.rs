//! Data models for the SUSA import pipeline

pub mod catalog;
pub mod training_record;

pub use catalog::TrainingCatalog;
pub use training_record::TrainingRecord;
