pub mod export;
pub mod fields;
pub mod health;
pub mod minutes;
pub mod usecases;
pub mod wireframes;
