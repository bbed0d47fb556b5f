pub mod common;
pub mod identity;
pub mod ingredient;
pub mod llm;
pub mod preferences;
pub mod recipe;
pub mod scan;
pub mod storage;
