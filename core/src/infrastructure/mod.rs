pub mod db;
pub mod identity;
pub mod ingredient;
pub mod llm;
pub mod object_storage;
pub mod preferences;
pub mod recipe;
pub mod scan;
