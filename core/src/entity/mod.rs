pub mod dietary_preferences;
pub mod ingredients;
pub mod recipes;
pub mod scans;
