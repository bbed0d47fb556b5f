pub mod preferences_repository;
