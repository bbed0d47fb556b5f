pub mod recipe_repository;
