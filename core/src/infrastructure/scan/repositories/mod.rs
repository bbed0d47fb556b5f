pub mod scan_repository;
