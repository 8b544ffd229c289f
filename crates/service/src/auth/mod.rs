pub mod domain;
pub mod errors;
pub mod memory;
pub mod repository;
pub mod seaorm;
pub mod service;
pub mod token;
