pub mod domain;
pub mod errors;
pub mod repository;
pub mod seaorm;
pub mod service;
