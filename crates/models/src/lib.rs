pub mod book;
pub mod db;
pub mod errors;
pub mod note;
pub mod user;
