pub mod errors;
pub mod routes;
pub mod startup;

pub use startup::{run_auth, run_books, run_notes};
