pub mod health;
pub mod verification;

pub use verification::AppState;
