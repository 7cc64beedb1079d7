pub mod score;

pub use score::execute_score;
