//! Interactive quiz sessions persisted between invocations

pub mod models;
pub mod session;
pub mod storage;

pub use models::*;
pub use session::QuizSession;
pub use storage::QuizStateStorage;
