pub mod session;
pub mod store;

pub use session::Session;
pub use store::{SessionSnapshot, SessionStore};
