pub mod config;
pub mod error;
pub mod session;
pub mod store;
pub mod summary;
pub mod zone;

pub use config::AppConfig;
pub use error::AlmgError;
pub use session::{Point, Session};
pub use summary::{DriftDirection, Summary, Transition};
pub use zone::{classify, risk_score, Zone};
