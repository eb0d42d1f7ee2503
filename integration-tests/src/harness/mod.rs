pub mod server;
pub mod tracing;

pub use server::{MockLogServer, MockResponse};
pub use tracing::{CapturedEvent, init_test_tracing};
