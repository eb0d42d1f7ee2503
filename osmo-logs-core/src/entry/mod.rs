mod id;
mod types;


pub use id::EntryIdGenerator;
pub use types::*;
