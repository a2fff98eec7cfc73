mod clients;
mod environment;
mod error;
mod traits;
mod utils;

pub use clients::*;
pub use environment::*;
pub use error::*;
pub use traits::*;
pub use utils::*;
