pub mod error;
pub mod expand;
pub mod inst;
pub mod label;
pub mod maps;
pub mod parser;
pub mod resolve;
pub mod session;
pub mod util;

pub use error::{Diag, Error, Loc};
pub use maps::SymbolMap;
pub use session::Session;
