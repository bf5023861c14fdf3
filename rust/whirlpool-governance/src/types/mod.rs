// Types - Records, identities and signed instructions

pub mod primitives;
pub mod signature;
pub mod account;
pub mod config;
pub mod pool;
pub mod request;

pub use primitives::*;
pub use signature::*;
pub use account::*;
pub use config::*;
pub use pool::*;
pub use request::*;
