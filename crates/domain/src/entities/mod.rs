pub mod pool;
pub mod protocol;
pub mod token;

pub use pool::{Pool, PoolCommon, V3Pool, V4Pool};
pub use protocol::Protocol;
pub use token::{Token, TokenDescriptor, TokenGroup};
