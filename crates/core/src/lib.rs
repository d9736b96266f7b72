pub mod enums;
pub mod error;
pub mod validate;

// 导出让外部使用
pub use enums::*;
pub use error::*;
