pub mod enums;
pub mod record;
pub mod validate;

pub use enums::*;
pub use record::*;
pub use validate::*;
