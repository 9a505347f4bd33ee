mod cursor;
mod file;

pub use cursor::{ByteOrder, Cursor};
pub use file::load;
