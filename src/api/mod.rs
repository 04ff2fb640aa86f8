pub mod convert;

pub use convert::{__path_handle_convert, __path_handle_export};
pub use convert::{handle_convert, handle_export, ConvertQuery, ErrorResponse};
