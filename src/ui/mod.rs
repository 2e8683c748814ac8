pub mod icons;
pub mod output;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{dangling_id, dim, empty, error, header, info, record_id, section, success, warn};
pub use table::{TableBuilder, record_table};
pub use theme::{Theme, theme};
