use strum_macros::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum StorageType {
    #[strum(serialize = "SQLITE")]
    Sqlite,
    #[strum(serialize = "MEMORY")]
    Memory,
}
