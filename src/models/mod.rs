pub mod entry;
pub mod summary;
pub mod user;

pub use entry::{EntryKind, LedgerEntry};
pub use summary::{MonthTotals, Period, Summary};
pub use user::{RememberedCredential, User};
