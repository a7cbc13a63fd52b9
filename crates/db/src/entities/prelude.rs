//! Entity re-exports.

pub use super::accounts::Entity as Accounts;
pub use super::journal_entries::Entity as JournalEntries;
pub use super::journal_entry_lines::Entity as JournalEntryLines;
pub use super::roles::Entity as Roles;
pub use super::transactions::Entity as Transactions;
pub use super::user_roles::Entity as UserRoles;
pub use super::users::Entity as Users;
