mod http;
mod in_memory;
mod reminder_store;

pub use http::HttpReminderStore;
pub use in_memory::InMemoryReminderStore;
pub use reminder_store::{ReminderStore, StatusUpdate, StoreError};
