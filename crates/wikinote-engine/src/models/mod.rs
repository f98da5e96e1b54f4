pub mod page;
pub mod store;
pub mod wiki;

pub use page::{NEW_PAGE_CONTENT, Page, PageId, PageUpdate};
pub use store::{StoreError, WikiStore};
pub use wiki::{Wiki, WikiId};
