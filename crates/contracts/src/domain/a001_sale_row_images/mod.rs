//! Sales-document line items with an attached cover image.

pub mod dto;
pub mod load_guard;
pub mod request;
pub mod sort;
pub mod view;

pub use dto::{retain_with_cover_image, AttachedFile, LineItem, ParentDocument, SaleRowsResponse};
pub use load_guard::{LoadGuard, LoadTicket};
pub use request::FetchError;
pub use sort::{next_sort, SortColumn, SortDirection, SortSpec};
pub use view::{derive_view, SaleRowTotals, SaleRowView};
