//! Sortable table header cell
//!
//! ```ignore
//! <SortableHeaderCell
//!     label="Grootte"
//!     column=SortColumn::Size
//!     current_sort=sort
//!     on_sort=Callback::new(move |column| sort.update(|s| *s = next_sort(*s, column)))
//!     align="right"
//! />
//! ```

use contracts::domain::a001_sale_row_images::sort::{sort_indicator, SortColumn, SortSpec};
use leptos::prelude::*;
use thaw::*;

/// Header cell showing the sort indicator (▲▼⇅) for one sortable column.
/// Clicks are forwarded as the clicked column; the caller owns the cycle.
#[component]
pub fn SortableHeaderCell(
    #[prop(into)]
    label: String,

    column: SortColumn,

    /// Sort currently applied to the table
    #[prop(into)]
    current_sort: Signal<Option<SortSpec>>,

    on_sort: Callback<SortColumn>,

    #[prop(optional, default = 100.0)]
    min_width: f64,

    /// Header alignment (left/right)
    #[prop(optional, default = "left")]
    align: &'static str,
) -> impl IntoView {
    let header_style = if align == "right" {
        "display: flex; cursor: pointer; justify-content: flex-end; user-select: none;"
    } else {
        "display: flex; cursor: pointer; user-select: none;"
    };

    let is_active = move || current_sort.get().map(|s| s.column) == Some(column);

    view! {
        <TableHeaderCell min_width=min_width>
            <div
                class="table__sortable-header"
                style=header_style
                data-sort-column=column.as_str()
                on:click=move |_| on_sort.run(column)
            >
                {label}
                <span class:table__sort-indicator--active=is_active>
                    {move || sort_indicator(current_sort.get(), column)}
                </span>
            </div>
        </TableHeaderCell>
    }
}
