use crate::domain::a001_sale_row_images::api;
use crate::shared::components::table::SortableHeaderCell;
use crate::shared::icons::icon;
use contracts::domain::a001_sale_row_images::request::download_url;
use contracts::domain::a001_sale_row_images::{
    derive_view, next_sort, LineItem, LoadGuard, SaleRowView, SortColumn, SortSpec,
};
use contracts::shared::format::{format_document_date, format_file_size};
use contracts::system::host::AppContext;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::{
    Flex, FlexAlign, FlexGap, FlexJustify, Input, Spinner, Table, TableBody, TableCell,
    TableCellLayout, TableHeader, TableHeaderCell, TableRow,
};

/// Line items with a cover image: search, sort on document/size, download.
///
/// Loads once per distinct context. A response that arrives after a newer
/// load has started is dropped.
#[component]
pub fn SaleRowImagesList(#[prop(into)] app_context: Signal<Option<AppContext>>) -> impl IntoView {
    let rows = RwSignal::new(Vec::<LineItem>::new());
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal(None::<String>);

    let search = RwSignal::new(String::new());
    let sort = RwSignal::new(None::<SortSpec>);
    let guard = StoredValue::new(LoadGuard::new());

    Effect::new(move |_| {
        let Some(ctx) = app_context.get() else {
            return;
        };
        let Some(ticket) = guard.try_update_value(|g| g.begin()) else {
            return;
        };

        set_loading.set(true);
        set_error.set(None);
        log::info!("Loading sale rows with images (bookyear {})", ctx.bookyear);

        spawn_local(async move {
            let result = api::get_sale_rows_with_images(&ctx).await;

            let is_current = guard
                .try_with_value(|g| g.is_current(ticket))
                .unwrap_or(false);
            if !is_current {
                log::warn!("Discarding sale-row response from a superseded context");
                return;
            }

            match result {
                Ok(response) => {
                    log::info!(
                        "Loaded {} sale rows with images (upstream count {})",
                        response.data.len(),
                        response.count
                    );
                    rows.set(response.data);
                }
                Err(e) => {
                    log::error!("Failed to load sale rows: {}", e);
                    set_error.set(Some(e.to_string()));
                }
            }
            set_loading.set(false);
        });
    });

    let view_model = Memo::new(move |_| {
        let term = search.get();
        let spec = sort.get();
        rows.with(|r| derive_view(r, &term, spec))
    });

    let on_sort = Callback::new(move |column: SortColumn| {
        sort.update(|current| *current = next_sort(*current, column));
    });

    view! {
        <div class="sale-row-images">
            <Show
                when=move || !loading.get()
                fallback=|| view! {
                    <div class="sale-row-images__center">
                        <Flex justify=FlexJustify::Center align=FlexAlign::Center gap=FlexGap::Small>
                            <Spinner />
                            "Verkoopdocumenten laden..."
                        </Flex>
                    </div>
                }
            >
                <Show
                    when=move || error.get().is_none()
                    fallback=move || view! {
                        <div class="sale-row-images__center">
                            <div class="sale-row-images__error">
                                {icon("alert-circle")}
                                <p>{move || error.get().unwrap_or_default()}</p>
                            </div>
                        </div>
                    }
                >
                    <div class="sale-row-images__panel sale-row-images__header">
                        <div>
                            <h1 class="sale-row-images__title">"Verkoop Afbeeldingen"</h1>
                            <p class="sale-row-images__summary">{move || view_model.with(summary_line)}</p>
                        </div>
                        <div class="sale-row-images__search">
                            {icon("search")}
                            <Input
                                value=search
                                placeholder="Zoeken op document, klant of bestand..."
                            />
                        </div>
                    </div>

                    <div class="sale-row-images__panel">
                        <Table>
                            <TableHeader>
                                <TableRow>
                                    <SortableHeaderCell
                                        label="Document"
                                        column=SortColumn::Document
                                        current_sort=sort
                                        on_sort=on_sort
                                        min_width=120.0
                                    />
                                    <TableHeaderCell min_width=100.0>"Datum"</TableHeaderCell>
                                    <TableHeaderCell min_width=160.0>"Klant"</TableHeaderCell>
                                    <TableHeaderCell min_width=200.0>"Omschrijving"</TableHeaderCell>
                                    <TableHeaderCell min_width=200.0>"Afbeelding"</TableHeaderCell>
                                    <SortableHeaderCell
                                        label="Grootte"
                                        column=SortColumn::Size
                                        current_sort=sort
                                        on_sort=on_sort
                                        min_width=90.0
                                        align="right"
                                    />
                                    <TableHeaderCell min_width=80.0>"Download"</TableHeaderCell>
                                </TableRow>
                            </TableHeader>
                            <TableBody>
                                {move || {
                                    let rows = view_model.with(|v| v.rows.clone());
                                    if rows.is_empty() {
                                        let message = if search.with(|s| s.is_empty()) {
                                            "Geen detailregels met afbeeldingen gevonden"
                                        } else {
                                            "Geen resultaten gevonden"
                                        };
                                        return view! {
                                            <TableRow>
                                                <TableCell attr:colspan="7" attr:style="padding: 32px; text-align: center;">
                                                    {message}
                                                </TableCell>
                                            </TableRow>
                                        }.into_any();
                                    }
                                    rows.into_iter()
                                        .map(|row| view! { <SaleRowImageRow row=row /> })
                                        .collect_view()
                                        .into_any()
                                }}
                            </TableBody>
                        </Table>
                    </div>

                    <div class="sale-row-images__version">"v1"</div>
                </Show>
            </Show>
        </div>
    }
}

#[component]
fn SaleRowImageRow(row: LineItem) -> impl IntoView {
    let row_key = row.row_key();
    let document = row.document_label();
    let date = format_document_date(row.document_date().unwrap_or(""));
    let contact = row.contact_name().unwrap_or("-").to_string();
    let description = row
        .description
        .clone()
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| "-".to_string());
    let file_name = row.file_name().unwrap_or("-").to_string();
    let size = format_file_size(row.file_size());
    let download = row.download_token().map(download_url);

    view! {
        <TableRow attr:data-row-key=row_key>
            <TableCell>
                <TableCellLayout>
                    <strong>{document}</strong>
                </TableCellLayout>
            </TableCell>
            <TableCell>
                <TableCellLayout>{date}</TableCellLayout>
            </TableCell>
            <TableCell>
                <TableCellLayout>{contact}</TableCellLayout>
            </TableCell>
            <TableCell>
                <TableCellLayout>{description}</TableCellLayout>
            </TableCell>
            <TableCell>
                <TableCellLayout>
                    <span class="sale-row-images__file">
                        {icon("image")}
                        <span>{file_name}</span>
                    </span>
                </TableCellLayout>
            </TableCell>
            <TableCell attr:style="text-align: right;">
                <TableCellLayout>{size}</TableCellLayout>
            </TableCell>
            <TableCell attr:style="text-align: center;">
                {download.map(|href| view! {
                    <a
                        href=href
                        target="_blank"
                        rel="noopener noreferrer"
                        class="sale-row-images__download"
                        title="Download afbeelding"
                    >
                        {icon("download")}
                    </a>
                })}
            </TableCell>
        </TableRow>
    }
}

fn summary_line(view: &SaleRowView) -> String {
    format!(
        "{} documenten • {} afbeeldingen • {} totaal",
        view.totals.unique_sales,
        view.totals.total_files,
        format_file_size(view.totals.total_size)
    )
}
