use contracts::domain::a001_sale_row_images::request::{
    request_headers, sale_rows_with_images_url, FetchError, API_BASE,
};
use contracts::domain::a001_sale_row_images::{retain_with_cover_image, SaleRowsResponse};
use contracts::system::host::AppContext;
use gloo_net::http::Request;

/// Sale rows with a cover image, relations preloaded, at most `ROW_LIMIT`.
///
/// Rows without a real file are dropped again after decoding. No retry.
pub async fn get_sale_rows_with_images(ctx: &AppContext) -> Result<SaleRowsResponse, FetchError> {
    let url = sale_rows_with_images_url(API_BASE);

    let mut request = Request::get(&url);
    for (name, value) in request_headers(ctx) {
        request = request.header(name, &value);
    }

    let response = request
        .send()
        .await
        .map_err(|e| FetchError::Network(e.to_string()))?;

    if !response.ok() {
        return Err(FetchError::Http {
            status: response.status(),
        });
    }

    let mut data: SaleRowsResponse = response
        .json()
        .await
        .map_err(|e| FetchError::Decode(e.to_string()))?;

    let received = data.data.len();
    data.data = retain_with_cover_image(data.data);
    if data.data.len() != received {
        log::warn!(
            "Dropped {} sale rows without cover image",
            received - data.data.len()
        );
    }

    Ok(data)
}
