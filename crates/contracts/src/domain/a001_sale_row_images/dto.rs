use serde::{Deserialize, Deserializer, Serialize};

/// Explicit `null` decodes as the type's default, like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Byte size sent as integer or float; negative or non-finite values are dropped.
fn size_from_number<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<f64>::deserialize(deserializer)?;
    Ok(value
        .filter(|n| n.is_finite() && *n >= 0.0)
        .map(|n| n.round() as u64))
}

/// Stored file metadata (not the bytes). Upstream name: `AWSFile`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AttachedFile {
    #[serde(rename = "ID", deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(rename = "Name")]
    pub name: Option<String>,
    /// Byte size, `None` when upstream omits it
    #[serde(rename = "Size", deserialize_with = "size_from_number")]
    pub size: Option<u64>,
    #[serde(rename = "ContentType")]
    pub content_type: Option<String>,
    /// Download token, empty means no download link
    #[serde(rename = "Token")]
    pub token: Option<String>,
    #[serde(rename = "Path")]
    pub path: Option<String>,
}

impl AttachedFile {
    pub fn size_or_zero(&self) -> u64 {
        self.size.unwrap_or(0)
    }

    /// Token usable in a download URL, if any.
    pub fn download_token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }
}

/// Sales document a row belongs to. Upstream name: `Sale`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ParentDocument {
    #[serde(rename = "ID", deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(rename = "FriendlyID")]
    pub friendly_id: Option<String>,
    #[serde(rename = "ComputedFriendlyID")]
    pub computed_friendly_id: Option<String>,
    /// ISO 8601 date or datetime
    #[serde(rename = "Date")]
    pub date: Option<String>,
    #[serde(rename = "ContactID", deserialize_with = "null_as_default")]
    pub contact_id: i64,
    #[serde(rename = "ContactName")]
    pub contact_name: Option<String>,
}

impl ParentDocument {
    /// Human document number: the computed one, else the raw friendly id.
    pub fn document_number(&self) -> Option<&str> {
        self.computed_friendly_id
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.friendly_id.as_deref().filter(|s| !s.is_empty()))
    }
}

/// One sales-document detail row. Upstream name: `SaleRow`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LineItem {
    #[serde(rename = "ID", deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(rename = "SaleID", deserialize_with = "null_as_default")]
    pub parent_document_id: i64,
    #[serde(rename = "BookYear", deserialize_with = "null_as_default")]
    pub bookyear: i32,
    #[serde(rename = "Description")]
    pub description: Option<String>,
    #[serde(rename = "Quantity", deserialize_with = "null_as_default")]
    pub quantity: f64,
    #[serde(rename = "UnitPrice", deserialize_with = "null_as_default")]
    pub unit_price: f64,
    #[serde(rename = "ProductID", deserialize_with = "null_as_default")]
    pub product_id: i64,
    #[serde(rename = "ProductSku")]
    pub product_sku: Option<String>,
    #[serde(rename = "CoverImageOverrideFileID", deserialize_with = "null_as_default")]
    pub cover_image_id: i64,
    #[serde(rename = "CoverImageOverrideFile")]
    pub cover_image: Option<AttachedFile>,
    #[serde(rename = "Sale")]
    pub parent_document: Option<ParentDocument>,
}

impl LineItem {
    /// A row belongs to the working set only with a real attached file.
    pub fn has_cover_image(&self) -> bool {
        self.cover_image.as_ref().map(|f| f.id > 0).unwrap_or(false)
    }

    pub fn document_number(&self) -> Option<&str> {
        self.parent_document
            .as_ref()
            .and_then(ParentDocument::document_number)
    }

    /// Document column text, falling back to the numeric parent id.
    pub fn document_label(&self) -> String {
        self.document_number()
            .map(str::to_string)
            .unwrap_or_else(|| self.parent_document_id.to_string())
    }

    pub fn contact_name(&self) -> Option<&str> {
        self.parent_document
            .as_ref()
            .and_then(|d| d.contact_name.as_deref())
            .filter(|s| !s.is_empty())
    }

    pub fn document_date(&self) -> Option<&str> {
        self.parent_document
            .as_ref()
            .and_then(|d| d.date.as_deref())
    }

    pub fn file_name(&self) -> Option<&str> {
        self.cover_image
            .as_ref()
            .and_then(|f| f.name.as_deref())
            .filter(|s| !s.is_empty())
    }

    pub fn file_size(&self) -> u64 {
        self.cover_image
            .as_ref()
            .map(AttachedFile::size_or_zero)
            .unwrap_or(0)
    }

    pub fn download_token(&self) -> Option<&str> {
        self.cover_image
            .as_ref()
            .and_then(AttachedFile::download_token)
    }

    /// Stable key for list rendering.
    pub fn row_key(&self) -> String {
        format!("{}-{}", self.parent_document_id, self.id)
    }
}

/// Paged list envelope returned by the upstream API.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SaleRowsResponse {
    #[serde(default)]
    pub data: Vec<LineItem>,
    #[serde(default)]
    pub count: u64,
}

/// Drops rows without a real attached file, even though the request already
/// filters on `CoverImageOverrideFileID > 0`.
pub fn retain_with_cover_image(rows: Vec<LineItem>) -> Vec<LineItem> {
    rows.into_iter().filter(LineItem::has_cover_image).collect()
}
