#[derive(Debug, thiserror::Error)]
pub enum PricePivotError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XLSX read error: {0}")]
    Xlsx(#[from] calamine::XlsxError),

    #[error("XLSX write error: {0}")]
    Write(#[from] rust_xlsxwriter::XlsxError),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No valid data found")]
    NoValidData,

    #[error("Mixed numeric and text WIDTH values in sheet {sheet}")]
    MixedDimensions { sheet: String },
}

impl PricePivotError {
    /// True for the intentional early exit taken when no sheet yields data.
    pub fn is_no_data(&self) -> bool {
        matches!(self, PricePivotError::NoValidData)
    }

    /// True when the input itself was rejected (wrong container, bad path).
    pub fn is_input_rejection(&self) -> bool {
        matches!(self, PricePivotError::InvalidInput(_) | PricePivotError::Xlsx(_))
    }
}

pub type Result<T> = std::result::Result<T, PricePivotError>;
