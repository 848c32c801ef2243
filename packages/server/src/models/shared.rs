use serde::{Deserialize, Serialize};

use crate::error::AppError;

const DEFAULT_PAGE_SIZE: u64 = 25;
const MAX_PAGE_SIZE: u64 = 100;

/// Pagination query parameters for list endpoints.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// Page number (1-based). Defaults to 1.
    pub page: Option<u64>,
    /// Items per page (1-100). Defaults to 25.
    pub page_size: Option<u64>,
}

impl PageQuery {
    /// Resolved `(page, page_size)`.
    pub fn resolve(&self) -> Result<(u64, u64), AppError> {
        let page = self.page.unwrap_or(1);
        let page_size = self.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
        if page == 0 {
            return Err(AppError::Validation("page must be >= 1".into()));
        }
        if page_size == 0 || page_size > MAX_PAGE_SIZE {
            return Err(AppError::Validation(format!(
                "pageSize must be between 1 and {MAX_PAGE_SIZE}"
            )));
        }
        Ok((page, page_size))
    }
}

/// Pagination metadata included in list responses.
#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Current page number (1-based).
    #[schema(example = 1)]
    pub page: u64,
    #[schema(example = 25)]
    pub page_size: u64,
    /// Total number of matching items across all pages.
    #[schema(example = 47)]
    pub total: u64,
    #[schema(example = 2)]
    pub page_count: u64,
}

impl Pagination {
    pub fn new(page: u64, page_size: u64, total: u64) -> Self {
        Self {
            page,
            page_size,
            total,
            page_count: total.div_ceil(page_size),
        }
    }
}
