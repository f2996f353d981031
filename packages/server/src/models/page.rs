use serde::Serialize;

use crate::campaign::presentation::PageView;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PageMode {
    Live,
    /// Operator preview. Nothing can be submitted from it.
    Preview,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct PageResponse {
    pub mode: PageMode,
    #[serde(flatten)]
    pub page: PageView,
}
