mod handlers;
mod types;

pub use handlers::{get_latest_stove_data, get_stove_data_range, list_stove_data, post_stove_data};
pub use types::{
    LatestStoveDataResponse, PaginationInfo, StoveDataListQuery, StoveDataListResponse,
    StoveDataRangeQuery, StoveDataResponse, StoveDataSavedResponse, StoveReadingRequest,
};

// Re-export utoipa path structs for OpenAPI documentation
pub use handlers::{
    __path_get_latest_stove_data, __path_get_stove_data_range, __path_list_stove_data,
    __path_post_stove_data,
};
