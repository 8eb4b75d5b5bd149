// src/routes.rs
use std::convert::Infallible;
use std::sync::Arc;

use log::info;
use warp::reject::Rejection;
use warp::{Filter, Reply};

use crate::handlers::error::{ApiError, ApiErrorKind};
use crate::handlers::{analysis::get_analysis, rates::get_rates, RangeQuery};
use crate::services::acquirer::RateAcquirer;

// Recovery handling for our custom errors
async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let code;
    let message;

    if err.is_not_found() {
        code = warp::http::StatusCode::NOT_FOUND;
        message = "Not Found".to_string();
    } else if let Some(api_error) = err.find::<ApiError>() {
        code = match api_error.kind {
            ApiErrorKind::BadRequest => warp::http::StatusCode::BAD_REQUEST,
            ApiErrorKind::Internal => warp::http::StatusCode::INTERNAL_SERVER_ERROR,
        };
        message = api_error.message.clone();
    } else if err.find::<warp::reject::InvalidQuery>().is_some() {
        code = warp::http::StatusCode::BAD_REQUEST;
        message = "Invalid query string".to_string();
    } else {
        code = warp::http::StatusCode::INTERNAL_SERVER_ERROR;
        message = "Internal Server Error".to_string();
    }

    Ok(warp::reply::with_status(
        warp::reply::json(&serde_json::json!({
            "error": message,
        })),
        code,
    ))
}

pub fn routes(
    acquirer: Arc<RateAcquirer>,
) -> impl Filter<Extract = impl Reply, Error = Infallible> + Clone {
    info!("Configuring routes...");

    let acquirer_filter = warp::any().map(move || acquirer.clone());

    let rates_route = warp::path!("api" / "v1" / "rates")
        .and(warp::get())
        .and(warp::query::<RangeQuery>())
        .and(acquirer_filter.clone())
        .and_then(get_rates);

    let analysis_route = warp::path!("api" / "v1" / "analysis")
        .and(warp::get())
        .and(warp::query::<RangeQuery>())
        .and(acquirer_filter.clone())
        .and_then(get_analysis);

    info!("All routes configured successfully.");

    rates_route.or(analysis_route).recover(handle_rejection)
}
