//! JSON extractor and response wrapper.
//!
//! `axum::Json` rejects bodies with a mix of 400, 415 and 422 statuses. The
//! storefront answers every undecodable body with 400, so handlers use
//! [`AppJson`] instead, which routes rejections through [`AppError`].

use axum::{
    extract::FromRequest,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::error::AppError;

/// JSON body extractor and response type.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

impl<T: Serialize> IntoResponse for AppJson<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}
