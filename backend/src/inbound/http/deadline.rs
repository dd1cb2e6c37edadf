//! Request deadline extractor.
//!
//! Handlers list [`RequestDeadline`] first among their arguments so the
//! budget starts before the body is read.

use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::{Ready, ready};

use crate::domain::{DEFAULT_REQUEST_TIMEOUT, RequestDeadline};
use crate::inbound::http::state::HttpState;

impl FromRequest for RequestDeadline {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let budget = req
            .app_data::<web::Data<HttpState>>()
            .map_or(DEFAULT_REQUEST_TIMEOUT, |state| state.request_timeout);
        ready(Ok(RequestDeadline::after(budget)))
    }
}
