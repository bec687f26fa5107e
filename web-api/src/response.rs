use actix_web::{body::BoxBody, http::StatusCode, HttpRequest, HttpResponse, Responder};
use serde::Serialize;

#[derive(Debug)]
pub struct Response<T> {
    pub body: T,
    status: StatusCode,
}

impl<T> Response<T> {
    pub fn new(body: T) -> Self {
        Response {
            body,
            status: StatusCode::OK,
        }
    }

    pub fn created(body: T) -> Self {
        Response {
            body,
            status: StatusCode::CREATED,
        }
    }
}

impl<T> Responder for Response<T>
where
    T: Serialize,
{
    type Body = BoxBody;

    fn respond_to(self, _req: &HttpRequest) -> HttpResponse<Self::Body> {
        HttpResponse::build(self.status).json(self.body)
    }
}
