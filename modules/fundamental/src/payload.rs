use crate::{validation::ValidationError, Error};
use actix_web::{
    dev,
    web::{Form, Json},
    Either, FromRequest, HttpRequest,
};
use futures::future::LocalBoxFuture;
use serde::de::DeserializeOwned;

/// A request body, either JSON or form-encoded.
///
/// A body which can't be decoded as either of them is rejected as a validation failure.
#[derive(Debug)]
pub struct Payload<T>(pub T);

impl<T> Payload<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> FromRequest for Payload<T>
where
    T: DeserializeOwned + 'static,
{
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut dev::Payload) -> Self::Future {
        let body = Either::<Json<T>, Form<T>>::from_request(req, payload);

        Box::pin(async move {
            match body.await {
                Ok(Either::Left(Json(value))) | Ok(Either::Right(Form(value))) => {
                    Ok(Payload(value))
                }
                Err(err) => {
                    let err: actix_web::Error = err.into();
                    Err(ValidationError::Malformed(err.to_string()).into())
                }
            }
        })
    }
}
