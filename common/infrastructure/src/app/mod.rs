pub mod http;

use actix_cors::Cors;
use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    middleware::{Compress, Logger},
    web::{FormConfig, JsonConfig, PayloadConfig},
    App, Error,
};
use bytesize::ByteSize;
use superheroes_common::model::BinaryByteSize;

/// Body limits, shared by all app instances of a server.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AppOptions {
    /// Limit for raw request bodies
    pub request_limit: BinaryByteSize,
    /// Limit for JSON and form encoded request bodies
    pub json_limit: BinaryByteSize,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            request_limit: BinaryByteSize(ByteSize::kib(256)),
            json_limit: BinaryByteSize(ByteSize::mib(2)),
        }
    }
}

/// Create an app with the body limits applied and the common middleware in place.
///
/// Middleware runs in reverse order of registration: the access log sees every request first,
/// CORS preflight requests are answered before reaching any service.
pub fn new_app(
    options: &AppOptions,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    let json_limit: usize = options.json_limit.into();

    App::new()
        .app_data(JsonConfig::default().limit(json_limit))
        .app_data(FormConfig::default().limit(json_limit))
        .app_data(PayloadConfig::new(options.request_limit.into()))
        .wrap(Cors::permissive())
        .wrap(Compress::default())
        .wrap(Logger::default())
}
