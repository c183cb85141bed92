use crate::app::{new_app, AppOptions};
use actix_web::{
    dev::{ServiceFactory, ServiceRequest},
    web, App, HttpServer,
};
use anyhow::Context;
use std::{
    net::{IpAddr, Ipv6Addr, SocketAddr},
    sync::Arc,
};
use superheroes_common::model::BinaryByteSize;
use utoipa::openapi::Info;
use utoipa_actix_web::{service_config::ServiceConfig, AppExt, UtoipaApp};
use utoipa_rapidoc::RapiDoc;

pub const DEFAULT_PORT: u16 = 5555;

const DEFAULT_BIND_ADDR: IpAddr = IpAddr::V6(Ipv6Addr::LOCALHOST);

#[derive(Clone, Debug, PartialEq, Eq, clap::Args)]
#[command(next_help_heading = "HTTP endpoint")]
#[group(id = "http")]
pub struct HttpServerConfig {
    /// The number of worker threads, zero runs one per core
    #[arg(
        id = "http-server-workers",
        long,
        env = "HTTP_SERVER_WORKERS",
        default_value_t = 0
    )]
    pub workers: usize,

    /// The address to listen on
    #[arg(
        id = "http-server-bind-address",
        long,
        env = "HTTP_SERVER_BIND_ADDR",
        default_value_t = DEFAULT_BIND_ADDR
    )]
    pub bind_addr: IpAddr,

    /// The port to listen on
    #[arg(
        id = "http-server-bind-port",
        short = 'p',
        long,
        env = "HTTP_SERVER_BIND_PORT",
        default_value_t = DEFAULT_PORT
    )]
    pub bind_port: u16,

    /// The overall request limit
    #[arg(
        id = "http-server-request-limit",
        long,
        env = "HTTP_SERVER_REQUEST_LIMIT",
        default_value_t = AppOptions::default().request_limit
    )]
    pub request_limit: BinaryByteSize,

    /// The JSON and form request limit
    #[arg(
        id = "http-server-json-limit",
        long,
        env = "HTTP_SERVER_JSON_LIMIT",
        default_value_t = AppOptions::default().json_limit
    )]
    pub json_limit: BinaryByteSize,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        let options = AppOptions::default();
        Self {
            workers: 0,
            bind_addr: DEFAULT_BIND_ADDR,
            bind_port: DEFAULT_PORT,
            request_limit: options.request_limit,
            json_limit: options.json_limit,
        }
    }
}

impl HttpServerConfig {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.bind_port)
    }

    pub fn app_options(&self) -> AppOptions {
        AppOptions {
            request_limit: self.request_limit,
            json_limit: self.json_limit,
        }
    }
}

type ConfiguratorFn = dyn Fn(&mut ServiceConfig) + Send + Sync;

type PostConfiguratorFn = dyn Fn(&mut web::ServiceConfig) + Send + Sync;

/// Runs the documented API, plus some undocumented routes, on an HTTP server.
pub struct HttpServerBuilder {
    config: HttpServerConfig,
    openapi_info: Option<Info>,
    configurator: Option<Arc<ConfiguratorFn>>,
    post_configurator: Option<Arc<PostConfiguratorFn>>,
}

impl From<HttpServerConfig> for HttpServerBuilder {
    fn from(config: HttpServerConfig) -> Self {
        Self {
            config,
            openapi_info: None,
            configurator: None,
            post_configurator: None,
        }
    }
}

impl HttpServerBuilder {
    pub fn openapi_info(mut self, openapi_info: Info) -> Self {
        self.openapi_info = Some(openapi_info);
        self
    }

    /// Configure the documented API.
    pub fn configure<F>(mut self, configurator: F) -> Self
    where
        F: Fn(&mut ServiceConfig) + Send + Sync + 'static,
    {
        self.configurator = Some(Arc::new(configurator));
        self
    }

    /// Configure services which are not part of the API documentation.
    pub fn post_configure<F>(mut self, post_configurator: F) -> Self
    where
        F: Fn(&mut web::ServiceConfig) + Send + Sync + 'static,
    {
        self.post_configurator = Some(Arc::new(post_configurator));
        self
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let Self {
            config,
            openapi_info,
            configurator,
            post_configurator,
        } = self;

        let options = config.app_options();
        log::info!(
            "Request limit: {}, JSON limit: {}",
            options.request_limit,
            options.json_limit
        );

        let mut http = HttpServer::new(move || {
            new_app(&options)
                .into_utoipa_app()
                .configure(|svc| {
                    if let Some(configurator) = &configurator {
                        configurator(svc);
                    }
                })
                .apply_openapi(openapi_info.clone())
                .configure(|svc| {
                    if let Some(post_configurator) = &post_configurator {
                        post_configurator(svc);
                    }
                })
        });

        if config.workers > 0 {
            log::info!("Using {} worker(s)", config.workers);
            http = http.workers(config.workers);
        }

        let addr = config.socket_addr();
        log::info!("Binding to: {addr}");

        Ok(http.bind(addr).context("bind")?.run().await?)
    }
}

pub trait ApplyOpenApi<T> {
    /// Serve the OpenAPI document of the collected services, and RapiDoc to browse it.
    fn apply_openapi(self, openapi_info: Option<Info>) -> App<T>;
}

impl<T> ApplyOpenApi<T> for UtoipaApp<T>
where
    T: ServiceFactory<ServiceRequest, Config = (), Error = actix_web::Error, InitError = ()>,
{
    fn apply_openapi(self, openapi_info: Option<Info>) -> App<T> {
        let (app, mut openapi) = self.split_for_parts();
        if let Some(info) = openapi_info {
            openapi.info = info;
        }

        app.service(RapiDoc::with_openapi("/openapi.json", openapi).path("/openapi/"))
            .service(web::redirect("/openapi", "/openapi/"))
    }
}
