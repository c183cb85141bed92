pub mod sample_data;

use actix_web::{get, web, HttpResponse, Responder};
use std::process::ExitCode;
use superheroes_common::{
    config::Database,
    db::{self, CreationMode},
};
use superheroes_infrastructure::app::http::{HttpServerBuilder, HttpServerConfig};
use utoipa::openapi::{Info, InfoBuilder};

/// Run the API server
#[derive(clap::Args, Debug)]
pub struct Run {
    /// The database creation mode
    #[arg(long, env, value_enum, default_value_t = CreationMode::Default)]
    pub creation: CreationMode,

    #[command(flatten)]
    pub database: Database,

    #[command(flatten)]
    pub http: HttpServerConfig,
}

impl Run {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        let context = InitData::new(self).await?;
        context.run().await?;
        Ok(ExitCode::SUCCESS)
    }
}

struct InitData {
    db: db::Database,
    http: HttpServerConfig,
}

impl InitData {
    async fn new(run: Run) -> anyhow::Result<Self> {
        let db = db::Database::with_external_config(&run.database, run.creation).await?;

        Ok(InitData { db, http: run.http })
    }

    async fn run(self) -> anyhow::Result<()> {
        let db = self.db;

        let http = HttpServerBuilder::from(self.http)
            .openapi_info(openapi_info())
            .configure(move |svc| configure(svc, db.clone()))
            .post_configure(post_configure);

        http.run().await
    }
}

/// Configure the API endpoints
pub fn configure(svc: &mut utoipa_actix_web::service_config::ServiceConfig, db: db::Database) {
    superheroes_module_fundamental::configure(svc, db);
}

/// Configure the endpoints which are not part of the API
pub fn post_configure(svc: &mut web::ServiceConfig) {
    svc.service(index);
}

pub fn openapi_info() -> Info {
    InfoBuilder::new()
        .title("Superheroes")
        .description(Some("Heroes, their powers, and how strong they are at them"))
        .version(env!("CARGO_PKG_VERSION"))
        .build()
}

#[get("/")]
async fn index() -> impl Responder {
    HttpResponse::Ok()
        .content_type(mime::TEXT_HTML_UTF_8)
        .body("<h1>Superheroes</h1>")
}

#[cfg(test)]
mod test {
    use super::*;
    use actix_web::{
        http::StatusCode,
        test::{call_and_read_body, call_and_read_body_json, call_service, init_service, TestRequest},
        App,
    };
    use serde_json::Value;
    use superheroes_infrastructure::app::http::ApplyOpenApi;
    use superheroes_test_context::SuperheroesContext;
    use test_context::test_context;
    use test_log::test;
    use utoipa_actix_web::AppExt;

    #[test_context(SuperheroesContext)]
    #[test(actix_web::test)]
    async fn index_and_openapi(ctx: &SuperheroesContext) -> Result<(), anyhow::Error> {
        let app = init_service(
            App::new()
                .into_utoipa_app()
                .configure(|svc| configure(svc, ctx.db.clone()))
                .apply_openapi(Some(openapi_info()))
                .configure(post_configure),
        )
        .await;

        let response = call_service(&app, TestRequest::get().uri("/").to_request()).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = call_and_read_body(&app, TestRequest::get().uri("/").to_request()).await;
        assert_eq!(body, "<h1>Superheroes</h1>");

        let openapi: Value =
            call_and_read_body_json(&app, TestRequest::get().uri("/openapi.json").to_request())
                .await;

        assert_eq!(openapi["info"]["title"], "Superheroes");
        for path in ["/heroes", "/heroes/{id}", "/powers", "/powers/{id}", "/hero_powers"] {
            assert!(openapi["paths"].get(path).is_some(), "missing path: {path}");
        }
        assert!(openapi["paths"]["/powers/{id}"].get("patch").is_some());

        Ok(())
    }
}
