#[cfg(test)]
mod test;

use crate::{
    hero::{
        model::{HeroDetails, HeroHead},
        service::HeroService,
    },
    Error,
};
use actix_web::{get, web, HttpResponse, Responder};
use superheroes_common::{
    db::Database,
    model::{Fields, FieldsQuery},
};

pub fn configure(config: &mut utoipa_actix_web::service_config::ServiceConfig, db: Database) {
    let service = HeroService::new(db);
    config
        .app_data(web::Data::new(service))
        .service(all)
        .service(get);
}

#[utoipa::path(
    tag = "hero",
    operation_id = "listHeroes",
    params(
        FieldsQuery,
    ),
    responses(
        (status = 200, description = "All heroes, without their powers", body = [HeroHead]),
        (status = 400, description = "Conflicting field selection"),
    ),
)]
#[get("/heroes")]
/// List heroes
pub async fn all(
    service: web::Data<HeroService>,
    db: web::Data<Database>,
    web::Query(fields): web::Query<FieldsQuery>,
) -> Result<impl Responder, Error> {
    let fields = Fields::try_from(fields)?;
    let heroes = service.fetch_heroes(db.as_ref()).await?;
    Ok(HttpResponse::Ok().json(fields.project(&heroes)?))
}

#[utoipa::path(
    tag = "hero",
    operation_id = "getHero",
    params(
        ("id", Path, description = "ID of the hero"),
        FieldsQuery,
    ),
    responses(
        (status = 200, description = "Matching hero, including its powers", body = HeroDetails),
        (status = 400, description = "Conflicting field selection"),
        (status = 404, description = "Matching hero not found"),
    ),
)]
#[get("/heroes/{id}")]
/// Retrieve hero details
pub async fn get(
    service: web::Data<HeroService>,
    db: web::Data<Database>,
    id: web::Path<i32>,
    web::Query(fields): web::Query<FieldsQuery>,
) -> Result<impl Responder, Error> {
    let fields = Fields::try_from(fields)?;

    match service.fetch_hero(*id, db.as_ref()).await? {
        Some(hero) => Ok(HttpResponse::Ok().json(fields.project(&hero)?)),
        None => Err(Error::NotFound("Hero")),
    }
}
