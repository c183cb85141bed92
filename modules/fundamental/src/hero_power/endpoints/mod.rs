#[cfg(test)]
mod test;

use crate::{
    hero_power::{
        model::{HeroPowerDetails, NewHeroPower},
        service::HeroPowerService,
    },
    payload::Payload,
    Error,
};
use actix_web::{post, web, HttpResponse, Responder};
use superheroes_common::{db::Database, error::ValidationErrors};

/// Expects the [`Database`] to be registered as app data already.
pub fn configure(config: &mut utoipa_actix_web::service_config::ServiceConfig) {
    config
        .app_data(web::Data::new(HeroPowerService::new()))
        .service(create);
}

#[utoipa::path(
    tag = "hero_power",
    operation_id = "createHeroPower",
    request_body(
        content(
            (NewHeroPower = "application/json"),
            (NewHeroPower = "application/x-www-form-urlencoded"),
        ),
    ),
    responses(
        (status = 200, description = "The created hero power", body = HeroPowerDetails),
        (status = 400, description = "The request failed validation", body = ValidationErrors),
    ),
)]
#[post("/hero_powers")]
/// Give a hero a power
pub async fn create(
    service: web::Data<HeroPowerService>,
    db: web::Data<Database>,
    Payload(new): Payload<NewHeroPower>,
) -> Result<impl Responder, Error> {
    let hero_power = service.create_hero_power(new, db.as_ref()).await?;
    Ok(HttpResponse::Ok().json(hero_power))
}
