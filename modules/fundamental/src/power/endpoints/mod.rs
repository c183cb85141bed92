
use crate::{
    payload::Payload,
    power::{
        model::{PowerHead, PowerUpdate},
        service::PowerService,
    },
    Error,
};
use actix_web::{get, patch, web, HttpResponse, Responder};
use superheroes_common::{
    db::Database,
    error::{ErrorInformation, ValidationErrors},
    model::{Fields, FieldsQuery},
};

pub fn configure(config: &mut utoipa_actix_web::service_config::ServiceConfig, db: Database) {
    let service = PowerService::new(db);
    config
        .app_data(web::Data::new(service))
        .service(all)
        .service(get)
        .service(update);
}

#[utoipa::path(
    tag = "power",
    operation_id = "listPowers",
    params(
        FieldsQuery,
    ),
    responses(
        (status = 200, description = "All powers", body = [PowerHead]),
        (status = 400, description = "Conflicting field selection"),
    ),
)]
#[get("/powers")]
/// List powers
pub async fn all(
    service: web::Data<PowerService>,
    db: web::Data<Database>,
    web::Query(fields): web::Query<FieldsQuery>,
) -> Result<impl Responder, Error> {
    let fields = Fields::try_from(fields)?;
    let powers = service.fetch_powers(db.as_ref()).await?;
    Ok(HttpResponse::Ok().json(fields.project(&powers)?))
}

#[utoipa::path(
    tag = "power",
    operation_id = "getPower",
    params(
        ("id", Path, description = "ID of the power"),
        FieldsQuery,
    ),
    responses(
        (status = 200, description = "Matching power", body = PowerHead),
        (status = 400, description = "Conflicting field selection"),
        (status = 404, description = "Matching power not found", body = ErrorInformation),
    ),
)]
#[get("/powers/{id}")]
/// Retrieve a power
pub async fn get(
    service: web::Data<PowerService>,
    db: web::Data<Database>,
    id: web::Path<i32>,
    web::Query(fields): web::Query<FieldsQuery>,
) -> Result<impl Responder, Error> {
    let fields = Fields::try_from(fields)?;

    match service.fetch_power(*id, db.as_ref()).await? {
        Some(power) => Ok(HttpResponse::Ok().json(fields.project(&power)?)),
        None => Err(Error::NotFound("Power")),
    }
}

#[utoipa::path(
    tag = "power",
    operation_id = "updatePower",
    params(
        ("id", Path, description = "ID of the power"),
    ),
    request_body(
        content(
            (PowerUpdate = "application/json"),
            (PowerUpdate = "application/x-www-form-urlencoded"),
        ),
    ),
    responses(
        (status = 200, description = "The updated power", body = PowerHead),
        (status = 400, description = "The update failed validation", body = ValidationErrors),
        (status = 404, description = "Matching power not found", body = ErrorInformation),
    ),
)]
#[patch("/powers/{id}")]
/// Update the name and description of a power
pub async fn update(
    service: web::Data<PowerService>,
    id: web::Path<i32>,
    update: Result<Payload<PowerUpdate>, Error>,
) -> Result<impl Responder, Error> {
    // an unknown power wins over a broken body, so decoding failures are left to validation
    let update = update.map(Payload::into_inner).unwrap_or_else(|err| {
        log::info!("Unable to decode power update: {err}");
        PowerUpdate::default()
    });

    match service.update_power(*id, update).await? {
        Some(power) => Ok(HttpResponse::Ok().json(power)),
        None => Err(Error::NotFound("Power")),
    }
}
