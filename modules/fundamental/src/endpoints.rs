use actix_web::web;
use superheroes_common::db::Database;

/// Register the heroes, powers, and hero powers endpoints.
pub fn configure(svc: &mut utoipa_actix_web::service_config::ServiceConfig, db: Database) {
    svc.app_data(web::Data::new(db.clone()));

    crate::hero::endpoints::configure(svc, db.clone());
    crate::power::endpoints::configure(svc, db);
    crate::hero_power::endpoints::configure(svc);
}
