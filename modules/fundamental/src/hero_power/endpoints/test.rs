use crate::test::caller;
use actix_web::{http::StatusCode, test::TestRequest};
use sea_orm::{EntityTrait, PaginatorTrait};
use serde_json::{json, Value};
use superheroes_entity::hero_power;
use superheroes_test_context::{call::CallService, SuperheroesContext, FLIGHT};
use test_context::test_context;
use test_log::test;

#[test_context(SuperheroesContext)]
#[test(actix_web::test)]
async fn create_json(ctx: &SuperheroesContext) -> Result<(), anyhow::Error> {
    let app = caller(ctx).await?;
    let fixtures = ctx.fixtures().await?;
    let hero = &fixtures.heroes[1];
    let power = &fixtures.powers[1];

    let request = TestRequest::post()
        .uri("/hero_powers")
        .set_json(json!({"strength": "Strong", "hero_id": hero.id, "power_id": power.id}))
        .to_request();
    let response = app.call_service(request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_web::test::read_body_json(response).await;

    assert!(body["id"].is_i64());
    assert_eq!(body["strength"], json!("Strong"));
    assert_eq!(
        body["hero"],
        json!({"id": hero.id, "name": "Doreen Green", "super_name": "Squirrel Girl"})
    );
    assert_eq!(
        body["power"],
        json!({"id": power.id, "name": "flight", "description": FLIGHT})
    );
    assert!(body["hero"].get("hero_powers").is_none());
    assert!(body["power"].get("hero_powers").is_none());

    // the hero now has the power

    let request = TestRequest::get()
        .uri(&format!("/heroes/{}", hero.id))
        .to_request();
    let response: Value = app.call_and_read_body_json(request).await;
    assert_eq!(response["hero_powers"][0]["id"], body["id"]);
    assert_eq!(response["hero_powers"][0]["power"]["name"], json!("flight"));

    Ok(())
}

#[test_context(SuperheroesContext)]
#[test(actix_web::test)]
async fn create_form(ctx: &SuperheroesContext) -> Result<(), anyhow::Error> {
    let app = caller(ctx).await?;
    let fixtures = ctx.fixtures().await?;
    let hero_id = fixtures.heroes[1].id.to_string();
    let power_id = fixtures.powers[0].id.to_string();

    let request = TestRequest::post()
        .uri("/hero_powers")
        .set_form([
            ("strength", "Weak"),
            ("hero_id", hero_id.as_str()),
            ("power_id", power_id.as_str()),
        ])
        .to_request();
    let response = app.call_service(request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_web::test::read_body_json(response).await;
    assert_eq!(body["strength"], json!("Weak"));
    assert_eq!(body["hero"]["id"], json!(fixtures.heroes[1].id));
    assert_eq!(body["power"]["id"], json!(fixtures.powers[0].id));

    Ok(())
}

#[test_context(SuperheroesContext)]
#[test(actix_web::test)]
async fn create_with_string_ids(ctx: &SuperheroesContext) -> Result<(), anyhow::Error> {
    let app = caller(ctx).await?;
    let fixtures = ctx.fixtures().await?;

    let request = TestRequest::post()
        .uri("/hero_powers")
        .set_json(json!({
            "strength": "Average",
            "hero_id": fixtures.heroes[1].id.to_string(),
            "power_id": fixtures.powers[1].id.to_string(),
        }))
        .to_request();
    let response = app.call_service(request).await;

    assert_eq!(response.status(), StatusCode::OK);

    Ok(())
}

#[test_context(SuperheroesContext)]
#[test(actix_web::test)]
async fn create_rejects(ctx: &SuperheroesContext) -> Result<(), anyhow::Error> {
    let app = caller(ctx).await?;
    let fixtures = ctx.fixtures().await?;
    let hero_id = fixtures.heroes[1].id;
    let power_id = fixtures.powers[1].id;

    for body in [
        json!({"strength": "Super"}),
        json!({"strength": "Super", "hero_id": hero_id, "power_id": power_id}),
        json!({"strength": "strong", "hero_id": hero_id, "power_id": power_id}),
        json!({"hero_id": hero_id, "power_id": power_id}),
        json!({"strength": "Strong", "power_id": power_id}),
        json!({"strength": "Strong", "hero_id": 999, "power_id": power_id}),
        json!({"strength": "Strong", "hero_id": hero_id, "power_id": 999}),
        json!({"strength": "Strong", "hero_id": "one", "power_id": power_id}),
    ] {
        let request = TestRequest::post()
            .uri("/hero_powers")
            .set_json(&body)
            .to_request();
        let response = app.call_service(request).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {body}");
        let response: Value = actix_web::test::read_body_json(response).await;
        assert_eq!(response, json!({"errors": ["validation errors"]}));
    }

    // nothing got persisted

    assert_eq!(hero_power::Entity::find().count(&ctx.db).await?, 2);

    Ok(())
}
