use crate::test::caller;
use actix_web::{http::StatusCode, test::TestRequest};
use serde_json::{json, Value};
use superheroes_test_context::{call::CallService, SuperheroesContext, FLIGHT, SUPER_STRENGTH};
use test_context::test_context;
use test_log::test;

#[test_context(SuperheroesContext)]
#[test(actix_web::test)]
async fn list_heroes(ctx: &SuperheroesContext) -> Result<(), anyhow::Error> {
    let app = caller(ctx).await?;
    let fixtures = ctx.fixtures().await?;

    let request = TestRequest::get().uri("/heroes").to_request();
    let response: Value = app.call_and_read_body_json(request).await;

    assert_eq!(
        response,
        json!([
            {
                "id": fixtures.heroes[0].id,
                "name": "Kamala Khan",
                "super_name": "Ms. Marvel",
            },
            {
                "id": fixtures.heroes[1].id,
                "name": "Doreen Green",
                "super_name": "Squirrel Girl",
            },
        ])
    );

    Ok(())
}

#[test_context(SuperheroesContext)]
#[test(actix_web::test)]
async fn list_heroes_empty(ctx: &SuperheroesContext) -> Result<(), anyhow::Error> {
    let app = caller(ctx).await?;

    let request = TestRequest::get().uri("/heroes").to_request();
    let response: Value = app.call_and_read_body_json(request).await;

    assert_eq!(response, json!([]));

    Ok(())
}

#[test_context(SuperheroesContext)]
#[test(actix_web::test)]
async fn get_hero(ctx: &SuperheroesContext) -> Result<(), anyhow::Error> {
    let app = caller(ctx).await?;
    let fixtures = ctx.fixtures().await?;
    let hero = &fixtures.heroes[0];

    let request = TestRequest::get()
        .uri(&format!("/heroes/{}", hero.id))
        .to_request();
    let response: Value = app.call_and_read_body_json(request).await;

    assert_eq!(
        response,
        json!({
            "id": hero.id,
            "name": "Kamala Khan",
            "super_name": "Ms. Marvel",
            "hero_powers": [
                {
                    "id": fixtures.hero_powers[0].id,
                    "strength": "Strong",
                    "hero_id": hero.id,
                    "power_id": fixtures.powers[0].id,
                    "power": {
                        "id": fixtures.powers[0].id,
                        "name": "super strength",
                        "description": SUPER_STRENGTH,
                    },
                },
                {
                    "id": fixtures.hero_powers[1].id,
                    "strength": "Average",
                    "hero_id": hero.id,
                    "power_id": fixtures.powers[1].id,
                    "power": {
                        "id": fixtures.powers[1].id,
                        "name": "flight",
                        "description": FLIGHT,
                    },
                },
            ],
        })
    );

    Ok(())
}

#[test_context(SuperheroesContext)]
#[test(actix_web::test)]
async fn get_hero_never_nests_back(ctx: &SuperheroesContext) -> Result<(), anyhow::Error> {
    let app = caller(ctx).await?;
    let fixtures = ctx.fixtures().await?;

    let request = TestRequest::get()
        .uri(&format!("/heroes/{}", fixtures.heroes[0].id))
        .to_request();
    let response: Value = app.call_and_read_body_json(request).await;

    let hero_powers = response["hero_powers"].as_array().expect("must be an array");
    assert_eq!(hero_powers.len(), 2);
    for hero_power in hero_powers {
        assert!(hero_power.get("hero").is_none());
        assert!(hero_power["power"].get("hero_powers").is_none());
    }

    Ok(())
}

#[test_context(SuperheroesContext)]
#[test(actix_web::test)]
async fn get_hero_not_found(ctx: &SuperheroesContext) -> Result<(), anyhow::Error> {
    let app = caller(ctx).await?;

    let request = TestRequest::get().uri("/heroes/999").to_request();
    let response = app.call_service(request).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = actix_web::test::read_body_json(response).await;
    assert_eq!(body, json!({"error": "Hero not found"}));

    Ok(())
}

#[test_context(SuperheroesContext)]
#[test(actix_web::test)]
async fn select_fields(ctx: &SuperheroesContext) -> Result<(), anyhow::Error> {
    let app = caller(ctx).await?;
    let fixtures = ctx.fixtures().await?;
    let id = fixtures.heroes[0].id;

    // only

    let request = TestRequest::get()
        .uri(&format!("/heroes/{id}?only=id,super_name"))
        .to_request();
    let response: Value = app.call_and_read_body_json(request).await;
    assert_eq!(response, json!({"id": id, "super_name": "Ms. Marvel"}));

    // exclude, through the list of hero powers

    let request = TestRequest::get()
        .uri(&format!("/heroes/{id}?exclude=hero_powers.power,hero_powers.power_id"))
        .to_request();
    let response: Value = app.call_and_read_body_json(request).await;
    assert_eq!(
        response["hero_powers"],
        json!([
            {"id": fixtures.hero_powers[0].id, "strength": "Strong", "hero_id": id},
            {"id": fixtures.hero_powers[1].id, "strength": "Average", "hero_id": id},
        ])
    );

    // applied to each item of a list

    let request = TestRequest::get().uri("/heroes?only=name").to_request();
    let response: Value = app.call_and_read_body_json(request).await;
    assert_eq!(
        response,
        json!([{"name": "Kamala Khan"}, {"name": "Doreen Green"}])
    );

    Ok(())
}

#[test_context(SuperheroesContext)]
#[test(actix_web::test)]
async fn conflicting_selection(ctx: &SuperheroesContext) -> Result<(), anyhow::Error> {
    let app = caller(ctx).await?;

    let request = TestRequest::get()
        .uri("/heroes?only=name&exclude=id")
        .to_request();
    let response = app.call_service(request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    Ok(())
}
