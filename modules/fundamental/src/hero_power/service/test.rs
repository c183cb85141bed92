use super::*;
use crate::validation::ValidationError;
use sea_orm::PaginatorTrait;
use superheroes_entity::strength::Strength;
use superheroes_test_context::SuperheroesContext;
use test_context::test_context;
use test_log::test;

fn new_hero_power(strength: &str, hero_id: i32, power_id: i32) -> NewHeroPower {
    NewHeroPower {
        strength: Some(strength.into()),
        hero_id: Some(hero_id),
        power_id: Some(power_id),
    }
}

#[test_context(SuperheroesContext)]
#[test(actix_web::test)]
async fn create(ctx: &SuperheroesContext) -> Result<(), anyhow::Error> {
    let fixtures = ctx.fixtures().await?;
    let service = HeroPowerService::new();

    let hero = &fixtures.heroes[1];
    let power = &fixtures.powers[1];

    let created = service
        .create_hero_power(new_hero_power("Weak", hero.id, power.id), &ctx.db)
        .await?;

    assert_eq!(created.head.strength, Strength::Weak);
    assert_eq!(created.hero, HeroHead::from_entity(hero));
    assert_eq!(created.power, PowerHead::from_entity(power));

    assert_eq!(
        service.fetch_hero_power(created.head.id, &ctx.db).await?,
        Some(created)
    );

    Ok(())
}

#[test_context(SuperheroesContext)]
#[test(actix_web::test)]
async fn create_rejects(ctx: &SuperheroesContext) -> Result<(), anyhow::Error> {
    let fixtures = ctx.fixtures().await?;
    let service = HeroPowerService::new();

    let hero_id = fixtures.heroes[1].id;
    let power_id = fixtures.powers[0].id;

    let cases = [
        (
            new_hero_power("Super", hero_id, power_id),
            ValidationError::UnknownStrength("Super".into()),
        ),
        (
            new_hero_power("strong", hero_id, power_id),
            ValidationError::UnknownStrength("strong".into()),
        ),
        (
            NewHeroPower {
                strength: None,
                ..new_hero_power("Strong", hero_id, power_id)
            },
            ValidationError::Missing("strength"),
        ),
        (
            NewHeroPower {
                hero_id: None,
                ..new_hero_power("Strong", hero_id, power_id)
            },
            ValidationError::Missing("hero_id"),
        ),
        (
            new_hero_power("Strong", 999, power_id),
            ValidationError::UnknownReference("hero", 999),
        ),
        (
            new_hero_power("Strong", hero_id, 999),
            ValidationError::UnknownReference("power", 999),
        ),
    ];

    for (request, expected) in cases {
        match service.create_hero_power(request.clone(), &ctx.db).await {
            Err(Error::Validation(err)) => assert_eq!(err, expected, "request: {request:?}"),
            other => panic!("unexpected result for {request:?}: {other:?}"),
        }
    }

    // nothing got persisted

    assert_eq!(hero_power::Entity::find().count(&ctx.db).await?, 2);

    Ok(())
}

#[test_context(SuperheroesContext)]
#[test(actix_web::test)]
async fn concurrent_creates(ctx: &SuperheroesContext) -> Result<(), anyhow::Error> {
    let fixtures = ctx.fixtures().await?;
    let service = HeroPowerService::new();

    let hero_id = fixtures.heroes[1].id;
    let power_id = fixtures.powers[0].id;

    let results = futures::future::join_all((0..16).map(|_| {
        service.create_hero_power(new_hero_power("Average", hero_id, power_id), &ctx.db)
    }))
    .await;

    for result in results {
        assert_eq!(result?.hero.id, hero_id);
    }
    assert_eq!(service.for_hero(hero_id, &ctx.db).await?.len(), 16);

    Ok(())
}

#[test_context(SuperheroesContext)]
#[test(actix_web::test)]
async fn derived_views(ctx: &SuperheroesContext) -> Result<(), anyhow::Error> {
    let fixtures = ctx.fixtures().await?;
    let service = HeroPowerService::new();

    let for_hero = service.for_hero(fixtures.heroes[0].id, &ctx.db).await?;
    assert_eq!(
        for_hero
            .iter()
            .map(|hp| (hp.head.strength, hp.power.id))
            .collect::<Vec<_>>(),
        vec![
            (Strength::Strong, fixtures.powers[0].id),
            (Strength::Average, fixtures.powers[1].id),
        ]
    );

    assert!(service
        .for_hero(fixtures.heroes[1].id, &ctx.db)
        .await?
        .is_empty());

    let for_power = service.for_power(fixtures.powers[1].id, &ctx.db).await?;
    assert_eq!(
        for_power,
        vec![HeroPowerHead::from_entity(&fixtures.hero_powers[1])]
    );

    Ok(())
}
