use sea_orm::{DatabaseTransaction, EntityTrait, PaginatorTrait, TransactionTrait};
use superheroes_common::db::Database;
use superheroes_entity::{hero, hero_power, power, strength::Strength};
use superheroes_module_fundamental::{
    hero::{model::NewHero, service::HeroService},
    hero_power::{model::NewHeroPower, service::HeroPowerService},
    power::{model::NewPower, service::PowerService},
};

const HEROES: &[(&str, &str)] = &[
    ("Kamala Khan", "Ms. Marvel"),
    ("Doreen Green", "Squirrel Girl"),
    ("Gwen Stacy", "Spider-Gwen"),
    ("Janet Van Dyne", "The Wasp"),
    ("Wanda Maximoff", "Scarlet Witch"),
    ("Carol Danvers", "Captain Marvel"),
    ("Jean Grey", "Dark Phoenix"),
    ("Ororo Munroe", "Storm"),
    ("Kitty Pryde", "Shadowcat"),
    ("Elektra Natchios", "Elektra"),
];

const POWERS: &[(&str, &str)] = &[
    ("super strength", "gives the wielder super-human strengths"),
    ("flight", "gives the wielder the ability to fly through the skies at supersonic speed"),
    ("super human senses", "allows the wielder to use her senses at a super-human level"),
    ("elasticity", "can stretch the human body to extreme lengths"),
];

const STRENGTHS: &[Strength] = &[Strength::Strong, Strength::Weak, Strength::Average];

/// Fill the database with sample heroes, powers, and hero powers.
///
/// Does nothing if there already are heroes, unless `force` is set. In that case, all existing
/// heroes and powers get deleted first. Either everything gets replaced, or nothing.
///
/// Returns `true` if sample data was added.
pub async fn sample_data(db: Database, force: bool) -> anyhow::Result<bool> {
    let tx = db.begin().await?;
    let loaded = load(&db, &tx, force).await?;
    tx.commit().await?;

    Ok(loaded)
}

async fn load(db: &Database, tx: &DatabaseTransaction, force: bool) -> anyhow::Result<bool> {
    if hero::Entity::find().count(tx).await? > 0 {
        if !force {
            log::info!("Database already contains heroes, skipping sample data");
            return Ok(false);
        }

        let hero_powers = hero_power::Entity::delete_many().exec(tx).await?;
        let heroes = hero::Entity::delete_many().exec(tx).await?;
        let powers = power::Entity::delete_many().exec(tx).await?;

        log::info!(
            "Removing {} existing heroes, {} powers, and {} hero powers",
            heroes.rows_affected,
            powers.rows_affected,
            hero_powers.rows_affected
        );
    }

    let heroes = HeroService::new(db.clone());
    let powers = PowerService::new(db.clone());
    let hero_powers = HeroPowerService::new();

    let mut hero_ids = Vec::with_capacity(HEROES.len());
    for (name, super_name) in HEROES {
        let hero = heroes
            .create_hero(
                NewHero {
                    name: name.to_string(),
                    super_name: super_name.to_string(),
                },
                tx,
            )
            .await?;
        hero_ids.push(hero.id);
    }

    let mut power_ids = Vec::with_capacity(POWERS.len());
    for (name, description) in POWERS {
        let power = powers
            .create_power(
                NewPower {
                    name: name.to_string(),
                    description: description.to_string(),
                },
                tx,
            )
            .await?;
        power_ids.push(power.id);
    }

    // every hero gets one power, cycling through powers and strengths

    for (n, hero_id) in hero_ids.iter().enumerate() {
        hero_powers
            .create_hero_power(
                NewHeroPower {
                    strength: Some(STRENGTHS[n % STRENGTHS.len()].to_string()),
                    hero_id: Some(*hero_id),
                    power_id: Some(power_ids[n % power_ids.len()]),
                },
                tx,
            )
            .await?;
    }

    log::info!(
        "Added {} heroes, {} powers, and {} hero powers",
        hero_ids.len(),
        power_ids.len(),
        hero_ids.len()
    );

    Ok(true)
}
