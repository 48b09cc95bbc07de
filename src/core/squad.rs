//! Random team and squad generation for newly registered users.

use crate::{
    config::market::{MarketConfig, PlayerConfig},
    entities::Position,
    models::{NewPlayer, NewTeam},
};
use rand::{Rng, seq::IndexedRandom};

const FIRST_NAMES: &[&str] = &[
    "Aaron", "Bruno", "Carlos", "Dario", "Emil", "Felipe", "Gareth", "Hugo", "Ivan", "Jonas",
    "Kenji", "Luca", "Mateo", "Nico", "Oscar", "Pavel", "Quentin", "Rafael", "Stefan",
    "Tomas", "Umar", "Victor", "Wojciech", "Xavi", "Yusuf", "Zlatan",
];

const LAST_NAMES: &[&str] = &[
    "Alvarez", "Becker", "Costa", "Dembele", "Eriksen", "Fernandes", "Gomez", "Hansen",
    "Iniesta", "Jensen", "Kowalski", "Lindqvist", "Moreno", "Novak", "Okafor", "Pereira",
    "Quaresma", "Rossi", "Silva", "Tanaka", "Urban", "Vidal", "Weber", "Yilmaz", "Zielinski",
];

const COUNTRIES: &[&str] = &[
    "Argentina", "Belgium", "Brazil", "Croatia", "Denmark", "England", "France", "Germany",
    "Italy", "Japan", "Mexico", "Netherlands", "Nigeria", "Norway", "Poland", "Portugal",
    "Senegal", "Spain", "Sweden", "Turkey", "Uruguay",
];

const CLUB_PREFIXES: &[&str] = &["FC", "Real", "Sporting", "Athletic", "Dynamo", "Inter", "Racing"];

const CLUB_NAMES: &[&str] = &[
    "Harbor", "Northfield", "Redhill", "Silverton", "Eastgate", "Riverside", "Stonebridge",
    "Westbrook", "Oakridge", "Lakeside",
];

fn pick<'a, R: Rng + ?Sized>(rng: &mut R, pool: &[&'a str]) -> &'a str {
    pool.choose(rng).copied().unwrap_or_default()
}

/// Generates one player for `position` with a random name, country and age.
pub fn random_player<R>(rng: &mut R, position: Position, config: &PlayerConfig) -> NewPlayer
where
    R: Rng + ?Sized,
{
    let age = if config.max_age > config.min_age {
        rng.random_range(config.min_age..config.max_age)
    } else {
        config.min_age
    };

    NewPlayer {
        first_name: pick(rng, FIRST_NAMES).to_string(),
        last_name: pick(rng, LAST_NAMES).to_string(),
        country: pick(rng, COUNTRIES).to_string(),
        age,
        market_value: config.initial_market_value,
        position,
    }
}

/// Generates a team and its full squad, goalkeepers first.
pub fn generate_squad<R>(rng: &mut R, config: &MarketConfig) -> (NewTeam, Vec<NewPlayer>)
where
    R: Rng + ?Sized,
{
    let team = NewTeam {
        name: format!("{} {}", pick(rng, CLUB_PREFIXES), pick(rng, CLUB_NAMES)),
        country: pick(rng, COUNTRIES).to_string(),
        budget: config.team.starting_budget,
    };

    let composition = [
        (Position::Goalkeeper, config.squad.goalkeepers),
        (Position::Defender, config.squad.defenders),
        (Position::Midfielder, config.squad.midfielders),
        (Position::Attacker, config.squad.attackers),
    ];

    let mut players = Vec::with_capacity(config.squad.size());
    for (position, count) in composition {
        for _ in 0..count {
            players.push(random_player(rng, position, &config.player));
        }
    }

    (team, players)
}
