use gazetteer_core::db::create_store;
use gazetteer_core::{
    Continent, ContinentFilter, Country, CountryFilter, Engine, Entity, EntityKind, Outcome,
    Region, RegionFilter, Request, SearchFilters,
};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Creates an empty gazetteer store file and returns an engine that has
/// successfully opened it.
fn open_engine_on_new_store() -> (TempDir, PathBuf, Engine) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gazetteer.db");
    drop(create_store(&path).unwrap());

    let mut engine = Engine::new();
    let outcomes = engine.handle(Request::OpenStore { path: path.clone() });
    assert_eq!(outcomes, vec![Outcome::StoreOpened { path: path.clone() }]);

    (dir, path, engine)
}

fn saved_entity(outcomes: Vec<Outcome>) -> Entity {
    assert_eq!(outcomes.len(), 1);
    match outcomes.into_iter().next().unwrap() {
        Outcome::Saved(entity) => entity,
        other => panic!("expected Saved, got {other:?}"),
    }
}

#[test]
fn quit_emits_end_application() {
    let mut engine = Engine::new();
    assert_eq!(engine.handle(Request::Quit), vec![Outcome::EndApplication]);
}

#[test]
fn close_store_is_defensive_and_emits_store_closed() {
    let (_dir, _path, mut engine) = open_engine_on_new_store();
    assert_eq!(engine.handle(Request::CloseStore), vec![Outcome::StoreClosed]);

    // Closing again without an open store still reports closed.
    assert_eq!(engine.handle(Request::CloseStore), vec![Outcome::StoreClosed]);
}

#[test]
fn open_of_non_gazetteer_file_fails_and_blocks_later_requests() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("not-a-store.txt");
    fs::write(&path, "plain text, definitely not sqlite").unwrap();

    let mut engine = Engine::new();
    let outcomes = engine.handle(Request::OpenStore { path: path.clone() });
    assert_eq!(outcomes.len(), 1);
    assert!(matches!(&outcomes[0], Outcome::StoreOpenFailed { .. }));

    // No store is open, so operations report an error instead of running.
    let outcomes = engine.handle(Request::StartSearch(SearchFilters::Continent(
        ContinentFilter::default(),
    )));
    assert_eq!(outcomes.len(), 1);
    assert!(
        matches!(&outcomes[0], Outcome::Error { message } if message.contains("no store is open"))
    );

    // A successful open recovers the engine.
    let good_path = dir.path().join("gazetteer.db");
    drop(create_store(&good_path).unwrap());
    let outcomes = engine.handle(Request::OpenStore {
        path: good_path.clone(),
    });
    assert_eq!(outcomes, vec![Outcome::StoreOpened { path: good_path }]);

    let outcomes = engine.handle(Request::StartSearch(SearchFilters::Continent(
        ContinentFilter::default(),
    )));
    assert!(outcomes.is_empty());
}

#[test]
fn save_new_continent_on_empty_store_assigns_id_one() {
    let (_dir, _path, mut engine) = open_engine_on_new_store();

    let outcomes = engine.handle(Request::SaveNew(Entity::Continent(Continent::new(
        "AF", "Africa",
    ))));
    assert_eq!(
        saved_entity(outcomes),
        Entity::Continent(Continent {
            id: 1,
            code: "AF".to_string(),
            name: "Africa".to_string(),
        })
    );
}

#[test]
fn save_new_duplicate_code_fails_and_keeps_the_first_row() {
    let (_dir, _path, mut engine) = open_engine_on_new_store();

    engine.handle(Request::SaveNew(Entity::Continent(Continent::new(
        "AF", "Africa",
    ))));
    let outcomes = engine.handle(Request::SaveNew(Entity::Continent(Continent::new(
        "AF", "Afrika",
    ))));
    assert_eq!(outcomes.len(), 1);
    assert!(matches!(
        &outcomes[0],
        Outcome::SaveFailed {
            kind: EntityKind::Continent,
            message,
        } if message.contains("code")
    ));

    let results = engine.handle(Request::StartSearch(SearchFilters::Continent(
        ContinentFilter::default(),
    )));
    assert_eq!(results.len(), 1);
    assert!(matches!(
        &results[0],
        Outcome::SearchResult(Entity::Continent(continent)) if continent.name == "Africa"
    ));
}

#[test]
fn save_new_validation_failure_names_the_field() {
    let (_dir, _path, mut engine) = open_engine_on_new_store();

    let outcomes = engine.handle(Request::SaveNew(Entity::Continent(Continent::new(
        "AF", "  ",
    ))));
    assert_eq!(outcomes.len(), 1);
    assert!(matches!(
        &outcomes[0],
        Outcome::SaveFailed {
            kind: EntityKind::Continent,
            message,
        } if message.contains("name")
    ));
}

#[test]
fn search_emits_one_result_per_match() {
    let (_dir, _path, mut engine) = open_engine_on_new_store();

    for (code, name) in [("JP", "Japan"), ("JX", "Japan"), ("FR", "France")] {
        let outcomes = engine.handle(Request::SaveNew(Entity::Country(Country::new(
            code,
            name,
            "https://en.wikipedia.org/wiki/Japan",
        ))));
        assert!(matches!(outcomes[0], Outcome::Saved(_)));
    }

    let outcomes = engine.handle(Request::StartSearch(SearchFilters::Country(CountryFilter {
        code: None,
        name: Some("Japan".to_string()),
    })));
    assert_eq!(outcomes.len(), 2);

    let mut codes: Vec<String> = outcomes
        .into_iter()
        .map(|outcome| match outcome {
            Outcome::SearchResult(Entity::Country(country)) => country.code,
            other => panic!("expected SearchResult, got {other:?}"),
        })
        .collect();
    codes.sort();
    assert_eq!(codes, vec!["JP".to_string(), "JX".to_string()]);
}

#[test]
fn load_by_id_returns_the_saved_record() {
    let (_dir, _path, mut engine) = open_engine_on_new_store();

    let saved = saved_entity(engine.handle(Request::SaveNew(Entity::Continent(Continent::new(
        "EU", "Europe",
    )))));
    let id = saved.id();

    let outcomes = engine.handle(Request::LoadById {
        kind: EntityKind::Continent,
        id,
    });
    assert_eq!(outcomes, vec![Outcome::Loaded(saved)]);
}

#[test]
fn load_by_id_miss_is_reported_as_error_and_engine_survives() {
    let (_dir, _path, mut engine) = open_engine_on_new_store();

    let outcomes = engine.handle(Request::LoadById {
        kind: EntityKind::Region,
        id: 404,
    });
    assert_eq!(outcomes.len(), 1);
    assert!(matches!(
        &outcomes[0],
        Outcome::Error { message } if message.contains("not found")
    ));

    // The failed request is isolated; the engine still serves the next one.
    let outcomes = engine.handle(Request::SaveNew(Entity::Continent(Continent::new(
        "AF", "Africa",
    ))));
    assert!(matches!(outcomes[0], Outcome::Saved(_)));
}

#[test]
fn save_updates_record_in_place_and_echoes_it() {
    let (_dir, _path, mut engine) = open_engine_on_new_store();

    let saved = saved_entity(engine.handle(Request::SaveNew(Entity::Continent(Continent::new(
        "AF", "Afrca",
    )))));
    let mut continent = match saved {
        Entity::Continent(continent) => continent,
        other => panic!("expected a continent, got {other:?}"),
    };

    continent.name = "Africa".to_string();
    let outcomes = engine.handle(Request::Save(Entity::Continent(continent.clone())));
    assert_eq!(outcomes, vec![Outcome::Saved(Entity::Continent(continent.clone()))]);

    let outcomes = engine.handle(Request::LoadById {
        kind: EntityKind::Continent,
        id: continent.id,
    });
    assert_eq!(outcomes, vec![Outcome::Loaded(Entity::Continent(continent))]);
}

#[test]
fn save_of_unknown_id_fails_without_terminating_the_engine() {
    let (_dir, _path, mut engine) = open_engine_on_new_store();

    let mut ghost = Continent::new("AF", "Africa");
    ghost.id = 99;
    let outcomes = engine.handle(Request::Save(Entity::Continent(ghost)));
    assert_eq!(outcomes.len(), 1);
    assert!(matches!(
        &outcomes[0],
        Outcome::SaveFailed {
            kind: EntityKind::Continent,
            ..
        }
    ));

    assert_eq!(engine.handle(Request::Quit), vec![Outcome::EndApplication]);
}

#[test]
fn save_new_region_learns_its_id_through_the_natural_key() {
    let (_dir, _path, mut engine) = open_engine_on_new_store();

    let continent = saved_entity(engine.handle(Request::SaveNew(Entity::Continent(
        Continent::new("AS", "Asia"),
    ))));
    let mut japan = Country::new("JP", "Japan", "https://en.wikipedia.org/wiki/Japan");
    japan.continent_id = Some(continent.id());
    let country = saved_entity(engine.handle(Request::SaveNew(Entity::Country(japan))));

    // The natural key for a region is code + local_code + name; the saved
    // outcome must carry the storage-assigned id. A pre-existing row with
    // the same local_code and name cannot shadow it because the leading
    // code predicate is unique.
    let candidate = Region::new("JP-13", "13", "Tokyo", continent.id(), country.id());
    let saved = saved_entity(engine.handle(Request::SaveNew(Entity::Region(candidate))));
    match saved {
        Entity::Region(region) => {
            assert!(region.id > 0);
            assert_eq!(region.code, "JP-13");
            assert_eq!(region.continent_id, continent.id());
            assert_eq!(region.country_id, country.id());
        }
        other => panic!("expected a region, got {other:?}"),
    }
}

#[test]
fn save_new_region_with_dangling_parent_fails() {
    let (_dir, _path, mut engine) = open_engine_on_new_store();

    let outcomes = engine.handle(Request::SaveNew(Entity::Region(Region::new(
        "JP-13", "13", "Tokyo", 1, 1,
    ))));
    assert_eq!(outcomes.len(), 1);
    assert!(matches!(
        &outcomes[0],
        Outcome::SaveFailed {
            kind: EntityKind::Region,
            message,
        } if message.contains("does not exist")
    ));

    let results = engine.handle(Request::StartSearch(SearchFilters::Region(
        RegionFilter::default(),
    )));
    assert!(results.is_empty());
}

#[test]
fn opening_a_new_store_replaces_the_previous_one() {
    let (_dir, _path, mut engine) = open_engine_on_new_store();
    engine.handle(Request::SaveNew(Entity::Continent(Continent::new(
        "AF", "Africa",
    ))));

    let other_dir = tempfile::tempdir().unwrap();
    let other_path = other_dir.path().join("other.db");
    drop(create_store(&other_path).unwrap());

    let outcomes = engine.handle(Request::OpenStore {
        path: other_path.clone(),
    });
    assert_eq!(outcomes, vec![Outcome::StoreOpened { path: other_path }]);

    // The replacement store is empty; the old handle is gone.
    let results = engine.handle(Request::StartSearch(SearchFilters::Continent(
        ContinentFilter::default(),
    )));
    assert!(results.is_empty());
}
