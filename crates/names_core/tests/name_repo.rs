use names_core::db::open_db_in_memory;
use names_core::{
    Geography, Name, NameRepository, NameService, Popularity, RepoError, SqliteNameRepository,
};
use rusqlite::Connection;
use std::collections::HashSet;

fn name(value: &str, rank_world: i64, usage_world: i64, country: &str, density: &str) -> Name {
    Name::new(
        value,
        Popularity {
            rank_world,
            rank_country: rank_world * 2,
            usage_world,
            usage_country: usage_world / 10,
        },
        Geography {
            origin: "Hebrew".to_string(),
            continent: "Europe".to_string(),
            country: country.to_string(),
            country_density: density.to_string(),
        },
    )
}

fn setup() -> Connection {
    let conn = open_db_in_memory().unwrap();
    SqliteNameRepository::new(&conn).create().unwrap();
    conn
}

fn seed(repo: &SqliteNameRepository<'_>) {
    repo.add(&name("Alice", 5, 1000, "England", "Scotland"))
        .unwrap();
    repo.add(&name("Bob", 50, 10, "USA", "Canada")).unwrap();
    repo.add(&name("Chloé", 20, 400, "France", "Belgium"))
        .unwrap();
    repo.add(&name("Dmitri", 80, 250, "Russia", "Belarus"))
        .unwrap();
    repo.add(&name("Émile", 10, 90, "France", "France")).unwrap();
}

fn values(names: &[Name]) -> HashSet<String> {
    names.iter().map(|name| name.value().to_string()).collect()
}

fn set(items: &[&str]) -> HashSet<String> {
    items.iter().map(|item| item.to_string()).collect()
}

#[test]
fn alice_and_bob_scenario() {
    let conn = setup();
    let repo = SqliteNameRepository::new(&conn);
    repo.add(&name("Alice", 5, 1000, "England", "Scotland"))
        .unwrap();
    repo.add(&name("Bob", 50, 10, "USA", "Canada")).unwrap();

    assert_eq!(repo.count().unwrap(), 2);
    assert_eq!(values(&repo.get_between_rank_world(1, 10).unwrap()), set(&["Bob"]));

    let alice = repo.get_by_name("alice").unwrap();
    assert_eq!(alice.value(), "Alice");
    assert_eq!(alice.rank_world(), 5);
    assert_eq!(alice.usage_world(), 1000);
}

#[test]
fn get_by_name_roundtrips_every_field_in_any_case() {
    let conn = setup();
    let repo = SqliteNameRepository::new(&conn);
    let inserted = name("Dmitri", 80, 250, "Russia", "Belarus");
    repo.add(&inserted).unwrap();

    for query in ["Dmitri", "dmitri", "DMITRI", "dMiTrI"] {
        let loaded = repo.get_by_name(query).unwrap();
        assert_eq!(loaded, inserted);
        assert_eq!(loaded.value(), "Dmitri");
        assert_eq!(loaded.length(), 6);
        assert_eq!(loaded.popularity(), inserted.popularity());
        assert_eq!(loaded.geography(), inserted.geography());
    }
}

#[test]
fn get_by_name_missing_returns_name_not_found() {
    let conn = setup();
    let repo = SqliteNameRepository::new(&conn);
    seed(&repo);

    let err = repo.get_by_name("Zed").unwrap_err();
    assert!(matches!(err, RepoError::NameNotFound(ref value) if value == "Zed"));
}

#[test]
fn count_tracks_inserts_and_deletes() {
    let conn = setup();
    let repo = SqliteNameRepository::new(&conn);
    assert_eq!(repo.count().unwrap(), 0);

    seed(&repo);
    assert_eq!(repo.count().unwrap(), 5);

    repo.delete_by_name("bob").unwrap();
    assert_eq!(repo.count().unwrap(), 4);
}

#[test]
fn exists_follows_add_and_delete_in_any_case() {
    let conn = setup();
    let repo = SqliteNameRepository::new(&conn);

    assert!(!repo.exists_by_name("Alice").unwrap());
    repo.add(&name("Alice", 5, 1000, "England", "Scotland"))
        .unwrap();
    assert!(repo.exists_by_name("Alice").unwrap());
    assert!(repo.exists_by_name("ALICE").unwrap());

    repo.delete_by_name("aLiCe").unwrap();
    assert!(!repo.exists_by_name("Alice").unwrap());
}

#[test]
fn delete_absent_name_is_noop() {
    let conn = setup();
    let repo = SqliteNameRepository::new(&conn);
    seed(&repo);

    repo.delete_by_name("Nobody").unwrap();
    assert_eq!(repo.count().unwrap(), 5);
}

#[test]
fn duplicate_add_returns_duplicate_name() {
    let conn = setup();
    let repo = SqliteNameRepository::new(&conn);
    let alice = name("Alice", 5, 1000, "England", "Scotland");
    repo.add(&alice).unwrap();

    let err = repo.add(&alice).unwrap_err();
    assert!(matches!(err, RepoError::DuplicateName { ref name, .. } if name == "Alice"));
    assert_eq!(repo.count().unwrap(), 1);
}

#[test]
fn names_differing_only_in_case_are_distinct_rows() {
    // UNIQUE on `name` uses the default BINARY collation.
    let conn = setup();
    let repo = SqliteNameRepository::new(&conn);
    repo.add(&name("Alice", 5, 1000, "England", "Scotland"))
        .unwrap();
    repo.add(&name("alice", 6, 900, "England", "Scotland"))
        .unwrap();
    assert_eq!(repo.count().unwrap(), 2);

    let found = repo.get_by_name("ALICE").unwrap();
    assert!(found.value().eq_ignore_ascii_case("alice"));

    repo.delete_by_name("alice").unwrap();
    assert_eq!(repo.count().unwrap(), 0);
}

#[test]
fn get_by_country_is_case_insensitive_and_exact() {
    let conn = setup();
    let repo = SqliteNameRepository::new(&conn);
    seed(&repo);

    let france = repo.get_by_country("france").unwrap();
    assert_eq!(france.len(), 2);
    assert_eq!(values(&france), set(&["Chloé", "Émile"]));

    assert_eq!(values(&repo.get_by_country("USA").unwrap()), set(&["Bob"]));
    assert!(repo.get_by_country("Fran").unwrap().is_empty());
    assert!(repo.get_by_country("Narnia").unwrap().is_empty());
}

#[test]
fn get_by_country_density_filters_density_column() {
    let conn = setup();
    let repo = SqliteNameRepository::new(&conn);
    seed(&repo);

    assert_eq!(
        values(&repo.get_by_country_density("FRANCE").unwrap()),
        set(&["Émile"])
    );
    assert_eq!(
        values(&repo.get_by_country_density("scotland").unwrap()),
        set(&["Alice"])
    );
    assert!(repo.get_by_country_density("England").unwrap().is_empty());
}

#[test]
fn get_all_returns_every_row_with_derived_length() {
    let conn = setup();
    let repo = SqliteNameRepository::new(&conn);
    seed(&repo);

    let all = repo.get_all().unwrap();
    assert_eq!(
        values(&all),
        set(&["Alice", "Bob", "Chloé", "Dmitri", "Émile"])
    );
    for name in &all {
        assert_eq!(name.length(), name.value().chars().count());
    }
}

#[test]
fn stored_length_column_is_not_trusted_on_read() {
    let conn = setup();
    let repo = SqliteNameRepository::new(&conn);
    repo.add(&name("Chloé", 20, 400, "France", "Belgium"))
        .unwrap();

    let stored: i64 = conn
        .query_row("SELECT length FROM names WHERE name = 'Chloé';", [], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(stored, 5);

    conn.execute("UPDATE names SET length = 42;", []).unwrap();
    assert_eq!(repo.get_by_name("chloé").unwrap().length(), 5);
}

#[test]
fn between_rank_world_returns_rows_outside_inclusive_interval() {
    let conn = setup();
    let repo = SqliteNameRepository::new(&conn);
    seed(&repo);

    // ranks: Alice 5, Émile 10, Chloé 20, Bob 50, Dmitri 80
    assert_eq!(
        values(&repo.get_between_rank_world(10, 50).unwrap()),
        set(&["Alice", "Dmitri"])
    );
    assert_eq!(
        values(&repo.get_between_rank_world(5, 80).unwrap()),
        HashSet::new()
    );
    assert_eq!(
        values(&repo.get_between_rank_world(100, 200).unwrap()),
        set(&["Alice", "Bob", "Chloé", "Dmitri", "Émile"])
    );
}

#[test]
fn between_rank_country_uses_rank_country_column() {
    let conn = setup();
    let repo = SqliteNameRepository::new(&conn);
    seed(&repo);

    // rank_country is twice rank_world: 10, 20, 40, 100, 160
    assert_eq!(
        values(&repo.get_between_rank_country(15, 100).unwrap()),
        set(&["Alice", "Dmitri"])
    );
}

#[test]
fn between_usage_world_returns_rows_outside_inclusive_interval() {
    let conn = setup();
    let repo = SqliteNameRepository::new(&conn);
    seed(&repo);

    // usage_world: Bob 10, Émile 90, Dmitri 250, Chloé 400, Alice 1000
    assert_eq!(
        values(&repo.get_between_usage_world(90, 400).unwrap()),
        set(&["Bob", "Alice"])
    );
}

#[test]
fn between_usage_country_uses_usage_country_column() {
    let conn = setup();
    let repo = SqliteNameRepository::new(&conn);
    seed(&repo);

    // usage_country is usage_world / 10: 1, 9, 25, 40, 100
    assert_eq!(
        values(&repo.get_between_usage_country(9, 40).unwrap()),
        set(&["Bob", "Alice"])
    );
}

#[test]
fn between_with_inverted_bounds_matches_every_row() {
    let conn = setup();
    let repo = SqliteNameRepository::new(&conn);
    seed(&repo);

    assert_eq!(repo.get_between_rank_world(50, 10).unwrap().len(), 5);
}

#[test]
fn between_is_complement_of_inclusive_interval_for_all_bounds() {
    let conn = setup();
    let repo = SqliteNameRepository::new(&conn);
    seed(&repo);
    let all = repo.get_all().unwrap();

    for min in [0, 5, 10, 20, 49] {
        for max in [min, min + 1, 50, 80, 1000] {
            let expected: HashSet<String> = all
                .iter()
                .filter(|name| name.rank_world() < min || name.rank_world() > max)
                .map(|name| name.value().to_string())
                .collect();
            assert_eq!(
                values(&repo.get_between_rank_world(min, max).unwrap()),
                expected,
                "min={min} max={max}"
            );
        }
    }
}

#[test]
fn create_is_idempotent_and_keeps_rows() {
    let conn = setup();
    let repo = SqliteNameRepository::new(&conn);
    seed(&repo);

    repo.create().unwrap();
    assert_eq!(repo.count().unwrap(), 5);
}

#[test]
fn queries_without_table_return_database_operation_failed() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNameRepository::new(&conn);

    assert!(matches!(
        repo.count().unwrap_err(),
        RepoError::DatabaseOperationFailed(_)
    ));
    assert!(matches!(
        repo.get_all().unwrap_err(),
        RepoError::DatabaseOperationFailed(_)
    ));
    let err = repo
        .add(&name("Alice", 5, 1000, "England", "Scotland"))
        .unwrap_err();
    assert!(matches!(err, RepoError::DatabaseOperationFailed(_)));
    assert!(!err.is_storage_unavailable());
}

#[test]
fn service_delegates_to_repository() {
    let conn = setup();
    let service = NameService::new(SqliteNameRepository::new(&conn));
    service
        .add(&name("Alice", 5, 1000, "England", "Scotland"))
        .unwrap();
    service.add(&name("Bob", 50, 10, "USA", "Canada")).unwrap();

    assert_eq!(service.count().unwrap(), 2);
    assert!(service.exists("BOB").unwrap());
    assert_eq!(service.get_by_name("bob").unwrap().country(), "USA");
    assert_eq!(values(&service.get_by_country("usa").unwrap()), set(&["Bob"]));
    assert_eq!(
        values(&service.get_by_country_density("canada").unwrap()),
        set(&["Bob"])
    );
    assert_eq!(service.get_all().unwrap().len(), 2);
    assert_eq!(
        values(&service.get_between_usage_world(100, 5000).unwrap()),
        set(&["Bob"])
    );
    assert_eq!(
        values(&service.get_between_usage_country(0, 50).unwrap()),
        set(&["Alice"])
    );
    assert_eq!(
        values(&service.get_between_rank_world(1, 10).unwrap()),
        set(&["Bob"])
    );
    assert_eq!(
        values(&service.get_between_rank_country(1, 10).unwrap()),
        set(&["Bob"])
    );

    service.delete_by_name("alice").unwrap();
    assert!(matches!(
        service.get_by_name("Alice"),
        Err(RepoError::NameNotFound(_))
    ));
    service.create().unwrap();
}
