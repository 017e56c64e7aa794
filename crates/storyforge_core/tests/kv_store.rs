use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use storyforge_core::db::open_db_in_memory;
use storyforge_core::{
    KeyValueStore, MemoryBackend, Namespace, SqliteKeyValueStore, StoreError,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Card {
    id: String,
    title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    subtitle: Option<String>,
    tags: Vec<String>,
}

fn card(id: &str, title: &str) -> Card {
    Card {
        id: id.into(),
        title: title.into(),
        subtitle: None,
        tags: vec!["a".into(), "b".into()],
    }
}

fn ns(name: &str) -> Namespace {
    Namespace::new(name).unwrap()
}

fn check_round_trip(store: &impl KeyValueStore) {
    let record = card("c1", "Opening");
    store.set("c1", &record).unwrap();
    assert_eq!(store.get::<Card>("c1").unwrap(), Some(record));
    assert_eq!(store.get::<Card>("missing").unwrap(), None);
}

fn check_idempotent_remove(store: &impl KeyValueStore) {
    store.set("c1", &card("c1", "Opening")).unwrap();
    store.remove("c1").unwrap();
    store.remove("c1").unwrap();
    store.remove("never-existed").unwrap();
    assert_eq!(store.get::<Card>("c1").unwrap(), None);
}

fn check_whole_object_replace(store: &impl KeyValueStore) {
    let mut first = card("c1", "Draft");
    first.subtitle = Some("kept only in first".into());
    store.set("c1", &first).unwrap();

    let second = Card {
        tags: Vec::new(),
        ..card("c1", "Final")
    };
    store.set("c1", &second).unwrap();

    assert_eq!(store.get::<Card>("c1").unwrap(), Some(second));
}

fn check_get_all(store: &impl KeyValueStore) {
    for id in ["z", "m", "a"] {
        store.set(id, &card(id, id)).unwrap();
    }
    let mut ids: Vec<String> = store
        .get_all::<Card>()
        .unwrap()
        .into_iter()
        .map(|card| card.id)
        .collect();
    ids.sort();
    assert_eq!(ids, vec!["a", "m", "z"]);
}

fn check_invalid_payload(store: &impl KeyValueStore) {
    store.set_raw("broken", "{not json".to_string()).unwrap();
    let err = store.get::<Card>("broken").unwrap_err();
    assert!(matches!(err, StoreError::InvalidData { ref id, .. } if id == "broken"));
    assert!(store.get_all::<Card>().is_err());
}

fn sqlite<'c>(conn: &'c Connection, name: &str) -> SqliteKeyValueStore<'c> {
    SqliteKeyValueStore::try_new(conn, ns(name)).unwrap()
}

#[test]
fn sqlite_store_contract() {
    let conn = open_db_in_memory().unwrap();
    check_round_trip(&sqlite(&conn, "round-trip"));
    check_idempotent_remove(&sqlite(&conn, "remove"));
    check_whole_object_replace(&sqlite(&conn, "replace"));
    check_get_all(&sqlite(&conn, "list"));
    check_invalid_payload(&sqlite(&conn, "broken"));
}

#[test]
fn memory_store_contract() {
    let backend = MemoryBackend::new();
    check_round_trip(&backend.store(ns("round-trip")));
    check_idempotent_remove(&backend.store(ns("remove")));
    check_whole_object_replace(&backend.store(ns("replace")));
    check_get_all(&backend.store(ns("list")));
    check_invalid_payload(&backend.store(ns("broken")));
}

#[test]
fn sqlite_namespaces_are_isolated() {
    let conn = open_db_in_memory().unwrap();
    let characters = sqlite(&conn, Namespace::CHARACTERS);
    let scenes = sqlite(&conn, Namespace::SCENES);

    characters.set("x", &card("x", "in characters")).unwrap();
    assert_eq!(scenes.get::<Card>("x").unwrap(), None);
    assert!(scenes.get_all::<Card>().unwrap().is_empty());

    scenes.set("x", &card("x", "in scenes")).unwrap();
    scenes.remove("x").unwrap();
    assert_eq!(
        characters.get::<Card>("x").unwrap().map(|card| card.title),
        Some("in characters".to_string())
    );
}

#[test]
fn memory_namespaces_are_isolated() {
    let backend = MemoryBackend::new();
    let a = backend.store(ns("a"));
    let b = backend.store(ns("b"));

    a.set("x", &card("x", "a")).unwrap();
    assert_eq!(b.get::<Card>("x").unwrap(), None);
    b.remove("x").unwrap();
    assert!(a.get::<Card>("x").unwrap().is_some());
}

#[test]
fn two_handles_on_one_namespace_last_write_wins() {
    let conn = open_db_in_memory().unwrap();
    let tab_one = sqlite(&conn, Namespace::SCENES);
    let tab_two = sqlite(&conn, Namespace::SCENES);

    tab_one.set("s1", &card("s1", "from tab one")).unwrap();
    tab_two.set("s1", &card("s1", "from tab two")).unwrap();

    assert_eq!(
        tab_one.get::<Card>("s1").unwrap().map(|card| card.title),
        Some("from tab two".to_string())
    );
}

#[test]
fn serialization_failure_does_not_touch_storage() {
    use std::collections::HashMap;

    let conn = open_db_in_memory().unwrap();
    let store = sqlite(&conn, "maps");
    store.set("m", &"previous").unwrap();

    // JSON object keys must be strings.
    let mut bad: HashMap<(u8, u8), u8> = HashMap::new();
    bad.insert((1, 2), 3);
    let err = store.set("m", &bad).unwrap_err();
    assert!(matches!(err, StoreError::Serialization { .. }));
    assert_eq!(store.get::<String>("m").unwrap().as_deref(), Some("previous"));
}
