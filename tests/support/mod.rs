//! Shared fixtures for integration tests

#![allow(dead_code)]

use character_view::prelude::*;
use serde_json::{Value, json};

/// Build a record with the fields the engine looks at
pub fn record(id: u64, name: &str, status: &str, species: &str, gender: &str) -> Record {
    serde_json::from_value(record_json(id, name, status, species, gender))
        .expect("fixture record should deserialize")
}

/// Source-shaped JSON for one character
pub fn record_json(id: u64, name: &str, status: &str, species: &str, gender: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "status": status,
        "species": species,
        "type": "",
        "gender": gender,
        "origin": {"name": "Earth (C-137)", "url": "https://rickandmortyapi.com/api/location/1"},
        "location": {"name": "Citadel of Ricks", "url": "https://rickandmortyapi.com/api/location/3"},
        "image": format!("https://rickandmortyapi.com/api/character/avatar/{id}.jpeg"),
        "episode": ["https://rickandmortyapi.com/api/episode/1"],
        "url": format!("https://rickandmortyapi.com/api/character/{id}"),
        "created": "2017-11-04T18:48:46.250Z"
    })
}

/// Records with ids `1..=count`
pub fn numbered(count: u64) -> Vec<Record> {
    (1..=count)
        .map(|id| record(id, &format!("Character {id}"), "Alive", "Human", "Male"))
        .collect()
}

/// Three alive, two dead, one unknown, interleaved
pub fn mixed_status() -> Vec<Record> {
    vec![
        record(1, "Rick Sanchez", "Alive", "Human", "Male"),
        record(2, "Adjudicator Rick", "Dead", "Human", "Male"),
        record(3, "Morty Smith", "Alive", "Human", "Male"),
        record(4, "Agency Director", "unknown", "Human", "Male"),
        record(5, "Summer Smith", "Alive", "Human", "Female"),
        record(6, "Alan Rails", "Dead", "Human", "Male"),
    ]
}

pub fn ids(records: &[Record]) -> Vec<u64> {
    records.iter().map(|r| r.id).collect()
}

pub fn ref_ids(records: &[&Record]) -> Vec<u64> {
    records.iter().map(|r| r.id).collect()
}
