//! Storage layer for phonebook entries

mod person_store;

pub use person_store::PersonStore;
