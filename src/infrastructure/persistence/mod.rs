//! Persistence adapters for encounter documents

mod in_memory;

pub use in_memory::InMemoryEncounterRepository;
