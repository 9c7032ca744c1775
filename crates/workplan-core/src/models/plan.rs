//! Plan model definition and related functionality.

use jiff::civil::Date;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{Entity, PlanMetadata, Task};

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_LENGTH: usize = 9;

/// Generates a short opaque identifier (9 lowercase base-36 characters).
pub fn generate_id() -> String {
    let mut rng = rand::rng();
    (0..ID_LENGTH)
        .map(|_| ID_ALPHABET[rng.random_range(0..ID_ALPHABET.len())] as char)
        .collect()
}

/// Represents a complete work plan.
///
/// Every field deserializes with a default, so records written by older
/// versions (for example before the two entities existed) still load.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Plan {
    /// Unique identifier for the plan
    pub id: String,

    /// Title of the plan
    #[serde(rename = "titulo")]
    pub title: String,

    /// Free-text description
    #[serde(rename = "descripcion")]
    pub description: String,

    /// Author of the plan
    #[serde(rename = "autor")]
    pub author: String,

    /// ISO date the plan was created; set once and never mutated
    #[serde(rename = "fechaCreacion")]
    pub created_on: String,

    /// ISO start date, empty when unset
    #[serde(rename = "fechaInicio")]
    pub start_date: String,

    /// ISO end date, empty when unset
    #[serde(rename = "fechaFin")]
    pub end_date: String,

    /// Free-text objectives
    #[serde(rename = "objetivos")]
    pub objectives: String,

    /// Tasks in insertion order
    #[serde(rename = "tareas")]
    pub tasks: Vec<Task>,

    /// Issuing entity
    #[serde(rename = "empresaOrigen")]
    pub origin: Entity,

    /// Receiving entity
    #[serde(rename = "empresaDestino")]
    pub destination: Entity,
}

impl Plan {
    /// A fresh plan with a new id, created today, with nothing filled in.
    pub fn empty(today: Date) -> Self {
        Self {
            id: generate_id(),
            created_on: today.to_string(),
            ..Default::default()
        }
    }

    /// The current metadata block.
    pub fn metadata(&self) -> PlanMetadata {
        PlanMetadata {
            title: self.title.clone(),
            description: self.description.clone(),
            author: self.author.clone(),
            start_date: self.start_date.clone(),
            end_date: self.end_date.clone(),
            objectives: self.objectives.clone(),
        }
    }

    /// Replaces the whole metadata block; id and creation date are kept.
    pub fn set_metadata(&mut self, metadata: PlanMetadata) {
        self.title = metadata.title;
        self.description = metadata.description;
        self.author = metadata.author;
        self.start_date = metadata.start_date;
        self.end_date = metadata.end_date;
        self.objectives = metadata.objectives;
    }

    /// Finds a task by id.
    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Whether there is anything worth exporting.
    pub fn has_content(&self) -> bool {
        !self.title.trim().is_empty() || !self.tasks.is_empty()
    }
}
