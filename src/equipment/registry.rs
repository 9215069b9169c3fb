use crate::equipment::crane::{
    registry_key, CraneEnvelope, CraneModel, CraneType, EnvelopeError, UnknownCraneType,
};

use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

/// Error types for registry operations
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid envelope for {key}: {source}")]
    InvalidEnvelope {
        key: String,
        #[source]
        source: EnvelopeError,
    },

    #[error(transparent)]
    UnknownCraneType(#[from] UnknownCraneType),

    #[error("Crane not found: {0} {1}")]
    CraneNotFound(String, String),
}

/// Outcome of a bulk load
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub loaded: usize,
    pub skipped: usize,
}

/// One line of a registry CSV file
#[derive(Debug, Deserialize)]
struct CraneRow {
    manufacturer: String,
    model: String,
    crane_type: String,
    rated_capacity_t: f64,
    max_radius_m: f64,
    max_height_m: f64,
}

impl TryFrom<CraneRow> for CraneModel {
    type Error = RegistryError;

    fn try_from(row: CraneRow) -> Result<Self, Self::Error> {
        let crane_type: CraneType = row.crane_type.parse()?;
        let envelope =
            CraneEnvelope::metric(row.rated_capacity_t, row.max_radius_m, row.max_height_m)
                .map_err(|source| RegistryError::InvalidEnvelope {
                    key: registry_key(&row.manufacturer, &row.model),
                    source,
                })?;

        Ok(CraneModel::new(row.manufacturer, row.model, crane_type, envelope))
    }
}

/// Registry of crane models, the static source of envelopes for the evaluator
#[derive(Debug, Default, Clone)]
pub struct CraneRegistry {
    /// Maps "Manufacturer:Model" -> CraneModel
    models: HashMap<String, CraneModel>,
}

impl CraneRegistry {
    pub fn new() -> Self {
        Self {
            models: HashMap::new(),
        }
    }

    /// Create a registry from a CSV file
    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<(Self, LoadSummary), RegistryError> {
        let mut registry = Self::new();
        let summary = registry.load_csv(fs::File::open(path.as_ref())?)?;
        tracing::info!(
            path = %path.as_ref().display(),
            loaded = summary.loaded,
            skipped = summary.skipped,
            "crane registry loaded"
        );
        Ok((registry, summary))
    }

    /// Load models from CSV with a header row of
    /// `manufacturer,model,crane_type,rated_capacity_t,max_radius_m,max_height_m`.
    ///
    /// Rows that fail to parse or carry an invalid envelope are skipped.
    pub fn load_csv<R: io::Read>(&mut self, reader: R) -> Result<LoadSummary, RegistryError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut summary = LoadSummary::default();

        for (line, record) in csv_reader.deserialize::<CraneRow>().enumerate() {
            let parsed = record
                .map_err(RegistryError::from)
                .and_then(CraneModel::try_from);

            match parsed {
                Ok(model) => {
                    self.add(model);
                    summary.loaded += 1;
                }
                Err(e) => {
                    // header is line 1
                    tracing::warn!(line = line + 2, error = %e, "skipped crane row");
                    summary.skipped += 1;
                }
            }
        }

        Ok(summary)
    }

    /// Load a JSON array of crane models; any invalid entry fails the whole file
    pub fn load_json_file(&mut self, path: impl AsRef<Path>) -> Result<usize, RegistryError> {
        let json = fs::read_to_string(path.as_ref())?;
        let models: Vec<CraneModel> = serde_json::from_str(&json)?;
        let count = models.len();

        for model in models {
            self.add(model);
        }

        tracing::info!(path = %path.as_ref().display(), count, "crane models loaded from JSON");
        Ok(count)
    }

    /// Add a model, replacing any existing entry with the same key
    pub fn add(&mut self, model: CraneModel) -> Option<CraneModel> {
        self.models.insert(model.key(), model)
    }

    pub fn get(&self, manufacturer: &str, model: &str) -> Option<&CraneModel> {
        self.models.get(&registry_key(manufacturer, model))
    }

    /// Look up a model's envelope, failing when it is not registered
    pub fn envelope(&self, manufacturer: &str, model: &str) -> Result<CraneEnvelope, RegistryError> {
        self.get(manufacturer, model)
            .map(|m| m.envelope)
            .ok_or_else(|| RegistryError::CraneNotFound(manufacturer.to_string(), model.to_string()))
    }

    pub fn remove(&mut self, manufacturer: &str, model: &str) -> Option<CraneModel> {
        self.models.remove(&registry_key(manufacturer, model))
    }

    /// Get all manufacturers, sorted
    pub fn manufacturers(&self) -> Vec<String> {
        let mut manufacturers: Vec<String> = self
            .models
            .values()
            .map(|m| m.manufacturer.clone())
            .collect();

        manufacturers.sort();
        manufacturers.dedup();
        manufacturers
    }

    /// Get all models for a manufacturer, sorted
    pub fn models(&self, manufacturer: &str) -> Vec<String> {
        let mut models: Vec<String> = self
            .models
            .values()
            .filter(|m| m.manufacturer == manufacturer)
            .map(|m| m.model.clone())
            .collect();
        models.sort();
        models
    }

    /// Models of a given type
    pub fn of_type(&self, crane_type: CraneType) -> impl Iterator<Item = &CraneModel> {
        self.models.values().filter(move |m| m.crane_type == crane_type)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CraneModel> {
        self.models.values()
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn clear(&mut self) {
        self.models.clear();
    }
}
