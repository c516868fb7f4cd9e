use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

mod weekday;

pub use weekday::Weekday;

const BUILTIN_CATALOG: &str = include_str!("../../data/staff.toml");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSlot {
    pub day: Weekday,
    /// Literal range such as `9:30 - 10:15`. Compared byte for byte.
    pub time: String,
    #[serde(alias = "room", alias = "classroom")]
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffRecord {
    pub id: u32,
    pub name: String,
    #[serde(
        default,
        alias = "name_kana",
        alias = "nameKana",
        skip_serializing_if = "Option::is_none"
    )]
    pub phonetic_name: Option<String>,
    pub subject: String,
    pub profile: String,
    #[serde(alias = "imageUrl", alias = "image_url")]
    pub image: String,
    #[serde(default)]
    pub schedule: Vec<ScheduleSlot>,
}

impl StaffRecord {
    pub fn slots_on(&self, day: Weekday) -> impl Iterator<Item = &ScheduleSlot> {
        self.schedule.iter().filter(move |slot| slot.day == day)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("staff id {0} appears more than once")]
    DuplicateId(u32),
    #[error("staff #{id} has an empty {field}")]
    MissingField { id: u32, field: &'static str },
}

#[derive(Debug, Default, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    staff: Vec<StaffRecord>,
}

/// Read-only, ordered set of staff records. Cloning shares the backing slice.
#[derive(Debug, Clone)]
pub struct Catalog {
    records: Arc<[StaffRecord]>,
}

impl Catalog {
    pub fn from_records(records: Vec<StaffRecord>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.id) {
                return Err(CatalogError::DuplicateId(record.id));
            }
            if record.name.trim().is_empty() {
                return Err(CatalogError::MissingField {
                    id: record.id,
                    field: "name",
                });
            }
            if record.subject.trim().is_empty() {
                return Err(CatalogError::MissingField {
                    id: record.id,
                    field: "subject",
                });
            }
        }
        Ok(Self {
            records: records.into(),
        })
    }

    pub fn builtin() -> Result<Self> {
        Self::parse_toml(BUILTIN_CATALOG).context("parsing built-in staff catalog")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading catalog {}", path.display()))?;
        let is_json = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        let catalog = if is_json {
            Self::parse_json(&raw)
        } else {
            Self::parse_toml(&raw)
        }
        .with_context(|| format!("loading catalog {}", path.display()))?;
        tracing::info!(
            path = %path.display(),
            records = catalog.len(),
            "loaded staff catalog"
        );
        Ok(catalog)
    }

    pub fn parse_toml(raw: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(raw).context("parsing catalog toml")?;
        Ok(Self::from_records(file.staff)?)
    }

    pub fn parse_json(raw: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(raw).context("parsing catalog json")?;
        Ok(Self::from_records(file.staff)?)
    }

    pub fn get(&self, id: u32) -> Option<&StaffRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    pub fn contains(&self, id: u32) -> bool {
        self.get(id).is_some()
    }

    pub fn records(&self) -> &[StaffRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StaffRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn subjects(&self) -> Vec<&str> {
        self.records
            .iter()
            .map(|record| record.subject.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a StaffRecord;
    type IntoIter = std::slice::Iter<'a, StaffRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::{ScheduleSlot, StaffRecord, Weekday};

    pub fn record(id: u32, name: &str, phonetic: Option<&str>, subject: &str) -> StaffRecord {
        StaffRecord {
            id,
            name: name.to_string(),
            phonetic_name: phonetic.map(str::to_string),
            subject: subject.to_string(),
            profile: format!("profile {id}"),
            image: format!("/images/{id}.jpg"),
            schedule: Vec::new(),
        }
    }

    pub fn slot(day: Weekday, time: &str, location: &str) -> ScheduleSlot {
        ScheduleSlot {
            day,
            time: time.to_string(),
            location: location.to_string(),
        }
    }
}
