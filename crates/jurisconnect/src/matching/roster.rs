//! CSV import of lawyer profile snapshots.
//!
//! Profile exports list one lawyer per row. Multi-valued columns (practice areas and
//! languages) are separated by `;` or `|`.

use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer};

use super::domain::{LawyerId, LawyerRecord, PlanTier, PracticeArea};
use super::intake::{normalize_language, resolve_area_tag};

#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("failed to read lawyer roster: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid lawyer roster CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: unknown practice area {value:?}")]
    UnknownPracticeArea { row: usize, value: String },
    #[error("row {row}: unknown plan {value:?}")]
    UnknownPlan { row: usize, value: String },
    #[error("row {row}: duplicate lawyer id {id}")]
    DuplicateId { row: usize, id: String },
}

pub struct LawyerRoster;

impl LawyerRoster {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<LawyerRecord>, RosterError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<LawyerRecord>, RosterError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut seen = BTreeSet::new();
        let mut records = Vec::new();

        for (index, row) in csv_reader.deserialize::<RosterRow>().enumerate() {
            let row = row?;
            // header is line 1
            let line = index + 2;

            if !seen.insert(row.id.clone()) {
                return Err(RosterError::DuplicateId { row: line, id: row.id });
            }

            records.push(row.into_record(line)?);
        }

        Ok(records)
    }
}

#[derive(Debug, Deserialize)]
struct RosterRow {
    id: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    name: Option<String>,
    practice_areas: String,
    #[serde(default)]
    city: String,
    #[serde(default)]
    state: String,
    #[serde(default)]
    languages: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    plan: Option<String>,
    #[serde(default, deserialize_with = "empty_as_default")]
    years_experience: u16,
    verified: bool,
    active: bool,
    #[serde(default, deserialize_with = "empty_as_default")]
    rating_average: f32,
    #[serde(default, deserialize_with = "empty_as_default")]
    rating_count: u32,
    #[serde(default)]
    consultation_fee: Option<u32>,
}

impl RosterRow {
    fn into_record(self, line: usize) -> Result<LawyerRecord, RosterError> {
        let mut practice_areas = BTreeSet::new();
        for tag in split_multi(&self.practice_areas) {
            let area = resolve_area_tag(tag).ok_or_else(|| RosterError::UnknownPracticeArea {
                row: line,
                value: tag.to_string(),
            })?;
            practice_areas.insert(area);
        }
        if practice_areas.is_empty() {
            practice_areas.insert(PracticeArea::Outros);
        }

        let languages = split_multi(&self.languages)
            .map(normalize_language)
            .filter(|tag| !tag.is_empty())
            .collect();

        let plan = match self.plan.as_deref() {
            None => PlanTier::default(),
            Some(raw) => parse_plan(raw).ok_or_else(|| RosterError::UnknownPlan {
                row: line,
                value: raw.to_string(),
            })?,
        };

        Ok(LawyerRecord {
            id: LawyerId(self.id),
            name: self.name,
            practice_areas,
            city: self.city,
            state: self.state.to_ascii_uppercase(),
            languages,
            plan,
            years_experience: self.years_experience,
            verified: self.verified,
            active: self.active,
            rating_average: self.rating_average,
            rating_count: self.rating_count,
            consultation_fee: self.consultation_fee,
        })
    }
}

fn parse_plan(raw: &str) -> Option<PlanTier> {
    match raw.trim().to_ascii_uppercase().as_str() {
        "FREE" => Some(PlanTier::Free),
        "PREMIUM" => Some(PlanTier::Premium),
        "FEATURED" => Some(PlanTier::Featured),
        _ => None,
    }
}

fn split_multi(value: &str) -> impl Iterator<Item = &str> {
    value
        .split(|c: char| c == ';' || c == '|')
        .map(str::trim)
        .filter(|part| !part.is_empty())
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn empty_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + Default,
    T::Err: std::fmt::Display,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(T::default()),
        Some(value) => value.parse().map_err(de::Error::custom),
    }
}
