use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

use super::elements::OrbitalElements;
use crate::errors::{OrreryError, OrreryResult};

/// Bodies carried by the compiled-in J2000.0 table.
#[derive(Display, EnumString, EnumIter, Clone, Copy, Debug, PartialEq, Eq)]
#[strum(ascii_case_insensitive)]
pub enum Body {
    Mercury,
    Venus,
    Earth,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
}

impl Body {
    /// Approximate mean elements at J2000.0 (JPL/NASA values), suitable for visualisation.
    pub const fn elements(&self) -> OrbitalElements {
        match self {
            Body::Mercury => {
                OrbitalElements::new(0.387098, 0.205630, 7.0049, 48.331, 29.124, 174.796, 87.969)
            }
            Body::Venus => {
                OrbitalElements::new(0.723332, 0.006772, 3.3947, 76.680, 54.884, 50.115, 224.701)
            }
            Body::Earth => OrbitalElements::new(
                1.000000, 0.016710, 0.0000, -11.260, 114.207, 357.517, 365.256,
            ),
            Body::Mars => {
                OrbitalElements::new(1.523679, 0.093400, 1.8506, 49.558, 286.503, 19.373, 686.980)
            }
            Body::Jupiter => OrbitalElements::new(
                5.20260, 0.048498, 1.3033, 100.464, 273.867, 20.020, 4332.589,
            ),
            Body::Saturn => OrbitalElements::new(
                9.55491, 0.055508, 2.4852, 113.665, 339.392, 317.020, 10759.22,
            ),
            Body::Uranus => {
                OrbitalElements::new(19.2184, 0.046295, 0.7730, 74.006, 96.998, 142.238, 30688.5)
            }
            Body::Neptune => OrbitalElements::new(
                30.1104, 0.008988, 1.7700, 131.784, 272.846, 256.228, 60182.0,
            ),
        }
    }
}

/// One named entry of the element table.
#[derive(Clone, Debug, PartialEq)]
pub struct BodyRecord {
    pub name: String,
    pub elements: OrbitalElements,
}

/// Read-only table of body name to orbital elements. Every record is validated when
/// the store is built, so lookups never hand out malformed elements.
#[derive(Clone, Debug)]
pub struct ElementStore {
    records: Vec<BodyRecord>,
}

impl ElementStore {
    /// Build a store from named element sets, rejecting the whole table on the first
    /// invalid record or on a duplicated (case-insensitive) name.
    pub fn from_records<I>(records: I) -> OrreryResult<Self>
    where
        I: IntoIterator<Item = (String, OrbitalElements)>,
    {
        let mut store = ElementStore {
            records: Vec::new(),
        };

        for (name, elements) in records {
            elements.validate(&name)?;
            if store.find(&name).is_some() {
                return Err(OrreryError::InvalidElements {
                    body: name,
                    reason: "duplicate body name".to_string(),
                });
            }
            store.records.push(BodyRecord { name, elements });
        }

        tracing::debug!("Element store loaded with {} bodies", store.records.len());
        Ok(store)
    }

    /// The compiled-in planetary table, in order of distance from the Sun.
    pub fn planets() -> OrreryResult<Self> {
        Self::from_records(Body::iter().map(|body| (body.to_string(), body.elements())))
    }

    /// Load an externalized table: a JSON object mapping body name to
    /// `{a, e, i, node, peri, m0, period}`. Records are kept sorted by name.
    pub fn from_json_reader<R: Read>(reader: R) -> OrreryResult<Self> {
        let table: BTreeMap<String, OrbitalElements> = serde_json::from_reader(reader)?;
        Self::from_records(table)
    }

    /// Function responsible for opening the element file and connecting the serde reader.
    ///
    /// ### Argument
    /// * 'path' - The path to the element table json file.
    ///
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> OrreryResult<Self> {
        let file = File::open(path.as_ref())?;
        tracing::debug!("Reading element table from {}", path.as_ref().display());
        Self::from_json_reader(BufReader::new(file))
    }

    fn find(&self, name: &str) -> Option<&BodyRecord> {
        let name = name.trim();
        self.records
            .iter()
            .find(|record| record.name.eq_ignore_ascii_case(name))
    }

    /// Look up a body by name, ignoring ASCII case.
    pub fn get(&self, name: &str) -> OrreryResult<&BodyRecord> {
        self.find(name)
            .ok_or_else(|| OrreryError::UnknownBody(name.to_string()))
    }

    pub fn elements(&self, name: &str) -> OrreryResult<&OrbitalElements> {
        self.get(name).map(|record| &record.elements)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    pub fn records(&self) -> &[BodyRecord] {
        &self.records
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|record| record.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
