use crate::error::CarbonError;
use carbonconstruct_schemas::{
    factor::EmissionFactor, file_formats::EmissionFactorFile, line_item::Category,
};
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info};

const MATERIAL_UNIT: &str = "kg CO2e/kg";
const TRANSPORT_UNIT: &str = "kg CO2e/t.km";

/// Built-in defaults used when no factor files are supplied.
const DEFAULT_MATERIAL_FACTORS: &[(&str, f64)] = &[
    ("concrete", 0.13),
    ("reinforced_concrete", 0.18),
    ("cement", 0.91),
    ("steel", 1.55),
    ("rebar", 1.99),
    ("aluminium", 8.24),
    ("timber", 0.45),
    ("glulam", 0.51),
    ("brick", 0.24),
    ("glass", 1.44),
    ("plasterboard", 0.39),
    ("insulation", 1.86),
    ("asphalt", 0.05),
];

const DEFAULT_TRANSPORT_FACTORS: &[(&str, f64)] = &[
    ("truck", 0.107),
    ("rigid_truck", 0.195),
    ("rail", 0.028),
    ("ship", 0.016),
];

const DEFAULT_ENERGY_FACTORS: &[(&str, f64, &str)] = &[
    ("electricity", 0.79, "kg CO2e/kWh"),
    ("solar", 0.0, "kg CO2e/kWh"),
    ("diesel", 2.68, "kg CO2e/L"),
    ("petrol", 2.31, "kg CO2e/L"),
    ("lpg", 1.56, "kg CO2e/L"),
    ("natural_gas", 0.0514, "kg CO2e/MJ"),
];

/// Read-only lookup from (category, subtype) to an emission factor.
#[derive(Debug, Clone, Default)]
pub struct EmissionFactorTable {
    factors: HashMap<Category, HashMap<String, EmissionFactor>>,
}

impl EmissionFactorTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The default construction factor set.
    pub fn builtin() -> Self {
        let materials = DEFAULT_MATERIAL_FACTORS
            .iter()
            .map(|(name, factor)| EmissionFactor::new(Category::Material, name, *factor, MATERIAL_UNIT));
        let transport = DEFAULT_TRANSPORT_FACTORS
            .iter()
            .map(|(name, factor)| EmissionFactor::new(Category::Transport, name, *factor, TRANSPORT_UNIT));
        let energy = DEFAULT_ENERGY_FACTORS
            .iter()
            .map(|(name, factor, unit)| EmissionFactor::new(Category::Energy, name, *factor, unit));

        Self::from_factors(materials.chain(transport).chain(energy))
    }

    pub fn from_factors(factors: impl IntoIterator<Item = EmissionFactor>) -> Self {
        let mut table = Self::new();
        for factor in factors {
            table.insert(factor);
        }
        table
    }

    /// Adds a factor, replacing and returning any previous one for the same key.
    pub fn insert(&mut self, factor: EmissionFactor) -> Option<EmissionFactor> {
        let previous = self
            .factors
            .entry(factor.category)
            .or_default()
            .insert(factor.subtype.clone(), factor);
        if let Some(old) = &previous {
            debug!(category = %old.category, subtype = %old.subtype, "Emission factor overridden");
        }
        previous
    }

    /// Overlays `other` on top of this table.
    pub fn merge(&mut self, other: EmissionFactorTable) {
        for (_, by_subtype) in other.factors {
            for (_, factor) in by_subtype {
                self.insert(factor);
            }
        }
    }

    pub fn get(&self, category: Category, subtype: &str) -> Option<&EmissionFactor> {
        self.factors.get(&category).and_then(|m| m.get(subtype))
    }

    pub fn lookup(&self, category: Category, subtype: &str) -> Option<f64> {
        self.get(category, subtype).map(|f| f.factor)
    }

    pub fn len(&self) -> usize {
        self.factors.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All factors ordered by category, then subtype.
    pub fn sorted(&self) -> Vec<&EmissionFactor> {
        let mut all: Vec<&EmissionFactor> = self.factors.values().flat_map(|m| m.values()).collect();
        all.sort_by(|a, b| a.category.cmp(&b.category).then_with(|| a.subtype.cmp(&b.subtype)));
        all
    }

    /// Loads a single `.yaml`/`.yml` factor file or a `.csv` with the columns
    /// `category,type,factor,unit,source`.
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Self, CarbonError> {
        let path = path.as_ref();
        let file_name = path.display().to_string();
        let factors = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => {
                let content = fs::read_to_string(path).map_err(|e| CarbonError::FileIO(file_name.clone(), e))?;
                let file: EmissionFactorFile = serde_yaml::from_str(&content)
                    .map_err(|e| CarbonError::YamlParsing(file_name.clone(), e))?;
                file.factors
            }
            Some("csv") => {
                let mut reader = csv::Reader::from_path(path)
                    .map_err(|e| CarbonError::CsvError(file_name.clone(), e))?;
                let mut factors = Vec::new();
                for record in reader.deserialize() {
                    let factor: EmissionFactor =
                        record.map_err(|e| CarbonError::CsvError(file_name.clone(), e))?;
                    factors.push(factor);
                }
                factors
            }
            _ => return Err(CarbonError::UnsupportedFactorFormat(file_name)),
        };

        info!(path = %file_name, count = factors.len(), "Loaded emission factors");
        Ok(Self::from_factors(factors))
    }

    /// Loads every factor file in a directory, in file name order. Files with
    /// other extensions are skipped.
    pub fn load_dir<P: AsRef<Path>>(dir_path: P) -> Result<Self, CarbonError> {
        let dir = dir_path.as_ref();
        let dir_name = dir.display().to_string();
        let mut paths: Vec<PathBuf> = Vec::new();
        for entry in fs::read_dir(dir).map_err(|e| CarbonError::FileIO(dir_name.clone(), e))? {
            let path = entry.map_err(|e| CarbonError::FileIO(dir_name.clone(), e))?.path();
            let supported = path
                .extension()
                .map_or(false, |s| s == "yaml" || s == "yml" || s == "csv");
            if path.is_file() && supported {
                paths.push(path);
            }
        }
        paths.sort();

        let mut table = Self::new();
        for path in paths {
            table.merge(Self::load_file(&path)?);
        }
        Ok(table)
    }

    /// Loads a file or directory; directories are expanded with `load_dir`.
    pub fn load_path<P: AsRef<Path>>(path: P) -> Result<Self, CarbonError> {
        let path = path.as_ref();
        if path.is_dir() {
            Self::load_dir(path)
        } else {
            Self::load_file(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_table_covers_every_category() {
        let table = EmissionFactorTable::builtin();
        assert_eq!(table.lookup(Category::Material, "concrete"), Some(0.13));
        assert_eq!(table.lookup(Category::Transport, "truck"), Some(0.107));
        assert_eq!(table.lookup(Category::Energy, "electricity"), Some(0.79));
        assert_eq!(
            table.len(),
            DEFAULT_MATERIAL_FACTORS.len() + DEFAULT_TRANSPORT_FACTORS.len() + DEFAULT_ENERGY_FACTORS.len()
        );
    }

    #[test]
    fn lookup_is_scoped_by_category() {
        let table = EmissionFactorTable::builtin();
        assert_eq!(table.lookup(Category::Energy, "concrete"), None);
        assert_eq!(table.lookup(Category::Material, "unobtainium"), None);
    }

    #[test]
    fn merge_overrides_existing_entries() {
        let mut table = EmissionFactorTable::builtin();
        let before = table.len();
        table.merge(EmissionFactorTable::from_factors([
            EmissionFactor::new(Category::Material, "concrete", 0.2, MATERIAL_UNIT),
            EmissionFactor::new(Category::Material, "hempcrete", -0.1, MATERIAL_UNIT),
        ]));
        assert_eq!(table.lookup(Category::Material, "concrete"), Some(0.2));
        assert_eq!(table.len(), before + 1);
    }

    #[test]
    fn sorted_orders_by_category_then_subtype() {
        let table = EmissionFactorTable::from_factors([
            EmissionFactor::new(Category::Energy, "diesel", 2.68, "kg CO2e/L"),
            EmissionFactor::new(Category::Material, "steel", 1.55, MATERIAL_UNIT),
            EmissionFactor::new(Category::Material, "brick", 0.24, MATERIAL_UNIT),
        ]);
        let names: Vec<&str> = table.sorted().iter().map(|f| f.subtype.as_str()).collect();
        assert_eq!(names, vec!["brick", "steel", "diesel"]);
    }
}
