//! Variable classification into science and metadata sets
//!
//! Every variable of every group is sorted into one of two provisional
//! categories by its attributes:
//!
//! - a `coordinates` attribute makes it a variable with coordinates, and each
//!   name listed in the attribute becomes a coordinate reference;
//! - otherwise a `grid_mapping` attribute makes it a variable with
//!   coordinates, and the named grid-mapping variable becomes an ancillary
//!   reference;
//! - otherwise it is a metadata variable.
//!
//! Dimension names are collected alongside. The final science and metadata
//! sets are the two provisional categories with every dimension, coordinate
//! reference and ancillary reference removed, so structural variables are
//! never handed to the resampler.

use crate::coordinates::{coordinates_key, split_coordinates};
use crate::errors::Result;
use crate::model::{qualify, AttributeSource, AttributeValue, DataModel, Dataset, GroupNode};
use crate::walker::GroupWalker;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use tracing::{debug, info, trace, warn};

/// Attribute listing the coordinate variables of a variable
pub const COORDINATES_ATTR: &str = "coordinates";

/// Attribute naming the grid-mapping variable of a variable
pub const GRID_MAPPING_ATTR: &str = "grid_mapping";

/// Options changing how references are recorded
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifierOptions {
    /// Drop empty tokens produced by degenerate `coordinates` values
    pub drop_empty_tokens: bool,
    /// Also record references from nested variables qualified with the
    /// referencing variable's group path
    pub resolve_references_in_group: bool,
}

impl ClassifierOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drop_empty_tokens(mut self, enabled: bool) -> Self {
        self.drop_empty_tokens = enabled;
        self
    }

    pub fn resolve_references_in_group(mut self, enabled: bool) -> Self {
        self.resolve_references_in_group = enabled;
        self
    }
}

/// Provisional categories accumulated over one traversal
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategorySets {
    vars_with_coordinates: BTreeSet<String>,
    vars_metadata: BTreeSet<String>,
    dimensions: BTreeSet<String>,
    coordinate_refs: BTreeSet<String>,
    ancillary_refs: BTreeSet<String>,
    coordinate_keys: BTreeMap<String, Vec<String>>,
}

impl CategorySets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vars_with_coordinates(&self) -> &BTreeSet<String> {
        &self.vars_with_coordinates
    }

    pub fn vars_metadata(&self) -> &BTreeSet<String> {
        &self.vars_metadata
    }

    pub fn dimensions(&self) -> &BTreeSet<String> {
        &self.dimensions
    }

    pub fn coordinate_refs(&self) -> &BTreeSet<String> {
        &self.coordinate_refs
    }

    pub fn ancillary_refs(&self) -> &BTreeSet<String> {
        &self.ancillary_refs
    }

    /// True when `name` is a dimension or is referenced by another variable
    pub fn is_excluded(&self, name: &str) -> bool {
        self.dimensions.contains(name)
            || self.coordinate_refs.contains(name)
            || self.ancillary_refs.contains(name)
    }

    fn without_excluded(&self, names: &BTreeSet<String>) -> BTreeSet<String> {
        names
            .iter()
            .filter(|name| !self.is_excluded(name))
            .cloned()
            .collect()
    }
}

fn insert_reference(
    set: &mut BTreeSet<String>,
    group_path: &str,
    reference: String,
    options: &ClassifierOptions,
) {
    if options.resolve_references_in_group && !group_path.is_empty() && !reference.is_empty() {
        let resolved = match reference.strip_prefix('/') {
            Some(absolute) => absolute.to_string(),
            None => qualify(group_path, &reference),
        };
        set.insert(resolved);
    }
    set.insert(reference);
}

fn attribute_text(variable: &str, attribute: &str, value: &AttributeValue) -> String {
    match value.as_text() {
        Some(text) => text.to_string(),
        None => {
            warn!(
                variable,
                attribute,
                value = ?value,
                "reference attribute is not a string, using its text rendering"
            );
            value.to_text()
        }
    }
}

/// Classifies the variables and dimensions declared directly on `group`.
///
/// Must run once per group; child groups are not visited.
pub fn classify_group<G: GroupNode>(
    group: &G,
    sets: &mut CategorySets,
    options: &ClassifierOptions,
) {
    let path = group.path();
    let mut variable_count = 0usize;

    for (name, variable) in group.variables() {
        variable_count += 1;
        let qualified = qualify(path, name);

        if let Some(value) = variable.get_attribute(COORDINATES_ATTR) {
            let text = attribute_text(&qualified, COORDINATES_ATTR, value);
            let mut tokens = split_coordinates(&text);
            if options.drop_empty_tokens {
                tokens.retain(|token| !token.is_empty());
            }
            trace!(variable = %qualified, ?tokens, "has coordinates");
            for token in tokens {
                insert_reference(&mut sets.coordinate_refs, path, token, options);
            }
            sets.coordinate_keys.insert(qualified.clone(), coordinates_key(&text));
            sets.vars_with_coordinates.insert(qualified);
        } else if let Some(value) = variable.get_attribute(GRID_MAPPING_ATTR) {
            let target = attribute_text(&qualified, GRID_MAPPING_ATTR, value);
            trace!(variable = %qualified, grid_mapping = %target, "has grid mapping");
            insert_reference(&mut sets.ancillary_refs, path, target, options);
            sets.vars_with_coordinates.insert(qualified);
        } else {
            trace!(variable = %qualified, "metadata");
            sets.vars_metadata.insert(qualified);
        }
    }

    let mut dimension_count = 0usize;
    for dimension in group.dimension_names() {
        dimension_count += 1;
        sets.dimensions.insert(qualify(path, dimension));
    }

    let label = if path.is_empty() { "/" } else { path };
    debug!(
        group = label,
        variables = variable_count,
        dimensions = dimension_count,
        "classified group"
    );
}

/// Runs the classifier over a root group and all of its descendants
pub fn classify_tree<G: GroupNode>(root: &G, options: &ClassifierOptions) -> CategorySets {
    let mut sets = CategorySets::new();
    classify_group(root, &mut sets, options);
    for group in GroupWalker::new(root) {
        classify_group(group, &mut sets, options);
    }
    sets
}

/// Outcome of one classification run
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    data_model: DataModel,
    science_variables: BTreeSet<String>,
    metadata_variables: BTreeSet<String>,
    sets: CategorySets,
}

impl Classification {
    fn from_sets(data_model: DataModel, sets: CategorySets) -> Self {
        let science_variables = sets.without_excluded(&sets.vars_with_coordinates);
        let metadata_variables = sets.without_excluded(&sets.vars_metadata);
        Self {
            data_model,
            science_variables,
            metadata_variables,
            sets,
        }
    }

    pub fn data_model(&self) -> DataModel {
        self.data_model
    }

    /// Qualified names of the variables to resample
    pub fn science_variables(&self) -> &BTreeSet<String> {
        &self.science_variables
    }

    /// Qualified names of the variables to copy through unresampled
    pub fn metadata_variables(&self) -> &BTreeSet<String> {
        &self.metadata_variables
    }

    /// The provisional categories the results were derived from
    pub fn sets(&self) -> &CategorySets {
        &self.sets
    }

    /// Science variables grouped by the coordinate list they declare.
    ///
    /// Variables classified through `grid_mapping` alone have no key and are
    /// left out.
    pub fn coordinate_groups(&self) -> BTreeMap<Vec<String>, BTreeSet<String>> {
        let mut groups: BTreeMap<Vec<String>, BTreeSet<String>> = BTreeMap::new();
        for name in &self.science_variables {
            if let Some(key) = self.sets.coordinate_keys.get(name) {
                groups.entry(key.clone()).or_default().insert(name.clone());
            }
        }
        groups
    }

    pub fn into_parts(self) -> (BTreeSet<String>, BTreeSet<String>) {
        (self.science_variables, self.metadata_variables)
    }
}

/// Classifies a loaded dataset with default options
pub fn classify(dataset: &Dataset) -> Classification {
    classify_with(dataset, &ClassifierOptions::default())
}

pub fn classify_with(dataset: &Dataset, options: &ClassifierOptions) -> Classification {
    let sets = classify_tree(dataset.root(), options);
    let classification = Classification::from_sets(dataset.data_model(), sets);

    info!(
        data_model = %classification.data_model,
        science = classification.science_variables.len(),
        metadata = classification.metadata_variables.len(),
        dimensions = classification.sets.dimensions.len(),
        coordinate_refs = classification.sets.coordinate_refs.len(),
        ancillary_refs = classification.sets.ancillary_refs.len(),
        "classification complete"
    );
    classification
}

/// Opens a NetCDF file, classifies it, and releases the file before returning
pub fn classify_path(path: impl AsRef<Path>) -> Result<Classification> {
    classify_path_with(path, &ClassifierOptions::default())
}

pub fn classify_path_with(
    path: impl AsRef<Path>,
    options: &ClassifierOptions,
) -> Result<Classification> {
    let dataset = Dataset::open(path.as_ref())?;
    Ok(classify_with(&dataset, options))
}
