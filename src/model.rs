//! In-memory model of a hierarchical dataset
//!
//! A [`Dataset`] is a tree of [`Group`]s, each holding variables, dimensions
//! and child groups. The classifier only sees the tree through the
//! [`GroupNode`] and [`AttributeSource`] traits, so synthetic trees built in
//! memory and trees loaded from NetCDF files are classified identically.

use std::collections::BTreeMap;
use std::fmt;

/// Value of a variable attribute, reduced to what classification needs
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    Text(String),
    Texts(Vec<String>),
    Number(f64),
    Numbers(Vec<f64>),
}

impl AttributeValue {
    /// The value when it is a single string
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Renders any value as text; lists are joined with single spaces
    pub fn to_text(&self) -> String {
        match self {
            AttributeValue::Text(s) => s.clone(),
            AttributeValue::Texts(ss) => ss.join(" "),
            AttributeValue::Number(n) => n.to_string(),
            AttributeValue::Numbers(ns) => ns
                .iter()
                .map(|n| n.to_string())
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Text(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::Text(value)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        AttributeValue::Number(value)
    }
}

/// Attribute lookup on a variable
pub trait AttributeSource {
    fn get_attribute(&self, name: &str) -> Option<&AttributeValue>;

    fn has_attribute(&self, name: &str) -> bool {
        self.get_attribute(name).is_some()
    }
}

/// A node of a group tree as seen by the classifier
pub trait GroupNode {
    type Var: AttributeSource;

    /// `/`-joined path from the root; empty for the root itself
    fn path(&self) -> &str;

    /// Variables declared directly on this group, keyed by local name
    fn variables(&self) -> impl Iterator<Item = (&str, &Self::Var)>;

    /// Names of the dimensions declared directly on this group
    fn dimension_names(&self) -> impl Iterator<Item = &str>;

    /// Immediate child groups, in declaration order
    fn children(&self) -> impl Iterator<Item = &Self>;
}

/// Builds the dataset-wide name of a variable or dimension.
///
/// Root members keep their bare name, nested ones are prefixed by the group
/// path: `qualify("swath/gridded", "temp") == "swath/gridded/temp"`.
pub fn qualify(group_path: &str, name: &str) -> String {
    if group_path.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", group_path, name)
    }
}

/// Splits a qualified name at its last `/` into group path and local name.
///
/// Names without a separator belong to the root and get an empty group.
pub fn split_qualified_name(qualified: &str) -> (&str, &str) {
    qualified.rsplit_once('/').unwrap_or(("", qualified))
}

#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    name: String,
    attributes: BTreeMap<String, AttributeValue>,
}

impl Variable {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_attribute(
        mut self,
        name: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<AttributeValue>) {
        self.attributes.insert(name.into(), value.into());
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attributes(&self) -> &BTreeMap<String, AttributeValue> {
        &self.attributes
    }
}

impl AttributeSource for Variable {
    fn get_attribute(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes.get(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    name: String,
    path: String,
    variables: BTreeMap<String, Variable>,
    dimensions: BTreeMap<String, usize>,
    groups: Vec<Group>,
}

impl Group {
    /// An empty root group
    pub fn root() -> Self {
        Self::with_path(String::new(), String::new())
    }

    fn with_path(name: String, path: String) -> Self {
        Self {
            name,
            path,
            variables: BTreeMap::new(),
            dimensions: BTreeMap::new(),
            groups: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn is_root(&self) -> bool {
        self.path.is_empty()
    }

    /// Adds a variable, replacing any previous one of the same name
    pub fn add_variable(&mut self, variable: Variable) -> &mut Self {
        self.variables.insert(variable.name.clone(), variable);
        self
    }

    pub fn add_dimension(&mut self, name: impl Into<String>, len: usize) -> &mut Self {
        self.dimensions.insert(name.into(), len);
        self
    }

    /// Returns the child group `name`, creating it if needed
    pub fn add_group(&mut self, name: &str) -> &mut Group {
        let index = match self.groups.iter().position(|g| g.name == name) {
            Some(index) => index,
            None => {
                let path = qualify(&self.path, name);
                self.groups.push(Group::with_path(name.to_string(), path));
                self.groups.len() - 1
            }
        };
        &mut self.groups[index]
    }

    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.variables.get(name)
    }

    pub fn dimension_len(&self, name: &str) -> Option<usize> {
        self.dimensions.get(name).copied()
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Looks up a descendant by its path relative to this group
    pub fn group(&self, path: &str) -> Option<&Group> {
        path.split('/')
            .filter(|part| !part.is_empty())
            .try_fold(self, |group, part| group.groups.iter().find(|g| g.name == part))
    }
}

impl GroupNode for Group {
    type Var = Variable;

    fn path(&self) -> &str {
        &self.path
    }

    fn variables(&self) -> impl Iterator<Item = (&str, &Variable)> {
        self.variables.iter().map(|(name, var)| (name.as_str(), var))
    }

    fn dimension_names(&self) -> impl Iterator<Item = &str> {
        self.dimensions.keys().map(String::as_str)
    }

    fn children(&self) -> impl Iterator<Item = &Group> {
        self.groups.iter()
    }
}

/// On-disk format a dataset was read from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataModel {
    Netcdf3Classic,
    Netcdf3Offset64,
    Netcdf3Data64,
    Netcdf4,
    /// NetCDF-4 storage restricted to the classic data model
    Netcdf4Classic,
    /// Built in memory rather than read from a file
    Memory,
}

impl DataModel {
    /// Identifier in the form reported by the NetCDF tooling
    pub fn as_str(&self) -> &'static str {
        match self {
            DataModel::Netcdf3Classic => "NETCDF3_CLASSIC",
            DataModel::Netcdf3Offset64 => "NETCDF3_64BIT_OFFSET",
            DataModel::Netcdf3Data64 => "NETCDF3_64BIT_DATA",
            DataModel::Netcdf4 => "NETCDF4",
            DataModel::Netcdf4Classic => "NETCDF4_CLASSIC",
            DataModel::Memory => "MEMORY",
        }
    }
}

impl fmt::Display for DataModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully loaded group tree together with its data model
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    data_model: DataModel,
    root: Group,
}

impl Dataset {
    pub fn new(data_model: DataModel, root: Group) -> Self {
        Self { data_model, root }
    }

    /// Wraps a synthetic tree
    pub fn from_root(root: Group) -> Self {
        Self::new(DataModel::Memory, root)
    }

    pub fn data_model(&self) -> DataModel {
        self.data_model
    }

    pub fn root(&self) -> &Group {
        &self.root
    }
}
