//! Field type - a single column definition inside a datasource

use std::collections::BTreeSet;

/// A field (column) declared by a datasource
///
/// Fields are identified by their bracketed id (e.g. `[Sales]`). Everything
/// else is optional because Tableau only writes the attributes that differ
/// from its defaults.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Field {
    /// Internal identifier, including brackets (e.g. `[Sales]`)
    pub id: String,
    /// Display caption set by the author
    pub caption: Option<String>,
    /// Alias coming from the remote source
    pub alias: Option<String>,
    /// Declared datatype (`string`, `integer`, `real`, `date`, ...)
    pub datatype: Option<String>,
    /// Role (`dimension` or `measure`)
    pub role: Option<String>,
    /// Field type (`nominal`, `ordinal`, `quantitative`)
    pub field_type: Option<String>,
    /// Calculation formula for calculated fields
    pub calculation: Option<String>,
    /// Aggregation function (`Sum`, `Count`, ...)
    pub aggregation: Option<String>,
    /// Default aggregation declared on the column
    pub default_aggregation: Option<String>,
    /// Free-text description
    pub description: Option<String>,
    /// Whether the field is hidden in the data pane
    pub hidden: Option<bool>,
    /// Column name in the underlying connection
    pub remote_name: Option<String>,
    /// Parent table in the underlying connection
    pub parent_name: Option<String>,
    /// Names of the worksheets that use this field
    pub worksheets: BTreeSet<String>,
}

impl Field {
    /// Create a field with only an id
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Display name: the alias, else the caption, else the id
    pub fn name(&self) -> &str {
        self.alias
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.caption.as_deref().filter(|s| !s.is_empty()))
            .unwrap_or(&self.id)
    }

    /// Whether the given worksheet uses this field
    pub fn is_used_in(&self, worksheet: &str) -> bool {
        self.worksheets.contains(worksheet)
    }

    /// Record that a worksheet uses this field
    pub fn add_used_in<S: Into<String>>(&mut self, worksheet: S) {
        self.worksheets.insert(worksheet.into());
    }

    /// Whether the field carries a calculation formula
    pub fn is_calculated(&self) -> bool {
        self.calculation.is_some()
    }

    /// Fill every attribute that is unset here from `other`
    ///
    /// Used to layer connection metadata underneath column declarations.
    pub fn fill_missing_from(&mut self, other: &Field) {
        fn fill<T: Clone>(slot: &mut Option<T>, from: &Option<T>) {
            if slot.is_none() {
                slot.clone_from(from);
            }
        }

        fill(&mut self.caption, &other.caption);
        fill(&mut self.alias, &other.alias);
        fill(&mut self.datatype, &other.datatype);
        fill(&mut self.role, &other.role);
        fill(&mut self.field_type, &other.field_type);
        fill(&mut self.calculation, &other.calculation);
        fill(&mut self.aggregation, &other.aggregation);
        fill(&mut self.default_aggregation, &other.default_aggregation);
        fill(&mut self.description, &other.description);
        fill(&mut self.hidden, &other.hidden);
        fill(&mut self.remote_name, &other.remote_name);
        fill(&mut self.parent_name, &other.parent_name);
        self.worksheets.extend(other.worksheets.iter().cloned());
    }

    /// Set caption
    pub fn with_caption<S: Into<String>>(mut self, caption: S) -> Self {
        self.caption = Some(caption.into());
        self
    }

    /// Set alias
    pub fn with_alias<S: Into<String>>(mut self, alias: S) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Set datatype
    pub fn with_datatype<S: Into<String>>(mut self, datatype: S) -> Self {
        self.datatype = Some(datatype.into());
        self
    }

    /// Set role
    pub fn with_role<S: Into<String>>(mut self, role: S) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Set calculation formula
    pub fn with_calculation<S: Into<String>>(mut self, formula: S) -> Self {
        self.calculation = Some(formula.into());
        self
    }

    /// Set aggregation
    pub fn with_aggregation<S: Into<String>>(mut self, aggregation: S) -> Self {
        self.aggregation = Some(aggregation.into());
        self
    }

    /// Set description
    pub fn with_description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Mark the field as used by a worksheet
    pub fn with_worksheet<S: Into<String>>(mut self, worksheet: S) -> Self {
        self.add_used_in(worksheet);
        self
    }
}
