//! Named field attributes
//!
//! Callers ask for extra output columns by attribute name (`description`,
//! `hidden`, ...). Every name a [`Field`] understands is listed in
//! [`FieldAttribute::ALL`]; any other name reads as null.

use std::fmt;
use std::str::FromStr;

use crate::field::Field;

/// An attribute that can be read off a [`Field`] by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldAttribute {
    Id,
    Name,
    Caption,
    Alias,
    Datatype,
    Role,
    Type,
    Calculation,
    Aggregation,
    DefaultAggregation,
    Description,
    Hidden,
    RemoteName,
    ParentName,
    Worksheets,
    IsQuantitative,
    IsOrdinal,
    IsNominal,
}

impl FieldAttribute {
    /// Every known attribute, in listing order
    pub const ALL: [FieldAttribute; 18] = [
        FieldAttribute::Id,
        FieldAttribute::Name,
        FieldAttribute::Caption,
        FieldAttribute::Alias,
        FieldAttribute::Datatype,
        FieldAttribute::Role,
        FieldAttribute::Type,
        FieldAttribute::Calculation,
        FieldAttribute::Aggregation,
        FieldAttribute::DefaultAggregation,
        FieldAttribute::Description,
        FieldAttribute::Hidden,
        FieldAttribute::RemoteName,
        FieldAttribute::ParentName,
        FieldAttribute::Worksheets,
        FieldAttribute::IsQuantitative,
        FieldAttribute::IsOrdinal,
        FieldAttribute::IsNominal,
    ];

    /// Canonical attribute name
    pub fn name(self) -> &'static str {
        match self {
            FieldAttribute::Id => "id",
            FieldAttribute::Name => "name",
            FieldAttribute::Caption => "caption",
            FieldAttribute::Alias => "alias",
            FieldAttribute::Datatype => "datatype",
            FieldAttribute::Role => "role",
            FieldAttribute::Type => "type",
            FieldAttribute::Calculation => "calculation",
            FieldAttribute::Aggregation => "aggregation",
            FieldAttribute::DefaultAggregation => "default_aggregation",
            FieldAttribute::Description => "description",
            FieldAttribute::Hidden => "hidden",
            FieldAttribute::RemoteName => "remote_name",
            FieldAttribute::ParentName => "parent_name",
            FieldAttribute::Worksheets => "worksheets",
            FieldAttribute::IsQuantitative => "is_quantitative",
            FieldAttribute::IsOrdinal => "is_ordinal",
            FieldAttribute::IsNominal => "is_nominal",
        }
    }

    /// Read this attribute from a field as text
    ///
    /// Returns `None` when the field does not carry the attribute.
    pub fn read(self, field: &Field) -> Option<String> {
        match self {
            FieldAttribute::Id => Some(field.id.clone()),
            FieldAttribute::Name => Some(field.name().to_string()),
            FieldAttribute::Caption => field.caption.clone(),
            FieldAttribute::Alias => field.alias.clone(),
            FieldAttribute::Datatype => field.datatype.clone(),
            FieldAttribute::Role => field.role.clone(),
            FieldAttribute::Type => field.field_type.clone(),
            FieldAttribute::Calculation => field.calculation.clone(),
            FieldAttribute::Aggregation => field.aggregation.clone(),
            FieldAttribute::DefaultAggregation => field.default_aggregation.clone(),
            FieldAttribute::Description => field.description.clone(),
            FieldAttribute::Hidden => field.hidden.map(|h| h.to_string()),
            FieldAttribute::RemoteName => field.remote_name.clone(),
            FieldAttribute::ParentName => field.parent_name.clone(),
            FieldAttribute::Worksheets => {
                let names: Vec<&str> = field.worksheets.iter().map(String::as_str).collect();
                Some(names.join(", "))
            }
            FieldAttribute::IsQuantitative => Some(is_type(field, "quantitative")),
            FieldAttribute::IsOrdinal => Some(is_type(field, "ordinal")),
            FieldAttribute::IsNominal => Some(is_type(field, "nominal")),
        }
    }
}

fn is_type(field: &Field, expected: &str) -> String {
    (field.field_type.as_deref() == Some(expected)).to_string()
}

impl fmt::Display for FieldAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an attribute name nothing knows about
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAttribute(pub String);

impl fmt::Display for UnknownAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown field attribute: {}", self.0)
    }
}

impl std::error::Error for UnknownAttribute {}

impl FromStr for FieldAttribute {
    type Err = UnknownAttribute;

    /// Accepts the canonical name, hyphenated spellings as they appear in
    /// the XML (`default-aggregation`) and the field type under `field_type`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        if normalized == "field_type" {
            return Ok(FieldAttribute::Type);
        }
        FieldAttribute::ALL
            .iter()
            .copied()
            .find(|attr| attr.name() == normalized)
            .ok_or_else(|| UnknownAttribute(s.to_string()))
    }
}

/// Read an attribute by name, or `None` for unknown names and absent values
pub fn read_attribute(field: &Field, name: &str) -> Option<String> {
    name.parse::<FieldAttribute>()
        .ok()
        .and_then(|attr| attr.read(field))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_name_parses_back() {
        for attr in FieldAttribute::ALL {
            assert_eq!(attr.name().parse::<FieldAttribute>(), Ok(attr));
        }
    }

    #[test]
    fn test_hyphenated_names() {
        assert_eq!(
            "default-aggregation".parse::<FieldAttribute>(),
            Ok(FieldAttribute::DefaultAggregation)
        );
        assert_eq!(
            "Remote-Name".parse::<FieldAttribute>(),
            Ok(FieldAttribute::RemoteName)
        );
    }

    #[test]
    fn test_unknown_name_reads_null() {
        let field = Field::new("[Sales]").with_description("Gross sales");
        assert_eq!(read_attribute(&field, "no_such_thing"), None);
        assert_eq!(
            read_attribute(&field, "description").as_deref(),
            Some("Gross sales")
        );
    }

    #[test]
    fn test_absent_value_reads_null() {
        let field = Field::new("[Sales]");
        assert_eq!(read_attribute(&field, "description"), None);
        assert_eq!(read_attribute(&field, "hidden"), None);
    }

    #[test]
    fn test_derived_attributes() {
        let mut field = Field::new("[Sales]")
            .with_worksheet("Trend")
            .with_worksheet("Overview");
        field.field_type = Some("quantitative".into());
        field.hidden = Some(true);

        assert_eq!(read_attribute(&field, "worksheets").as_deref(), Some("Overview, Trend"));
        assert_eq!(read_attribute(&field, "is_quantitative").as_deref(), Some("true"));
        assert_eq!(read_attribute(&field, "is_nominal").as_deref(), Some("false"));
        assert_eq!(read_attribute(&field, "hidden").as_deref(), Some("true"));
        assert_eq!(read_attribute(&field, "field_type").as_deref(), Some("quantitative"));
    }
}
