//! Resolution of parsed field specs against the source-field catalog.

use std::collections::{BTreeSet, HashMap};

use super::{parse_field_specs, FieldSpecError, FieldSpecResult};
use crate::model::{DimensionRole, FieldSpec, FieldType, SourceField};
use crate::platform::FieldCatalog;

/// One selected field, bound to the physical column it reads.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedField {
    pub spec: FieldSpec,
    pub source: SourceField,
}

impl ResolvedField {
    /// Output column name, `x_<name>`.
    pub fn alias(&self) -> String {
        self.spec.alias()
    }

    pub fn table_alias(&self) -> &str {
        &self.spec.table_alias
    }

    /// Physical table the field's model is stored in.
    pub fn table(&self) -> &str {
        &self.source.table
    }

    pub fn column(&self) -> &str {
        &self.source.name
    }

    pub fn model(&self) -> &str {
        &self.source.model
    }

    pub fn is_join(&self) -> bool {
        self.spec.is_join()
    }

    pub fn role(&self) -> Option<DimensionRole> {
        self.spec.role()
    }

    /// Declared type as exposed on a virtual type.
    pub fn virtual_type(&self) -> FieldType {
        self.source.ttype.for_virtual_type()
    }

    /// Label shown for the field: the override when one was given.
    pub fn description(&self) -> &str {
        self.spec
            .description
            .as_deref()
            .unwrap_or(&self.source.field_description)
    }
}

/// An ordered, validated field selection.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSelection {
    fields: Vec<ResolvedField>,
}

impl ResolvedSelection {
    /// Validate and wrap already resolved fields.
    pub fn new(fields: Vec<ResolvedField>) -> FieldSpecResult<Self> {
        if fields.is_empty() {
            return Err(FieldSpecError::NoData);
        }

        let mut tables: HashMap<&str, &str> = HashMap::new();
        for field in &fields {
            match tables.get(field.table_alias()) {
                Some(table) if *table != field.table() => {
                    return Err(FieldSpecError::AliasConflict {
                        alias: field.table_alias().to_string(),
                        first: table.to_string(),
                        second: field.table().to_string(),
                    });
                }
                Some(_) => {}
                None => {
                    tables.insert(field.table_alias(), field.table());
                }
            }
        }

        let mut names = BTreeSet::new();
        for field in &fields {
            if let Some(target) = field.spec.join_target() {
                if !tables.contains_key(target) {
                    return Err(FieldSpecError::UnknownJoinTarget {
                        field: field.spec.name.clone(),
                        alias: target.to_string(),
                    });
                }
            } else if !names.insert(field.spec.name.as_str()) {
                return Err(FieldSpecError::DuplicateField(field.spec.name.clone()));
            }
        }

        Ok(Self { fields })
    }

    pub fn fields(&self) -> &[ResolvedField] {
        &self.fields
    }

    /// Alias the bookkeeping columns are read from: the first field's.
    pub fn base_alias(&self) -> &str {
        // Never empty: `new` rejects an empty list.
        self.fields
            .first()
            .map(|f| f.table_alias())
            .unwrap_or_default()
    }

    /// Fields exposed on the generated view and type.
    pub fn selected(&self) -> impl Iterator<Item = &ResolvedField> {
        self.fields.iter().filter(|f| !f.is_join())
    }

    /// Fields that only contribute a join predicate.
    pub fn joins(&self) -> impl Iterator<Item = &ResolvedField> {
        self.fields.iter().filter(|f| f.is_join())
    }

    /// Distinct (table, alias) pairs in first-appearance order.
    pub fn tables(&self) -> Vec<(&str, &str)> {
        let mut seen = BTreeSet::new();
        self.fields
            .iter()
            .filter(|f| seen.insert(f.table_alias()))
            .map(|f| (f.table(), f.table_alias()))
            .collect()
    }

    /// Distinct source models referenced by any field, joins included.
    pub fn models(&self) -> BTreeSet<&str> {
        self.fields.iter().map(|f| f.model()).collect()
    }
}

/// Parse `data` and resolve every field through `catalog`.
pub fn resolve(catalog: &impl FieldCatalog, data: Option<&str>) -> FieldSpecResult<ResolvedSelection> {
    let specs = parse_field_specs(data.unwrap_or_default())?;

    let fields = specs
        .into_iter()
        .map(|spec| -> FieldSpecResult<ResolvedField> {
            let source = catalog.source_field(spec.id)?;
            Ok(ResolvedField { spec, source })
        })
        .collect::<FieldSpecResult<Vec<_>>>()?;

    ResolvedSelection::new(fields)
}
