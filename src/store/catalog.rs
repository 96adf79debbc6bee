//! Source-field catalog and runtime type descriptors.

use rusqlite::{params, OptionalExtension, Row};

use super::SqliteStore;
use crate::model::{
    FieldDescriptor, FieldId, FieldState, FieldType, SourceField, TypeDescriptor, TypeId,
};
use crate::platform::{FieldCatalog, PlatformError, PlatformResult, TypeStore};

fn parse_ttype(value: String) -> PlatformResult<FieldType> {
    FieldType::parse(&value).ok_or(PlatformError::Corrupt {
        what: "field type",
        value,
    })
}

fn parse_state(value: String) -> PlatformResult<FieldState> {
    FieldState::parse(&value).ok_or(PlatformError::Corrupt {
        what: "field state",
        value,
    })
}

/// Raw `ir_model_fields` columns, typed fields parsed afterwards.
struct FieldRow {
    name: String,
    complete_name: Option<String>,
    relation: Option<String>,
    field_description: String,
    ttype: String,
    selection: Option<String>,
    size: Option<i64>,
    state: String,
}

impl FieldRow {
    const COLUMNS: &'static str =
        "f.name, f.complete_name, f.relation, f.field_description, f.ttype, f.selection, f.size, f.state";

    /// Read the columns listed in [`Self::COLUMNS`], starting at `offset`.
    fn read(row: &Row<'_>, offset: usize) -> rusqlite::Result<Self> {
        Ok(Self {
            name: row.get(offset)?,
            complete_name: row.get(offset + 1)?,
            relation: row.get(offset + 2)?,
            field_description: row.get(offset + 3)?,
            ttype: row.get(offset + 4)?,
            selection: row.get(offset + 5)?,
            size: row.get(offset + 6)?,
            state: row.get(offset + 7)?,
        })
    }
}

impl FieldCatalog for SqliteStore {
    fn source_field(&self, id: FieldId) -> PlatformResult<SourceField> {
        let sql = format!(
            "SELECT m.model, m.table_name, {} FROM ir_model_fields f \
             JOIN ir_model m ON m.id = f.model_id WHERE f.id = ?",
            FieldRow::COLUMNS
        );
        let found = self
            .conn
            .query_row(&sql, params![id], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?, FieldRow::read(row, 2)?))
            })
            .optional()?;

        let (model, table, field) = found.ok_or(PlatformError::NotFound { kind: "field", id })?;
        Ok(SourceField {
            id,
            model,
            table,
            name: field.name,
            complete_name: field.complete_name,
            field_description: field.field_description,
            ttype: parse_ttype(field.ttype)?,
            relation: field.relation,
            selection: field.selection,
            size: field.size,
        })
    }

    fn live_selection(&self, model: &str, field: &str) -> PlatformResult<Option<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT s.value, s.label FROM ir_model_fields_selection s \
             JOIN ir_model_fields f ON f.id = s.field_id \
             JOIN ir_model m ON m.id = f.model_id \
             WHERE m.model = ? AND f.name = ? ORDER BY s.sequence, s.id",
        )?;
        let pairs = stmt
            .query_map(params![model, field], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        if pairs.is_empty() {
            Ok(None)
        } else {
            Ok(Some(serde_json::to_string(&pairs)?))
        }
    }
}

impl TypeStore for SqliteStore {
    fn create_type(&mut self, descriptor: &TypeDescriptor) -> PlatformResult<TypeId> {
        self.conn.execute(
            "INSERT INTO ir_model (name, model, table_name, state) VALUES (?, ?, ?, ?)",
            params![
                descriptor.name,
                descriptor.model,
                descriptor.table,
                FieldState::Manual.as_str()
            ],
        )?;
        let type_id = self.conn.last_insert_rowid();

        let mut stmt = self.conn.prepare(
            "INSERT INTO ir_model_fields \
             (model_id, name, complete_name, relation, field_description, ttype, selection, size, state) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )?;
        for field in &descriptor.fields {
            stmt.execute(params![
                type_id,
                field.name,
                field.complete_name,
                field.relation,
                field.field_description,
                field.ttype.as_str(),
                field.selection,
                field.size,
                field.state.as_str(),
            ])?;
        }

        Ok(type_id)
    }

    fn find_types(&self, model: &str) -> PlatformResult<Vec<TypeId>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id FROM ir_model WHERE model = ? AND state = 'manual' ORDER BY id")?;
        let ids = stmt
            .query_map(params![model], |row| row.get(0))?
            .collect::<Result<Vec<TypeId>, _>>()?;
        Ok(ids)
    }

    fn delete_type(&mut self, id: TypeId) -> PlatformResult<()> {
        // Fields and grants go with it (ON DELETE CASCADE).
        self.conn
            .execute("DELETE FROM ir_model WHERE id = ?", params![id])?;
        Ok(())
    }

    fn load_types(&self) -> PlatformResult<Vec<TypeDescriptor>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, model, table_name FROM ir_model WHERE state = 'manual' ORDER BY id",
        )?;
        let heads = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, TypeId>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let sql = format!(
            "SELECT {} FROM ir_model_fields f WHERE f.model_id = ? ORDER BY f.id",
            FieldRow::COLUMNS
        );
        let mut fields_stmt = self.conn.prepare(&sql)?;

        let mut types = Vec::with_capacity(heads.len());
        for (id, name, model, table) in heads {
            let rows = fields_stmt
                .query_map(params![id], |row| FieldRow::read(row, 0))?
                .collect::<Result<Vec<_>, _>>()?;
            let fields = rows
                .into_iter()
                .map(|f| -> PlatformResult<FieldDescriptor> {
                    Ok(FieldDescriptor {
                        name: f.name,
                        complete_name: f.complete_name,
                        model: model.clone(),
                        relation: f.relation,
                        field_description: f.field_description,
                        ttype: parse_ttype(f.ttype)?,
                        selection: f.selection,
                        size: f.size,
                        state: parse_state(f.state)?,
                    })
                })
                .collect::<PlatformResult<Vec<_>>>()?;

            types.push(TypeDescriptor {
                name,
                model,
                table,
                fields,
            });
        }
        Ok(types)
    }
}

// ============================================================================
// Source model administration
// ============================================================================

impl SqliteStore {
    /// Declare a source model stored in `table`.
    pub fn declare_model(&mut self, model: &str, table: &str, label: &str) -> PlatformResult<TypeId> {
        self.conn.execute(
            "INSERT INTO ir_model (name, model, table_name, state) VALUES (?, ?, ?, 'base')",
            params![label, model, table],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Id of a declared model.
    pub fn model_id(&self, model: &str) -> PlatformResult<Option<TypeId>> {
        Ok(self
            .conn
            .query_row("SELECT id FROM ir_model WHERE model = ?", params![model], |row| row.get(0))
            .optional()?)
    }

    /// Declare a column of a source model.
    pub fn declare_field(
        &mut self,
        model_id: TypeId,
        name: &str,
        label: &str,
        ttype: FieldType,
    ) -> PlatformResult<FieldId> {
        let model: String = self.conn.query_row(
            "SELECT model FROM ir_model WHERE id = ?",
            params![model_id],
            |row| row.get(0),
        )?;
        self.conn.execute(
            "INSERT INTO ir_model_fields (model_id, name, complete_name, field_description, ttype, state) \
             VALUES (?, ?, ?, ?, ?, 'base')",
            params![model_id, name, format!("{model}.{name}"), label, ttype.as_str()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Set the model a relational field points to.
    pub fn set_field_relation(&mut self, field: FieldId, relation: &str) -> PlatformResult<()> {
        let changed = self.conn.execute(
            "UPDATE ir_model_fields SET relation = ? WHERE id = ?",
            params![relation, field],
        )?;
        super::expect_row(changed, "field", field)
    }

    /// Store an explicit enumeration on a field.
    pub fn set_field_selection(&mut self, field: FieldId, selection: &str) -> PlatformResult<()> {
        let changed = self.conn.execute(
            "UPDATE ir_model_fields SET selection = ? WHERE id = ?",
            params![selection, field],
        )?;
        super::expect_row(changed, "field", field)
    }

    /// Append a value to the live enumeration of a field.
    pub fn add_selection_value(&mut self, field: FieldId, value: &str, label: &str) -> PlatformResult<()> {
        self.conn.execute(
            "INSERT INTO ir_model_fields_selection (field_id, sequence, value, label) \
             VALUES (?1, (SELECT COUNT(*) FROM ir_model_fields_selection WHERE field_id = ?1), ?2, ?3)",
            params![field, value, label],
        )?;
        Ok(())
    }
}
