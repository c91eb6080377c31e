//! PostgreSQL DDL generation from a [`TableDefinition`].
//!
//! Renders a table's structure into a `CREATE TABLE` statement plus the
//! `ALTER TABLE ... ADD PRIMARY KEY` / `CREATE [UNIQUE] INDEX` statements for
//! its indexes. Pure string generation, no I/O.
//!
//! Caveat: MySQL TINYINT and BIT both become PostgreSQL BOOLEAN; in some
//! schemas SMALLINT may be the better fit for TINYINT.

use crate::error::{Result, SchemaError};
use crate::model::{ColumnDefinition, IndexDefinition, TableDefinition, PRIMARY_KEY_NAME};
use crate::typemap::SqlType;

/// Renders a table definition as PostgreSQL DDL.
pub struct PostgresTableConverter<'a> {
    table: &'a TableDefinition,
}

impl<'a> PostgresTableConverter<'a> {
    /// Create a converter for the given table definition.
    pub fn new(table: &'a TableDefinition) -> Self {
        Self { table }
    }

    /// Render the `CREATE TABLE` statement.
    ///
    /// Columns appear in declaration order, one per line. A table with no
    /// columns renders an empty column list.
    ///
    /// Fails with [`SchemaError::UnknownType`] when a column's type code is
    /// outside the taxonomy; a column that cannot be named is never silently
    /// rendered blank.
    pub fn create_table_statement(&self) -> Result<String> {
        let clauses = self
            .table
            .columns()
            .iter()
            .map(|c| self.column_clause(c))
            .collect::<Result<Vec<String>>>()?;
        Ok(format!(
            "CREATE TABLE {}(\n{})\n",
            self.table.name(),
            clauses.join(",\n")
        ))
    }

    /// Render the primary-key and index statements, one per distinct index
    /// name in first-seen order.
    pub fn index_statements(&self) -> Vec<String> {
        let mut statements = Vec::new();
        for (name, group) in self.table.indexes_by_name() {
            if name == PRIMARY_KEY_NAME {
                // The primary-key path uses the raw grouped rows, not the
                // sequence-sorted ones.
                statements.push(self.primary_key_statement(&self.table.index_group(name)));
            } else {
                statements.push(self.index_statement(name, &group));
            }
        }
        statements
    }

    fn primary_key_statement(&self, group: &[&IndexDefinition]) -> String {
        let columns: Vec<&str> = group.iter().map(|i| i.column_name()).collect();
        format!(
            "ALTER TABLE {} ADD PRIMARY KEY ({})",
            self.table.name(),
            columns.join(",")
        )
    }

    fn index_statement(&self, name: &str, group: &[&IndexDefinition]) -> String {
        let columns: Vec<&str> = group.iter().map(|i| i.column_name()).collect();
        let unique = if group.first().is_some_and(|i| i.is_unique()) {
            "UNIQUE "
        } else {
            ""
        };
        format!(
            "CREATE {}INDEX {} ON {} ({})",
            unique,
            name,
            self.table.name(),
            columns.join(",")
        )
    }

    /// Render one column clause.
    ///
    /// An auto-increment column renders as `<name> SERIAL` and nothing else;
    /// type, size, nullability, and default are all suppressed.
    fn column_clause(&self, column: &ColumnDefinition) -> Result<String> {
        if column.is_auto_increment() {
            return Ok(format!("{} SERIAL", column.name()));
        }
        Ok(format!(
            "{} {}{}{}{}",
            column.name(),
            self.type_name(column)?,
            size_suffix(column),
            nullability_suffix(column),
            default_suffix(column),
        ))
    }

    /// The PostgreSQL type name for a column, with dialect substitutions
    /// applied.
    fn type_name(&self, column: &ColumnDefinition) -> Result<&'static str> {
        let ty = SqlType::from_code(column.type_code()).ok_or_else(|| SchemaError::UnknownType {
            table: self.table.name().to_string(),
            column: column.name().to_string(),
            code: column.type_code(),
        })?;
        Ok(match ty {
            SqlType::Bit | SqlType::TinyInt => "BOOLEAN",
            SqlType::Double => "FLOAT8",
            SqlType::LongVarchar => "TEXT",
            other => other.name(),
        })
    }
}

fn size_suffix(column: &ColumnDefinition) -> String {
    match SqlType::from_code(column.type_code()) {
        Some(SqlType::Char) | Some(SqlType::Varchar) => format!("({})", column.size()),
        Some(SqlType::Decimal) => format!("({},{})", column.size(), column.decimal_digits()),
        _ => String::new(),
    }
}

fn nullability_suffix(column: &ColumnDefinition) -> &'static str {
    if column.is_nullable() {
        ""
    } else {
        " NOT NULL"
    }
}

fn default_suffix(column: &ColumnDefinition) -> String {
    match column.default_value() {
        Some(value) => format!(" DEFAULT '{}'", value),
        None => String::new(),
    }
}
