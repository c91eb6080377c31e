//! Schema model for tables, columns, and indexes.
//!
//! These types provide a dialect-agnostic representation of a table's
//! structure as reported by source database metadata. A [`TableDefinition`]
//! is accumulated through a [`TableBuilder`] during extraction and is
//! immutable afterwards; all derived views are computed on demand.

use regex::Regex;

use crate::error::Result;

/// Sentinel index name denoting the primary key.
pub const PRIMARY_KEY_NAME: &str = "PRIMARY";

/// One table column as reported by source metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDefinition {
    name: String,
    type_code: i32,
    nullable: bool,
    size: u32,
    decimal_digits: u32,
    default_value: Option<String>,
    auto_increment: bool,
}

impl ColumnDefinition {
    /// Create a column definition.
    ///
    /// An empty default value is normalized to "no default".
    pub fn new(
        name: impl Into<String>,
        type_code: i32,
        nullable: bool,
        size: u32,
        decimal_digits: u32,
        default_value: Option<String>,
        auto_increment: bool,
    ) -> Self {
        Self {
            name: name.into(),
            type_code,
            nullable,
            size,
            decimal_digits,
            default_value: default_value.filter(|v| !v.is_empty()),
            auto_increment,
        }
    }

    /// The column's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The column's integral type code from the standard SQL type taxonomy.
    pub fn type_code(&self) -> i32 {
        self.type_code
    }

    /// Whether the column allows NULL.
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// The column's size; meaningful for character and decimal types only.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// The column's decimal digits; meaningful for decimal types only.
    pub fn decimal_digits(&self) -> u32 {
        self.decimal_digits
    }

    /// The column's default value, if any.
    pub fn default_value(&self) -> Option<&str> {
        self.default_value.as_deref()
    }

    /// Whether the column's values are assigned by the database on insertion.
    pub fn is_auto_increment(&self) -> bool {
        self.auto_increment
    }
}

/// One (index-name, column, position) tuple as reported by source metadata.
///
/// A single logical index spanning several columns is represented as multiple
/// values sharing the same name, one per participating column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexDefinition {
    name: Option<String>,
    column_name: String,
    unique: bool,
    sequence_number: i32,
}

impl IndexDefinition {
    /// Create an index definition from a raw metadata row.
    ///
    /// Uniqueness is the negation of the source's "non-unique" flag.
    pub fn new(
        name: Option<String>,
        column_name: impl Into<String>,
        non_unique: bool,
        sequence_number: i32,
    ) -> Self {
        Self {
            name,
            column_name: column_name.into(),
            unique: !non_unique,
            sequence_number,
        }
    }

    /// The index name; `None` when the source reported no name.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The name of the column this row covers.
    pub fn column_name(&self) -> &str {
        &self.column_name
    }

    /// Whether the index is unique.
    pub fn is_unique(&self) -> bool {
        self.unique
    }

    /// The column's 1-based position within a multi-column index.
    pub fn sequence_number(&self) -> i32 {
        self.sequence_number
    }
}

/// Accumulates columns and indexes during extraction, then produces an
/// immutable [`TableDefinition`].
#[derive(Debug)]
pub struct TableBuilder {
    name: String,
    key_pattern: Regex,
    columns: Vec<ColumnDefinition>,
    indexes: Vec<IndexDefinition>,
}

impl TableBuilder {
    /// Start building a table definition.
    ///
    /// The surrogate-key pattern must match a column name in full, so it is
    /// anchored here; an invalid pattern is rejected up front.
    pub fn new(name: impl Into<String>, key_pattern: &str) -> Result<Self> {
        let key_pattern = Regex::new(&format!("^(?:{})$", key_pattern))?;
        Ok(Self {
            name: name.into(),
            key_pattern,
            columns: Vec::new(),
            indexes: Vec::new(),
        })
    }

    /// Append a column; insertion order is declaration order.
    pub fn add_column(&mut self, column: ColumnDefinition) -> &mut Self {
        self.columns.push(column);
        self
    }

    /// Append one raw index row.
    ///
    /// Rows with no column name are silently dropped, never added.
    pub fn add_index(
        &mut self,
        name: Option<String>,
        column_name: Option<String>,
        non_unique: bool,
        sequence_number: i32,
    ) -> &mut Self {
        if let Some(column_name) = column_name.filter(|c| !c.is_empty()) {
            self.indexes
                .push(IndexDefinition::new(name, column_name, non_unique, sequence_number));
        }
        self
    }

    /// Finish accumulation.
    pub fn build(self) -> TableDefinition {
        TableDefinition {
            name: self.name,
            key_pattern: self.key_pattern,
            columns: self.columns,
            indexes: self.indexes,
        }
    }
}

/// A table's structure: name, ordered columns, and ordered index rows.
#[derive(Debug, Clone)]
pub struct TableDefinition {
    name: String,
    key_pattern: Regex,
    columns: Vec<ColumnDefinition>,
    indexes: Vec<IndexDefinition>,
}

impl TableDefinition {
    /// The table's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The columns in declaration order.
    pub fn columns(&self) -> &[ColumnDefinition] {
        &self.columns
    }

    /// The raw index rows in insertion order.
    pub fn indexes(&self) -> &[IndexDefinition] {
        &self.indexes
    }

    /// The column names in declaration order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name()).collect()
    }

    /// The name of the table's surrogate key: the last column, by declaration
    /// order, whose name fully matches the surrogate-key pattern.
    ///
    /// Last match wins when several columns match.
    pub fn surrogate_key_name(&self) -> Option<&str> {
        let mut key_name = None;
        for column in &self.columns {
            if self.key_pattern.is_match(column.name()) {
                key_name = Some(column.name());
            }
        }
        key_name
    }

    /// The index rows whose name equals `name`, in insertion order.
    ///
    /// Rows without a name never match; no match yields an empty list.
    pub fn index_group(&self, name: &str) -> Vec<&IndexDefinition> {
        if name.is_empty() {
            return Vec::new();
        }
        self.indexes
            .iter()
            .filter(|i| i.name() == Some(name))
            .collect()
    }

    /// The index rows whose name equals `name`, sorted by ascending sequence
    /// number.
    ///
    /// The sort is stable: rows with equal sequence numbers keep their
    /// insertion order.
    pub fn sorted_index_group(&self, name: &str) -> Vec<&IndexDefinition> {
        let mut group = self.index_group(name);
        group.sort_by(|left, right| left.sequence_number().cmp(&right.sequence_number()));
        group
    }

    /// Every distinct index name paired with its sorted group, in first-seen
    /// order.
    ///
    /// This is the view DDL generation iterates; first-seen order keeps the
    /// emitted statement order deterministic.
    pub fn indexes_by_name(&self) -> Vec<(&str, Vec<&IndexDefinition>)> {
        let mut groups: Vec<(&str, Vec<&IndexDefinition>)> = Vec::new();
        for index in &self.indexes {
            let Some(name) = index.name().filter(|n| !n.is_empty()) else {
                continue;
            };
            if !groups.iter().any(|(seen, _)| *seen == name) {
                groups.push((name, self.sorted_index_group(name)));
            }
        }
        groups
    }
}
