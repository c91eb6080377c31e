//! The standard SQL type taxonomy and its canonical textual names.
//!
//! Column metadata carries an integral type code from the standard SQL type
//! taxonomy. [`SqlType`] is a closed, hand-maintained enumeration of that
//! taxonomy: every member maps to exactly one code and one canonical name,
//! with no runtime introspection involved. Codes outside the taxonomy resolve
//! to `None` and callers must treat "not found" as a possible outcome.

/// Type code reported for source column types that have no member in the
/// taxonomy. Deliberately unresolvable so that conversion fails loudly
/// instead of rendering blank type text.
pub const OTHER_TYPE_CODE: i32 = 1111;

/// A member of the standard SQL type taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SqlType {
    Bit,
    TinyInt,
    BigInt,
    LongVarBinary,
    VarBinary,
    Binary,
    LongVarchar,
    Char,
    Numeric,
    Decimal,
    Integer,
    SmallInt,
    Float,
    Real,
    Double,
    Varchar,
    Boolean,
    Date,
    Time,
    Timestamp,
    Blob,
    Clob,
}

impl SqlType {
    /// All taxonomy members, used to keep the code/name mappings exhaustive
    /// in tests.
    pub const ALL: [SqlType; 22] = [
        SqlType::Bit,
        SqlType::TinyInt,
        SqlType::BigInt,
        SqlType::LongVarBinary,
        SqlType::VarBinary,
        SqlType::Binary,
        SqlType::LongVarchar,
        SqlType::Char,
        SqlType::Numeric,
        SqlType::Decimal,
        SqlType::Integer,
        SqlType::SmallInt,
        SqlType::Float,
        SqlType::Real,
        SqlType::Double,
        SqlType::Varchar,
        SqlType::Boolean,
        SqlType::Date,
        SqlType::Time,
        SqlType::Timestamp,
        SqlType::Blob,
        SqlType::Clob,
    ];

    /// Resolve an integral type code to its taxonomy member.
    ///
    /// Returns `None` for codes outside the taxonomy.
    pub fn from_code(code: i32) -> Option<SqlType> {
        let ty = match code {
            -7 => SqlType::Bit,
            -6 => SqlType::TinyInt,
            -5 => SqlType::BigInt,
            -4 => SqlType::LongVarBinary,
            -3 => SqlType::VarBinary,
            -2 => SqlType::Binary,
            -1 => SqlType::LongVarchar,
            1 => SqlType::Char,
            2 => SqlType::Numeric,
            3 => SqlType::Decimal,
            4 => SqlType::Integer,
            5 => SqlType::SmallInt,
            6 => SqlType::Float,
            7 => SqlType::Real,
            8 => SqlType::Double,
            12 => SqlType::Varchar,
            16 => SqlType::Boolean,
            91 => SqlType::Date,
            92 => SqlType::Time,
            93 => SqlType::Timestamp,
            2004 => SqlType::Blob,
            2005 => SqlType::Clob,
            _ => return None,
        };
        Some(ty)
    }

    /// The integral type code of this taxonomy member.
    pub fn code(self) -> i32 {
        match self {
            SqlType::Bit => -7,
            SqlType::TinyInt => -6,
            SqlType::BigInt => -5,
            SqlType::LongVarBinary => -4,
            SqlType::VarBinary => -3,
            SqlType::Binary => -2,
            SqlType::LongVarchar => -1,
            SqlType::Char => 1,
            SqlType::Numeric => 2,
            SqlType::Decimal => 3,
            SqlType::Integer => 4,
            SqlType::SmallInt => 5,
            SqlType::Float => 6,
            SqlType::Real => 7,
            SqlType::Double => 8,
            SqlType::Varchar => 12,
            SqlType::Boolean => 16,
            SqlType::Date => 91,
            SqlType::Time => 92,
            SqlType::Timestamp => 93,
            SqlType::Blob => 2004,
            SqlType::Clob => 2005,
        }
    }

    /// The canonical textual name of this taxonomy member.
    pub fn name(self) -> &'static str {
        match self {
            SqlType::Bit => "BIT",
            SqlType::TinyInt => "TINYINT",
            SqlType::BigInt => "BIGINT",
            SqlType::LongVarBinary => "LONGVARBINARY",
            SqlType::VarBinary => "VARBINARY",
            SqlType::Binary => "BINARY",
            SqlType::LongVarchar => "LONGVARCHAR",
            SqlType::Char => "CHAR",
            SqlType::Numeric => "NUMERIC",
            SqlType::Decimal => "DECIMAL",
            SqlType::Integer => "INTEGER",
            SqlType::SmallInt => "SMALLINT",
            SqlType::Float => "FLOAT",
            SqlType::Real => "REAL",
            SqlType::Double => "DOUBLE",
            SqlType::Varchar => "VARCHAR",
            SqlType::Boolean => "BOOLEAN",
            SqlType::Date => "DATE",
            SqlType::Time => "TIME",
            SqlType::Timestamp => "TIMESTAMP",
            SqlType::Blob => "BLOB",
            SqlType::Clob => "CLOB",
        }
    }

    /// Map a MySQL `INFORMATION_SCHEMA` `DATA_TYPE` string to its taxonomy
    /// member, the way the MySQL driver metadata reports these types.
    ///
    /// Returns `None` for MySQL types with no taxonomy member (spatial types,
    /// for example).
    pub fn from_mysql_name(data_type: &str) -> Option<SqlType> {
        let ty = match data_type.to_lowercase().as_str() {
            "bit" => SqlType::Bit,
            "tinyint" => SqlType::TinyInt,
            "smallint" | "year" => SqlType::SmallInt,
            "mediumint" | "int" | "integer" => SqlType::Integer,
            "bigint" => SqlType::BigInt,
            "float" => SqlType::Real,
            "double" | "double precision" | "real" => SqlType::Double,
            "decimal" | "numeric" | "dec" | "fixed" => SqlType::Decimal,
            "char" | "enum" | "set" => SqlType::Char,
            "varchar" => SqlType::Varchar,
            "tinytext" | "text" | "mediumtext" | "longtext" | "json" => SqlType::LongVarchar,
            "date" => SqlType::Date,
            "time" => SqlType::Time,
            "datetime" | "timestamp" => SqlType::Timestamp,
            "binary" => SqlType::Binary,
            "varbinary" => SqlType::VarBinary,
            "tinyblob" | "blob" | "mediumblob" | "longblob" => SqlType::LongVarBinary,
            _ => return None,
        };
        Some(ty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_roundtrip_is_exhaustive() {
        for ty in SqlType::ALL {
            assert_eq!(SqlType::from_code(ty.code()), Some(ty));
        }
    }

    #[test]
    fn test_unknown_codes_resolve_to_none() {
        assert_eq!(SqlType::from_code(0), None);
        assert_eq!(SqlType::from_code(OTHER_TYPE_CODE), None);
        assert_eq!(SqlType::from_code(9999), None);
    }

    #[test]
    fn test_canonical_names() {
        assert_eq!(SqlType::Integer.name(), "INTEGER");
        assert_eq!(SqlType::Char.name(), "CHAR");
        assert_eq!(SqlType::Varchar.name(), "VARCHAR");
        assert_eq!(SqlType::Decimal.name(), "DECIMAL");
        assert_eq!(SqlType::LongVarchar.name(), "LONGVARCHAR");
    }

    #[test]
    fn test_from_mysql_name() {
        assert_eq!(SqlType::from_mysql_name("int"), Some(SqlType::Integer));
        assert_eq!(SqlType::from_mysql_name("INT"), Some(SqlType::Integer));
        assert_eq!(SqlType::from_mysql_name("varchar"), Some(SqlType::Varchar));
        assert_eq!(
            SqlType::from_mysql_name("longtext"),
            Some(SqlType::LongVarchar)
        );
        assert_eq!(SqlType::from_mysql_name("tinyint"), Some(SqlType::TinyInt));
        assert_eq!(SqlType::from_mysql_name("datetime"), Some(SqlType::Timestamp));
        assert_eq!(SqlType::from_mysql_name("geometry"), None);
    }
}
