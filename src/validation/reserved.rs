//! Reserved word catalogs
//!
//! Names that would break generated code: Java keywords, class names the
//! generated application already uses, and SQL reserved words per database.
//! All lookups are case-insensitive.

use crate::models::DatabaseType;

const JAVA_KEYWORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "false", "final",
    "finally", "float", "for", "goto", "if", "implements", "import", "instanceof", "int",
    "interface", "long", "native", "new", "null", "package", "private", "protected", "public",
    "record", "return", "short", "static", "strictfp", "super", "switch", "synchronized",
    "this", "throw", "throws", "transient", "true", "try", "var", "void", "volatile", "while",
    "yield",
];

/// Class names generated or imported by every application
const RESERVED_CLASS_NAMES: &[&str] = &[
    "Application", "Async", "Audit", "Boolean", "Cache", "Class", "Configuration", "Constants",
    "Database", "Date", "Double", "Entity", "Error", "Exception", "Float", "Instant", "Integer",
    "List", "Locale", "Logging", "Long", "Map", "Metrics", "Object", "Optional", "Page",
    "Pageable", "Repository", "Resource", "Security", "Service", "Set", "String", "System",
    "Thread", "Void",
];

/// Words reserved by every SQL dialect we generate for
const SQL_COMMON: &[&str] = &[
    "ALL", "ALTER", "AND", "ANY", "AS", "ASC", "BETWEEN", "BY", "CASE", "CHECK", "COLUMN",
    "CONSTRAINT", "CREATE", "CROSS", "CURRENT_DATE", "CURRENT_TIME", "CURRENT_TIMESTAMP",
    "CURRENT_USER", "DEFAULT", "DELETE", "DESC", "DISTINCT", "DROP", "ELSE", "END", "EXISTS",
    "FALSE", "FOR", "FOREIGN", "FROM", "FULL", "GRANT", "GROUP", "HAVING", "IN", "INNER",
    "INSERT", "INTERSECT", "INTO", "IS", "JOIN", "LEFT", "LIKE", "NOT", "NULL", "ON", "OR",
    "ORDER", "OUTER", "PRIMARY", "REFERENCES", "RIGHT", "SELECT", "SET", "TABLE", "THEN", "TO",
    "TRUE", "UNION", "UNIQUE", "UPDATE", "USER", "USING", "VALUES", "WHEN", "WHERE", "WITH",
];

const SQL_MYSQL: &[&str] = &[
    "ACCESSIBLE", "CHANGE", "DATABASE", "DATABASES", "DELAYED", "DUAL", "FULLTEXT", "INDEX",
    "INTERVAL", "KEY", "KEYS", "KILL", "LIMIT", "LOCK", "MATCH", "OPTION", "RANGE", "READ",
    "RENAME", "REPLACE", "SCHEMA", "SHOW", "SPATIAL", "STATUS", "WRITE",
];

const SQL_POSTGRESQL: &[&str] = &[
    "ANALYSE", "ANALYZE", "ARRAY", "ASYMMETRIC", "BOTH", "CAST", "COLLATE", "DEFERRABLE", "DO",
    "EXCEPT", "FETCH", "ILIKE", "LATERAL", "LEADING", "LIMIT", "LOCALTIME", "OFFSET", "ONLY",
    "PLACING", "RETURNING", "SESSION_USER", "SYMMETRIC", "TRAILING", "VARIADIC", "WINDOW",
];

const SQL_ORACLE: &[&str] = &[
    "ACCESS", "AUDIT", "CLUSTER", "COMMENT", "COMPRESS", "EXCLUSIVE", "FILE", "IDENTIFIED",
    "INCREMENT", "INDEX", "LEVEL", "LOCK", "LONG", "MODE", "NUMBER", "OPTION", "PRIOR", "RAW",
    "RESOURCE", "ROW", "ROWID", "ROWNUM", "SESSION", "SIZE", "START", "SYNONYM", "SYSDATE",
    "UID", "VIEW",
];

const SQL_MSSQL: &[&str] = &[
    "BACKUP", "BROWSE", "BULK", "CLUSTERED", "COMPUTE", "DATABASE", "DBCC", "DENY", "DUMP",
    "FILE", "FILLFACTOR", "HOLDLOCK", "IDENTITY", "INDEX", "KEY", "KILL", "NOCHECK", "OPEN",
    "PERCENT", "PLAN", "PRINT", "PROC", "PUBLIC", "RULE", "SCHEMA", "TOP", "TRAN", "VIEW",
];

const CQL_CASSANDRA: &[&str] = &[
    "ADD", "ALLOW", "ALTER", "AND", "APPLY", "ASC", "AUTHORIZE", "BATCH", "BEGIN", "BY",
    "COLUMNFAMILY", "CREATE", "DELETE", "DESC", "DESCRIBE", "DROP", "ENTRIES", "EXECUTE",
    "FROM", "FULL", "GRANT", "IF", "IN", "INDEX", "INFINITY", "INSERT", "INTO", "KEYSPACE",
    "LIMIT", "MODIFY", "NAN", "NORECURSIVE", "NOT", "NULL", "OF", "ON", "OR", "ORDER",
    "PRIMARY", "RENAME", "REPLACE", "REVOKE", "SCHEMA", "SELECT", "SET", "TABLE", "TO",
    "TOKEN", "TRUNCATE", "UNLOGGED", "UPDATE", "USE", "USING", "VIEW", "WHERE", "WITH",
];

fn contains_ignore_case(words: &[&str], name: &str) -> bool {
    words.iter().any(|word| word.eq_ignore_ascii_case(name))
}

pub fn is_java_keyword(name: &str) -> bool {
    contains_ignore_case(JAVA_KEYWORDS, name)
}

/// Entity names must be neither Java keywords nor reserved class names
pub fn is_reserved_entity_name(name: &str) -> bool {
    is_java_keyword(name) || contains_ignore_case(RESERVED_CLASS_NAMES, name)
}

pub fn is_reserved_field_name(name: &str) -> bool {
    is_java_keyword(name)
}

/// Reserved words of the database's query language; document stores have none
pub fn reserved_table_words(database: DatabaseType) -> &'static [&'static [&'static str]] {
    match database {
        DatabaseType::Mysql | DatabaseType::Mariadb => &[SQL_COMMON, SQL_MYSQL],
        DatabaseType::Postgresql => &[SQL_COMMON, SQL_POSTGRESQL],
        DatabaseType::Oracle => &[SQL_COMMON, SQL_ORACLE],
        DatabaseType::Mssql => &[SQL_COMMON, SQL_MSSQL],
        DatabaseType::Cassandra => &[CQL_CASSANDRA],
        DatabaseType::Mongodb | DatabaseType::Couchbase | DatabaseType::Neo4j => &[],
    }
}

pub fn is_reserved_table_name(name: &str, database: DatabaseType) -> bool {
    reserved_table_words(database)
        .iter()
        .any(|words| contains_ignore_case(words, name))
}
