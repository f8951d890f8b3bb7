use crate::schema::{ColumnType, TableSchema};

/// Generate CREATE TABLE SQL for a table schema
pub fn generate_create_table(schema: &TableSchema) -> String {
    let mut sql = format!("CREATE TABLE {} (\n", schema.name);
    let mut columns = Vec::new();
    let single_pk = match schema.primary_key {
        [pk] => Some(*pk),
        _ => None,
    };

    for col in schema.columns {
        let sql_type = match col.col_type {
            ColumnType::Integer => "INTEGER",
            ColumnType::Real => "REAL",
            ColumnType::Text => "TEXT",
            ColumnType::Json => "TEXT",
        };

        let pk = if single_pk == Some(col.name) { " PRIMARY KEY" } else { "" };
        let null_constraint = if !col.nullable && pk.is_empty() { " NOT NULL" } else { "" };

        columns.push(format!(
            "    {} {}{}{}",
            col.name, sql_type, pk, null_constraint
        ));
    }

    if schema.primary_key.len() > 1 {
        columns.push(format!("    PRIMARY KEY ({})", schema.primary_key.join(", ")));
    }

    for fk in schema.foreign_keys {
        columns.push(format!(
            "    FOREIGN KEY ({}) REFERENCES {}({})",
            fk.column, fk.references_table, fk.references_column
        ));
    }

    sql.push_str(&columns.join(",\n"));
    sql.push_str("\n)");

    sql
}

/// Generate CREATE INDEX statements for foreign key columns
pub fn generate_indexes(schema: &TableSchema) -> Vec<String> {
    schema
        .foreign_keys
        .iter()
        .filter(|fk| schema.primary_key.first() != Some(&fk.column))
        .map(|fk| {
            format!(
                "CREATE INDEX idx_{}_{} ON {}({})",
                schema.name, fk.column, schema.name, fk.column
            )
        })
        .collect()
}

/// Generate the INSERT statement used for bulk loading
pub fn generate_insert(schema: &TableSchema) -> String {
    let columns = schema.column_names();
    let placeholders: Vec<&str> = columns.iter().map(|_| "?").collect();
    format!(
        "INSERT OR REPLACE INTO {} ({}) VALUES ({})",
        schema.name,
        columns.join(", "),
        placeholders.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::tables::{CONSTELLATION_LINKS, RENDER_SOLAR_SYSTEMS, SOLAR_SYSTEMS, STARGATES};

    #[test]
    fn test_generate_create_table() {
        let sql = generate_create_table(&SOLAR_SYSTEMS);
        assert!(sql.contains("CREATE TABLE SolarSystems"));
        assert!(sql.contains("Id INTEGER PRIMARY KEY"));
        assert!(sql.contains("SecurityStatus REAL"));
        assert!(sql.contains("SecurityClass TEXT"));
        assert!(sql.contains("FOREIGN KEY (ConstellationId) REFERENCES Constellations(Id)"));
    }

    #[test]
    fn test_required_columns() {
        let sql = generate_create_table(&STARGATES);
        assert!(sql.contains("SourceSystemId INTEGER NOT NULL"));
        assert!(sql.contains("DestinationStargateId INTEGER,"));
    }

    #[test]
    fn test_composite_primary_key() {
        let sql = generate_create_table(&CONSTELLATION_LINKS);
        assert!(sql.contains("SourceConstellationId INTEGER NOT NULL"));
        assert!(sql.contains("PRIMARY KEY (SourceConstellationId, DestinationConstellationId)"));
    }

    #[test]
    fn test_render_entity_table() {
        let sql = generate_create_table(&RENDER_SOLAR_SYSTEMS);
        assert!(sql.contains("CREATE TABLE RenderSolarSystems"));
        assert!(sql.contains("RenderCoords TEXT"));
    }

    #[test]
    fn test_generate_indexes() {
        let indexes = generate_indexes(&SOLAR_SYSTEMS);
        assert!(indexes.iter().any(|i| i.contains("idx_SolarSystems_RegionId")));
        assert!(indexes.iter().any(|i| i.contains("idx_SolarSystems_ConstellationId")));

        // Leading primary key column is already indexed
        let link_indexes = generate_indexes(&CONSTELLATION_LINKS);
        assert_eq!(link_indexes.len(), 1);
        assert!(link_indexes[0].contains("DestinationConstellationId"));
    }

    #[test]
    fn test_generate_insert() {
        assert_eq!(
            generate_insert(&STARGATES),
            "INSERT OR REPLACE INTO Stargates (Id, SourceSystemId, DestinationSystemId, DestinationStargateId) VALUES (?, ?, ?, ?)"
        );
    }
}
