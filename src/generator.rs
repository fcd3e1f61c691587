// SQL generation: assembles the structure script and the product import
// script. All statements are plain text; idempotence and foreign-key
// resolution are delegated to the database (INSERT IGNORE, scalar
// subquery on code_geo).

use crate::logger;
use crate::parser::products::ProductList;
use crate::parser::structure::StructureSet;

// Counts reported after an extract run (also serialized by --report-json).
#[derive(Debug, Clone, serde::Serialize)]
pub struct StructureReport {
    pub tables: usize,
    pub views: usize,
    pub constraints: usize,
}

// Counts reported after an import run.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ImportReport {
    pub rayons: usize,
    pub products: usize,
    pub dropped_rows: usize,
}

// Escape a value for use inside a quoted SQL literal: embedded single
// quotes are doubled. Absent values render as the unquoted literal NULL.
pub fn escape_sql_string(value: Option<&str>) -> String {
    match value {
        None => "NULL".to_string(),
        Some(v) => format!("'{}'", v.replace('\'', "''")),
    }
}

// Display label for a rayon. The sentinel DEFAULT gets the generic label.
pub fn rayon_label(code: &str) -> String {
    if code == "DEFAULT" {
        "Rayon Général".to_string()
    } else {
        format!("Rayon {}", code)
    }
}

// Assemble the structure-only SQL file: preamble, tables, views, then
// constraints (ALTER TABLE statements minus the AUTO_INCREMENT ones),
// each statement followed by exactly one blank line.
pub fn render_structure(
    set: &StructureSet,
    bar: Option<&indicatif::ProgressBar>,
) -> (String, StructureReport) {
    let mut out = String::new();

    out.push_str("-- Structure de la base de données\n");
    out.push_str("-- Généré automatiquement\n\n");
    out.push_str("SET SQL_MODE = \"NO_AUTO_VALUE_ON_ZERO\";\n");
    out.push_str("START TRANSACTION;\n");
    out.push_str("SET time_zone = \"+00:00\";\n\n");

    for table in &set.tables {
        push_statement(&mut out, table, bar);
    }
    for view in &set.views {
        push_statement(&mut out, view, bar);
    }

    out.push_str("-- Index et contraintes\n\n");

    let mut constraints = 0;
    for alter in &set.alters {
        // AUTO_INCREMENT alters belong to the data load, not the structure.
        if alter.contains("AUTO_INCREMENT") {
            logger::debug("RenderStructure: skipping AUTO_INCREMENT alter");
            continue;
        }
        push_statement(&mut out, alter, bar);
        constraints += 1;
    }

    out.push_str("COMMIT;\n");

    if let Some(b) = bar {
        b.finish();
    }

    let report = StructureReport {
        tables: set.tables.len(),
        views: set.views.len(),
        constraints,
    };
    (out, report)
}

fn push_statement(out: &mut String, stmt: &str, bar: Option<&indicatif::ProgressBar>) {
    out.push_str(stmt);
    out.push_str("\n\n");
    if let Some(b) = bar {
        b.inc(1);
    }
}

// Assemble the product import SQL: one transaction with idempotent rayon
// inserts (sorted by code) followed by article inserts in row order. The
// rayon id is resolved with a scalar subquery so rows can reference
// rayons created in the same transaction.
pub fn render_import(
    list: &ProductList,
    bar: Option<&indicatif::ProgressBar>,
) -> (String, ImportReport) {
    let mut statements = Vec::with_capacity(list.rayon_codes.len() + list.products.len() + 2);
    statements.push("START TRANSACTION;".to_string());

    for code in &list.rayon_codes {
        statements.push(format!(
            "INSERT IGNORE INTO stock_rayons (libelle, code_geo) VALUES ({}, {});",
            escape_sql_string(Some(&rayon_label(code))),
            escape_sql_string(Some(code))
        ));
        if let Some(b) = bar {
            b.inc(1);
        }
    }

    for product in &list.products {
        let rayon_id = format!(
            "(SELECT id FROM stock_rayons WHERE code_geo = {} LIMIT 1)",
            escape_sql_string(Some(&product.rayon_code))
        );
        statements.push(format!(
            "INSERT INTO stock_articles (designation, prix_achat, prix_vente, quantite_stock, seuil_alerte, rayon_id) VALUES ({}, {}, {}, 0, 5, {});",
            escape_sql_string(Some(&product.name)),
            product.purchase_price,
            product.sale_price,
            rayon_id
        ));
        if let Some(b) = bar {
            b.inc(1);
        }
    }

    statements.push("COMMIT;".to_string());

    if let Some(b) = bar {
        b.finish();
    }

    let report = ImportReport {
        rayons: list.rayon_codes.len(),
        products: list.products.len(),
        dropped_rows: list.dropped_rows,
    };
    (statements.join("\n"), report)
}
