// Structure parser: pulls CREATE TABLE, view and ALTER TABLE statements
// out of a full SQL dump. Matching is lazy to the nearest ';', which is
// only correct because statement bodies in this dialect never contain an
// embedded semicolon (no triggers, no procedures in these dumps).

use crate::logger;
use regex::Regex;

// Extracted structural statements, in source order within each kind.
#[derive(Debug, Default)]
pub struct StructureSet {
    pub tables: Vec<String>,
    pub views: Vec<String>,
    pub alters: Vec<String>,
}

impl StructureSet {
    pub fn statement_count(&self) -> usize {
        self.tables.len() + self.views.len() + self.alters.len()
    }
}

pub struct StructureParser {
    table_re: Regex,
    view_re: Regex,
    alter_re: Regex,
}

impl StructureParser {
    // Build regexes once for reuse. The anchors are case-sensitive on
    // purpose: mysqldump emits these keywords in upper case, and the lazy
    // `.*?;` with `(?s)` spans newlines but stops at the first terminator
    // after the anchor instead of swallowing the next statement.
    pub fn new() -> Self {
        let table_re = Regex::new(r"(?s)CREATE TABLE.*?;").expect("valid table regex");
        let view_re = Regex::new(r"(?s)CREATE ALGORITHM.*?;").expect("valid view regex");
        let alter_re = Regex::new(r"(?s)ALTER TABLE.*?;").expect("valid alter regex");
        Self {
            table_re,
            view_re,
            alter_re,
        }
    }

    // Extract all structural statements from the dump text.
    pub fn extract(&self, content: &str) -> StructureSet {
        let tables = collect_matches(&self.table_re, content);
        let views = collect_matches(&self.view_re, content);
        let alters = collect_matches(&self.alter_re, content);

        logger::debug(&format!(
            "Extract: found {} tables, {} views, {} alters",
            tables.len(),
            views.len(),
            alters.len()
        ));

        StructureSet {
            tables,
            views,
            alters,
        }
    }
}

impl Default for StructureParser {
    fn default() -> Self {
        Self::new()
    }
}

// Non-overlapping matches in source order.
fn collect_matches(re: &Regex, content: &str) -> Vec<String> {
    re.find_iter(content).map(|m| m.as_str().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const DUMP: &str = "\
-- phpMyAdmin SQL Dump

CREATE TABLE `stock_rayons` (
  `id` int(11) NOT NULL,
  `libelle` varchar(100) NOT NULL,
  `code_geo` varchar(20) NOT NULL
) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4;

INSERT INTO `stock_rayons` (`id`, `libelle`) VALUES (1, 'Rayon A');

CREATE TABLE `stock_articles` (
  `id` int(11) NOT NULL,
  `designation` varchar(255) NOT NULL
) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4;

CREATE ALGORITHM=UNDEFINED DEFINER=`root`@`localhost` SQL SECURITY DEFINER VIEW `v_stock` AS
SELECT `a`.`designation` FROM `stock_articles` AS `a`;

ALTER TABLE `stock_rayons`
  ADD PRIMARY KEY (`id`),
  ADD UNIQUE KEY `code_geo` (`code_geo`);

ALTER TABLE `stock_rayons`
  MODIFY `id` int(11) NOT NULL AUTO_INCREMENT;
";

    #[test]
    fn extracts_each_statement_kind() {
        let set = StructureParser::new().extract(DUMP);
        assert_eq!(set.tables.len(), 2);
        assert_eq!(set.views.len(), 1);
        assert_eq!(set.alters.len(), 2);
        assert_eq!(set.statement_count(), 5);
    }

    #[test]
    fn each_match_stops_at_nearest_semicolon() {
        let set = StructureParser::new().extract(DUMP);
        for stmt in set.tables.iter().chain(&set.views).chain(&set.alters) {
            assert!(stmt.ends_with(';'), "statement must end with ';'");
            assert_eq!(
                stmt.matches(';').count(),
                1,
                "one terminator per statement: {stmt}"
            );
        }
        // The first table must not swallow the INSERT between the two
        // CREATE TABLE blocks.
        assert!(!set.tables[0].contains("INSERT INTO"));
        assert!(set.tables[0].contains("stock_rayons"));
        assert!(set.tables[1].contains("stock_articles"));
    }

    #[test]
    fn matches_span_newlines() {
        let set = StructureParser::new().extract(DUMP);
        assert!(set.tables[0].contains("`code_geo` varchar(20)"));
        assert!(set.alters[0].contains("ADD UNIQUE KEY"));
    }

    #[test]
    fn source_order_is_preserved_within_kind() {
        let set = StructureParser::new().extract(DUMP);
        assert!(set.alters[0].contains("ADD PRIMARY KEY"));
        assert!(set.alters[1].contains("AUTO_INCREMENT"));
    }

    #[test]
    fn anchors_are_case_sensitive() {
        let set = StructureParser::new().extract("create table t (id int);");
        assert!(set.tables.is_empty());
    }

    #[test]
    fn absent_kinds_are_empty_not_errors() {
        let set = StructureParser::new().extract("SELECT 1;\n");
        assert!(set.tables.is_empty());
        assert!(set.views.is_empty());
        assert!(set.alters.is_empty());
        assert_eq!(set.statement_count(), 0);
    }
}
