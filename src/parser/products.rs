// Product list parser: turns tab- or multi-space-delimited rows into
// product entries plus the set of rayon codes they reference.
// We intentionally keep parsing simple (no CSV crate, no full quoting
// rules) to match the flat files the stock exports actually produce.

use crate::logger;
use crate::parser::Product;
use regex::Regex;
use std::collections::BTreeSet;

// Result of one parse run. `rayon_codes` is a sorted set so emission
// order falls out of iteration; products keep source row order.
#[derive(Debug, Default)]
pub struct ProductList {
    pub products: Vec<Product>,
    pub rayon_codes: BTreeSet<String>,
    pub dropped_rows: usize,
}

pub struct ProductParser {
    space_split_re: Regex,
    price_junk_re: Regex,
}

impl ProductParser {
    // Build regexes once for reuse.
    pub fn new() -> Self {
        let space_split_re = Regex::new(r"\s{2,}").expect("valid field delimiter regex");
        let price_junk_re = Regex::new(r"[^\d.]").expect("valid price cleanup regex");
        Self {
            space_split_re,
            price_junk_re,
        }
    }

    // Parse the whole product file. If a progress bar is provided, we
    // increment it by bytes consumed per line.
    pub fn parse(&self, content: &str, bar: Option<&indicatif::ProgressBar>) -> ProductList {
        let lines: Vec<&str> = content.lines().collect();

        // Skip the header row if the first line looks like one.
        let start_index = match lines.first() {
            Some(first) if first.contains("Article") || first.contains("PRIX") => 1,
            _ => 0,
        };
        if start_index == 1 {
            logger::debug("Parse: skipping header line");
        }

        let mut list = ProductList::default();

        for (line_no, raw) in lines.iter().enumerate().skip(start_index) {
            if let Some(b) = bar {
                b.inc(raw.len() as u64 + 1);
            }

            let line = raw.trim();
            if line.is_empty() {
                continue;
            }

            let fields = self.split_fields(line);
            if fields.len() < 3 {
                // Short rows are dropped, not reported. We still count
                // them so the run report can surface the number.
                list.dropped_rows += 1;
                logger::debug(&format!(
                    "Parse: dropped row {} ({} fields)",
                    line_no + 1,
                    fields.len()
                ));
                continue;
            }

            let rayon_code = match fields.get(3) {
                Some(code) => code.trim().to_string(),
                None => "DEFAULT".to_string(),
            };
            list.rayon_codes.insert(rayon_code.clone());
            list.products.push(Product {
                name: fields[0].trim().to_string(),
                purchase_price: self.parse_price(fields[1]),
                sale_price: self.parse_price(fields[2]),
                rayon_code,
            });
        }

        if let Some(b) = bar {
            b.finish();
        }

        logger::debug(&format!(
            "Parse: {} products, {} rayons, {} rows dropped",
            list.products.len(),
            list.rayon_codes.len(),
            list.dropped_rows
        ));

        list
    }

    // Tab is the primary delimiter; runs of two-or-more whitespace are the
    // fallback for hand-aligned exports.
    fn split_fields<'a>(&self, line: &'a str) -> Vec<&'a str> {
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() >= 3 {
            return fields;
        }
        self.space_split_re.split(line).collect()
    }

    // Strip everything that is not a digit or '.'. An empty result means
    // the price defaults to 0. The cleaned string is used verbatim, so
    // "$1,234.56" becomes "1234.56" with no rounding.
    fn parse_price(&self, raw: &str) -> String {
        let clean = self.price_junk_re.replace_all(raw, "");
        if clean.is_empty() {
            "0".to_string()
        } else {
            clean.into_owned()
        }
    }
}

impl Default for ProductParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_header_containing_article_or_prix() {
        let parser = ProductParser::new();
        let list = parser.parse("Article\tPRIX ACHAT\tPRIX VENTE\tZONE\nWidget\t5.00\t9.99\tA1\n", None);
        assert_eq!(list.products.len(), 1);
        assert_eq!(list.products[0].name, "Widget");

        let list = parser.parse("PRIX\tfoo\tbar\nWidget\t5.00\t9.99\n", None);
        assert_eq!(list.products.len(), 1);
    }

    #[test]
    fn no_header_means_first_line_is_data() {
        let list = ProductParser::new().parse("Widget\t5.00\t9.99\tA1\n", None);
        assert_eq!(list.products.len(), 1);
    }

    #[test]
    fn falls_back_to_multi_space_delimiter() {
        let list = ProductParser::new().parse("Widget    5.00   9.99  A1\n", None);
        assert_eq!(list.products.len(), 1);
        let p = &list.products[0];
        assert_eq!(p.name, "Widget");
        assert_eq!(p.purchase_price, "5.00");
        assert_eq!(p.sale_price, "9.99");
        assert_eq!(p.rayon_code, "A1");
    }

    #[test]
    fn short_rows_are_dropped_and_counted() {
        let list = ProductParser::new().parse("Widget\t9.99\nGadget\t3\t6\n", None);
        assert_eq!(list.products.len(), 1);
        assert_eq!(list.products[0].name, "Gadget");
        assert_eq!(list.dropped_rows, 1);
    }

    #[test]
    fn missing_fourth_field_defaults_to_default_rayon() {
        let list = ProductParser::new().parse("Widget\t5.00\t9.99\n", None);
        assert_eq!(list.products[0].rayon_code, "DEFAULT");
        assert!(list.rayon_codes.contains("DEFAULT"));
    }

    #[test]
    fn price_cleaning() {
        let parser = ProductParser::new();
        assert_eq!(parser.parse_price("$1,234.56"), "1234.56");
        assert_eq!(parser.parse_price(""), "0");
        assert_eq!(parser.parse_price("N/A"), "0");
        assert_eq!(parser.parse_price("3"), "3");
        // Known fragility: inner whitespace merges the digits.
        assert_eq!(parser.parse_price("12 34"), "1234");
    }

    #[test]
    fn rayon_codes_are_deduplicated_and_sorted() {
        let input = "P1\t1\t2\tB\nP2\t1\t2\tA\nP3\t1\t2\tB\nP4\t1\t2\n";
        let list = ProductParser::new().parse(input, None);
        let codes: Vec<&str> = list.rayon_codes.iter().map(String::as_str).collect();
        assert_eq!(codes, ["A", "B", "DEFAULT"]);
        assert_eq!(list.products.len(), 4);
    }

    #[test]
    fn blank_lines_are_ignored() {
        let list = ProductParser::new().parse("Widget\t5.00\t9.99\n\n\nGadget\t3\t6\n", None);
        assert_eq!(list.products.len(), 2);
        assert_eq!(list.dropped_rows, 0);
    }
}
