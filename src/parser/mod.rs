// Parser module: structure statement extraction and product row parsing.

pub mod products;
pub mod structure;

// A product row parsed from the flat file. Prices are kept as cleaned
// strings because they are embedded verbatim (unquoted) in the SQL output.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub name: String,
    pub purchase_price: String,
    pub sale_price: String,
    pub rayon_code: String,
}
