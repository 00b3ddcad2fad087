//! Fusion vocabularies
//!
//! Keyword sets and mapping tables consulted by the domain classifier and the
//! fallback tier of the attribute resolvers. These are data, not algorithm:
//! the compiled defaults below can be replaced list by list from the
//! `[vocabulary]` config section. Only lookup order matters to fusion:
//! - labels are always scanned in detector order
//! - brands are tried in registry order
//!
//! Label matching is case-insensitive whole-name equality; brand matching is a
//! case-insensitive substring search over text detections.

use crate::types::{Domain, RawTextDetection};
use serde::{Deserialize, Serialize};

/// Registered brand with its display form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandEntry {
    /// Name searched for in detected text
    pub name: String,
    /// Canonical display form (e.g. "Nike®")
    pub display: String,
}

impl BrandEntry {
    fn new(name: &str, display: &str) -> Self {
        Self {
            name: name.to_string(),
            display: display.to_string(),
        }
    }
}

/// Label keyword → canonical piece type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceTypeMapping {
    pub keyword: String,
    pub canonical: String,
}

impl PieceTypeMapping {
    fn new(keyword: &str, canonical: &str) -> Self {
        Self {
            keyword: keyword.to_string(),
            canonical: canonical.to_string(),
        }
    }
}

/// Complete vocabulary used by one engine instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    /// Domain used when neither classifier nor labels decide
    pub default_domain: Domain,
    pub apparel_keywords: Vec<String>,
    pub footwear_keywords: Vec<String>,
    pub colors: Vec<String>,
    pub materials: Vec<String>,
    pub brands: Vec<BrandEntry>,
    pub apparel_piece_types: Vec<PieceTypeMapping>,
    pub footwear_piece_types: Vec<PieceTypeMapping>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            default_domain: Domain::Apparel,
            apparel_keywords: strings(&[
                "Clothing", "Apparel", "Shirt", "T-Shirt", "Blouse", "Sweater",
                "Sweatshirt", "Hoodie", "Jacket", "Coat", "Blazer", "Dress", "Skirt",
                "Pants", "Jeans", "Shorts", "Suit", "Vest",
            ]),
            footwear_keywords: strings(&[
                "Footwear", "Shoe", "Shoes", "Sneaker", "Athletic Shoe", "Running Shoe",
                "Boot", "Sandal", "High Heel", "Loafer", "Slipper",
            ]),
            colors: strings(&[
                "Black", "White", "Gray", "Grey", "Red", "Blue", "Navy", "Green",
                "Yellow", "Orange", "Purple", "Pink", "Brown", "Beige", "Tan", "Cream",
                "Gold", "Silver", "Maroon", "Teal",
            ]),
            materials: strings(&[
                "Cotton", "Denim", "Leather", "Suede", "Wool", "Silk", "Linen",
                "Polyester", "Nylon", "Cashmere", "Velvet", "Canvas", "Fleece", "Knit",
                "Rubber",
            ]),
            brands: vec![
                BrandEntry::new("Nike", "Nike®"),
                BrandEntry::new("Adidas", "Adidas®"),
                BrandEntry::new("Puma", "Puma®"),
                BrandEntry::new("Reebok", "Reebok®"),
                BrandEntry::new("New Balance", "New Balance®"),
                BrandEntry::new("Under Armour", "Under Armour®"),
                BrandEntry::new("Converse", "Converse®"),
                BrandEntry::new("Vans", "Vans®"),
                BrandEntry::new("Levi's", "Levi's®"),
                BrandEntry::new("Gucci", "Gucci®"),
                BrandEntry::new("Zara", "Zara"),
                BrandEntry::new("H&M", "H&M"),
            ],
            apparel_piece_types: vec![
                PieceTypeMapping::new("Shirt", "Shirts"),
                PieceTypeMapping::new("T-Shirt", "T-Shirts"),
                PieceTypeMapping::new("Blouse", "Blouses"),
                PieceTypeMapping::new("Sweater", "Sweaters"),
                PieceTypeMapping::new("Sweatshirt", "Sweatshirts"),
                PieceTypeMapping::new("Hoodie", "Hoodies"),
                PieceTypeMapping::new("Jacket", "Jackets"),
                PieceTypeMapping::new("Coat", "Coats"),
                PieceTypeMapping::new("Blazer", "Blazers"),
                PieceTypeMapping::new("Dress", "Dresses"),
                PieceTypeMapping::new("Skirt", "Skirts"),
                PieceTypeMapping::new("Pants", "Pants"),
                PieceTypeMapping::new("Jeans", "Jeans"),
                PieceTypeMapping::new("Shorts", "Shorts"),
                PieceTypeMapping::new("Suit", "Suits"),
                PieceTypeMapping::new("Vest", "Vests"),
            ],
            footwear_piece_types: vec![
                PieceTypeMapping::new("Sneaker", "Sneakers"),
                PieceTypeMapping::new("Shoe", "Sneakers"),
                PieceTypeMapping::new("Athletic Shoe", "Sneakers"),
                PieceTypeMapping::new("Running Shoe", "Sneakers"),
                PieceTypeMapping::new("Boot", "Boots"),
                PieceTypeMapping::new("Sandal", "Sandals"),
                PieceTypeMapping::new("High Heel", "Heels"),
                PieceTypeMapping::new("Loafer", "Loafers"),
                PieceTypeMapping::new("Slipper", "Slippers"),
            ],
        }
    }
}

fn find_keyword<'a>(list: &'a [String], name: &str) -> Option<&'a str> {
    let name = name.trim();
    list.iter()
        .find(|keyword| keyword.eq_ignore_ascii_case(name))
        .map(String::as_str)
}

impl Vocabulary {
    /// Domain implied by a single label name, if any
    ///
    /// Footwear is checked first so that a label present in both sets
    /// resolves to the more specific category.
    pub fn domain_for_label(&self, name: &str) -> Option<Domain> {
        if find_keyword(&self.footwear_keywords, name).is_some() {
            Some(Domain::Footwear)
        } else if find_keyword(&self.apparel_keywords, name).is_some() {
            Some(Domain::Apparel)
        } else {
            None
        }
    }

    /// Piece-type table for a domain
    pub fn piece_types(&self, domain: Domain) -> &[PieceTypeMapping] {
        match domain {
            Domain::Apparel => &self.apparel_piece_types,
            Domain::Footwear => &self.footwear_piece_types,
        }
    }

    /// Canonical piece type for a label name within a domain
    pub fn piece_type_for_label(&self, domain: Domain, name: &str) -> Option<&str> {
        let name = name.trim();
        self.piece_types(domain)
            .iter()
            .find(|mapping| mapping.keyword.eq_ignore_ascii_case(name))
            .map(|mapping| mapping.canonical.as_str())
    }

    /// Vocabulary color matching a label name
    pub fn color_for_label(&self, name: &str) -> Option<&str> {
        find_keyword(&self.colors, name)
    }

    /// Vocabulary material matching a label name
    pub fn material_for_label(&self, name: &str) -> Option<&str> {
        find_keyword(&self.materials, name)
    }

    /// First registered brand found in any text detection
    ///
    /// Brands are tried in registry order; each is searched case-insensitively
    /// as a substring of every detection, so "NIKE AIR" matches "Nike".
    pub fn brand_in_text(&self, detections: &[RawTextDetection]) -> Option<&BrandEntry> {
        let texts: Vec<String> = detections.iter().map(|d| d.text.to_lowercase()).collect();

        self.brands.iter().find(|brand| {
            let needle = brand.name.trim().to_lowercase();
            !needle.is_empty() && texts.iter().any(|text| text.contains(&needle))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_keywords_case_insensitive() {
        let vocab = Vocabulary::default();
        assert_eq!(vocab.domain_for_label("sneaker"), Some(Domain::Footwear));
        assert_eq!(vocab.domain_for_label("T-SHIRT"), Some(Domain::Apparel));
        assert_eq!(vocab.domain_for_label("Object"), None);
    }

    #[test]
    fn test_piece_type_scoped_by_domain() {
        let vocab = Vocabulary::default();
        assert_eq!(vocab.piece_type_for_label(Domain::Footwear, "Shoe"), Some("Sneakers"));
        assert_eq!(vocab.piece_type_for_label(Domain::Apparel, "Shoe"), None);
        assert_eq!(vocab.piece_type_for_label(Domain::Apparel, "Shirt"), Some("Shirts"));
    }

    #[test]
    fn test_brand_substring_match_returns_display_form() {
        let vocab = Vocabulary::default();
        let detections = vec![RawTextDetection::line("JUST DO IT - NIKE", 98.0)];
        let brand = vocab.brand_in_text(&detections).unwrap();
        assert_eq!(brand.display, "Nike®");
    }

    #[test]
    fn test_brand_registry_order_wins() {
        let vocab = Vocabulary::default();
        // Text order puts Puma first, but Nike precedes Puma in the registry
        let detections = vec![
            RawTextDetection::line("puma", 90.0),
            RawTextDetection::line("nike", 90.0),
        ];
        assert_eq!(vocab.brand_in_text(&detections).unwrap().name, "Nike");
    }

    #[test]
    fn test_color_and_material_lookup() {
        let vocab = Vocabulary::default();
        assert_eq!(vocab.color_for_label("blue"), Some("Blue"));
        assert_eq!(vocab.material_for_label("Denim"), Some("Denim"));
        assert_eq!(vocab.material_for_label("Blue"), None);
    }
}
