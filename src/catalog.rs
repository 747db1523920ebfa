//! Fixed catalog of named fashion colors.
//!
//! The LAB value of every entry is computed once, the first time the table is
//! touched, and never changes afterwards. Call [`warm_up`] at startup to pay
//! that cost before the first request.

use std::sync::LazyLock;

use palette::Lab;

use crate::convert::{parse_hex, srgb_to_lab};

/// A named color from the catalog.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaletteEntry {
    pub name: &'static str,
    /// Canonical `#RRGGBB` (uppercase) value for `name`
    pub hex: &'static str,
    pub lab: Lab,
}

// Order matters: on equal distance the earlier entry wins.
const NAMED_COLORS: &[(&str, &str)] = &[
    // reds
    ("Red", "#FF0000"),
    ("Scarlet", "#FF2400"),
    ("Crimson", "#DC143C"),
    ("Cherry", "#DE3163"),
    ("Burgundy", "#800020"),
    ("Maroon", "#800000"),
    ("Wine", "#722F37"),
    ("Brick Red", "#CB4154"),
    ("Rust", "#B7410E"),
    ("Coral", "#FF7F50"),
    ("Salmon", "#FA8072"),
    // pinks
    ("Pink", "#FFC0CB"),
    ("Light Pink", "#FFB6C1"),
    ("Pale Pink", "#FADADD"),
    ("Rose Quartz", "#F7CAC9"),
    ("Dusty Rose", "#C08081"),
    ("Blush", "#DE5D83"),
    ("Hot Pink", "#FF69B4"),
    ("Fuchsia", "#FF00FF"),
    ("Magenta", "#D0417E"),
    ("Mauve", "#E0B0FF"),
    // oranges
    ("Orange", "#FFA500"),
    ("Burnt Orange", "#CC5500"),
    ("Tangerine", "#F28500"),
    ("Peach", "#FFE5B4"),
    ("Apricot", "#FBCEB1"),
    ("Terracotta", "#E2725B"),
    ("Copper", "#B87333"),
    ("Bronze", "#CD7F32"),
    // yellows
    ("Yellow", "#FFFF00"),
    ("Lemon", "#FFF44F"),
    ("Mustard", "#FFDB58"),
    ("Gold", "#FFD700"),
    ("Ochre", "#CC7722"),
    // greens
    ("Green", "#008000"),
    ("Lime", "#00FF00"),
    ("Chartreuse", "#7FFF00"),
    ("Olive", "#808000"),
    ("Army Green", "#4B5320"),
    ("Forest Green", "#228B22"),
    ("Hunter Green", "#355E3B"),
    ("Emerald", "#50C878"),
    ("Jade", "#00A86B"),
    ("Mint", "#98FF98"),
    ("Sage", "#BCB88A"),
    ("Teal", "#008080"),
    ("Turquoise", "#40E0D0"),
    ("Aqua", "#00FFFF"),
    // blues
    ("Blue", "#0000FF"),
    ("Navy", "#000080"),
    ("Midnight Blue", "#191970"),
    ("Royal Blue", "#4169E1"),
    ("Cobalt", "#0047AB"),
    ("Cerulean", "#007BA7"),
    ("Denim", "#1560BD"),
    ("Steel Blue", "#4682B4"),
    ("Sky Blue", "#87CEEB"),
    ("Baby Blue", "#89CFF0"),
    ("Powder Blue", "#B0E0E6"),
    ("Periwinkle", "#CCCCFF"),
    // purples
    ("Indigo", "#4B0082"),
    ("Purple", "#800080"),
    ("Violet", "#8F00FF"),
    ("Amethyst", "#9966CC"),
    ("Plum", "#8E4585"),
    ("Eggplant", "#614051"),
    ("Orchid", "#DA70D6"),
    ("Lilac", "#C8A2C8"),
    ("Lavender", "#E6E6FA"),
    // browns
    ("Brown", "#964B00"),
    ("Chocolate", "#7B3F00"),
    ("Mocha", "#6F4E37"),
    ("Caramel", "#AF6F09"),
    ("Camel", "#C19A6B"),
    ("Tan", "#D2B48C"),
    ("Khaki", "#C3B091"),
    ("Sand", "#C2B280"),
    ("Taupe", "#483C32"),
    ("Nude", "#E3BC9A"),
    // neutrals
    ("Champagne", "#F7E7CE"),
    ("Beige", "#F5F5DC"),
    ("Cream", "#FFFDD0"),
    ("Ivory", "#FFFFF0"),
    ("Off-White", "#FAF9F6"),
    ("White", "#FFFFFF"),
    ("Silver", "#C0C0C0"),
    ("Light Gray", "#D3D3D3"),
    ("Gray", "#808080"),
    ("Slate Gray", "#708090"),
    ("Dark Gray", "#555555"),
    ("Charcoal", "#36454F"),
    ("Black", "#000000"),
];

static CATALOG: LazyLock<Vec<PaletteEntry>> = LazyLock::new(|| {
    NAMED_COLORS
        .iter()
        .filter_map(|&(name, hex)| {
            let rgb = parse_hex(hex).ok()?;
            Some(PaletteEntry {
                name,
                hex,
                lab: srgb_to_lab(rgb),
            })
        })
        .collect()
});

/// All catalog entries in declaration order.
pub fn entries() -> &'static [PaletteEntry] {
    &CATALOG
}

/// Force the LAB table to be built now.
pub fn warm_up() {
    LazyLock::force(&CATALOG);
}
