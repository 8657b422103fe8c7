/// A sustainable-product category shown on the Categories page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

pub const CATEGORIES: &[Category] = &[
    Category {
        id: "reusables",
        name: "Reusable Goods",
        description: "Bottles, cups, lunch boxes, and bags to reduce single-use plastics.",
    },
    Category {
        id: "eco-packaging",
        name: "Eco Packaging",
        description: "Compostable or recyclable packaging alternatives for daily use.",
    },
    Category {
        id: "energy-saving",
        name: "Energy-Saving Devices",
        description: "LED bulbs, smart plugs, and home efficiency upgrades to cut power usage.",
    },
];
