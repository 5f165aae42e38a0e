use bevy::prelude::*;

/// Prefix that marks asset types brought in from outside the catalog.
pub const IMPORTED_PREFIX: &str = "imported-";

/// Broad grouping used by presets and the placement advisor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Reflect)]
pub enum AssetCategory {
    /// Trees of any kind.
    Trees,
    /// Rocks and boulders.
    Rocks,
    /// Low ground cover: bushes, grass, reeds, flowers.
    Vegetation,
    /// Buildings and ruins.
    Structures,
}

/// One placeable catalog entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AssetDefinition {
    /// Stable id stored on placed assets.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Category used for clustering and suggestions.
    pub category: AssetCategory,
}

const fn def(id: &'static str, name: &'static str, category: AssetCategory) -> AssetDefinition {
    AssetDefinition { id, name, category }
}

/// The built-in catalog.
pub const DEFAULT_ASSETS: &[AssetDefinition] = &[
    def("pine-tree", "Pine Tree", AssetCategory::Trees),
    def("oak-tree", "Oak Tree", AssetCategory::Trees),
    def("dead-tree", "Dead Tree", AssetCategory::Trees),
    def("large-rock", "Large Rock", AssetCategory::Rocks),
    def("small-rock", "Small Rock", AssetCategory::Rocks),
    def("boulder-pile", "Boulder Pile", AssetCategory::Rocks),
    def("bush", "Bush", AssetCategory::Vegetation),
    def("grass-tuft", "Grass Tuft", AssetCategory::Vegetation),
    def("reeds", "Reeds", AssetCategory::Vegetation),
    def("flowers", "Flowers", AssetCategory::Vegetation),
    def("cottage", "Cottage", AssetCategory::Structures),
    def("ruined-tower", "Ruined Tower", AssetCategory::Structures),
    def("well", "Well", AssetCategory::Structures),
];

/// Lookup over the known asset definitions.
#[derive(Clone, Debug)]
pub struct AssetCatalog {
    definitions: Vec<AssetDefinition>,
}

impl Default for AssetCatalog {
    fn default() -> Self {
        Self::new(DEFAULT_ASSETS.to_vec())
    }
}

impl AssetCatalog {
    /// Catalog over an explicit definition list.
    pub fn new(definitions: Vec<AssetDefinition>) -> Self {
        Self { definitions }
    }

    /// Definition for a catalog id.
    pub fn get(&self, id: &str) -> Option<&AssetDefinition> {
        self.definitions.iter().find(|d| d.id == id)
    }

    /// Category of an asset type; `None` for imported or unknown types.
    pub fn category_of(&self, asset_type: &str) -> Option<AssetCategory> {
        self.get(asset_type).map(|d| d.category)
    }

    /// Whether `asset_type` may be placed: a catalog id or an `imported-` id.
    pub fn is_placeable(&self, asset_type: &str) -> bool {
        self.get(asset_type).is_some() || is_imported(asset_type)
    }

    /// Definitions in `category`, in catalog order.
    pub fn in_category(&self, category: AssetCategory) -> Vec<&AssetDefinition> {
        self.definitions.iter().filter(|d| d.category == category).collect()
    }
}

/// Whether `asset_type` names an imported model.
pub fn is_imported(asset_type: &str) -> bool {
    asset_type.len() > IMPORTED_PREFIX.len() && asset_type.starts_with(IMPORTED_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_and_imported_ids_are_placeable() {
        let catalog = AssetCatalog::default();
        assert!(catalog.is_placeable("pine-tree"));
        assert!(catalog.is_placeable("imported-castle-42"));
        assert!(!catalog.is_placeable("imported-"));
        assert!(!catalog.is_placeable("spaceship"));
    }

    #[test]
    fn every_category_has_entries() {
        let catalog = AssetCatalog::default();
        for category in [
            AssetCategory::Trees,
            AssetCategory::Rocks,
            AssetCategory::Vegetation,
            AssetCategory::Structures,
        ] {
            assert!(!catalog.in_category(category).is_empty(), "{category:?} is empty");
        }
    }

    #[test]
    fn imported_types_have_no_category() {
        let catalog = AssetCatalog::default();
        assert_eq!(catalog.category_of("oak-tree"), Some(AssetCategory::Trees));
        assert_eq!(catalog.category_of("imported-oak"), None);
    }

    #[test]
    fn default_ids_are_unique() {
        let ids: Vec<&str> = DEFAULT_ASSETS.iter().map(|d| d.id).collect();
        for (i, id) in ids.iter().enumerate() {
            assert!(!ids[i + 1..].contains(id), "duplicate id {id}");
        }
    }
}
