#[cfg(test)]
mod tests {
    use depo::db::categories::{Categories, UNCATEGORIZED_ID};
    use depo::db::items::Items;
    use depo::libs::item::InventoryItem;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct CategoryTestContext {
        _temp_dir: TempDir,
    }

    impl TestContext for CategoryTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            CategoryTestContext { _temp_dir: temp_dir }
        }
    }

    #[test_context(CategoryTestContext)]
    #[test]
    fn test_default_category_is_seeded(_ctx: &mut CategoryTestContext) {
        let mut categories = Categories::new().unwrap();
        let default = categories.get_by_id(UNCATEGORIZED_ID).unwrap().unwrap();
        assert_eq!(default.name, "Uncategorized");
    }

    #[test_context(CategoryTestContext)]
    #[test]
    fn test_create_and_list_with_item_counts(_ctx: &mut CategoryTestContext) {
        let mut categories = Categories::new().unwrap();
        let furniture_id = categories.create("Furniture").unwrap();

        let mut items = Items::new().unwrap();
        items.create(&InventoryItem::new("Table", 4, furniture_id)).unwrap();
        items.create(&InventoryItem::new("Chair", 20, furniture_id)).unwrap();

        let all = categories.list().unwrap();
        let furniture = all.iter().find(|c| c.name == "Furniture").unwrap();
        assert_eq!(furniture.item_count, 2);
        let default = all.iter().find(|c| c.name == "Uncategorized").unwrap();
        assert_eq!(default.item_count, 0);
    }

    #[test_context(CategoryTestContext)]
    #[test]
    fn test_duplicate_name_rejected(_ctx: &mut CategoryTestContext) {
        let mut categories = Categories::new().unwrap();
        categories.create("Sound").unwrap();
        assert!(categories.create("Sound").is_err());
    }

    #[test_context(CategoryTestContext)]
    #[test]
    fn test_delete_moves_items_to_default(_ctx: &mut CategoryTestContext) {
        let mut categories = Categories::new().unwrap();
        let lights_id = categories.create("Lights").unwrap();

        let mut items = Items::new().unwrap();
        let item_id = items.create(&InventoryItem::new("Spotlight", 6, lights_id)).unwrap();

        let reassigned = categories.delete(lights_id).unwrap();
        assert_eq!(reassigned, 1);
        assert!(categories.get_by_id(lights_id).unwrap().is_none());

        let item = items.get_by_id(item_id).unwrap().unwrap();
        assert_eq!(item.category_id, UNCATEGORIZED_ID);
    }

    #[test_context(CategoryTestContext)]
    #[test]
    fn test_default_category_cannot_be_deleted(_ctx: &mut CategoryTestContext) {
        let mut categories = Categories::new().unwrap();
        assert!(categories.delete(UNCATEGORIZED_ID).is_err());
    }

    #[test_context(CategoryTestContext)]
    #[test]
    fn test_rename(_ctx: &mut CategoryTestContext) {
        let mut categories = Categories::new().unwrap();
        let id = categories.create("Tens").unwrap();
        categories.rename(id, "Tents").unwrap();
        assert_eq!(categories.get_by_id(id).unwrap().unwrap().name, "Tents");
        assert!(categories.get_by_name("Tens").unwrap().is_none());
    }
}
