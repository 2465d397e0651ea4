#[cfg(test)]
mod tests {
    use depo::db::categories::UNCATEGORIZED_ID;
    use depo::db::events::Events;
    use depo::db::items::Items;
    use depo::db::rentals::Rentals;
    use depo::libs::config::Config;
    use depo::libs::event::Event;
    use depo::libs::export::{ExportData, ExportFormat, Exporter};
    use depo::libs::item::InventoryItem;
    use depo::libs::rental::Rental;
    use chrono::NaiveDate;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct ExportTestContext {
        temp_dir: TempDir,
    }

    impl TestContext for ExportTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            ExportTestContext { temp_dir }
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_items_csv_export(ctx: &mut ExportTestContext) {
        let mut items = Items::new().unwrap();
        items.create(&InventoryItem::new("Chair", 40, UNCATEGORIZED_ID)).unwrap();
        items.create(&InventoryItem::new("Table", 10, UNCATEGORIZED_ID)).unwrap();

        let output = ctx.temp_dir.path().join("items.csv");
        let exporter = Exporter::new(ExportFormat::Csv, ExportData::Items, Some(output.clone()), &Config::default());

        let all = items.fetch(&Default::default()).unwrap();
        exporter
            .export_items(&all, &[(UNCATEGORIZED_ID, "Uncategorized".to_string())])
            .unwrap();

        let content = std::fs::read_to_string(&output).unwrap();
        let mut lines = content.lines();
        let header = lines.next().unwrap();
        assert!(header.contains("name"));
        assert!(header.contains("available_quantity"));
        assert_eq!(lines.count(), 2);
        assert!(content.contains("Chair"));
        assert!(content.contains("Uncategorized"));
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_events_json_export_includes_allocations(ctx: &mut ExportTestContext) {
        let mut items = Items::new().unwrap();
        let chair_id = items.create(&InventoryItem::new("Chair", 40, UNCATEGORIZED_ID)).unwrap();

        let mut events = Events::new().unwrap();
        let with_items = events
            .create(&Event::new("Expo", date(2026, 5, 1), date(2026, 5, 3)))
            .unwrap();
        events.set_items(with_items, &[(chair_id, 12)]).unwrap();
        events
            .create(&Event::new("Empty meetup", date(2026, 6, 1), date(2026, 6, 1)))
            .unwrap();

        let output = ctx.temp_dir.path().join("events.json");
        let exporter = Exporter::new(ExportFormat::Json, ExportData::Events, Some(output.clone()), &Config::default());

        let mut data = Vec::new();
        for event in events.list().unwrap() {
            let id = event.id.unwrap();
            let allocations = events.items_for(id).unwrap();
            data.push((event, allocations));
        }
        exporter.export_events(&data).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
        let rows = parsed.as_array().unwrap();
        // One row per allocation, plus one row for the event without items
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["event_name"], "Expo");
        assert_eq!(rows[0]["quantity"], 12);
        assert_eq!(rows[1]["event_name"], "Empty meetup");
        assert!(rows[1]["quantity"].is_null());
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_rentals_csv_export(ctx: &mut ExportTestContext) {
        let mut items = Items::new().unwrap();
        let chair_id = items.create(&InventoryItem::new("Chair", 40, UNCATEGORIZED_ID)).unwrap();

        let mut rentals = Rentals::new().unwrap();
        let rental_id = rentals
            .create_draft(&Rental::new("Acme", date(2026, 3, 1), date(2026, 3, 4)))
            .unwrap();
        rentals.add_line(rental_id, chair_id, 5).unwrap();

        let output = ctx.temp_dir.path().join("rentals.csv");
        let exporter = Exporter::new(ExportFormat::Csv, ExportData::Rentals, Some(output.clone()), &Config::default());

        let rental = rentals.get_by_id(rental_id).unwrap().unwrap();
        let lines = rentals.lines(rental_id).unwrap();
        exporter.export_rentals(&[(rental, lines)]).unwrap();

        let content = std::fs::read_to_string(&output).unwrap();
        assert!(content.contains("Acme"));
        assert!(content.contains("Chair"));
        assert!(content.contains("draft"));
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_rentals_export_keeps_lineless_rentals(ctx: &mut ExportTestContext) {
        let mut items = Items::new().unwrap();
        let chair_id = items.create(&InventoryItem::new("Chair", 40, UNCATEGORIZED_ID)).unwrap();

        let mut rentals = Rentals::new().unwrap();
        let with_line = rentals
            .create_draft(&Rental::new("Acme", date(2026, 3, 1), date(2026, 3, 4)))
            .unwrap();
        rentals.add_line(with_line, chair_id, 5).unwrap();
        let empty_draft = rentals
            .create_draft(&Rental::new("Globex", date(2026, 4, 1), date(2026, 4, 2)))
            .unwrap();

        let output = ctx.temp_dir.path().join("rentals.json");
        let exporter = Exporter::new(ExportFormat::Json, ExportData::Rentals, Some(output.clone()), &Config::default());

        let mut data = Vec::new();
        for id in [with_line, empty_draft] {
            let rental = rentals.get_by_id(id).unwrap().unwrap();
            let lines = rentals.lines(id).unwrap();
            data.push((rental, lines));
        }
        exporter.export_rentals(&data).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
        let rows = parsed.as_array().unwrap();
        // One row per line, plus one row for the rental without lines
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["client_name"], "Acme");
        assert_eq!(rows[0]["quantity_rented"], 5);
        assert_eq!(rows[1]["client_name"], "Globex");
        assert_eq!(rows[1]["item_name"], "");
        assert!(rows[1]["quantity_rented"].is_null());
        assert!(rows[1]["price_per_day"].is_null());
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_default_output_path_uses_configured_directory(ctx: &mut ExportTestContext) {
        let dir = ctx.temp_dir.path().join("exports");
        std::fs::create_dir_all(&dir).unwrap();

        let config = Config {
            display: None,
            export: Some(depo::libs::config::ExportConfig {
                directory: Some(dir.to_string_lossy().to_string()),
            }),
        };
        let exporter = Exporter::new(ExportFormat::Json, ExportData::Items, None, &config);

        let path = exporter.output_path();
        assert!(path.starts_with(&dir));
        let name = path.file_name().unwrap().to_string_lossy();
        assert!(name.starts_with("depo_items_"));
        assert!(name.ends_with(".json"));
    }
}
