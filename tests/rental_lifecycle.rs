#[cfg(test)]
mod tests {
    use depo::db::categories::UNCATEGORIZED_ID;
    use depo::db::items::Items;
    use depo::db::rentals::Rentals;
    use depo::libs::item::{Condition, InventoryItem, RentalStatus};
    use depo::libs::rental::{PaymentStatus, Rental, RentalState, ReturnLine};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct RentalTestContext {
        _temp_dir: TempDir,
    }

    impl TestContext for RentalTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            RentalTestContext { _temp_dir: temp_dir }
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn priced_item(items: &mut Items, name: &str, total: i64, price: &str) -> i64 {
        let mut item = InventoryItem::new(name, total, UNCATEGORIZED_ID);
        item.rental_price_per_day = Decimal::from_str(price).unwrap();
        items.create(&item).unwrap()
    }

    fn available(items: &mut Items, id: i64) -> i64 {
        items.get_by_id(id).unwrap().unwrap().available_quantity
    }

    fn return_of(item_id: i64, returned: i64) -> ReturnLine {
        ReturnLine {
            item_id,
            returned,
            damaged: false,
            notes: None,
        }
    }

    #[test_context(RentalTestContext)]
    #[test]
    fn test_draft_lines_reserve_immediately(_ctx: &mut RentalTestContext) {
        let mut items = Items::new().unwrap();
        let speaker_id = priced_item(&mut items, "Speaker", 6, "20.00");

        let mut rentals = Rentals::new().unwrap();
        let rental_id = rentals
            .create_draft(&Rental::new("Acme", date(2026, 3, 1), date(2026, 3, 4)))
            .unwrap();

        rentals.add_line(rental_id, speaker_id, 4).unwrap();
        assert_eq!(available(&mut items, speaker_id), 2);

        // Adding the same item again bumps the single line
        rentals.add_line(rental_id, speaker_id, 1).unwrap();
        let lines = rentals.lines(rental_id).unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].quantity_rented, 5);
        assert_eq!(available(&mut items, speaker_id), 1);

        // Reserving beyond stock fails and changes nothing
        assert!(rentals.add_line(rental_id, speaker_id, 2).is_err());
        assert_eq!(available(&mut items, speaker_id), 1);
    }

    #[test_context(RentalTestContext)]
    #[test]
    fn test_price_snapshot_survives_item_edits(_ctx: &mut RentalTestContext) {
        let mut items = Items::new().unwrap();
        let mixer_id = priced_item(&mut items, "Mixer", 2, "45.00");

        let mut rentals = Rentals::new().unwrap();
        let rental_id = rentals
            .create_draft(&Rental::new("Acme", date(2026, 3, 1), date(2026, 3, 2)))
            .unwrap();
        rentals.add_line(rental_id, mixer_id, 1).unwrap();

        // Reprice the item after the line was created
        let mut mixer = items.get_by_id(mixer_id).unwrap().unwrap();
        mixer.rental_price_per_day = Decimal::from_str("99.00").unwrap();
        items.update(&mixer).unwrap();

        let lines = rentals.lines(rental_id).unwrap();
        assert_eq!(lines[0].price_per_day, Decimal::from_str("45.00").unwrap());
    }

    #[test_context(RentalTestContext)]
    #[test]
    fn test_set_quantity_moves_delta_and_remove_releases(_ctx: &mut RentalTestContext) {
        let mut items = Items::new().unwrap();
        let table_id = priced_item(&mut items, "Table", 10, "5.00");

        let mut rentals = Rentals::new().unwrap();
        let rental_id = rentals
            .create_draft(&Rental::new("Acme", date(2026, 3, 1), date(2026, 3, 3)))
            .unwrap();
        rentals.add_line(rental_id, table_id, 4).unwrap();

        rentals.set_line_quantity(rental_id, table_id, 7).unwrap();
        assert_eq!(available(&mut items, table_id), 3);

        rentals.set_line_quantity(rental_id, table_id, 2).unwrap();
        assert_eq!(available(&mut items, table_id), 8);

        assert!(rentals.set_line_quantity(rental_id, table_id, 0).is_err());

        rentals.remove_line(rental_id, table_id).unwrap();
        assert_eq!(available(&mut items, table_id), 10);
        assert!(rentals.lines(rental_id).unwrap().is_empty());
    }

    #[test_context(RentalTestContext)]
    #[test]
    fn test_dispatch_freezes_the_draft(_ctx: &mut RentalTestContext) {
        let mut items = Items::new().unwrap();
        let speaker_id = priced_item(&mut items, "Speaker", 6, "20.00");

        let mut rentals = Rentals::new().unwrap();
        let rental_id = rentals
            .create_draft(&Rental::new("Acme", date(2026, 3, 1), date(2026, 3, 4)))
            .unwrap();

        // An empty draft cannot be dispatched
        assert!(rentals.dispatch(rental_id).is_err());

        rentals.add_line(rental_id, speaker_id, 2).unwrap();
        rentals.dispatch(rental_id).unwrap();

        let rental = rentals.get_by_id(rental_id).unwrap().unwrap();
        assert_eq!(rental.state, RentalState::Rented);
        let speaker = items.get_by_id(speaker_id).unwrap().unwrap();
        assert_eq!(speaker.rental_status, RentalStatus::Rented);

        // No line edits after dispatch, and the rejected edits roll back
        // without touching the availability counter
        assert!(rentals.add_line(rental_id, speaker_id, 1).is_err());
        assert!(rentals.set_line_quantity(rental_id, speaker_id, 1).is_err());
        assert!(rentals.remove_line(rental_id, speaker_id).is_err());
        assert!(rentals.dispatch(rental_id).is_err());
        assert_eq!(available(&mut items, speaker_id), 4);
        let lines = rentals.lines(rental_id).unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].quantity_rented, 2);
    }

    #[test_context(RentalTestContext)]
    #[test]
    fn test_partial_then_full_return(_ctx: &mut RentalTestContext) {
        let mut items = Items::new().unwrap();
        let chair_id = priced_item(&mut items, "Chair", 20, "1.50");

        let mut rentals = Rentals::new().unwrap();
        let rental_id = rentals
            .create_draft(&Rental::new("Acme", date(2026, 3, 1), date(2026, 3, 8)))
            .unwrap();
        rentals.add_line(rental_id, chair_id, 10).unwrap();
        rentals.dispatch(rental_id).unwrap();

        // Partial return releases the delta and keeps the rental open
        let closed = rentals.process_return(rental_id, &[return_of(chair_id, 6)]).unwrap();
        assert!(!closed);
        assert_eq!(available(&mut items, chair_id), 16);
        let rental = rentals.get_by_id(rental_id).unwrap().unwrap();
        assert_eq!(rental.state, RentalState::Rented);

        // Cumulative quantities: going below the recorded value is rejected
        assert!(rentals.process_return(rental_id, &[return_of(chair_id, 4)]).is_err());
        // And so is returning more than was rented
        assert!(rentals.process_return(rental_id, &[return_of(chair_id, 11)]).is_err());

        // Completing the return closes the order
        let closed = rentals.process_return(rental_id, &[return_of(chair_id, 10)]).unwrap();
        assert!(closed);
        assert_eq!(available(&mut items, chair_id), 20);
        let rental = rentals.get_by_id(rental_id).unwrap().unwrap();
        assert_eq!(rental.state, RentalState::Returned);
        assert!(rental.actual_return_date.is_some());
        let chair = items.get_by_id(chair_id).unwrap().unwrap();
        assert_eq!(chair.rental_status, RentalStatus::NotInRentalUse);

        // A closed rental accepts no further returns
        assert!(rentals.process_return(rental_id, &[return_of(chair_id, 10)]).is_err());
    }

    #[test_context(RentalTestContext)]
    #[test]
    fn test_damaged_units_are_written_off(_ctx: &mut RentalTestContext) {
        let mut items = Items::new().unwrap();
        let projector_id = priced_item(&mut items, "Projector", 3, "60.00");

        let mut rentals = Rentals::new().unwrap();
        let rental_id = rentals
            .create_draft(&Rental::new("Acme", date(2026, 3, 1), date(2026, 3, 2)))
            .unwrap();
        rentals.add_line(rental_id, projector_id, 2).unwrap();
        rentals.dispatch(rental_id).unwrap();
        assert_eq!(available(&mut items, projector_id), 1);

        let damaged = ReturnLine {
            item_id: projector_id,
            returned: 2,
            damaged: true,
            notes: Some("Cracked lens".to_string()),
        };
        let closed = rentals.process_return(rental_id, &[damaged]).unwrap();
        assert!(closed);

        // The written-off units never came back to the pool
        let projector = items.get_by_id(projector_id).unwrap().unwrap();
        assert_eq!(projector.available_quantity, 1);
        assert_eq!(projector.condition, Condition::Damaged);
        assert_eq!(projector.condition_description.as_deref(), Some("Cracked lens"));
        assert_eq!(projector.rental_status, RentalStatus::NotInRentalUse);
    }

    #[test_context(RentalTestContext)]
    #[test]
    fn test_blank_damage_notes_keep_existing_description(_ctx: &mut RentalTestContext) {
        let mut items = Items::new().unwrap();
        let mixer_id = priced_item(&mut items, "Mixer", 2, "45.00");
        let mut mixer = items.get_by_id(mixer_id).unwrap().unwrap();
        mixer.condition_description = Some("Scratched faders".to_string());
        items.update(&mixer).unwrap();

        let mut rentals = Rentals::new().unwrap();
        let rental_id = rentals
            .create_draft(&Rental::new("Acme", date(2026, 3, 1), date(2026, 3, 2)))
            .unwrap();
        rentals.add_line(rental_id, mixer_id, 1).unwrap();
        rentals.dispatch(rental_id).unwrap();

        let damaged = ReturnLine {
            item_id: mixer_id,
            returned: 1,
            damaged: true,
            notes: Some("   ".to_string()),
        };
        rentals.process_return(rental_id, &[damaged]).unwrap();

        // Whitespace-only notes must not wipe what was recorded before
        let mixer = items.get_by_id(mixer_id).unwrap().unwrap();
        assert_eq!(mixer.condition, Condition::Damaged);
        assert_eq!(mixer.condition_description.as_deref(), Some("Scratched faders"));
    }

    #[test_context(RentalTestContext)]
    #[test]
    fn test_payment_status_requires_dispatch(_ctx: &mut RentalTestContext) {
        let mut items = Items::new().unwrap();
        let table_id = priced_item(&mut items, "Table", 4, "5.00");

        let mut rentals = Rentals::new().unwrap();
        let rental_id = rentals
            .create_draft(&Rental::new("Acme", date(2026, 3, 1), date(2026, 3, 2)))
            .unwrap();
        rentals.add_line(rental_id, table_id, 1).unwrap();

        assert!(rentals.set_payment(rental_id, PaymentStatus::Paid).is_err());

        rentals.dispatch(rental_id).unwrap();
        rentals.set_payment(rental_id, PaymentStatus::Invoice).unwrap();
        let rental = rentals.get_by_id(rental_id).unwrap().unwrap();
        assert_eq!(rental.payment_status, PaymentStatus::Invoice);

        // Still editable after the rental is closed
        rentals.process_return(rental_id, &[return_of(table_id, 1)]).unwrap();
        rentals.set_payment(rental_id, PaymentStatus::Paid).unwrap();
    }

    #[test_context(RentalTestContext)]
    #[test]
    fn test_delete_restores_only_outstanding_units(_ctx: &mut RentalTestContext) {
        let mut items = Items::new().unwrap();
        let chair_id = priced_item(&mut items, "Chair", 10, "1.50");

        let mut rentals = Rentals::new().unwrap();
        let rental_id = rentals
            .create_draft(&Rental::new("Acme", date(2026, 3, 1), date(2026, 3, 5)))
            .unwrap();
        rentals.add_line(rental_id, chair_id, 6).unwrap();
        rentals.dispatch(rental_id).unwrap();

        // 4 of 6 come back, then the order is deleted
        rentals.process_return(rental_id, &[return_of(chair_id, 4)]).unwrap();
        assert_eq!(available(&mut items, chair_id), 8);

        rentals.delete(rental_id).unwrap();
        assert_eq!(available(&mut items, chair_id), 10);
        assert!(rentals.get_by_id(rental_id).unwrap().is_none());
        let chair = items.get_by_id(chair_id).unwrap().unwrap();
        assert_eq!(chair.rental_status, RentalStatus::NotInRentalUse);
    }

    #[test_context(RentalTestContext)]
    #[test]
    fn test_draft_edits_and_search(_ctx: &mut RentalTestContext) {
        let mut rentals = Rentals::new().unwrap();
        let rental_id = rentals
            .create_draft(&Rental::new("Globex", date(2026, 3, 1), date(2026, 3, 2)))
            .unwrap();

        let mut rental = rentals.get_by_id(rental_id).unwrap().unwrap();
        rental.contact_info = "ops@globex.example".to_string();
        rental.discount_percentage = Decimal::from_str("10").unwrap();
        rentals.update_draft(&rental).unwrap();

        let stored = rentals.get_by_id(rental_id).unwrap().unwrap();
        assert_eq!(stored.contact_info, "ops@globex.example");
        assert_eq!(stored.discount_percentage, Decimal::from_str("10").unwrap());

        rentals.create_draft(&Rental::new("Acme", date(2026, 3, 1), date(2026, 3, 2))).unwrap();
        let found = rentals.list(Some("glob")).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].client_name, "Globex");
        assert_eq!(rentals.list(None).unwrap().len(), 2);
    }
}
