#[derive(Debug, Clone)]
pub enum Message {
    // === CATEGORY MESSAGES ===
    CategoryCreated(String),
    CategoryRenamed(String, String), // old name, new name
    CategoryDeleted(String),
    CategoryNotFound(String),
    CategoryAlreadyExists(String),
    CategoryListHeader,
    NoCategoriesFound,
    CannotDeleteDefaultCategory,
    ItemsReassignedToDefault(usize), // item count

    // === ITEM MESSAGES ===
    ItemCreated(String),
    ItemUpdated(String),
    ItemDeleted(String),
    ItemNotFound(String),
    ItemListHeader,
    NoItemsFound,
    ItemInActiveRental(String),
    ItemAllocatedToEvent(String),
    ConfirmDeleteItem(String),

    // === EVENT MESSAGES ===
    EventCreated(String),
    EventUpdated(String),
    EventDeleted(String),
    EventNotFound(i64),
    EventListHeader,
    NoEventsFound,
    EventItemsSaved(String),
    EventItemsHeader(String), // event name
    EventLoadingHeader(String), // event name
    NoEventItems,
    ConfirmDeleteEvent(String),
    InvalidItemSpec(String), // raw ITEM=QTY argument

    // === RENTAL MESSAGES ===
    RentalDrafted(i64),
    RentalUpdated(i64),
    RentalDeleted(i64),
    RentalNotFound(i64),
    RentalListHeader,
    NoRentalsFound,
    RentalNotDraft(i64),
    RentalNotDispatched(i64),
    RentalAlreadyReturned(i64),
    RentalDispatched(i64),
    RentalReturned(i64),
    RentalPartiallyReturned(i64),
    RentalLineAdded(String, i64),   // item name, quantity
    RentalLineRemoved(String),      // item name
    RentalLineNotFound(String),     // item name
    RentalQuantitySet(String, i64), // item name, new quantity
    RentalHasNoLines(i64),
    ReturnExceedsRented(String, i64, i64),  // item name, requested, rented
    ReturnBelowRecorded(String, i64, i64),  // item name, requested, already returned
    PaymentStatusSet(i64, String),          // rental id, status
    RentalSummaryHeader(i64),
    DraftResumeHint(i64),

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigFileNotFound,
    ConfigModuleDisplay,
    ConfigModuleExport,
    PromptSelectModules,
    PromptCurrencySymbol,
    PromptExportDirectory,

    // === EXPORT MESSAGES ===
    ExportCompleted(String), // output path
    ExportFailed(String),
    NothingToExport,

    // === MIGRATION MESSAGES ===
    MigrationsFound(usize),
    RunningMigration(u32, String),
    MigrationCompleted(u32),
    MigrationFailed(u32, String),
    AllMigrationsCompleted,
    DatabaseVersion(u32),
    DatabaseUpToDate,
    DatabaseNeedsUpdate,
    MigrationHistory,
    NothingToRollback,
    RollingBack(u32, u32),
    RollbackCompleted(u32),

    // === GENERIC MESSAGES ===
    OperationCancelled,
    Custom(String),
}
