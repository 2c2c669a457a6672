use memopad_core::db::{open_db_in_memory, DbError};
use memopad_core::{
    ControllerError, Memo, MemoListController, MemoStore, SqliteMemoStore, StoreError, StoreResult,
};
use std::cell::{Cell, RefCell};

/// In-memory store fake that counts persistence calls and can refuse the
/// next write, for asserting the no-write and rollback contracts.
struct FakeStore {
    slot: RefCell<Vec<Memo>>,
    save_calls: Cell<usize>,
    fail_next_save: Cell<bool>,
}

impl FakeStore {
    fn new(memos: Vec<Memo>) -> Self {
        Self {
            slot: RefCell::new(memos),
            save_calls: Cell::new(0),
            fail_next_save: Cell::new(false),
        }
    }
}

impl MemoStore for FakeStore {
    fn load(&self) -> StoreResult<Vec<Memo>> {
        Ok(self.slot.borrow().clone())
    }

    fn save(&self, memos: &[Memo]) -> StoreResult<()> {
        if self.fail_next_save.take() {
            return Err(StoreError::Db(DbError::Sqlite(
                rusqlite::Error::InvalidQuery,
            )));
        }
        self.save_calls.set(self.save_calls.get() + 1);
        *self.slot.borrow_mut() = memos.to_vec();
        Ok(())
    }
}

fn seeded_pair() -> Vec<Memo> {
    vec![
        Memo::with_id("memo-a".to_string(), "first", 1_000),
        Memo::with_id("memo-b".to_string(), "second", 2_000),
    ]
}

#[test]
fn initialize_on_empty_storage_seeds_default_memo() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteMemoStore::new(&conn);

    let controller = MemoListController::initialize(&store).unwrap();

    assert_eq!(controller.memos().len(), 1);
    let seeded = &controller.memos()[0];
    assert_eq!(seeded.title, "New memo 1");
    assert_eq!(seeded.body, "");
    assert!(seeded.created_at > 0);
    assert_eq!(seeded.created_at, seeded.updated_at);
    assert_eq!(controller.selected_index(), 0);
    assert!(!controller.edit_mode());

    // Seed must already be durable.
    assert_eq!(store.load().unwrap(), controller.memos());
}

#[test]
fn initialize_on_non_empty_storage_loads_without_writing() {
    let fake = FakeStore::new(seeded_pair());

    let controller = MemoListController::initialize(&fake).unwrap();

    assert_eq!(controller.memos(), seeded_pair());
    assert_eq!(controller.selected_index(), 0);
    assert!(!controller.edit_mode());
    assert_eq!(fake.save_calls.get(), 0);
}

#[test]
fn add_memo_appends_selects_and_enters_edit_mode() {
    let fake = FakeStore::new(Vec::new());
    let mut controller = MemoListController::initialize(&fake).unwrap();

    let added_id = controller.add_memo().unwrap().id.clone();

    assert_eq!(controller.memos().len(), 2);
    assert_eq!(controller.memos()[1].id, added_id);
    assert_eq!(controller.memos()[1].title, "New memo 2");
    assert_eq!(controller.selected_index(), 1);
    assert!(controller.edit_mode());
    // One save for the seed, one for the add.
    assert_eq!(fake.save_calls.get(), 2);
    assert_eq!(fake.slot.borrow().len(), 2);
}

#[test]
fn add_memo_twice_from_empty_yields_sequential_titles() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteMemoStore::new(&conn);
    let mut controller = MemoListController::initialize(&store).unwrap();

    controller.add_memo().unwrap();
    controller.add_memo().unwrap();

    let titles: Vec<&str> = controller
        .memos()
        .iter()
        .map(|memo| memo.title.as_str())
        .collect();
    assert_eq!(titles, ["New memo 1", "New memo 2", "New memo 3"]);
    assert_eq!(controller.selected_index(), 2);
    assert_eq!(store.load().unwrap().len(), 3);
}

#[test]
fn select_memo_switches_selection_and_leaves_edit_mode() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteMemoStore::new(&conn);
    let mut controller = MemoListController::initialize(&store).unwrap();
    controller.add_memo().unwrap();
    assert!(controller.edit_mode());

    let first_id = controller.memos()[0].id.clone();
    let selected = controller.select_memo(&first_id).unwrap();

    assert_eq!(selected.id, first_id);
    assert_eq!(controller.selected_index(), 0);
    assert!(!controller.edit_mode());
}

#[test]
fn select_unknown_id_leaves_state_unchanged() {
    let fake = FakeStore::new(seeded_pair());
    let mut controller = MemoListController::initialize(&fake).unwrap();
    controller.begin_edit();

    let err = controller.select_memo("no-such-id").unwrap_err();

    assert!(matches!(err, ControllerError::NotFound(id) if id == "no-such-id"));
    assert_eq!(controller.selected_index(), 0);
    assert!(controller.edit_mode());
    assert_eq!(fake.save_calls.get(), 0);
}

#[test]
fn save_edit_updates_only_the_selected_memo() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteMemoStore::new(&conn);
    let mut controller = MemoListController::initialize(&store).unwrap();
    controller.add_memo().unwrap();

    let second_id = controller.memos()[1].id.clone();
    let untouched = controller.memos()[0].clone();
    controller.select_memo(&second_id).unwrap();
    controller.begin_edit();
    assert!(controller.edit_mode());

    let saved = controller.save_edit("Groceries", "milk, eggs").unwrap();

    assert_eq!(saved.title, "Groceries");
    assert_eq!(saved.body, "milk, eggs");
    assert!(saved.updated_at >= saved.created_at);
    assert!(!controller.edit_mode());
    assert_eq!(controller.memos()[0], untouched);
    assert_eq!(store.load().unwrap(), controller.memos());
}

#[test]
fn delete_refused_for_last_memo() {
    let fake = FakeStore::new(Vec::new());
    let mut controller = MemoListController::initialize(&fake).unwrap();
    let saves_after_seed = fake.save_calls.get();

    let err = controller.delete_selected().unwrap_err();

    assert!(matches!(err, ControllerError::LastMemo));
    assert_eq!(controller.memos().len(), 1);
    assert_eq!(controller.selected_index(), 0);
    assert_eq!(fake.save_calls.get(), saves_after_seed);
}

#[test]
fn delete_at_index_zero_selects_shifted_neighbor() {
    let fake = FakeStore::new(seeded_pair());
    let mut controller = MemoListController::initialize(&fake).unwrap();
    controller.select_memo("memo-a").unwrap();

    controller.delete_selected().unwrap();

    assert_eq!(controller.memos().len(), 1);
    assert_eq!(controller.memos()[0].id, "memo-b");
    assert_eq!(controller.selected_index(), 0);
    assert!(!controller.edit_mode());
    assert_eq!(fake.slot.borrow().len(), 1);
}

#[test]
fn delete_at_last_index_reclamps_selection() {
    let fake = FakeStore::new(vec![
        Memo::with_id("memo-a".to_string(), "first", 1_000),
        Memo::with_id("memo-b".to_string(), "second", 2_000),
        Memo::with_id("memo-c".to_string(), "third", 3_000),
    ]);
    let mut controller = MemoListController::initialize(&fake).unwrap();
    controller.select_memo("memo-c").unwrap();

    controller.delete_selected().unwrap();

    assert_eq!(controller.selected_index(), 1);
    assert_eq!(controller.selected().id, "memo-b");
    assert!(!controller.edit_mode());
}

#[test]
fn failing_save_rolls_back_add() {
    let fake = FakeStore::new(seeded_pair());
    let mut controller = MemoListController::initialize(&fake).unwrap();

    fake.fail_next_save.set(true);
    let err = controller.add_memo().unwrap_err();

    assert!(matches!(err, ControllerError::Store(_)));
    assert_eq!(controller.memos(), seeded_pair());
    assert_eq!(controller.selected_index(), 0);
    assert!(!controller.edit_mode());
    assert_eq!(fake.slot.borrow().len(), 2);
}

#[test]
fn failing_save_rolls_back_edit() {
    let fake = FakeStore::new(seeded_pair());
    let mut controller = MemoListController::initialize(&fake).unwrap();
    controller.select_memo("memo-b").unwrap();
    controller.begin_edit();

    fake.fail_next_save.set(true);
    let err = controller.save_edit("Groceries", "milk, eggs").unwrap_err();

    assert!(matches!(err, ControllerError::Store(_)));
    assert_eq!(controller.memos(), seeded_pair());
    // The failed operation applied nothing, so edit mode is still on.
    assert!(controller.edit_mode());
}

#[test]
fn collection_never_empties_through_operation_sequence() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteMemoStore::new(&conn);
    let mut controller = MemoListController::initialize(&store).unwrap();

    controller.add_memo().unwrap();
    controller.add_memo().unwrap();
    assert!(controller.memos().len() >= 1);

    controller.delete_selected().unwrap();
    assert!(controller.memos().len() >= 1);
    controller.delete_selected().unwrap();
    assert!(controller.memos().len() >= 1);

    let err = controller.delete_selected().unwrap_err();
    assert!(matches!(err, ControllerError::LastMemo));
    assert_eq!(controller.memos().len(), 1);
    assert_eq!(store.load().unwrap().len(), 1);
}
