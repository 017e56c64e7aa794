use storyforge_core::db::open_db_in_memory;
use storyforge_core::{
    ChecklistService, ChecklistTemplate, Namespace, Progress, SqliteKeyValueStore,
};

#[test]
fn fifteen_item_template_with_six_checked_is_forty_percent() {
    let conn = open_db_in_memory().unwrap();
    let store =
        SqliteKeyValueStore::try_new(&conn, Namespace::new(Namespace::CHECKLISTS).unwrap())
            .unwrap();
    let service = ChecklistService::new(store);

    let checklist = service.create_checklist_template("P", "First draft", ChecklistTemplate::NovelDraft);
    let checklist = service.save_checklist(checklist).unwrap();

    let targets: Vec<(String, String)> = checklist
        .categories
        .iter()
        .flat_map(|category| {
            category
                .items
                .iter()
                .map(move |item| (category.id.clone(), item.id.clone()))
        })
        .take(6)
        .collect();
    for (category_id, item_id) in &targets {
        service
            .set_item_checked(&checklist.id, category_id, item_id, true)
            .unwrap();
    }

    let stored = service.get_checklist_by_id(&checklist.id).unwrap().unwrap();
    assert_eq!(
        service.get_checklist_progress(&stored),
        Progress {
            total: 15,
            completed: 6,
            percentage: 40
        }
    );

    let report = service.get_checklist_progress_report(&stored);
    assert_eq!(report.categories[0].1.completed, 5);
    assert_eq!(report.categories[1].1.completed, 1);
    assert_eq!(report.categories[2].1.completed, 0);
}

#[test]
fn empty_checklist_progress_is_zero() {
    let conn = open_db_in_memory().unwrap();
    let store =
        SqliteKeyValueStore::try_new(&conn, Namespace::new(Namespace::CHECKLISTS).unwrap())
            .unwrap();
    let service = ChecklistService::new(store);

    let checklist = service
        .save_checklist(service.create_checklist_template("P", "Scratch", ChecklistTemplate::Blank))
        .unwrap();
    assert_eq!(service.get_checklist_progress(&checklist), Progress::default());
}

#[test]
fn checklists_filter_by_project_and_delete_is_idempotent() {
    let conn = open_db_in_memory().unwrap();
    let store =
        SqliteKeyValueStore::try_new(&conn, Namespace::new(Namespace::CHECKLISTS).unwrap())
            .unwrap();
    let service = ChecklistService::new(store);

    let keep = service
        .save_checklist(service.create_checklist_template("P", "Keep", ChecklistTemplate::Blank))
        .unwrap();
    let other = service
        .save_checklist(service.create_checklist_template("Q", "Other", ChecklistTemplate::Blank))
        .unwrap();

    let for_p = service.get_checklists_by_project("P").unwrap();
    assert_eq!(for_p.len(), 1);
    assert_eq!(for_p[0].id, keep.id);

    assert!(service.delete_checklist(&other.id));
    assert!(service.delete_checklist(&other.id));
    assert_eq!(service.get_all_checklists().unwrap().len(), 1);
}
