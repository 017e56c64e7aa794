//! Project checklist use-case service.
//!
//! # Invariants
//! - Item edits address `(category_id, item_id)`; a missing category or item
//!   is `SubItemNotFound` and nothing is written.
//! - Progress is derived on read and never stored.

use crate::model::checklist::{ChecklistItem, ChecklistTemplate, ProjectChecklist};
use crate::model::progress::Progress;
use crate::service::entity::EntityService;
use crate::service::error::{ServiceError, ServiceResult};
use crate::store::kv::KeyValueStore;
use crate::store::record::StoredRecord;

/// Overall and per-category progress of one checklist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistProgressReport {
    pub overall: Progress,
    /// `(category_id, progress)` in category order.
    pub categories: Vec<(String, Progress)>,
}

pub struct ChecklistService<S: KeyValueStore> {
    entities: EntityService<ProjectChecklist, S>,
}

impl<S: KeyValueStore> ChecklistService<S> {
    pub fn new(store: S) -> Self {
        Self {
            entities: EntityService::new(store),
        }
    }

    pub fn create_checklist_template(
        &self,
        project_id: &str,
        name: &str,
        template: ChecklistTemplate,
    ) -> ProjectChecklist {
        ProjectChecklist::from_template(project_id, name, template)
    }

    pub fn save_checklist(&self, checklist: ProjectChecklist) -> ServiceResult<ProjectChecklist> {
        self.entities.save(checklist)
    }

    pub fn get_checklist_by_id(&self, id: &str) -> ServiceResult<Option<ProjectChecklist>> {
        self.entities.get_by_id(id)
    }

    pub fn get_all_checklists(&self) -> ServiceResult<Vec<ProjectChecklist>> {
        self.entities.get_all()
    }

    pub fn get_checklists_by_project(
        &self,
        project_id: &str,
    ) -> ServiceResult<Vec<ProjectChecklist>> {
        self.entities.get_by_project(project_id)
    }

    pub fn delete_checklist(&self, id: &str) -> bool {
        self.entities.delete(id)
    }

    pub fn set_item_checked(
        &self,
        id: &str,
        category_id: &str,
        item_id: &str,
        checked: bool,
    ) -> ServiceResult<ProjectChecklist> {
        self.entities.update_with(id, |checklist| {
            item_in(checklist, id, category_id, item_id)?.checked = checked;
            Ok(())
        })
    }

    pub fn toggle_item(
        &self,
        id: &str,
        category_id: &str,
        item_id: &str,
    ) -> ServiceResult<ProjectChecklist> {
        self.entities.update_with(id, |checklist| {
            let item = item_in(checklist, id, category_id, item_id)?;
            item.checked = !item.checked;
            Ok(())
        })
    }

    pub fn set_item_notes(
        &self,
        id: &str,
        category_id: &str,
        item_id: &str,
        notes: &str,
    ) -> ServiceResult<ProjectChecklist> {
        self.entities.update_with(id, |checklist| {
            item_in(checklist, id, category_id, item_id)?.notes = notes.to_string();
            Ok(())
        })
    }

    /// Appends a new unchecked item; returns the saved checklist.
    pub fn add_item(
        &self,
        id: &str,
        category_id: &str,
        label: &str,
    ) -> ServiceResult<ProjectChecklist> {
        self.entities.update_with(id, |checklist| {
            let category = checklist.category_mut(category_id).ok_or_else(|| {
                ServiceError::sub_item(ProjectChecklist::KIND, id, "category", category_id)
            })?;
            category.items.push(ChecklistItem::new(label));
            Ok(())
        })
    }

    pub fn remove_item(
        &self,
        id: &str,
        category_id: &str,
        item_id: &str,
    ) -> ServiceResult<ProjectChecklist> {
        self.entities.update_with(id, |checklist| {
            let category = checklist.category_mut(category_id).ok_or_else(|| {
                ServiceError::sub_item(ProjectChecklist::KIND, id, "category", category_id)
            })?;
            let before = category.items.len();
            category.items.retain(|item| item.id != item_id);
            if category.items.len() == before {
                return Err(ServiceError::sub_item(
                    ProjectChecklist::KIND,
                    id,
                    "item",
                    item_id,
                ));
            }
            Ok(())
        })
    }

    /// `{ total, completed, percentage }` across all categories.
    pub fn get_checklist_progress(&self, checklist: &ProjectChecklist) -> Progress {
        checklist.progress()
    }

    pub fn get_checklist_progress_report(
        &self,
        checklist: &ProjectChecklist,
    ) -> ChecklistProgressReport {
        ChecklistProgressReport {
            overall: checklist.progress(),
            categories: checklist
                .categories
                .iter()
                .map(|category| (category.id.clone(), category.progress()))
                .collect(),
        }
    }
}

fn item_in<'a>(
    checklist: &'a mut ProjectChecklist,
    id: &str,
    category_id: &str,
    item_id: &str,
) -> ServiceResult<&'a mut ChecklistItem> {
    let category = checklist.category_mut(category_id).ok_or_else(|| {
        ServiceError::sub_item(ProjectChecklist::KIND, id, "category", category_id)
    })?;
    category
        .item_mut(item_id)
        .ok_or_else(|| ServiceError::sub_item(ProjectChecklist::KIND, id, "item", item_id))
}

#[cfg(test)]
mod tests {
    use super::ChecklistService;
    use crate::model::checklist::ChecklistTemplate;
    use crate::service::error::ServiceError;
    use crate::store::memory::MemoryKeyValueStore;
    use crate::store::namespace::Namespace;

    fn service() -> ChecklistService<MemoryKeyValueStore> {
        ChecklistService::new(MemoryKeyValueStore::new(
            Namespace::new(Namespace::CHECKLISTS).unwrap(),
        ))
    }

    #[test]
    fn toggle_twice_restores_state() {
        let service = service();
        let checklist = service.save_checklist(service.create_checklist_template(
            "p1",
            "Draft",
            ChecklistTemplate::NovelDraft,
        ))
        .unwrap();
        let category_id = checklist.categories[0].id.clone();
        let item_id = checklist.categories[0].items[0].id.clone();

        let once = service.toggle_item(&checklist.id, &category_id, &item_id).unwrap();
        assert!(once.categories[0].items[0].checked);
        let twice = service.toggle_item(&checklist.id, &category_id, &item_id).unwrap();
        assert!(!twice.categories[0].items[0].checked);
    }

    #[test]
    fn unknown_category_and_item_are_sub_item_errors() {
        let service = service();
        let checklist = service.save_checklist(service.create_checklist_template(
            "p1",
            "Draft",
            ChecklistTemplate::NovelDraft,
        ))
        .unwrap();
        let category_id = checklist.categories[0].id.clone();

        let err = service
            .set_item_checked(&checklist.id, "cat_nope", "item_nope", true)
            .unwrap_err();
        assert!(matches!(err, ServiceError::SubItemNotFound { item: "category", .. }));

        let err = service
            .remove_item(&checklist.id, &category_id, "item_nope")
            .unwrap_err();
        assert!(matches!(err, ServiceError::SubItemNotFound { item: "item", .. }));
    }

    #[test]
    fn add_and_remove_item_change_totals() {
        let service = service();
        let checklist = service.save_checklist(service.create_checklist_template(
            "p1",
            "Draft",
            ChecklistTemplate::NovelDraft,
        ))
        .unwrap();
        let category_id = checklist.categories[2].id.clone();

        let grown = service.add_item(&checklist.id, &category_id, "Epilogue").unwrap();
        assert_eq!(service.get_checklist_progress(&grown).total, 16);

        let new_item = grown.categories[2].items.last().unwrap().id.clone();
        let shrunk = service
            .remove_item(&checklist.id, &category_id, &new_item)
            .unwrap();
        assert_eq!(service.get_checklist_progress(&shrunk).total, 15);
    }

    #[test]
    fn progress_report_lists_categories_in_order() {
        let service = service();
        let checklist =
            service.create_checklist_template("p1", "Revise", ChecklistTemplate::RevisionPass);
        let report = service.get_checklist_progress_report(&checklist);
        assert_eq!(report.categories.len(), 3);
        assert_eq!(report.categories[0].0, checklist.categories[0].id);
        assert_eq!(report.overall.total, 9);
    }
}
