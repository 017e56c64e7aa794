//! Character interview use-case service.
//!
//! Status changes are not validated: any status may follow any other.

use crate::model::interview::{InterviewSession, InterviewStatus, DEFAULT_QUESTIONS};
use crate::model::progress::Progress;
use crate::service::entity::EntityService;
use crate::service::error::{ServiceError, ServiceResult};
use crate::store::kv::KeyValueStore;
use crate::store::record::StoredRecord;

pub struct InterviewService<S: KeyValueStore> {
    entities: EntityService<InterviewSession, S>,
}

impl<S: KeyValueStore> InterviewService<S> {
    pub fn new(store: S) -> Self {
        Self {
            entities: EntityService::new(store),
        }
    }

    /// Unsaved session seeded with the default question set.
    pub fn create_interview_template(
        &self,
        project_id: &str,
        character_id: &str,
    ) -> InterviewSession {
        InterviewSession::template(project_id, character_id, DEFAULT_QUESTIONS)
    }

    pub fn save_interview(&self, session: InterviewSession) -> ServiceResult<InterviewSession> {
        self.entities.save(session)
    }

    pub fn get_interview_by_id(&self, id: &str) -> ServiceResult<Option<InterviewSession>> {
        self.entities.get_by_id(id)
    }

    pub fn get_all_interviews(&self) -> ServiceResult<Vec<InterviewSession>> {
        self.entities.get_all()
    }

    pub fn get_interviews_by_project(
        &self,
        project_id: &str,
    ) -> ServiceResult<Vec<InterviewSession>> {
        self.entities.get_by_project(project_id)
    }

    pub fn get_interviews_by_character(
        &self,
        character_id: &str,
    ) -> ServiceResult<Vec<InterviewSession>> {
        self.entities
            .filter(|session| session.character_id == character_id)
    }

    pub fn delete_interview(&self, id: &str) -> bool {
        self.entities.delete(id)
    }

    /// Stores an answer and moves the cursor past that question.
    pub fn answer_question(
        &self,
        id: &str,
        question_id: &str,
        answer: &str,
    ) -> ServiceResult<InterviewSession> {
        self.entities.update_with(id, |session| {
            let index = session
                .questions
                .iter()
                .position(|question| question.id == question_id)
                .ok_or_else(|| {
                    ServiceError::sub_item(InterviewSession::KIND, id, "question", question_id)
                })?;
            session.questions[index].answer = answer.to_string();
            session.current_index = session.current_index.max(index + 1);
            Ok(())
        })
    }

    pub fn set_status(&self, id: &str, status: InterviewStatus) -> ServiceResult<InterviewSession> {
        self.entities.update_with(id, |session| {
            session.status = status;
            Ok(())
        })
    }

    pub fn interview_progress(&self, session: &InterviewSession) -> Progress {
        session.progress()
    }
}
