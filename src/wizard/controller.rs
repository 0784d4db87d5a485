//! Step controller: the wizard's state machine
//!
//! Owns the current step, the record being edited and the submitted flag.
//! Every change to the record or step while not submitted is written to
//! the draft slot, and the final step appends the record to the
//! submission list.

use super::step::Step;
use crate::schema::{validate, validate_all, Category, FieldName, FieldResult, Record, ValidationReport};
use crate::storage::{DraftStore, KeyValueStore, StorageResult, Submission, SubmissionStore};
use uuid::Uuid;

/// Result of [`StepController::next`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// A field of the current step failed validation; see the messages
    Blocked,
    /// Moved forward to the given step
    Advanced(Step),
    /// The record was stored as a new submission
    Submitted(Submission),
    /// Nothing happens while the wizard shows the submitted state
    Ignored,
}

impl StepOutcome {
    /// Whether the wizard moved forward (advanced or submitted)
    pub fn is_progress(&self) -> bool {
        matches!(self, Self::Advanced(_) | Self::Submitted(_))
    }
}

pub struct StepController<S: KeyValueStore> {
    store: S,
    step: Step,
    submitted: bool,
    record: Record,
    /// Validation results currently surfaced to the user
    messages: ValidationReport,
    /// Mirror of the persisted submission list
    submissions: Vec<Submission>,
}

impl<S: KeyValueStore> StepController<S> {
    /// Create a controller over `store`, restoring the saved draft and
    /// submission list if any
    pub fn new(mut store: S) -> StorageResult<Self> {
        let draft = DraftStore::new(&mut store).load()?;
        let submissions = match SubmissionStore::new(&mut store).normalize() {
            Ok(submissions) => submissions,
            Err(e) => {
                tracing::warn!("Could not rewrite submission list: {e}");
                SubmissionStore::new(&mut store).list()?
            }
        };

        let (record, step) = match draft {
            Some(draft) => {
                tracing::info!("Restored draft at step {}", draft.step.index());
                (draft.record, draft.step)
            }
            None => (Record::default(), Step::default()),
        };

        Ok(Self {
            store,
            step,
            submitted: false,
            record,
            messages: ValidationReport::default(),
            submissions,
        })
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    pub fn record(&self) -> &Record {
        &self.record
    }

    pub fn messages(&self) -> &ValidationReport {
        &self.messages
    }

    pub fn message(&self, field: FieldName) -> Option<&'static str> {
        self.messages.message(field)
    }

    pub fn submissions(&self) -> &[Submission] {
        &self.submissions
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn save_draft(&mut self) -> StorageResult<()> {
        DraftStore::new(&mut self.store).save(&self.record, self.step)
    }

    fn clear_draft(&mut self) -> StorageResult<()> {
        DraftStore::new(&mut self.store).clear()
    }

    /// Re-check a field after an edit if it has been validated before, so
    /// its message follows the value
    fn revalidate(&mut self, field: FieldName) {
        if self.messages.result(field).is_some() {
            let result = validate(&self.record, &[field])
                .result(field)
                .cloned()
                .unwrap_or(FieldResult {
                    field,
                    message: None,
                });
            self.messages.merge(result);
        }
    }

    /// Replace the value of a text field. Returns false when nothing was
    /// changed (categories field, or the wizard is submitted).
    pub fn set_text(&mut self, field: FieldName, value: String) -> StorageResult<bool> {
        if self.submitted || !self.record.set_text(field, value) {
            return Ok(false);
        }
        self.revalidate(field);
        self.save_draft()?;
        Ok(true)
    }

    /// Toggle a category. Returns false while submitted.
    pub fn toggle_category(&mut self, category: Category) -> StorageResult<bool> {
        if self.submitted {
            return Ok(false);
        }
        self.record.toggle_category(category);
        self.revalidate(FieldName::Categories);
        self.save_draft()?;
        Ok(true)
    }

    /// Validate the current step and move forward, submitting on the last
    /// step
    pub fn next(&mut self) -> StorageResult<StepOutcome> {
        if self.submitted {
            return Ok(StepOutcome::Ignored);
        }

        let report = validate(&self.record, self.step.fields());
        if !report.is_valid() {
            tracing::debug!("Step {} blocked by validation", self.step.index());
            self.messages = report;
            return Ok(StepOutcome::Blocked);
        }

        match self.step.next() {
            Some(next) => {
                self.step = next;
                self.messages.clear();
                self.save_draft()?;
                tracing::debug!("Advanced to step {}", next.index());
                Ok(StepOutcome::Advanced(next))
            }
            None => self.submit(),
        }
    }

    fn submit(&mut self) -> StorageResult<StepOutcome> {
        let report = validate_all(&self.record);
        if let Some(field) = report.first_invalid() {
            // Only reachable with a record restored past its own step
            self.step = Step::owning(field);
            self.messages = validate(&self.record, self.step.fields());
            self.save_draft()?;
            tracing::debug!("Submit sent back to step {}", self.step.index());
            return Ok(StepOutcome::Blocked);
        }

        let submission = SubmissionStore::new(&mut self.store).append(self.record.clone())?;
        self.submissions.push(submission.clone());
        self.submitted = true;
        self.record = Record::default();
        self.step = Step::default();
        self.messages.clear();
        self.clear_draft()?;
        Ok(StepOutcome::Submitted(submission))
    }

    /// Move back one step without validating. Returns whether the step
    /// changed.
    pub fn previous(&mut self) -> StorageResult<bool> {
        if self.submitted {
            return Ok(false);
        }
        let Some(previous) = self.step.previous() else {
            return Ok(false);
        };
        self.step = previous;
        self.save_draft()?;
        tracing::debug!("Moved back to step {}", previous.index());
        Ok(true)
    }

    /// Empty the record, return to the first step and delete the draft
    pub fn reset(&mut self) -> StorageResult<()> {
        self.record = Record::default();
        self.step = Step::default();
        self.messages.clear();
        self.clear_draft()?;
        tracing::info!("Form reset");
        Ok(())
    }

    /// Leave the submitted state to begin a new draft. Returns false when
    /// not submitted.
    pub fn start_new(&mut self) -> StorageResult<bool> {
        if !self.submitted {
            return Ok(false);
        }
        self.submitted = false;
        self.step = Step::default();
        self.clear_draft()?;
        tracing::info!("Started new form");
        Ok(true)
    }

    /// Delete a stored submission by id. Returns whether it existed.
    pub fn delete_submission(&mut self, id: Uuid) -> StorageResult<bool> {
        let removed = SubmissionStore::new(&mut self.store).remove(id)?;
        self.submissions.retain(|s| s.id != id);
        Ok(removed.is_some())
    }

    /// Delete a stored submission by its position in the list
    pub fn delete_submission_at(&mut self, index: usize) -> StorageResult<bool> {
        let removed = SubmissionStore::new(&mut self.store).remove_at(index)?;
        self.submissions = SubmissionStore::new(&mut self.store).list()?;
        Ok(removed.is_some())
    }
}
