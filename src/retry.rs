//! Failed operations of a screen and what "Try again" repeats.
//!
//! A screen keeps at most one failure per kind of operation. A success
//! clears only failures of its own kind, so a detail request that works
//! does not hide a roster load that did not.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Load,
    Create,
    Update(i64),
    Delete(i64),
    Assignments(i64),
    Remove(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Load,
    Save,
    Delete,
    Assignments,
    Remove,
}

impl Operation {
    fn kind(self) -> Kind {
        match self {
            Operation::Load => Kind::Load,
            Operation::Create | Operation::Update(_) => Kind::Save,
            Operation::Delete(_) => Kind::Delete,
            Operation::Assignments(_) => Kind::Assignments,
            Operation::Remove(_) => Kind::Remove,
        }
    }

    /// True for operations that submit an open form.
    pub fn is_save(self) -> bool {
        self.kind() == Kind::Save
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub operation: Operation,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Failures {
    entries: Vec<Failure>,
}

impl Failures {
    /// Record a failure, replacing an older one of the same kind.
    pub fn fail(&mut self, operation: Operation, message: impl Into<String>) {
        let kind = operation.kind();
        self.entries.retain(|f| f.operation.kind() != kind);
        self.entries.push(Failure {
            operation,
            message: message.into(),
        });
    }

    pub fn succeeded(&mut self, operation: Operation) {
        let kind = operation.kind();
        self.entries.retain(|f| f.operation.kind() != kind);
    }

    /// The form was closed: its submit can no longer be repeated.
    pub fn form_closed(&mut self) {
        self.entries.retain(|f| !f.operation.is_save());
    }

    /// The operation a retry of `operation` should run, if it is still pending.
    pub fn retry(&self, operation: Operation) -> Option<Operation> {
        self.entries
            .iter()
            .find(|f| f.operation == operation)
            .map(|f| f.operation)
    }

    pub fn load_failed(&self) -> bool {
        self.entries.iter().any(|f| f.operation.kind() == Kind::Load)
    }

    /// Whether the list area gives way to the error banner. Only a failed
    /// load of an empty list does; a failed write keeps the rendered list.
    pub fn hides_list(&self, list_is_empty: bool) -> bool {
        list_is_empty && self.load_failed()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Failure> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_success_keeps_load_failure() {
        let mut failures = Failures::default();
        failures.fail(Operation::Load, "Could not load workouts");
        failures.fail(Operation::Assignments(3), "Could not load assignments");

        failures.succeeded(Operation::Assignments(3));
        assert!(failures.load_failed());
        assert_eq!(failures.retry(Operation::Load), Some(Operation::Load));

        failures.succeeded(Operation::Remove(9));
        assert!(failures.load_failed());

        failures.succeeded(Operation::Load);
        assert_eq!(failures, Failures::default());
    }

    #[test]
    fn test_closing_form_drops_save_retry() {
        let mut failures = Failures::default();
        failures.fail(Operation::Update(5), "Could not save the workout");
        failures.form_closed();

        assert_eq!(failures.retry(Operation::Update(5)), None);
        assert_eq!(failures.retry(Operation::Create), None);
        assert_eq!(failures, Failures::default());
    }

    #[test]
    fn test_closing_form_keeps_other_failures() {
        let mut failures = Failures::default();
        failures.fail(Operation::Delete(2), "Could not delete");
        failures.fail(Operation::Create, "Could not save");
        failures.form_closed();

        assert_eq!(failures.retry(Operation::Delete(2)), Some(Operation::Delete(2)));
        assert_eq!(failures.iter().count(), 1);
    }

    #[test]
    fn test_retry_repeats_the_failed_target() {
        let mut failures = Failures::default();
        failures.fail(Operation::Update(5), "first");
        assert_eq!(failures.retry(Operation::Update(5)), Some(Operation::Update(5)));
        assert_eq!(failures.retry(Operation::Create), None);

        failures.fail(Operation::Create, "second");
        assert_eq!(failures.iter().count(), 1);
        assert_eq!(failures.retry(Operation::Update(5)), None);
    }

    #[test]
    fn test_failed_write_keeps_rendered_list() {
        let mut failures = Failures::default();
        failures.fail(Operation::Delete(1), "Could not delete");
        failures.fail(Operation::Create, "Could not save");
        assert!(!failures.hides_list(false));
        assert!(!failures.hides_list(true));

        failures.fail(Operation::Load, "Could not load");
        assert!(!failures.hides_list(false));
        assert!(failures.hides_list(true));
    }

    #[test]
    fn test_new_failure_replaces_same_kind() {
        let mut failures = Failures::default();
        failures.fail(Operation::Remove(1), "a");
        failures.fail(Operation::Remove(2), "b");

        let entries: Vec<_> = failures.iter().collect();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].operation, Operation::Remove(2));
        assert_eq!(entries[0].message, "b");
    }
}
