//! Submit preconditions of the appointment form.
//!
//! Every failed check becomes a [`ValidationIssue`]; the report aggregates
//! them into one message so a rejected submit is surfaced once.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

use crate::cascade::Selection;
use crate::core::{FormConfig, Messages};
use crate::types::Service;

static OBJECT_ID: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[0-9a-fA-F]{24}$").ok());

/// Whether `id` looks like a backend object id (24 hex characters).
pub fn is_object_id(id: &str) -> bool {
    OBJECT_ID.as_ref().is_some_and(|re| re.is_match(id))
}

/// Form field an issue is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    Clinic,
    Consultant,
    Service,
    Member,
    DateTime,
}

impl FormField {
    pub fn label(&self) -> &'static str {
        match self {
            FormField::Clinic => "clinic",
            FormField::Consultant => "consultant",
            FormField::Service => "service",
            FormField::Member => "member",
            FormField::DateTime => "date/time",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueCode {
    Required,
    SingleConsultant,
    InvalidId,
    ServiceNotOffered,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub field: FormField,
    pub code: IssueCode,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(field: FormField, code: IssueCode, message: impl Into<String>) -> Self {
        Self {
            field,
            code,
            message: message.into(),
        }
    }

    pub fn required(field: FormField) -> Self {
        Self::new(field, IssueCode::Required, format!("{field} is required"))
    }
}

/// All issues of one submit attempt plus the headline shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    headline: String,
    issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn new(headline: impl Into<String>) -> Self {
        Self {
            headline: headline.into(),
            issues: Vec::new(),
        }
    }

    pub fn from_issues(headline: impl Into<String>, issues: Vec<ValidationIssue>) -> Self {
        Self {
            headline: headline.into(),
            issues,
        }
    }

    pub fn push(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    pub fn merge(&mut self, other: ValidationReport) {
        self.issues.extend(other.issues);
    }

    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    /// Fields with at least one issue, in order of first appearance.
    pub fn fields(&self) -> Vec<FormField> {
        let mut fields = Vec::new();
        for issue in &self.issues {
            if !fields.contains(&issue.field) {
                fields.push(issue.field);
            }
        }
        fields
    }

    pub fn has_issue(&self, field: FormField) -> bool {
        self.issues.iter().any(|issue| issue.field == field)
    }

    /// Single aggregated message naming every offending field.
    pub fn summary(&self) -> String {
        if self.issues.is_empty() {
            return String::new();
        }
        let fields: Vec<&str> = self.fields().iter().map(FormField::label).collect();
        format!("{}: {}", self.headline, fields.join(", "))
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

/// What the form holds at submit time.
#[derive(Debug, Clone, Copy)]
pub struct SubmissionDraft<'a> {
    pub selection: &'a Selection,
    pub scheduled_at: Option<DateTime<Utc>>,
    /// The consultant's service list when it is loaded.
    pub offered_services: Option<&'a [Service]>,
}

/// Checks the submit preconditions.
#[derive(Debug, Clone)]
pub struct SubmissionValidator {
    require_object_ids: bool,
    headline: String,
    invalid_id: String,
}

impl SubmissionValidator {
    pub fn new(form: &FormConfig, messages: &Messages) -> Self {
        Self {
            require_object_ids: form.require_object_ids,
            headline: messages.required_fields_missing.clone(),
            invalid_id: messages.invalid_object_id.clone(),
        }
    }

    pub fn validate(&self, draft: &SubmissionDraft<'_>) -> ValidationReport {
        let selection = draft.selection;
        let mut report = ValidationReport::new(self.headline.clone());

        self.check_reference(&mut report, FormField::Clinic, selection.clinic.as_deref());

        match selection.consultants.as_slice() {
            [] => report.push(ValidationIssue::required(FormField::Consultant)),
            [only] => self.check_reference(&mut report, FormField::Consultant, Some(only.as_str())),
            _ => report.push(ValidationIssue::new(
                FormField::Consultant,
                IssueCode::SingleConsultant,
                "exactly one consultant must be selected",
            )),
        }

        self.check_reference(&mut report, FormField::Service, selection.service.as_deref());
        if let (Some(service), Some(offered)) = (selection.service.as_deref(), draft.offered_services)
        {
            if !service.is_empty() && !offered.iter().any(|s| s.id == service) {
                report.push(ValidationIssue::new(
                    FormField::Service,
                    IssueCode::ServiceNotOffered,
                    format!("service {service} is not offered by the selected consultant"),
                ));
            }
        }

        self.check_reference(&mut report, FormField::Member, selection.member.as_deref());

        if draft.scheduled_at.is_none() {
            report.push(ValidationIssue::required(FormField::DateTime));
        }

        report
    }

    fn check_reference(&self, report: &mut ValidationReport, field: FormField, id: Option<&str>) {
        match id.filter(|id| !id.is_empty()) {
            None => report.push(ValidationIssue::required(field)),
            Some(id) if self.require_object_ids && !is_object_id(id) => {
                report.push(ValidationIssue::new(
                    field,
                    IssueCode::InvalidId,
                    format!("{id} {}", self.invalid_id),
                ));
            }
            Some(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn validator(strict: bool) -> SubmissionValidator {
        let form = FormConfig {
            require_object_ids: strict,
            ..FormConfig::default()
        };
        SubmissionValidator::new(&form, &Messages::default())
    }

    fn complete() -> Selection {
        Selection {
            clinic: Some("k1".into()),
            consultants: vec!["c1".into()],
            service: Some("s1".into()),
            member: Some("m1".into()),
        }
    }

    fn when() -> Option<DateTime<Utc>> {
        Some(Utc.with_ymd_and_hms(2024, 3, 10, 11, 30, 0).unwrap())
    }

    #[test]
    fn complete_selection_passes() {
        let selection = complete();
        let report = validator(false).validate(&SubmissionDraft {
            selection: &selection,
            scheduled_at: when(),
            offered_services: None,
        });
        assert!(report.is_valid());
        assert_eq!(report.summary(), "");
    }

    #[test]
    fn missing_fields_are_named_once() {
        let selection = Selection {
            service: None,
            member: Some(String::new()),
            ..complete()
        };
        let report = validator(false).validate(&SubmissionDraft {
            selection: &selection,
            scheduled_at: None,
            offered_services: None,
        });
        assert_eq!(
            report.fields(),
            vec![FormField::Service, FormField::Member, FormField::DateTime]
        );
        assert_eq!(
            report.summary(),
            "Please fill in all required fields: service, member, date/time"
        );
    }

    #[test]
    fn more_than_one_consultant_is_rejected() {
        let selection = Selection {
            consultants: vec!["c1".into(), "c2".into()],
            ..complete()
        };
        let report = validator(false).validate(&SubmissionDraft {
            selection: &selection,
            scheduled_at: when(),
            offered_services: None,
        });
        assert_eq!(report.issues()[0].code, IssueCode::SingleConsultant);
    }

    #[test]
    fn strict_mode_checks_object_ids() {
        assert!(is_object_id("65a1f0c2e4b0a1b2c3d4e5f6"));
        assert!(!is_object_id("k1"));

        let selection = complete();
        let report = validator(true).validate(&SubmissionDraft {
            selection: &selection,
            scheduled_at: when(),
            offered_services: None,
        });
        assert_eq!(report.fields().len(), 4);
        assert!(report.issues().iter().all(|i| i.code == IssueCode::InvalidId));
    }
}
