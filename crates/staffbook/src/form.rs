//! The employee editor.
//!
//! The form is a small state machine: closed, open for create, open for edit
//! (seeded from an existing record), and submitting. Submitting validates
//! every field and, if all pass, hands an [`EmployeeDraft`] back to the caller.
//! The form never touches storage; the caller decides what a submission means
//! and closes the form afterwards.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::{DateTime, NaiveDate, Utc};
use tracing::debug;

use crate::config::DEFAULT_MAX_IMAGE_BYTES;
use crate::employee::{Employee, EmployeeDraft, EmployeeId, Gender, State};
use crate::error::Result;

/// Shortest accepted trimmed name, in characters.
const MIN_NAME_CHARS: usize = 2;

/// What the form was opened for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    /// A new record.
    Create,
    /// An existing record.
    Edit {
        /// Id of the record being edited.
        id: EmployeeId,
    },
}

/// Lifecycle of the form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormState {
    /// Not shown.
    #[default]
    Closed,
    /// Accepting input.
    Open(FormMode),
    /// Validated and handed to the caller; waiting to be closed.
    Submitting(FormMode),
}

/// A form field that can carry an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    /// Avatar image.
    ProfileImage,
    /// Full name.
    FullName,
    /// Gender.
    Gender,
    /// Date of birth.
    Dob,
    /// Region.
    State,
}

impl Field {
    /// Name used in the persisted record.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ProfileImage => "profileImage",
            Self::FullName => "fullName",
            Self::Gender => "gender",
            Self::Dob => "dob",
            Self::State => "state",
        }
    }
}

/// Per-field error messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    /// No errors at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of fields with an error.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Message for `field`, if it has one.
    #[must_use]
    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    /// All errors in form order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    fn set(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    fn clear(&mut self, field: Field) {
        self.0.remove(&field);
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {message}", field.as_str())?;
            first = false;
        }
        Ok(())
    }
}

/// Raw field values as entered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormData {
    /// Full name, untrimmed.
    pub full_name: String,
    /// Selected gender.
    pub gender: Option<Gender>,
    /// Date of birth as typed, `YYYY-MM-DD`.
    pub dob: String,
    /// Avatar data URI, or empty.
    pub profile_image: String,
    /// Selected state.
    pub state: Option<State>,
    /// Active switch.
    pub is_active: bool,
}

impl Default for FormData {
    fn default() -> Self {
        Self {
            full_name: String::new(),
            gender: None,
            dob: String::new(),
            profile_image: String::new(),
            state: None,
            is_active: true,
        }
    }
}

impl From<&Employee> for FormData {
    fn from(employee: &Employee) -> Self {
        Self {
            full_name: employee.full_name.clone(),
            gender: Some(employee.gender),
            dob: employee.dob.format("%Y-%m-%d").to_string(),
            profile_image: employee.profile_image.clone(),
            state: Some(employee.state),
            is_active: employee.is_active,
        }
    }
}

/// A validated form, ready for the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Add a new record with these fields.
    Create(EmployeeDraft),
    /// Replace the fields of record `id`.
    Edit {
        /// Record being edited.
        id: EmployeeId,
        /// New field values.
        draft: EmployeeDraft,
    },
}

/// Why `submit` produced nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// The form is not open for input.
    NotOpen,
    /// One or more fields failed validation.
    Invalid(FieldErrors),
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotOpen => f.write_str("form is not open"),
            Self::Invalid(errors) => fmt::Display::fmt(errors, f),
        }
    }
}

/// The employee editor.
#[derive(Debug, Clone)]
pub struct EmployeeForm {
    state: FormState,
    data: FormData,
    errors: FieldErrors,
    max_image_bytes: u64,
}

impl Default for EmployeeForm {
    fn default() -> Self {
        Self::new()
    }
}

impl EmployeeForm {
    /// A closed form with the default image limit.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: FormState::Closed,
            data: FormData::default(),
            errors: FieldErrors::default(),
            max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
        }
    }

    /// Override the largest accepted image.
    #[must_use]
    pub fn with_max_image_bytes(mut self, max: u64) -> Self {
        self.max_image_bytes = max;
        self
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> FormState {
        self.state.clone()
    }

    /// Whether the form accepts input.
    #[must_use]
    pub fn is_open(&self) -> bool {
        matches!(self.state, FormState::Open(_))
    }

    /// Dialog title for the current mode.
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self.state {
            FormState::Open(FormMode::Edit { .. }) | FormState::Submitting(FormMode::Edit { .. }) => {
                "Edit Employee"
            }
            _ => "Add New Employee",
        }
    }

    /// Current field values.
    #[must_use]
    pub fn data(&self) -> &FormData {
        &self.data
    }

    /// Mutable field values.
    pub fn data_mut(&mut self) -> &mut FormData {
        &mut self.data
    }

    /// Current field errors.
    #[must_use]
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Open with empty fields for a new record.
    pub fn open_create(&mut self) {
        self.data = FormData::default();
        self.errors = FieldErrors::default();
        self.state = FormState::Open(FormMode::Create);
    }

    /// Open seeded with `employee`'s fields.
    pub fn open_edit(&mut self, employee: &Employee) {
        self.data = FormData::from(employee);
        self.errors = FieldErrors::default();
        self.state = FormState::Open(FormMode::Edit {
            id: employee.id.clone(),
        });
    }

    /// Close the form, whatever its state.
    pub fn close(&mut self) {
        self.state = FormState::Closed;
    }

    /// Abandon the open form without submitting.
    ///
    /// Entered values and errors are discarded.
    pub fn cancel(&mut self) {
        self.data = FormData::default();
        self.errors = FieldErrors::default();
        self.close();
    }

    /// Read an image file and use it as the avatar.
    ///
    /// Returns `Ok(false)` when the file is rejected (too large or not an
    /// image); the rejection is recorded as a field error and any existing
    /// image is kept.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub fn attach_image(&mut self, path: impl AsRef<Path>) -> Result<bool> {
        let path = path.as_ref();
        let size = std::fs::metadata(path)?.len();
        if size > self.max_image_bytes {
            self.reject_oversized_image();
            return Ok(false);
        }
        let Some(mime) = image_mime_type(path) else {
            self.errors.set(Field::ProfileImage, "File must be an image");
            return Ok(false);
        };
        let bytes = std::fs::read(path)?;
        Ok(self.attach_image_bytes(mime, &bytes))
    }

    /// Use `bytes` of type `mime` as the avatar.
    ///
    /// Returns `false` and records a field error if the image is too large.
    pub fn attach_image_bytes(&mut self, mime: &str, bytes: &[u8]) -> bool {
        if u64::try_from(bytes.len()).unwrap_or(u64::MAX) > self.max_image_bytes {
            self.reject_oversized_image();
            return false;
        }
        self.data.profile_image = to_data_uri(mime, bytes);
        self.errors.clear(Field::ProfileImage);
        debug!(mime, bytes = bytes.len(), "Attached profile image");
        true
    }

    /// Remove the avatar.
    pub fn clear_image(&mut self) {
        self.data.profile_image.clear();
        self.errors.clear(Field::ProfileImage);
    }

    fn reject_oversized_image(&mut self) {
        let message = format!(
            "Image must be less than {}",
            human_size(self.max_image_bytes)
        );
        self.errors.set(Field::ProfileImage, message);
    }

    /// Validate and, if every field passes, hand back a submission.
    ///
    /// `now` is the instant the date of birth must precede. On failure the
    /// form stays open with the new errors in place.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError::NotOpen`] if the form isn't open, or
    /// [`SubmitError::Invalid`] with every failing field.
    pub fn submit(&mut self, now: DateTime<Utc>) -> std::result::Result<Submission, SubmitError> {
        let FormState::Open(mode) = self.state.clone() else {
            return Err(SubmitError::NotOpen);
        };

        match validate(&self.data, now) {
            Ok(draft) => {
                self.errors = FieldErrors::default();
                self.state = FormState::Submitting(mode.clone());
                Ok(match mode {
                    FormMode::Create => Submission::Create(draft),
                    FormMode::Edit { id } => Submission::Edit { id, draft },
                })
            }
            Err(errors) => {
                self.errors = errors.clone();
                Err(SubmitError::Invalid(errors))
            }
        }
    }
}

/// Check every field of `data`.
///
/// # Errors
///
/// Returns all field errors found.
pub fn validate(data: &FormData, now: DateTime<Utc>) -> std::result::Result<EmployeeDraft, FieldErrors> {
    let mut errors = FieldErrors::default();

    let trimmed = data.full_name.trim();
    if trimmed.is_empty() {
        errors.set(Field::FullName, "Full name is required");
    } else if trimmed.chars().count() < MIN_NAME_CHARS {
        errors.set(Field::FullName, "Name must be at least 2 characters");
    }

    if data.gender.is_none() {
        errors.set(Field::Gender, "Gender is required");
    }

    let dob = if data.dob.trim().is_empty() {
        errors.set(Field::Dob, "Date of birth is required");
        None
    } else {
        match NaiveDate::parse_from_str(data.dob.trim(), "%Y-%m-%d") {
            Ok(date) => {
                if date.and_time(chrono::NaiveTime::MIN).and_utc() >= now {
                    errors.set(Field::Dob, "DOB must be in the past");
                }
                Some(date)
            }
            Err(_) => {
                errors.set(Field::Dob, "Date of birth must be a valid date");
                None
            }
        }
    };

    if data.state.is_none() {
        errors.set(Field::State, "State is required");
    }

    match (data.gender, dob, data.state) {
        (Some(gender), Some(dob), Some(state)) if errors.is_empty() => Ok(EmployeeDraft {
            full_name: data.full_name.clone(),
            gender,
            dob,
            profile_image: data.profile_image.clone(),
            state,
            is_active: data.is_active,
        }),
        _ => Err(errors),
    }
}

/// Mime type for an image file, judged by extension.
#[must_use]
pub fn image_mime_type(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let mime = match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        _ => return None,
    };
    Some(mime)
}

/// Encode `bytes` as a base64 data URI.
#[must_use]
pub fn to_data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

fn human_size(bytes: u64) -> String {
    const MIB: u64 = 1024 * 1024;
    if bytes % MIB == 0 {
        format!("{}MB", bytes / MIB)
    } else if bytes % 1024 == 0 {
        format!("{}KB", bytes / 1024)
    } else {
        format!("{bytes} bytes")
    }
}
