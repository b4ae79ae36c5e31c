//! The four content drafts and their validation rules.

use serde::Serialize;
use validator::ValidateUrl;

use super::{Draft, Intent, LocalFile, MediaType, ResourceType, SupportCategory};
use crate::error::ValidationError;
use crate::upload::UploadRoute;

/// Inclusive bounds for a support case's age.
pub const MIN_AGE: i32 = 0;
pub const MAX_AGE: i32 = 150;

// ---------------------------------------------------------------------------
// Field helpers
// ---------------------------------------------------------------------------

fn require(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new(field, format!("{field} is required")))
    } else {
        Ok(())
    }
}

fn require_url(field: &str, value: &str) -> Result<(), ValidationError> {
    require(field, value)?;
    let value = value.trim();
    let has_web_scheme = value.starts_with("http://") || value.starts_with("https://");
    if has_web_scheme && value.validate_url() {
        Ok(())
    } else {
        Err(ValidationError::new(
            field,
            format!("{field} must be an http(s) URL"),
        ))
    }
}

fn parse_age(value: &str) -> Result<i32, ValidationError> {
    require("age", value)?;
    let age: i32 = value
        .trim()
        .parse()
        .map_err(|_| ValidationError::new("age", "age must be a whole number"))?;
    if !(MIN_AGE..=MAX_AGE).contains(&age) {
        return Err(ValidationError::new(
            "age",
            format!("age must be between {MIN_AGE} and {MAX_AGE}"),
        ));
    }
    Ok(age)
}

/// Attach `file` unless the slot already holds the route's file limit.
fn attach_once(
    slot: &mut Option<LocalFile>,
    field: &str,
    route: UploadRoute,
    file: LocalFile,
) -> Result<(), ValidationError> {
    let attached = usize::from(slot.is_some());
    if attached >= route.max_files() {
        return Err(ValidationError::new(
            field,
            format!("at most {} file may be attached to {field}", route.max_files()),
        ));
    }
    *slot = Some(file);
    Ok(())
}

fn unknown_field(field: &str) -> ValidationError {
    ValidationError::new(field, format!("unknown field '{field}'"))
}

/// Trim an optional user-entered string, mapping blank input to `None`.
pub(crate) fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDraft {
    pub project_name: String,
    pub description: String,
    #[serde(skip)]
    pub image: Option<LocalFile>,
}

impl Draft for ServiceDraft {
    const TEXT_FIELDS: &'static [&'static str] = &["projectName", "description"];
    const FILE_FIELDS: &'static [&'static str] = &["image"];

    fn set_text(&mut self, field: &str, value: String) -> Result<(), ValidationError> {
        match field {
            "projectName" => self.project_name = value,
            "description" => self.description = value,
            other => return Err(unknown_field(other)),
        }
        Ok(())
    }

    fn attach(&mut self, field: &str, file: LocalFile) -> Result<(), ValidationError> {
        match field {
            "image" => attach_once(&mut self.image, field, UploadRoute::Image, file),
            other => Err(unknown_field(other)),
        }
    }

    fn validate(&self, _intent: Intent) -> Result<(), ValidationError> {
        require("projectName", &self.project_name)?;
        require("description", &self.description)
    }
}

// ---------------------------------------------------------------------------
// Impact story
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactDraft {
    pub heading: String,
    pub description: String,
    pub media_type: MediaType,
    /// External video link; only meaningful when `media_type` is video.
    pub media_url: String,
    #[serde(skip)]
    pub image: Option<LocalFile>,
}

impl ImpactDraft {
    /// The media URL to persist when no upload replaces it.
    pub fn video_url(&self) -> Option<String> {
        match self.media_type {
            MediaType::Video => non_blank(&self.media_url),
            MediaType::Image => None,
        }
    }
}

impl Draft for ImpactDraft {
    const TEXT_FIELDS: &'static [&'static str] =
        &["heading", "description", "mediaType", "mediaUrl"];
    const FILE_FIELDS: &'static [&'static str] = &["image"];

    fn set_text(&mut self, field: &str, value: String) -> Result<(), ValidationError> {
        match field {
            "heading" => self.heading = value,
            "description" => self.description = value,
            "mediaType" => self.media_type = value.parse()?,
            "mediaUrl" => self.media_url = value,
            other => return Err(unknown_field(other)),
        }
        Ok(())
    }

    fn attach(&mut self, field: &str, file: LocalFile) -> Result<(), ValidationError> {
        match field {
            "image" => attach_once(&mut self.image, field, UploadRoute::Image, file),
            other => Err(unknown_field(other)),
        }
    }

    fn validate(&self, intent: Intent) -> Result<(), ValidationError> {
        require("heading", &self.heading)?;
        require("description", &self.description)?;
        match self.media_type {
            MediaType::Video => require_url("mediaUrl", &self.media_url),
            MediaType::Image if intent == Intent::Create && self.image.is_none() => Err(
                ValidationError::new("image", "an image is required for image stories"),
            ),
            MediaType::Image => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// Support case
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportDraft {
    pub category: SupportCategory,
    pub name: String,
    /// Kept as typed so an invalid entry survives a failed submission.
    pub age: String,
    pub location: String,
    pub story: String,
    #[serde(skip)]
    pub image: Option<LocalFile>,
}

impl SupportDraft {
    /// The parsed age. Only meaningful after [`Draft::validate`] succeeded.
    pub fn parsed_age(&self) -> Result<i32, ValidationError> {
        parse_age(&self.age)
    }
}

impl Draft for SupportDraft {
    const TEXT_FIELDS: &'static [&'static str] =
        &["category", "name", "age", "location", "story"];
    const FILE_FIELDS: &'static [&'static str] = &["image"];

    fn set_text(&mut self, field: &str, value: String) -> Result<(), ValidationError> {
        match field {
            "category" => self.category = value.parse()?,
            "name" => self.name = value,
            "age" => self.age = value,
            "location" => self.location = value,
            "story" => self.story = value,
            other => return Err(unknown_field(other)),
        }
        Ok(())
    }

    fn attach(&mut self, field: &str, file: LocalFile) -> Result<(), ValidationError> {
        match field {
            "image" => attach_once(&mut self.image, field, UploadRoute::Image, file),
            other => Err(unknown_field(other)),
        }
    }

    fn validate(&self, _intent: Intent) -> Result<(), ValidationError> {
        require("name", &self.name)?;
        parse_age(&self.age)?;
        require("location", &self.location)?;
        require("story", &self.story)
    }
}

// ---------------------------------------------------------------------------
// Resource
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDraft {
    pub name: String,
    pub description: String,
    pub resource_type: ResourceType,
    /// External link; only meaningful when `resource_type` is link.
    pub resource_url: String,
    #[serde(skip)]
    pub document: Option<LocalFile>,
    #[serde(skip)]
    pub thumbnail: Option<LocalFile>,
}

impl ResourceDraft {
    pub fn link_url(&self) -> Option<String> {
        match self.resource_type {
            ResourceType::Link => non_blank(&self.resource_url),
            ResourceType::Document => None,
        }
    }
}

impl Draft for ResourceDraft {
    const TEXT_FIELDS: &'static [&'static str] =
        &["name", "description", "resourceType", "resourceUrl"];
    const FILE_FIELDS: &'static [&'static str] = &["document", "thumbnail"];

    fn set_text(&mut self, field: &str, value: String) -> Result<(), ValidationError> {
        match field {
            "name" => self.name = value,
            "description" => self.description = value,
            "resourceType" => self.resource_type = value.parse()?,
            "resourceUrl" => self.resource_url = value,
            other => return Err(unknown_field(other)),
        }
        Ok(())
    }

    fn attach(&mut self, field: &str, file: LocalFile) -> Result<(), ValidationError> {
        match field {
            "document" => attach_once(&mut self.document, field, UploadRoute::Document, file),
            "thumbnail" => attach_once(&mut self.thumbnail, field, UploadRoute::Image, file),
            other => Err(unknown_field(other)),
        }
    }

    fn validate(&self, intent: Intent) -> Result<(), ValidationError> {
        require("name", &self.name)?;
        require("description", &self.description)?;
        match self.resource_type {
            ResourceType::Link => require_url("resourceUrl", &self.resource_url),
            ResourceType::Document if intent == Intent::Create && self.document.is_none() => {
                Err(ValidationError::new(
                    "document",
                    "a document is required for document resources",
                ))
            }
            ResourceType::Document => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn png() -> LocalFile {
        LocalFile::new("photo.png", "image/png", vec![1u8; 16])
    }

    fn pdf() -> LocalFile {
        LocalFile::new("report.pdf", "application/pdf", vec![1u8; 16])
    }

    fn support(age: &str) -> SupportDraft {
        SupportDraft {
            category: SupportCategory::Mother,
            name: "Amina".into(),
            age: age.into(),
            location: "Kampala".into(),
            story: "Needs prenatal care".into(),
            image: None,
        }
    }

    // -- Service --

    #[test]
    fn service_requires_name_then_description() {
        let draft = ServiceDraft::default();
        let err = draft.validate(Intent::Create).unwrap_err();
        assert_eq!(err.field, "projectName");

        let draft = ServiceDraft {
            project_name: "Clean Water".into(),
            description: "   ".into(),
            image: None,
        };
        let err = draft.validate(Intent::Create).unwrap_err();
        assert_eq!(err.field, "description");
    }

    #[test]
    fn service_image_is_optional() {
        let draft = ServiceDraft {
            project_name: "Clean Water".into(),
            description: "Wells for 3 villages".into(),
            image: None,
        };
        assert!(draft.is_valid(Intent::Create));
    }

    // -- Support --

    #[test]
    fn support_age_boundaries_are_accepted() {
        assert!(support("0").is_valid(Intent::Create));
        assert!(support("150").is_valid(Intent::Create));
        assert!(support(" 42 ").is_valid(Intent::Create));
    }

    #[test]
    fn support_age_out_of_range_is_rejected() {
        for age in ["-1", "151", "200"] {
            let err = support(age).validate(Intent::Create).unwrap_err();
            assert_eq!(err.field, "age", "age {age} should be rejected");
            assert!(err.message.contains("between 0 and 150"));
        }
    }

    #[test]
    fn support_non_numeric_age_is_rejected() {
        for age in ["abc", "12.5", "", "1e2"] {
            let err = support(age).validate(Intent::Create).unwrap_err();
            assert_eq!(err.field, "age", "age {age:?} should be rejected");
        }
    }

    #[test]
    fn support_parsed_age_matches_input() {
        assert_eq!(support("7").parsed_age(), Ok(7));
    }

    // -- Impact --

    #[test]
    fn impact_video_requires_media_url() {
        let mut draft = ImpactDraft {
            heading: "New school".into(),
            description: "Built in 2024".into(),
            media_type: MediaType::Video,
            ..Default::default()
        };
        let err = draft.validate(Intent::Create).unwrap_err();
        assert_eq!(err.field, "mediaUrl");

        draft.media_url = "https://video.example.org/watch?v=1".into();
        assert!(draft.is_valid(Intent::Create), "video needs no upload");
    }

    #[test]
    fn impact_video_url_must_be_web_url() {
        let draft = ImpactDraft {
            heading: "New school".into(),
            description: "Built in 2024".into(),
            media_type: MediaType::Video,
            media_url: "not a url".into(),
            image: None,
        };
        let err = draft.validate(Intent::Create).unwrap_err();
        assert_eq!(err.field, "mediaUrl");
        assert!(err.message.contains("http(s) URL"));
    }

    #[test]
    fn impact_image_requires_file_on_create_only() {
        let mut draft = ImpactDraft {
            heading: "New school".into(),
            description: "Built in 2024".into(),
            media_type: MediaType::Image,
            ..Default::default()
        };
        assert_eq!(draft.validate(Intent::Create).unwrap_err().field, "image");
        assert!(draft.is_valid(Intent::Update));

        draft.image = Some(png());
        assert!(draft.is_valid(Intent::Create));
    }

    #[test]
    fn impact_video_url_ignored_for_image_stories() {
        let draft = ImpactDraft {
            media_type: MediaType::Image,
            media_url: "https://video.example.org/1".into(),
            ..Default::default()
        };
        assert_eq!(draft.video_url(), None);
    }

    // -- Resource --

    #[test]
    fn resource_document_requires_file() {
        let mut draft = ResourceDraft {
            name: "Annual report".into(),
            description: "2024 results".into(),
            resource_type: ResourceType::Document,
            ..Default::default()
        };
        assert_eq!(draft.validate(Intent::Create).unwrap_err().field, "document");

        draft.document = Some(pdf());
        assert!(draft.is_valid(Intent::Create));
    }

    #[test]
    fn resource_link_relaxes_document_but_requires_url() {
        let mut draft = ResourceDraft {
            name: "Partner site".into(),
            description: "Our partner".into(),
            resource_type: ResourceType::Link,
            ..Default::default()
        };
        assert_eq!(
            draft.validate(Intent::Create).unwrap_err().field,
            "resourceUrl"
        );

        draft.resource_url = "https://partner.example.org".into();
        assert!(draft.is_valid(Intent::Create));
        assert_eq!(
            draft.link_url().as_deref(),
            Some("https://partner.example.org")
        );
    }

    // -- Field assignment --

    #[test]
    fn set_text_parses_enums_and_rejects_unknown_fields() {
        let mut draft = SupportDraft::default();
        draft.set_text("category", "child".into()).unwrap();
        assert_eq!(draft.category, SupportCategory::Child);

        let err = draft.set_text("category", "father".into()).unwrap_err();
        assert_eq!(err.field, "category");

        assert_matches!(draft.set_text("nickname", "x".into()), Err(e) if e.field == "nickname");
    }

    #[test]
    fn attach_accepts_one_file_per_input() {
        let mut draft = ResourceDraft::default();
        draft.attach("thumbnail", png()).unwrap();
        let err = draft.attach("thumbnail", png()).unwrap_err();
        assert_eq!(err.field, "thumbnail");
        assert_eq!(
            err.message,
            format!("at most {} file may be attached to thumbnail", UploadRoute::Image.max_files())
        );
        assert!(draft.attach("document", pdf()).is_ok());
        assert!(draft.attach("document", pdf()).is_err());
    }

    #[test]
    fn serialized_draft_omits_files() {
        let draft = ServiceDraft {
            project_name: "Clean Water".into(),
            description: "Wells".into(),
            image: Some(png()),
        };
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["projectName"], "Clean Water");
        assert!(json.get("image").is_none());
    }
}
