//! The four content forms.

use outreach_core::content::{
    Collection, ImpactDraft, MediaType, ResourceDraft, ResourceType, ServiceDraft, SupportDraft,
};
use outreach_core::error::ValidationError;
use outreach_core::upload::UploadRoute;
use outreach_db::models::{NewImpact, NewRecord, NewResource, NewService, NewSupport};

use super::{FormKind, UploadField, Uploaded};

fn trimmed(value: &str) -> String {
    value.trim().to_string()
}

pub struct ServiceForm;

impl FormKind for ServiceForm {
    type Draft = ServiceDraft;

    const COLLECTION: Collection = Collection::Services;

    fn upload_fields(draft: &ServiceDraft) -> Vec<UploadField<'_>> {
        draft
            .image
            .iter()
            .map(|file| UploadField {
                field: "image",
                route: UploadRoute::Image,
                file,
            })
            .collect()
    }

    fn into_record(draft: &ServiceDraft, uploaded: &Uploaded) -> Result<NewRecord, ValidationError> {
        Ok(NewRecord::Service(NewService {
            project_name: trimmed(&draft.project_name),
            description: trimmed(&draft.description),
            image_url: uploaded.url("image"),
        }))
    }
}

/// Image stories upload their file; video stories link out and ignore it.
pub struct ImpactForm;

impl FormKind for ImpactForm {
    type Draft = ImpactDraft;

    const COLLECTION: Collection = Collection::Impact;

    fn upload_fields(draft: &ImpactDraft) -> Vec<UploadField<'_>> {
        match (draft.media_type, &draft.image) {
            (MediaType::Image, Some(file)) => vec![UploadField {
                field: "image",
                route: UploadRoute::Image,
                file,
            }],
            _ => Vec::new(),
        }
    }

    fn into_record(draft: &ImpactDraft, uploaded: &Uploaded) -> Result<NewRecord, ValidationError> {
        let media_url = match draft.media_type {
            MediaType::Video => draft.video_url(),
            MediaType::Image => uploaded.url("image"),
        };
        Ok(NewRecord::Impact(NewImpact {
            heading: trimmed(&draft.heading),
            description: trimmed(&draft.description),
            media_type: draft.media_type,
            media_url,
        }))
    }
}

pub struct SupportForm;

impl FormKind for SupportForm {
    type Draft = SupportDraft;

    const COLLECTION: Collection = Collection::Support;

    fn upload_fields(draft: &SupportDraft) -> Vec<UploadField<'_>> {
        draft
            .image
            .iter()
            .map(|file| UploadField {
                field: "image",
                route: UploadRoute::Image,
                file,
            })
            .collect()
    }

    fn into_record(draft: &SupportDraft, uploaded: &Uploaded) -> Result<NewRecord, ValidationError> {
        Ok(NewRecord::Support(NewSupport {
            category: draft.category,
            name: trimmed(&draft.name),
            age: draft.parsed_age()?,
            location: trimmed(&draft.location),
            story: trimmed(&draft.story),
            image_url: uploaded.url("image"),
        }))
    }
}

/// Document resources upload the document; link resources only their link.
/// A thumbnail is uploaded for either type.
pub struct ResourceForm;

impl FormKind for ResourceForm {
    type Draft = ResourceDraft;

    const COLLECTION: Collection = Collection::Resources;

    fn upload_fields(draft: &ResourceDraft) -> Vec<UploadField<'_>> {
        let mut fields = Vec::new();
        if let (ResourceType::Document, Some(file)) = (draft.resource_type, &draft.document) {
            fields.push(UploadField {
                field: "document",
                route: UploadRoute::Document,
                file,
            });
        }
        if let Some(file) = &draft.thumbnail {
            fields.push(UploadField {
                field: "thumbnail",
                route: UploadRoute::Image,
                file,
            });
        }
        fields
    }

    fn into_record(draft: &ResourceDraft, uploaded: &Uploaded) -> Result<NewRecord, ValidationError> {
        let document_url = match draft.resource_type {
            ResourceType::Document => uploaded.url("document"),
            ResourceType::Link => None,
        };
        Ok(NewRecord::Resource(NewResource {
            name: trimmed(&draft.name),
            description: trimmed(&draft.description),
            resource_type: draft.resource_type,
            resource_url: draft.link_url(),
            document_url,
            thumbnail_url: uploaded.url("thumbnail"),
        }))
    }
}
