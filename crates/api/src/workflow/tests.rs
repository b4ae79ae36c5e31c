use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use assert_matches::assert_matches;
use outreach_core::content::{
    ImpactDraft, LocalFile, MediaType, ResourceDraft, ResourceType, ServiceDraft, SupportCategory,
    SupportDraft,
};
use outreach_db::models::{NewService, Record};
use outreach_db::store::MemoryContentStore;

use super::*;

// ---------------------------------------------------------------------------
// Fakes
// ---------------------------------------------------------------------------

/// Records every call; fails on demand.
#[derive(Default)]
struct FakeUploader {
    calls: AtomicUsize,
    fail: bool,
    routes: Mutex<Vec<UploadRoute>>,
}

impl FakeUploader {
    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl BlobUploader for FakeUploader {
    async fn upload(
        &self,
        file: &LocalFile,
        route: UploadRoute,
    ) -> Result<UploadedFile, UploadError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        self.routes.lock().unwrap().push(route);
        if self.fail {
            return Err(UploadError::Service("connection reset".into()));
        }
        let name = if n == 0 { "x".to_string() } else { format!("x{n}") };
        let ext = file.file_name.rsplit('.').next().unwrap_or("bin");
        Ok(UploadedFile {
            url: format!("https://cdn/{name}.{ext}"),
            key: format!("{}/{name}.{ext}", route.key_prefix()),
        })
    }
}

/// Wraps the in-memory store, counting writes and optionally failing them.
#[derive(Default)]
struct CountingStore {
    inner: MemoryContentStore,
    writes: AtomicUsize,
    fail: bool,
    last: Mutex<Option<NewRecord>>,
}

impl CountingStore {
    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn last(&self) -> Option<NewRecord> {
        self.last.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl ContentStore for CountingStore {
    async fn create(&self, record: NewRecord) -> Result<DbId, StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap() = Some(record.clone());
        if self.fail {
            return Err(StoreError::Constraint("unavailable".into()));
        }
        self.inner.create(record).await
    }

    async fn update(&self, id: DbId, record: NewRecord) -> Result<DbId, StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap() = Some(record.clone());
        if self.fail {
            return Err(StoreError::Constraint("unavailable".into()));
        }
        self.inner.update(id, record).await
    }

    async fn find(&self, collection: Collection, id: DbId) -> Result<Option<Record>, StoreError> {
        self.inner.find(collection, id).await
    }

    async fn list(&self, collection: Collection) -> Result<Vec<Record>, StoreError> {
        self.inner.list(collection).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

struct Harness<K: FormKind> {
    workflow: FormWorkflow<K>,
    store: Arc<CountingStore>,
    uploader: Arc<FakeUploader>,
}

fn harness<K: FormKind>(
    draft: K::Draft,
    store: CountingStore,
    uploader: FakeUploader,
) -> Harness<K> {
    let store = Arc::new(store);
    let uploader = Arc::new(uploader);
    let workflow = FormWorkflow::<K>::with_draft(draft, store.clone(), uploader.clone());
    Harness {
        workflow,
        store,
        uploader,
    }
}

fn png(size: usize) -> LocalFile {
    LocalFile::new("wells.png", "image/png", vec![0u8; size])
}

fn clean_water() -> ServiceDraft {
    ServiceDraft {
        project_name: "Clean Water".into(),
        description: "Wells for 3 villages".into(),
        image: Some(png(2 * 1024 * 1024)),
    }
}

// ---------------------------------------------------------------------------
// Validation gates every side effect
// ---------------------------------------------------------------------------

#[tokio::test]
async fn invalid_draft_makes_no_calls() {
    let mut draft = clean_water();
    draft.description = "   ".into();
    let mut h = harness::<ServiceForm>(draft, CountingStore::default(), FakeUploader::default());

    assert!(!h.workflow.can_submit(Target::Create));
    let err = h.workflow.submit(Target::Create).await.unwrap_err();

    assert_matches!(&err, SubmitError::Validation(v) if v.field == "description");
    assert_eq!(h.uploader.calls(), 0);
    assert_eq!(h.store.writes(), 0);
    assert_eq!(h.workflow.draft().project_name, "Clean Water");
}

#[tokio::test]
async fn out_of_range_age_is_rejected_without_network() {
    let draft = SupportDraft {
        category: SupportCategory::Mother,
        name: "Amina".into(),
        age: "200".into(),
        location: "Kampala".into(),
        story: "Needs a safe place to give birth".into(),
        image: None,
    };
    let mut h = harness::<SupportForm>(draft, CountingStore::default(), FakeUploader::default());

    let err = h.workflow.submit(Target::Create).await.unwrap_err();

    assert_matches!(&err, SubmitError::Validation(v) if v.field == "age");
    assert!(err.toast().contains("age"));
    assert_eq!(h.uploader.calls(), 0);
    assert_eq!(h.store.writes(), 0);
}

#[tokio::test]
async fn boundary_ages_are_accepted() {
    for age in ["0", "150", " 42 "] {
        let draft = SupportDraft {
            name: "Baby".into(),
            age: age.into(),
            location: "Gulu".into(),
            story: "Story".into(),
            ..SupportDraft::default()
        };
        let mut h =
            harness::<SupportForm>(draft, CountingStore::default(), FakeUploader::default());
        h.workflow.submit(Target::Create).await.unwrap();
        assert_matches!(h.store.last(), Some(NewRecord::Support(s)) if s.age == age.trim().parse::<i32>().unwrap());
    }
}

// ---------------------------------------------------------------------------
// Upload-then-persist ordering
// ---------------------------------------------------------------------------

#[tokio::test]
async fn clean_water_end_to_end() {
    let mut h = harness::<ServiceForm>(clean_water(), CountingStore::default(), FakeUploader::default());

    let id = h.workflow.submit(Target::Create).await.unwrap();

    assert_eq!(h.uploader.calls(), 1);
    assert_eq!(
        h.store.last(),
        Some(NewRecord::Service(NewService {
            project_name: "Clean Water".into(),
            description: "Wells for 3 villages".into(),
            image_url: Some("https://cdn/x.png".into()),
        }))
    );
    assert!(h.store.find(Collection::Services, id).await.unwrap().is_some());

    let draft = h.workflow.draft();
    assert!(draft.project_name.is_empty());
    assert!(draft.description.is_empty());
    assert!(draft.image.is_none());
    assert_eq!(
        ServiceForm::success_message(Target::Create),
        "Service created successfully!"
    );
}

#[tokio::test]
async fn upload_failure_skips_persist_and_keeps_draft() {
    let mut h = harness::<ServiceForm>(clean_water(), CountingStore::default(), FakeUploader::failing());

    let err = h.workflow.submit(Target::Create).await.unwrap_err();

    assert_matches!(err, SubmitError::Upload { field: "image", .. });
    assert_eq!(h.uploader.calls(), 1);
    assert_eq!(h.store.writes(), 0);
    assert_eq!(h.workflow.draft().project_name, "Clean Water");
    assert!(h.workflow.draft().image.is_some());
}

#[tokio::test]
async fn persist_failure_reports_orphaned_blob_and_keeps_draft() {
    let mut h = harness::<ServiceForm>(clean_water(), CountingStore::failing(), FakeUploader::default());

    let err = h.workflow.submit(Target::Create).await.unwrap_err();

    assert_eq!(err.toast(), "Failed to create service. Please try again.");
    assert_matches!(
        err,
        SubmitError::Persist { orphaned, .. } if orphaned == vec!["images/x.png".to_string()]
    );
    assert_eq!(h.store.writes(), 1);
    assert_eq!(h.workflow.draft().description, "Wells for 3 villages");
}

#[tokio::test]
async fn service_without_image_skips_upload() {
    let mut draft = clean_water();
    draft.image = None;
    let mut h = harness::<ServiceForm>(draft, CountingStore::default(), FakeUploader::default());

    h.workflow.submit(Target::Create).await.unwrap();

    assert_eq!(h.uploader.calls(), 0);
    assert_matches!(h.store.last(), Some(NewRecord::Service(s)) if s.image_url.is_none());
}

// ---------------------------------------------------------------------------
// Per-type rules
// ---------------------------------------------------------------------------

#[tokio::test]
async fn video_story_needs_url_not_file() {
    let draft = ImpactDraft {
        heading: "Harvest".into(),
        description: "A season in pictures".into(),
        media_type: MediaType::Video,
        media_url: String::new(),
        image: None,
    };
    let mut h = harness::<ImpactForm>(draft, CountingStore::default(), FakeUploader::default());
    let err = h.workflow.submit(Target::Create).await.unwrap_err();
    assert_matches!(err, SubmitError::Validation(v) if v.field == "mediaUrl");

    h.workflow.draft_mut().media_url = " https://video.example.org/harvest ".into();
    h.workflow.draft_mut().image = Some(png(16));
    h.workflow.submit(Target::Create).await.unwrap();

    assert_eq!(h.uploader.calls(), 0, "video stories ignore attached images");
    assert_matches!(
        h.store.last(),
        Some(NewRecord::Impact(i))
            if i.media_type == MediaType::Video
                && i.media_url.as_deref() == Some("https://video.example.org/harvest")
    );
}

#[tokio::test]
async fn image_story_may_omit_file_on_update_only() {
    let draft = ImpactDraft {
        heading: "Wells".into(),
        description: "Done".into(),
        ..ImpactDraft::default()
    };
    let h = harness::<ImpactForm>(draft, CountingStore::default(), FakeUploader::default());

    assert!(!h.workflow.can_submit(Target::Create));
    assert!(h.workflow.can_submit(Target::Update(1)));
}

#[tokio::test]
async fn document_resource_requires_file_and_link_requires_url() {
    let draft = ResourceDraft {
        name: "Annual report".into(),
        description: "2025".into(),
        resource_type: ResourceType::Document,
        ..ResourceDraft::default()
    };
    let mut h = harness::<ResourceForm>(draft, CountingStore::default(), FakeUploader::default());

    let err = h.workflow.submit(Target::Create).await.unwrap_err();
    assert_matches!(err, SubmitError::Validation(v) if v.field == "document");

    h.workflow.draft_mut().resource_type = ResourceType::Link;
    let err = h.workflow.submit(Target::Create).await.unwrap_err();
    assert_matches!(err, SubmitError::Validation(v) if v.field == "resourceUrl");

    h.workflow.draft_mut().resource_url = "https://example.org/report".into();
    h.workflow.submit(Target::Create).await.unwrap();
    assert_eq!(h.uploader.calls(), 0);
    assert_eq!(h.store.writes(), 1);
}

#[tokio::test]
async fn resource_uploads_document_then_thumbnail() {
    let draft = ResourceDraft {
        name: "Annual report".into(),
        description: "2025".into(),
        resource_type: ResourceType::Document,
        document: Some(LocalFile::new("report.pdf", "application/pdf", vec![1u8; 64])),
        thumbnail: Some(png(16)),
        ..ResourceDraft::default()
    };
    let mut h = harness::<ResourceForm>(draft, CountingStore::default(), FakeUploader::default());

    h.workflow.submit(Target::Create).await.unwrap();

    assert_eq!(
        *h.uploader.routes.lock().unwrap(),
        vec![UploadRoute::Document, UploadRoute::Image]
    );
    assert_matches!(
        h.store.last(),
        Some(NewRecord::Resource(r))
            if r.document_url.as_deref() == Some("https://cdn/x.pdf")
                && r.thumbnail_url.as_deref() == Some("https://cdn/x1.png")
                && r.resource_url.is_none()
    );
}

#[tokio::test]
async fn update_of_unknown_record_is_persist_error() {
    let mut draft = clean_water();
    draft.image = None;
    let mut h = harness::<ServiceForm>(draft, CountingStore::default(), FakeUploader::default());

    let err = h.workflow.submit(Target::Update(404)).await.unwrap_err();

    assert_matches!(
        err,
        SubmitError::Persist { source: StoreError::NotFound { id: 404, .. }, .. }
    );
    assert_eq!(
        ServiceForm::success_message(Target::Update(1)),
        "Service updated successfully!"
    );
}
