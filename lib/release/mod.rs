mod locate;
mod publish;
mod reconcile;
mod upload;

pub use self::locate::{ReleaseLookup, get_release_by_tag};
pub use self::publish::{PublishReport, Publisher};
pub use self::reconcile::{
    ReconcileSettings, ReleaseOutcome, ReleasePlan, delete_release_if_exists, plan_release,
    reconcile_release,
};
pub use self::upload::{UploadProgress, UploadReport, upload_assets};
