//! Entity models for the lab-asset domain
//!
//! One module per entity. Wire names are the legacy camelCase ones the
//! existing clients send, so every model carries
//! `#[serde(rename_all = "camelCase")]` plus explicit renames for the
//! handful of fields that never followed that convention (`duedate`,
//! `createdby`).

pub mod analytics;
pub mod asset;
pub mod department;
pub mod institute;
pub mod laboratory;
pub mod organisation;
pub mod procedure;
pub mod report;
pub mod role;
pub mod run;
pub mod script;
pub mod user;

pub use analytics::{Analytics, AnalyticsChannel, AnalyticsChart, ChartAnnotation, CreateAnalytics};
pub use asset::{Asset, CreateAsset};
pub use department::{CreateDepartment, Department};
pub use institute::{CreateInstitute, Institute};
pub use laboratory::{CreateLaboratory, Laboratory};
pub use organisation::{CreateOrganisation, Organisation};
pub use procedure::{CreateProcedure, Procedure, UpdateProcedure};
pub use report::{CreateReport, Report};
pub use role::{CreateRole, PermissionAction, PermissionEffect, PermissionMap, Role};
pub use run::{CreateRun, Run, UpdateRun};
pub use script::{CreateScript, Script};
pub use user::{CreateUser, UpdateUser, User};

pub(crate) fn default_true() -> bool {
    true
}
