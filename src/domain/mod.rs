pub mod attachments;
pub mod configuration;
pub mod constraints;
pub mod error;
pub mod parse;
pub mod phid;
pub mod record;
pub mod transactions;

pub use attachments::{
    Attachment, AttachmentFlags, ProjectAttachment, TaskAttachment, UserAttachment,
    attachment_flags,
};
pub use configuration::{ConduitConfig, ConduitConfigFile};
pub use constraints::{
    FilterSpec, ProjectConstraints, ProjectSearchForm, TaskConstraints, TaskSearchForm,
    TaskTriggerForm, UserConstraints, UserSearchForm,
};
pub use error::AppError;
pub use phid::{ObjectIdentifier, Phid, PhidKind, validate_phid_kind};
pub use record::{ConduitObject, EditResult, Record};
pub use transactions::{RelationEdit, TaskMutation, TaskMutationForm, Transaction};
