//! Type definition module

mod account;
mod candidate;
mod layout;
mod message;
mod session;
mod table;
mod update;
mod view;

pub use account::{
    normalize_domain, Account, AccountDetails, AccountDraft, AccountKey, AccountSummary,
};
pub use candidate::{
    CandidateEvent, CandidateKind, CandidateStatus, CredentialCandidate, HostEvent,
};
pub use layout::{LayoutBox, MountRect};
pub use message::{MessageLevel, UserMessage};
pub use session::{SessionContext, SessionHandle};
pub use table::{PasswordTable, RowAction, TableRow};
pub use update::{DownloadProgress, UpdateInfo, UpdateState};
pub use view::{Destination, View, ViewRequest};
