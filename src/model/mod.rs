//! Entity data model: records, form drafts, and the enum-like string values
//! the original wire format carries (Portuguese labels included).

mod client;
mod process;
mod technician;

pub use client::{Client, ClientDraft, CLIENT_FIELDS};
pub use process::{
    Priority, Process, ProcessDraft, ProcessStatus, CLIENT_OPTIONS, PROCESS_FIELDS,
    PROCESS_TYPE_OPTIONS, RESPONSIBLE_USER_OPTIONS,
};
pub use technician::{Technician, TechnicianDraft, SPECIALIZATION_OPTIONS, TECHNICIAN_FIELDS};
