//! Core data structures shared by the repository, migration and API crates.

pub mod analytics;
pub mod dataset;
pub mod documents;
pub mod entities;
pub mod response;
pub mod submission;
pub mod workshop;

pub use dataset::{RelationalDataset, TableCounts};
pub use documents::{
    DocumentSet, DocumentStoreStats, EmbeddedSponsor, EmbeddedWorkshop, EventDocument,
    EventRegistration, EventSnapshot, EventVenue, IndexInfo, ParticipantDetails,
    ParticipantDocument, ParticipantRegistration, ParticipantSubmission, PersonSnapshot,
    SubmissionDocument, SubmissionEvaluation, VenueSnapshot,
};
pub use entities::{
    Creates, Evaluates, HackathonEvent, Judge, Participant, Person, Registration, Sponsor,
    Submission, Supports, Venue, Workshop,
};
pub use response::{ApiResponse, ErrorResponse, HealthStatus};
pub use submission::{
    AvailableEvent, CreateSubmissionRequest, EventParticipant, NewSubmission, ParticipantListing,
    SubmissionSummary, SubmissionType,
};
pub use workshop::{
    next_workshop_number, CreateWorkshopRequest, EventWorkshopCount, NewWorkshop,
    UpdateWorkshopRequest, WorkshopChanges, WorkshopDetails, WorkshopNumberExhausted,
};
