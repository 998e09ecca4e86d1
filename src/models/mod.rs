pub mod request;
pub mod sample;
pub mod species;

pub use request::{BackendErrorBody, ExploreRequest};
pub use sample::sample_records;
pub use species::{
    AudioRecording, INaturalist, ObservationCount, Species, SpeciesAttributes, SpeciesError,
    TaxonDetails,
};
