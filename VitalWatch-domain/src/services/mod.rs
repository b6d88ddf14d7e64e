// Services that implement the vitals pipeline

pub mod dispatcher;
pub mod evaluator;
pub mod normalizer;
pub mod vitals;

pub use dispatcher::{AlertDispatch, AlertDispatcher, DispatchError};
pub use vitals::{
    create_default_vitals_service, create_vitals_service_with_storage, provider_from_env,
    VitalsService, VitalsServiceError, VitalsServiceTrait,
};

#[cfg(feature = "mock")]
pub use vitals::create_mock_vitals_service;
