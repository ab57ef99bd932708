pub mod auth_service;
pub mod condominium_service;
pub mod email_service;
pub mod financial_service;
pub mod invitation_service;
pub mod models;
pub mod priority_service;
pub mod suggestion_service;

/// Message returned when a submission names an unknown condominium.
pub(crate) const NAME_MISMATCH: &str =
    "The name of the condominium doesn't match with any of them.";
