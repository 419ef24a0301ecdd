pub(crate) mod auth_service;
pub(crate) mod content_service;
pub(crate) mod identity_service;
