//! Constants for the download module (backend routes).

/// Path prefix of the backend download route; the encoded link follows it.
pub const DOWNLOAD_ROUTE: &str = "/download/";

/// Backend liveness route.
pub const HEALTHCHECK_ROUTE: &str = "/healthcheck";
